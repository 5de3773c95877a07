use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print the first-parent history of the current branch, newest first
    ///
    /// Merge commits appear once; their second parent's history is not
    /// interleaved.
    pub fn log(&self) -> anyhow::Result<()> {
        let mut writer = self.writer();
        let mut next = Some(self.head_commit_id()?);

        while let Some(commit_id) = next {
            let commit = self.database().load_commit(&commit_id)?;

            writeln!(writer, "===")?;
            writeln!(writer, "commit {commit_id}")?;
            write!(writer, "{}", commit.render())?;
            writeln!(writer)?;

            next = commit.first_parent().cloned();
        }

        Ok(())
    }
}
