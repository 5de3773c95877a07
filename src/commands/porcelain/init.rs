use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::errors::EngineError;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "master";

impl Repository {
    /// Create the `.nit` layout, the root commit and the default branch
    ///
    /// Every repository shares the same root commit: no parents, depth 0, an
    /// empty file table and the epoch timestamp, so histories always meet at
    /// a common ancestor.
    pub fn init(&self) -> anyhow::Result<()> {
        if self.vcs_path().exists() {
            return Err(EngineError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .nit/objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .nit/refs/heads directory")?;

        let root_id = self.database().store(&Commit::root())?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs().update_branch(&default_branch, &root_id)?;
        self.refs()
            .set_head(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        let index_path = self.index().path().to_path_buf();
        if !index_path.exists() {
            fs::write(&index_path, b"").context("Failed to create .nit/index file")?;
        }

        writeln!(
            self.writer(),
            "Initialized empty nit repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
