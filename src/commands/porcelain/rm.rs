use crate::areas::repository::Repository;
use crate::errors::EngineError;

impl Repository {
    /// Unstage a file and, when the head tracks it, mark it for removal
    ///
    /// Marking for removal also deletes the working copy. Both effects may
    /// apply at once; when neither does the path is unknown and the call
    /// fails.
    pub fn rm(&self, file_path: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        let mut index = self.index();
        let mut applied = false;

        if index.is_staged(file_path) {
            index.unstage(file_path);
            applied = true;
        }

        if head.file(file_path).is_some() {
            index.mark_removed(file_path.to_string());
            self.workspace().remove_file(file_path)?;
            applied = true;
        }

        if !applied {
            return Err(EngineError::FileNotTracked(file_path.to_string()).into());
        }

        index.save()
    }
}
