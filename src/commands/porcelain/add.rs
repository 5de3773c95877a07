use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::errors::EngineError;

impl Repository {
    /// Stage a working file for the next commit
    ///
    /// Staging a file whose content matches the current head is a no-op that
    /// also drops any stale staged entry. A pending removal of the path is
    /// cancelled either way.
    pub fn add(&self, file_path: &str) -> anyhow::Result<()> {
        if !self.workspace().exists(file_path) {
            return Err(EngineError::FileNotInWorkingTree(file_path.to_string()).into());
        }

        let head = self.head_commit()?;
        let content = self.workspace().read_file(file_path)?;
        let blob = Blob::new(content);
        let blob_id = blob.object_id()?;

        let mut index = self.index();
        index.unmark_removed(file_path);

        if head.file(file_path) == Some(&blob_id) {
            index.unstage(file_path);
        } else {
            let blob_id = self.database().store(&blob)?;
            index.stage(file_path.to_string(), blob_id);
        }

        index.save()
    }
}
