use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{timestamp_now, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::EngineError;

impl Repository {
    /// Record the staged snapshot as a new commit on the current branch
    pub fn commit(&self, message: &str) -> anyhow::Result<ObjectId> {
        if message.is_empty() {
            return Err(EngineError::EmptyMessage.into());
        }
        if self.index().is_clear() {
            return Err(EngineError::NothingToCommit.into());
        }

        self.finalize_commit(message, None)
    }

    /// Build and persist a commit from the head snapshot plus the index
    ///
    /// Shared with merge, which supplies a second parent and skips the
    /// public validations. Staged blobs were stored when they were staged,
    /// so the new file table only references existing objects.
    pub(crate) fn finalize_commit(
        &self,
        message: &str,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let head_id = self.head_commit_id()?;
        let head = self.database().load_commit(&head_id)?;

        let mut index = self.index();

        let mut files = head.files().clone();
        for path in index.removed() {
            files.remove(path);
        }
        for (path, blob_id) in index.staged() {
            files.insert(path.clone(), blob_id.clone());
        }

        let depth = match &second_parent {
            Some(other_id) => {
                let other = self.database().load_commit(other_id)?;
                head.depth().max(other.depth()) + 1
            }
            None => head.depth() + 1,
        };

        let commit = Commit::new(
            message.to_string(),
            Some(head_id),
            second_parent,
            depth,
            timestamp_now(),
            files,
        );
        let commit_id = self.database().store(&commit)?;

        self.refs()
            .update_branch(&self.current_branch()?, &commit_id)?;

        index.clear();
        index.save()?;

        Ok(commit_id)
    }
}
