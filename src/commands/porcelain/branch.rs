use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::EngineError;

impl Repository {
    /// Create a branch pointing at the current commit
    ///
    /// The new branch is not checked out.
    pub fn create_branch(&self, name: &str) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(name.to_string())?;

        if self.refs().branch_exists(&branch) {
            return Err(EngineError::BranchExists(name.to_string()).into());
        }

        let head_id = self.head_commit_id()?;
        self.refs().update_branch(&branch, &head_id)
    }

    /// Delete a branch pointer
    ///
    /// Only the pointer goes away; the commits it pointed at stay in the
    /// store.
    pub fn delete_branch(&self, name: &str) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(name.to_string())
            .map_err(|_| EngineError::BranchNotFound(name.to_string()))?;

        if !self.refs().branch_exists(&branch) {
            return Err(EngineError::BranchNotFound(name.to_string()).into());
        }
        if self.current_branch()? == branch {
            return Err(EngineError::CannotDeleteCurrent(name.to_string()).into());
        }

        self.refs().delete_branch(&branch)
    }
}
