use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::status::inspector::Inspector;
use crate::errors::EngineError;
use std::collections::BTreeSet;

impl Repository {
    /// Restore one file from a commit into the working tree
    ///
    /// Without an explicit commit the current head is used. The staging
    /// index is untouched.
    pub fn checkout_file(&self, file_path: &str, commit_ref: Option<&str>) -> anyhow::Result<()> {
        let commit = match commit_ref {
            Some(commit_ref) => self.load_commit_ref(commit_ref)?,
            None => self.head_commit()?,
        };

        let blob_id = commit
            .file(file_path)
            .ok_or_else(|| EngineError::FileNotInCommit(file_path.to_string()))?;

        let blob = self.database().load_blob(blob_id)?;
        self.workspace().write_file(file_path, blob.content())
    }

    /// Switch to another branch, replacing the working tree with its snapshot
    ///
    /// The untracked-overwrite guard runs before any file is touched:
    /// if an untracked file would be replaced with different content, the
    /// checkout aborts with no side effects. Untracked files the target does
    /// not claim survive the switch.
    pub fn checkout_branch(&self, name: &str) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(name.to_string())
            .map_err(|_| EngineError::NoSuchBranch(name.to_string()))?;

        if !self.refs().branch_exists(&branch) {
            return Err(EngineError::NoSuchBranch(name.to_string()).into());
        }
        if self.current_branch()? == branch {
            return Err(EngineError::AlreadyOnBranch(name.to_string()).into());
        }

        let target_id =
            self.branch_commit_id(&branch, || EngineError::NoSuchBranch(name.to_string()))?;
        let target = self.database().load_commit(&target_id)?;

        let head = self.head_commit()?;
        let worktree = self.workspace().snapshot()?;

        let untracked: BTreeSet<String> = {
            let index = self.index();
            let inspector =
                Inspector::new(head.files(), index.staged(), index.removed(), &worktree);

            if !inspector.untracked_in_the_way(target.files()).is_empty() {
                return Err(EngineError::UntrackedFileInTheWay.into());
            }

            inspector.inspect().untracked.into_iter().collect()
        };

        // tracked files the target does not know about disappear
        for path in worktree.keys() {
            if !target.files().contains_key(path) && !untracked.contains(path) {
                self.workspace().remove_file(path)?;
            }
        }

        self.materialize(&target)?;

        let mut index = self.index();
        index.clear();
        index.save()?;

        self.refs().set_head(&branch)
    }

    /// Resolve a possibly-abbreviated commit reference to a loaded commit
    pub(crate) fn load_commit_ref(&self, commit_ref: &str) -> anyhow::Result<Commit> {
        let commit_id = self
            .database()
            .resolve_commit_id(commit_ref)?
            .ok_or_else(|| EngineError::CommitNotFound(commit_ref.to_string()))?;

        self.database().load_commit(&commit_id)
    }

    /// Write every file of a commit's snapshot into the working tree
    pub(crate) fn materialize(&self, commit: &Commit) -> anyhow::Result<()> {
        for (path, blob_id) in commit.files() {
            let blob = self.database().load_blob(blob_id)?;
            self.workspace().write_file(path, blob.content())?;
        }

        Ok(())
    }
}
