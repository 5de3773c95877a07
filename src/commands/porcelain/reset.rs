use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::inspector::Inspector;
use crate::errors::EngineError;

impl Repository {
    /// Move the current branch to an arbitrary commit and check it out
    ///
    /// HEAD keeps naming the same branch; only the pointer moves, so the
    /// branch may end up decoupled from its prior ancestry. The same
    /// untracked-overwrite guard as branch checkout runs before any write.
    pub fn reset(&self, commit_ref: &str) -> anyhow::Result<()> {
        let target = self.load_commit_ref(commit_ref)?;
        let target_id = target.object_id()?;

        let head = self.head_commit()?;
        let worktree = self.workspace().snapshot()?;

        {
            let index = self.index();
            let inspector =
                Inspector::new(head.files(), index.staged(), index.removed(), &worktree);

            if !inspector.untracked_in_the_way(target.files()).is_empty() {
                return Err(EngineError::UntrackedFileInTheWay.into());
            }
        }

        // only files the current head tracks are eligible for deletion
        for path in head.files().keys() {
            if !target.files().contains_key(path) {
                self.workspace().remove_file(path)?;
            }
        }

        self.materialize(&target)?;

        let mut index = self.index();
        index.clear();
        index.save()?;

        self.refs()
            .update_branch(&self.current_branch()?, &target_id)
    }
}
