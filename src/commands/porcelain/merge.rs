use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::merge::reconciler::{candidate_paths, classify, conflict_text, MergeAction};
use crate::artifacts::merge::split_finder::SplitFinder;
use crate::artifacts::merge::MergeOutcome;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::inspector::Inspector;
use crate::errors::EngineError;
use std::collections::HashMap;
use std::io::Write;

impl Repository {
    /// Merge a branch into the current branch
    ///
    /// Preconditions, in order, each aborting with no mutation: the target
    /// branch must exist, the index must be clear, no untracked files may
    /// exist, and the target must differ from the current branch.
    ///
    /// When the split point is the target head the merge is refused as a
    /// no-op; when it is the current head the branch fast-forwards instead
    /// of committing. Otherwise a three-way reconciliation runs and a merge
    /// commit with both parents is created, conflicts included.
    pub fn merge(&self, branch_name: &str) -> anyhow::Result<MergeOutcome> {
        let target_branch = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| EngineError::BranchNotFound(branch_name.to_string()))?;

        if !self.refs().branch_exists(&target_branch) {
            return Err(EngineError::BranchNotFound(branch_name.to_string()).into());
        }
        if !self.index().is_clear() {
            return Err(EngineError::UncommittedChanges.into());
        }

        let head_id = self.head_commit_id()?;
        let head = self.database().load_commit(&head_id)?;
        let worktree = self.workspace().snapshot()?;

        {
            let index = self.index();
            let inspector =
                Inspector::new(head.files(), index.staged(), index.removed(), &worktree);

            // any untracked file blocks a merge, in the way or not
            if !inspector.inspect().untracked.is_empty() {
                return Err(EngineError::UntrackedFileInTheWay.into());
            }
        }

        let current_branch = self.current_branch()?;
        if current_branch == target_branch {
            return Err(EngineError::SelfMerge.into());
        }

        let target_id = self.branch_commit_id(&target_branch, || {
            EngineError::BranchNotFound(branch_name.to_string())
        })?;

        let mut commit_cache = HashMap::new();
        self.load_ancestors(&head_id, &mut commit_cache)?;
        self.load_ancestors(&target_id, &mut commit_cache)?;

        let split_id = {
            let finder = SplitFinder::new(|oid: &ObjectId| {
                commit_cache
                    .get(oid)
                    .map(Commit::slim)
                    .unwrap_or_default()
            });
            finder.find_split_point(&head_id, &target_id)
        }
        .ok_or(EngineError::NoCommonAncestor)?;

        if split_id == target_id {
            return Err(EngineError::AlreadyUpToDate.into());
        }
        if split_id == head_id {
            // switch while HEAD still names the old snapshot, so files the
            // target dropped are deleted; only then move the old pointer
            self.checkout_branch(branch_name)?;
            self.refs().update_branch(&current_branch, &target_id)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(MergeOutcome::FastForwarded);
        }

        let target = self.database().load_commit(&target_id)?;
        let base = self.database().load_commit(&split_id)?;

        let mut conflicted = false;
        for path in candidate_paths(base.files(), head.files(), target.files()) {
            match classify(head.file(path), base.file(path), target.file(path)) {
                MergeAction::Keep => {}
                MergeAction::TakeOther(blob_id) => {
                    let blob = self.database().load_blob(&blob_id)?;
                    self.workspace().write_file(path, blob.content())?;
                    self.index().stage(path.to_string(), blob_id);
                }
                MergeAction::Remove => {
                    self.index().mark_removed(path.to_string());
                    self.workspace().remove_file(path)?;
                }
                MergeAction::Conflict { ours, theirs } => {
                    conflicted = true;
                    let content =
                        conflict_text(&self.blob_content(ours)?, &self.blob_content(theirs)?);

                    let blob_id = self.database().store(&Blob::new(content.clone()))?;
                    self.workspace().write_file(path, &content)?;
                    self.index().stage(path.to_string(), blob_id);
                }
            }
        }
        self.index().save()?;

        let message = format!("Merged {target_branch} into {current_branch}.");
        let merge_commit_id = self.finalize_commit(&message, Some(target_id))?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
            Ok(MergeOutcome::MergedWithConflicts(merge_commit_id))
        } else {
            Ok(MergeOutcome::Merged(merge_commit_id))
        }
    }

    /// Load a commit and all its ancestors into the cache
    fn load_ancestors(
        &self,
        start: &ObjectId,
        cache: &mut HashMap<ObjectId, Commit>,
    ) -> anyhow::Result<()> {
        let mut pending = vec![start.clone()];

        while let Some(commit_id) = pending.pop() {
            if cache.contains_key(&commit_id) {
                continue;
            }

            let commit = self.database().load_commit(&commit_id)?;
            for parent_id in commit.parents() {
                if !cache.contains_key(parent_id) {
                    pending.push(parent_id.clone());
                }
            }
            cache.insert(commit_id, commit);
        }

        Ok(())
    }

    /// A side's content for conflict synthesis; a deleted side is empty
    fn blob_content(&self, blob_id: Option<ObjectId>) -> anyhow::Result<String> {
        match blob_id {
            Some(blob_id) => Ok(self.database().load_blob(&blob_id)?.content().to_string()),
            None => Ok(String::new()),
        }
    }
}
