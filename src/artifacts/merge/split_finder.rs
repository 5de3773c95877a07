//! Split point finder for three-way merges
//!
//! The split point of two commits is their latest common ancestor: the common
//! ancestor with the greatest depth in the commit graph. Because every commit
//! stores its own depth, the search needs no timestamps and no ordering
//! heuristics; it collects the ancestor set of each side, intersects them and
//! keeps the deepest survivor.
//!
//! ## Debug Logging
//!
//! Build with the `debug_merge` feature to trace the traversal:
//! ```toml
//! [features]
//! debug_merge = []
//! ```

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashMap;

/// Debug logging enabled with the debug_merge feature flag
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(any(feature = "debug_merge"))]
        {
            eprintln!($($arg)*);
        }
    };
}

/// Finds the split point between two commits
///
/// Generic over a commit loader so the search works against any backing store:
/// the on-disk object database in production, an in-memory map in tests. The
/// HRTB-free lifetime parameter ties returned `SlimCommit`s to the loader's
/// cache.
pub struct SplitFinder<'c, CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> SlimCommit<'c>,
{
    commit_loader: CommitLoaderFn,
    _marker: std::marker::PhantomData<&'c ()>,
}

impl<'c, CommitLoaderFn> SplitFinder<'c, CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> SlimCommit<'c>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self {
            commit_loader,
            _marker: std::marker::PhantomData,
        }
    }

    /// Every ancestor of `start` (inclusive), mapped to its stored depth
    ///
    /// Iterative stack traversal following both parent edges; each commit is
    /// visited once even when reachable along several paths.
    fn ancestor_depths(&self, start: &ObjectId) -> HashMap<ObjectId, u64> {
        let mut depths = HashMap::new();
        let mut pending = vec![start.clone()];

        while let Some(commit_id) = pending.pop() {
            if depths.contains_key(&commit_id) {
                continue;
            }

            let commit = (self.commit_loader)(&commit_id);
            debug_log!("Visiting ancestor {} at depth {}", commit_id, commit.depth);
            depths.insert(commit_id, commit.depth);

            for parent_id in commit.parents {
                if !depths.contains_key(parent_id) {
                    pending.push(parent_id.clone());
                }
            }
        }

        depths
    }

    /// Find the latest common ancestor of two commits
    ///
    /// Returns `None` only when the commits share no history at all, which
    /// cannot happen for commits descending from the same root.
    ///
    /// When several common ancestors share the maximum depth (criss-cross
    /// histories), the tie is broken by object id so the result is
    /// deterministic.
    pub fn find_split_point(
        &self,
        head_commit_id: &ObjectId,
        other_commit_id: &ObjectId,
    ) -> Option<ObjectId> {
        let head_ancestors = self.ancestor_depths(head_commit_id);
        let other_ancestors = self.ancestor_depths(other_commit_id);

        let split = head_ancestors
            .into_iter()
            .filter(|(commit_id, _)| other_ancestors.contains_key(commit_id))
            .max_by(|(left_id, left_depth), (right_id, right_depth)| {
                left_depth.cmp(right_depth).then(right_id.cmp(left_id))
            })
            .map(|(commit_id, _)| commit_id);

        debug_log!(
            "Split point of {} and {}: {:?}",
            head_commit_id,
            other_commit_id,
            split
        );

        split
    }
}
