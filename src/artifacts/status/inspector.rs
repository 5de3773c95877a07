//! Working tree inspector
//!
//! Compares four tables: the head commit's file table, the staging table, the
//! removal table and a snapshot of the working tree. Everything is keyed by
//! repository-relative path and compared by blob id, so the inspector never
//! touches the file system itself.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::report::{ChangeKind, ChangedFile};
use std::collections::{BTreeMap, BTreeSet};

/// Sections of the status report that derive from table comparison
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkingTreeChanges {
    pub not_staged: Vec<ChangedFile>,
    pub untracked: Vec<String>,
}

pub struct Inspector<'a> {
    head_files: &'a BTreeMap<String, ObjectId>,
    staged: &'a BTreeMap<String, ObjectId>,
    removed: &'a BTreeSet<String>,
    worktree: &'a BTreeMap<String, ObjectId>,
}

impl<'a> Inspector<'a> {
    pub fn new(
        head_files: &'a BTreeMap<String, ObjectId>,
        staged: &'a BTreeMap<String, ObjectId>,
        removed: &'a BTreeSet<String>,
        worktree: &'a BTreeMap<String, ObjectId>,
    ) -> Self {
        Self {
            head_files,
            staged,
            removed,
            worktree,
        }
    }

    /// A path is tracked when it is staged, or recorded by the head commit
    /// and not staged for removal
    fn is_tracked(&self, path: &str) -> bool {
        self.staged.contains_key(path)
            || (self.head_files.contains_key(path) && !self.removed.contains(path))
    }

    /// Files changed in the working tree but not reflected in the tables
    ///
    /// A path lands here when:
    /// - staged, but the working copy differs from the staged blob
    /// - staged, but missing from the working tree
    /// - recorded by the head commit, neither staged nor staged for removal,
    ///   and the working copy differs or is missing
    ///
    /// Paths staged for removal are excluded up front: whatever sits in the
    /// working tree under such a path is untracked, never a modification.
    fn not_staged(&self) -> Vec<ChangedFile> {
        let mut changes = BTreeMap::new();

        for (path, staged_id) in self.staged {
            match self.worktree.get(path) {
                Some(working_id) if working_id != staged_id => {
                    changes.insert(path.clone(), ChangeKind::Modified);
                }
                None => {
                    changes.insert(path.clone(), ChangeKind::Deleted);
                }
                _ => {}
            }
        }

        for (path, head_id) in self.head_files {
            if self.staged.contains_key(path) || self.removed.contains(path) {
                continue;
            }
            match self.worktree.get(path) {
                Some(working_id) if working_id != head_id => {
                    changes.insert(path.clone(), ChangeKind::Modified);
                }
                None => {
                    changes.insert(path.clone(), ChangeKind::Deleted);
                }
                _ => {}
            }
        }

        changes
            .into_iter()
            .map(|(path, kind)| ChangedFile { path, kind })
            .collect()
    }

    /// Working files neither staged nor tracked
    ///
    /// A file staged for removal and then re-created shows up here.
    fn untracked(&self) -> Vec<String> {
        self.worktree
            .keys()
            .filter(|path| {
                !self.staged.contains_key(*path)
                    && (!self.head_files.contains_key(*path) || self.removed.contains(*path))
            })
            .cloned()
            .collect()
    }

    pub fn inspect(&self) -> WorkingTreeChanges {
        WorkingTreeChanges {
            not_staged: self.not_staged(),
            untracked: self.untracked(),
        }
    }

    /// True when any table disagrees with any other
    ///
    /// Guards checkout, reset and merge: staged additions, staged removals and
    /// unstaged working-tree edits all count as uncommitted changes.
    pub fn has_uncommitted_changes(&self) -> bool {
        if !self.staged.is_empty() || !self.removed.is_empty() {
            return true;
        }

        let changes = self.inspect();
        !changes.not_staged.is_empty()
    }

    /// Untracked paths that `target_files` would overwrite with different content
    pub fn untracked_in_the_way(&self, target_files: &BTreeMap<String, ObjectId>) -> Vec<String> {
        self.worktree
            .iter()
            .filter(|(path, working_id)| {
                !self.is_tracked(path)
                    && target_files
                        .get(*path)
                        .is_some_and(|target_id| target_id != *working_id)
            })
            .map(|(path, _)| path.clone())
            .collect()
    }
}
