pub mod reconciler;
pub mod split_finder;

use crate::artifacts::objects::object_id::ObjectId;

/// How a merge resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The current branch pointer was moved onto the target commit
    FastForwarded,
    /// A merge commit was created with no conflicting paths
    Merged(ObjectId),
    /// A merge commit was created and at least one path carries conflict markers
    MergedWithConflicts(ObjectId),
}
