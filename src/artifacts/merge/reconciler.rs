//! Three-way merge reconciliation
//!
//! For every path touched by either side, the reconciler compares the blob
//! recorded at the split point (base), at the current head (ours) and at the
//! merge target (theirs), and decides whether the merged snapshot keeps the
//! current version, takes the other side's version, removes the file or
//! synthesizes a conflict file.
//!
//! The decision table treats blob ids as opaque: two files are "the same"
//! exactly when their blob ids are equal. Only the side that changed relative
//! to the base wins; when both sides changed differently the path conflicts.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// What the merged snapshot does with a single path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Keep the current branch's version (or continued absence)
    Keep,
    /// Take the target branch's blob and check it out
    TakeOther(ObjectId),
    /// Drop the file from the snapshot and the working tree
    Remove,
    /// Both sides changed the path incompatibly; synthesize a conflict file
    Conflict {
        ours: Option<ObjectId>,
        theirs: Option<ObjectId>,
    },
}

impl MergeAction {
    pub fn is_conflict(&self) -> bool {
        matches!(self, MergeAction::Conflict { .. })
    }
}

/// Union of paths present in any of the three snapshots, sorted
pub fn candidate_paths<'a>(
    base: &'a BTreeMap<String, ObjectId>,
    ours: &'a BTreeMap<String, ObjectId>,
    theirs: &'a BTreeMap<String, ObjectId>,
) -> BTreeSet<&'a str> {
    base.keys()
        .chain(ours.keys())
        .chain(theirs.keys())
        .map(String::as_str)
        .collect()
}

/// Classify one path by its blob at the split point, head and target
pub fn classify(
    ours: Option<&ObjectId>,
    base: Option<&ObjectId>,
    theirs: Option<&ObjectId>,
) -> MergeAction {
    match (ours, base, theirs) {
        // absent on both sides now, whatever the base says
        (None, _, None) => MergeAction::Keep,

        // we deleted, they left it untouched: deletion wins
        (None, Some(base), Some(theirs)) if theirs == base => MergeAction::Keep,

        // only they created it
        (None, None, Some(theirs)) => MergeAction::TakeOther(theirs.clone()),

        // we deleted, they modified
        (None, Some(_), Some(theirs)) => MergeAction::Conflict {
            ours: None,
            theirs: Some(theirs.clone()),
        },

        // both created it with different content
        (Some(ours), None, Some(theirs)) if theirs != ours => MergeAction::Conflict {
            ours: Some(ours.clone()),
            theirs: Some(theirs.clone()),
        },

        // only we created it, or both created identical content
        (Some(_), None, _) => MergeAction::Keep,

        // only they modified it
        (Some(ours), Some(base), Some(theirs)) if ours == base && theirs != base => {
            MergeAction::TakeOther(theirs.clone())
        }

        // they deleted, we left it untouched
        (Some(ours), Some(base), None) if ours == base => MergeAction::Remove,

        // both sides diverged from the base in different directions
        (Some(ours), Some(base), theirs)
            if ours != base && theirs != Some(base) && theirs != Some(ours) =>
        {
            MergeAction::Conflict {
                ours: Some(ours.clone()),
                theirs: theirs.cloned(),
            }
        }

        // unchanged on their side, or both sides made the same change
        _ => MergeAction::Keep,
    }
}

/// Synthesize the content of a conflict file
///
/// The two sides are glued in verbatim; a side that deleted the file
/// contributes the empty string. No newline is inserted between a side's
/// content and the following marker.
pub fn conflict_text(ours: &str, theirs: &str) -> String {
    format!("<<<<<<< HEAD\n{ours}=======\n{theirs}>>>>>>>\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn oid(seed: &str) -> ObjectId {
        ObjectId::hash_bytes(seed.as_bytes())
    }

    #[test]
    fn untouched_by_them_is_kept() {
        let base = oid("v1");
        let ours = oid("v2");
        assert_eq!(
            classify(Some(&ours), Some(&base), Some(&base)),
            MergeAction::Keep
        );
        assert_eq!(
            classify(Some(&base), Some(&base), Some(&base)),
            MergeAction::Keep
        );
    }

    #[test]
    fn their_modification_is_taken() {
        let base = oid("v1");
        let theirs = oid("v2");
        assert_eq!(
            classify(Some(&base), Some(&base), Some(&theirs)),
            MergeAction::TakeOther(theirs)
        );
    }

    #[test]
    fn their_creation_is_taken() {
        let theirs = oid("new");
        assert_eq!(
            classify(None, None, Some(&theirs)),
            MergeAction::TakeOther(theirs)
        );
    }

    #[test]
    fn our_creation_is_kept() {
        let ours = oid("new");
        assert_eq!(classify(Some(&ours), None, None), MergeAction::Keep);
    }

    #[test]
    fn their_deletion_of_untouched_file_removes_it() {
        let base = oid("v1");
        assert_eq!(
            classify(Some(&base), Some(&base), None),
            MergeAction::Remove
        );
    }

    #[test]
    fn our_deletion_of_their_untouched_file_stays_deleted() {
        let base = oid("v1");
        assert_eq!(classify(None, Some(&base), Some(&base)), MergeAction::Keep);
    }

    #[test]
    fn deletion_on_both_sides_is_kept() {
        let base = oid("v1");
        assert_eq!(classify(None, Some(&base), None), MergeAction::Keep);
        assert_eq!(classify(None, None, None), MergeAction::Keep);
    }

    #[test]
    fn identical_change_on_both_sides_is_kept() {
        let base = oid("v1");
        let both = oid("v2");
        assert_eq!(
            classify(Some(&both), Some(&base), Some(&both)),
            MergeAction::Keep
        );
        assert_eq!(classify(Some(&both), None, Some(&both)), MergeAction::Keep);
    }

    #[rstest]
    #[case::both_modified(Some("v2"), Some("v1"), Some("v3"))]
    #[case::we_modified_they_deleted(Some("v2"), Some("v1"), None)]
    #[case::we_deleted_they_modified(None, Some("v1"), Some("v3"))]
    #[case::both_created_differently(Some("v2"), None, Some("v3"))]
    fn divergent_changes_conflict(
        #[case] ours: Option<&str>,
        #[case] base: Option<&str>,
        #[case] theirs: Option<&str>,
    ) {
        let ours = ours.map(oid);
        let base = base.map(oid);
        let theirs = theirs.map(oid);

        let action = classify(ours.as_ref(), base.as_ref(), theirs.as_ref());
        assert_eq!(
            action,
            MergeAction::Conflict {
                ours: ours.clone(),
                theirs: theirs.clone(),
            }
        );
        assert!(action.is_conflict());
    }

    #[test]
    fn candidate_paths_union_all_three_snapshots() {
        let base = BTreeMap::from([("a.txt".to_string(), oid("a"))]);
        let ours = BTreeMap::from([("b.txt".to_string(), oid("b"))]);
        let theirs = BTreeMap::from([
            ("a.txt".to_string(), oid("a2")),
            ("c.txt".to_string(), oid("c")),
        ]);

        let paths = candidate_paths(&base, &ours, &theirs);
        assert_eq!(
            paths.into_iter().collect::<Vec<_>>(),
            vec!["a.txt", "b.txt", "c.txt"]
        );
    }

    #[test]
    fn conflict_text_glues_sides_without_extra_newlines() {
        assert_eq!(
            conflict_text("ours\n", "theirs\n"),
            "<<<<<<< HEAD\nours\n=======\ntheirs\n>>>>>>>\n"
        );
        // a deleted side contributes nothing between the markers
        assert_eq!(
            conflict_text("ours\n", ""),
            "<<<<<<< HEAD\nours\n=======\n>>>>>>>\n"
        );
        // content without a trailing newline runs into the marker
        assert_eq!(
            conflict_text("ours", "theirs"),
            "<<<<<<< HEAD\nours=======\ntheirs>>>>>>>\n"
        );
    }
}
