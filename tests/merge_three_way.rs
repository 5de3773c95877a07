use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

mod common;

use common::command::{
    branch_oid, init_repository_dir, log_commit_ids, log_output, nit_add, nit_commit, nit_merge,
    run_nit_command,
};
use common::file::{FileSpec, read_file, write_file};

/// History:
///
///       A (base)
///      / \
///     B   C
///     |   |
///  master  feature
///
/// B edits left.txt, C edits right.txt and adds feat.txt; the merge commit
/// combines all three with A as the split point.
#[rstest]
fn divergent_branches_merge_cleanly(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    // Commit A: the shared base
    write_file(FileSpec::new(dir.path().join("left.txt"), "initial\n".to_string()));
    write_file(FileSpec::new(dir.path().join("right.txt"), "initial\n".to_string()));
    nit_add(dir.path(), &["left.txt", "right.txt"]);
    nit_commit(dir.path(), "Commit A - base").assert().success();

    run_nit_command(dir.path(), &["branch", "create", "feature"])
        .assert()
        .success();

    // Commit B on master
    write_file(FileSpec::new(
        dir.path().join("left.txt"),
        "initial\nmaster change\n".to_string(),
    ));
    nit_add(dir.path(), &["left.txt"]);
    nit_commit(dir.path(), "Commit B - master changes")
        .assert()
        .success();
    let master_tip = branch_oid(dir.path(), "master");

    // Commit C on feature
    run_nit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("right.txt"),
        "initial\nfeature change\n".to_string(),
    ));
    write_file(FileSpec::new(
        dir.path().join("feat.txt"),
        "brand new\n".to_string(),
    ));
    nit_add(dir.path(), &["right.txt", "feat.txt"]);
    nit_commit(dir.path(), "Commit C - feature changes")
        .assert()
        .success();
    let feature_tip = branch_oid(dir.path(), "feature");

    run_nit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();

    nit_merge(dir.path(), "feature")
        .assert()
        .success()
        .stdout(predicate::str::contains("conflict").not());

    // both sides of the divergence landed
    assert_eq!(
        read_file(&dir.path().join("left.txt")),
        "initial\nmaster change\n"
    );
    assert_eq!(
        read_file(&dir.path().join("right.txt")),
        "initial\nfeature change\n"
    );
    assert_eq!(read_file(&dir.path().join("feat.txt")), "brand new\n");

    // a real merge commit with both parents, on master
    let merged = branch_oid(dir.path(), "master");
    assert_ne!(merged, master_tip);
    assert_ne!(merged, feature_tip);

    let log = log_output(dir.path());
    assert!(log.contains("Merged feature into master."));
    assert!(log.contains(&format!(
        "Merge: {} {}",
        &master_tip[..7],
        &feature_tip[..7]
    )));
    // first-parent traversal: feature's own commit is not interleaved
    assert!(!log.contains("Commit C - feature changes"));
    assert_eq!(log_commit_ids(dir.path()).first(), Some(&merged));
}

/// A deletion on one side with no edit on the other propagates as a removal.
#[rstest]
fn one_sided_deletions_propagate(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("left.txt"), "keep\n".to_string()));
    write_file(FileSpec::new(dir.path().join("doomed.txt"), "gone\n".to_string()));
    nit_add(dir.path(), &["left.txt", "doomed.txt"]);
    nit_commit(dir.path(), "Base").assert().success();

    run_nit_command(dir.path(), &["branch", "create", "feature"])
        .assert()
        .success();

    // master makes an unrelated edit
    write_file(FileSpec::new(
        dir.path().join("left.txt"),
        "keep\nmore\n".to_string(),
    ));
    nit_add(dir.path(), &["left.txt"]);
    nit_commit(dir.path(), "Edit left.txt").assert().success();

    // feature deletes doomed.txt
    run_nit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    run_nit_command(dir.path(), &["rm", "doomed.txt"])
        .assert()
        .success();
    nit_commit(dir.path(), "Delete doomed.txt")
        .assert()
        .success();

    run_nit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    nit_merge(dir.path(), "feature").assert().success();

    assert!(!dir.path().join("doomed.txt").exists());
    // the merged snapshot no longer tracks it either
    run_nit_command(dir.path(), &["checkout", "--file", "doomed.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "File does not exist in that commit.",
        ));
}
