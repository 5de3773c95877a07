use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

use common::command::{
    branch_oid, head_ref, init_repository_dir, nit_add, nit_commit, nit_merge, run_nit_command,
};
use common::file::{FileSpec, read_file, write_file};

/// History:
///
///       A (master, feature start)
///       |
///       B (feature)
///
/// Merging feature into master needs no new commit; master catches up and
/// HEAD switches to the merged branch.
#[rstest]
fn merging_a_descendant_fast_forwards(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_nit_command(dir.path(), &["branch", "create", "feature"])
        .assert()
        .success();
    run_nit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.path().join("f.txt"), "feature work".to_string()));
    nit_add(dir.path(), &["f.txt"]);
    nit_commit(dir.path(), "Feature work").assert().success();

    run_nit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();

    nit_merge(dir.path(), "feature")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current branch fast-forwarded."));

    assert_eq!(
        branch_oid(dir.path(), "master"),
        branch_oid(dir.path(), "feature")
    );
    assert_eq!(head_ref(dir.path()), "ref: refs/heads/feature");
    assert_eq!(read_file(&dir.path().join("f.txt")), "feature work");
}

/// A fast-forward is a full checkout of the target: files the target branch
/// deleted must disappear from the working tree, not linger from the old head.
#[rstest]
fn fast_forward_deletes_files_the_target_removed(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_nit_command(dir.path(), &["branch", "create", "feature"])
        .assert()
        .success();
    run_nit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();

    run_nit_command(dir.path(), &["rm", "1.txt"])
        .assert()
        .success();
    nit_commit(dir.path(), "Drop 1.txt").assert().success();

    run_nit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    assert!(dir.path().join("1.txt").exists());

    nit_merge(dir.path(), "feature")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current branch fast-forwarded."));

    assert!(!dir.path().join("1.txt").exists());
    assert_eq!(read_file(&dir.path().join("a").join("2.txt")), "two");
    assert_eq!(
        branch_oid(dir.path(), "master"),
        branch_oid(dir.path(), "feature")
    );
}

#[rstest]
fn merging_an_ancestor_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_nit_command(dir.path(), &["branch", "create", "feature"])
        .assert()
        .success();

    // master moves ahead; feature stays at the split point
    write_file(FileSpec::new(dir.path().join("new.txt"), "ahead".to_string()));
    nit_add(dir.path(), &["new.txt"]);
    nit_commit(dir.path(), "Move master ahead")
        .assert()
        .success();

    let before = branch_oid(dir.path(), "master");

    nit_merge(dir.path(), "feature")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Given branch is an ancestor of the current branch.",
        ));

    assert_eq!(branch_oid(dir.path(), "master"), before);
}
