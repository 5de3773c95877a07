use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

use common::command::{
    branch_oid, init_repository_dir, log_commit_ids, log_output, nit_add, nit_commit,
    run_nit_command, PINNED_DATE_RENDERED,
};
use common::file::{FileSpec, read_file, write_file};

#[rstest]
fn committing_advances_the_branch_pointer(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let before = branch_oid(dir.path(), "master");

    write_file(FileSpec::new(dir.path().join("new.txt"), "fresh".to_string()));
    nit_add(dir.path(), &["new.txt"]);
    nit_commit(dir.path(), "Add new.txt").assert().success();

    let after = branch_oid(dir.path(), "master");
    assert_ne!(before, after);
    assert_eq!(log_commit_ids(dir.path()).first(), Some(&after));

    let log = log_output(dir.path());
    assert!(log.contains("Add new.txt"));
    assert!(log.contains(&format!("Date: {PINNED_DATE_RENDERED}")));
}

#[rstest]
fn empty_message_is_rejected(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("new.txt"), "fresh".to_string()));
    nit_add(dir.path(), &["new.txt"]);

    nit_commit(dir.path(), "")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a commit message."));
}

#[rstest]
fn committing_with_a_clear_index_is_rejected(init_repository_dir: TempDir) {
    nit_commit(init_repository_dir.path(), "Nothing staged")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No changes added to the commit."));
}

#[rstest]
fn committed_snapshots_are_immutable(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let first = branch_oid(dir.path(), "master");

    write_file(FileSpec::new(dir.path().join("1.txt"), "uno".to_string()));
    nit_add(dir.path(), &["1.txt"]);
    nit_commit(dir.path(), "Rewrite 1.txt").assert().success();
    assert_eq!(read_file(&dir.path().join("1.txt")), "uno");

    // the old commit still serves the old content, by abbreviated id
    run_nit_command(
        dir.path(),
        &["checkout", "--file", "1.txt", "--commit", &first[..8]],
    )
    .assert()
    .success();

    assert_eq!(read_file(&dir.path().join("1.txt")), "one");
}
