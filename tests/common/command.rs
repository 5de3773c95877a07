use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Frozen commit clock used by every test commit (`NIT_DATE` override)
pub const PINNED_DATE: &str = "2021-01-01 12:00:00 +0000";

/// [`PINNED_DATE`] as the log renders it, in the fixed -0800 offset
pub const PINNED_DATE_RENDERED: &str = "Fri Jan 1 04:00:00 2021 -0800";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// An initialized repository with one commit tracking `1.txt` and `a/2.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_nit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));

    nit_add(repository_dir.path(), &["1.txt", "a/2.txt"]);

    nit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_nit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("nit").expect("Failed to find nit binary");
    cmd.envs(vec![("NO_COLOR", "1")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn nit_add(dir: &Path, paths: &[&str]) {
    for path in paths {
        run_nit_command(dir, &["add", path]).assert().success();
    }
}

pub fn nit_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_nit_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![("NIT_DATE", PINNED_DATE)]);
    cmd
}

pub fn nit_merge(dir: &Path, branch: &str) -> Command {
    let mut cmd = run_nit_command(dir, &["merge", branch]);
    cmd.envs(vec![("NIT_DATE", PINNED_DATE)]);
    cmd
}

/// Raw content of `.nit/HEAD`, trimmed
pub fn head_ref(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".nit").join("HEAD"))
        .expect("Failed to read HEAD")
        .trim()
        .to_string()
}

/// Commit id a branch file points at
pub fn branch_oid(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(".nit").join("refs").join("heads").join(name))
        .unwrap_or_else(|e| panic!("Failed to read branch {}: {}", name, e))
        .trim()
        .to_string()
}

pub fn log_output(dir: &Path) -> String {
    let output = run_nit_command(dir, &["log"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8(output).expect("log output is not valid UTF-8")
}

/// Commit ids from the log, newest first
pub fn log_commit_ids(dir: &Path) -> Vec<String> {
    log_output(dir)
        .lines()
        .filter_map(|line| line.strip_prefix("commit ").map(str::to_string))
        .collect()
}
