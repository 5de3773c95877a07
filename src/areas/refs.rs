//! HEAD and the branch table
//!
//! Branch pointers are plain files under `.nit/refs/heads/<name>` holding a
//! 40-character commit id. HEAD is always a symbolic ref of the form
//! `ref: refs/heads/<name>`; detached heads do not exist here.
//!
//! Ref updates take an exclusive file lock so two processes racing on the
//! same branch cannot interleave partial writes.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing the HEAD symbolic reference
const SYMREF_REGEX: &str = r"^ref: (.+)$";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the vcs directory (`.nit`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.path.join("refs").join("heads").into_boxed_path()
    }

    fn branch_path(&self, name: &BranchName) -> Box<Path> {
        self.heads_path().join(name.as_ref()).into_boxed_path()
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).exists()
    }

    /// The branch HEAD currently points at
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;
        let content = content.trim();

        let captures = regex::Regex::new(SYMREF_REGEX)?
            .captures(content)
            .with_context(|| format!("HEAD is not a symbolic ref: {content}"))?;

        BranchName::try_parse_ref_path(&captures[1])
    }

    /// Point HEAD at a branch
    pub fn set_head(&self, name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), format!("ref: {}", name.as_ref_path()))
    }

    /// The commit a branch points at
    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);

        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    /// Move a branch pointer, creating the branch file when absent
    pub fn update_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.branch_path(name), oid.to_string())
    }

    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<()> {
        let branch_path = self.branch_path(name);

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)
    }

    /// All branch names, sorted lexicographically
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();
        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&heads_path).ok()?;
                let name = relative
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();

        branches.sort();
        Ok(branches)
    }

    /// The commit the current branch points at
    pub fn head_commit_id(&self) -> anyhow::Result<ObjectId> {
        let current = self.current_branch()?;
        self.read_branch(&current)?
            .with_context(|| format!("branch {current} has no commit"))
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}
