//! Staging index
//!
//! The index carries two tables between commands: paths staged for addition
//! (mapped to the blob already stored for them) and paths staged for removal.
//! It is persisted as JSON at `.nit/index`; an empty or absent file means a
//! clear index.
//!
//! Reads take a shared lock and writes an exclusive one, mirroring how refs
//! are updated.

use crate::artifacts::objects::object_id::ObjectId;
use file_guard::Lock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

/// On-disk shape of the index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct IndexFile {
    staged: BTreeMap<String, ObjectId>,
    removed: BTreeSet<String>,
}

#[derive(Debug, Clone)]
pub struct Index {
    path: Box<Path>,
    staged: BTreeMap<String, ObjectId>,
    removed: BTreeSet<String>,
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            staged: BTreeMap::new(),
            removed: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn staged(&self) -> &BTreeMap<String, ObjectId> {
        &self.staged
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn is_staged(&self, file_path: &str) -> bool {
        self.staged.contains_key(file_path)
    }

    pub fn is_marked_removed(&self, file_path: &str) -> bool {
        self.removed.contains(file_path)
    }

    /// Neither additions nor removals pending
    pub fn is_clear(&self) -> bool {
        self.staged.is_empty() && self.removed.is_empty()
    }

    pub fn stage(&mut self, file_path: String, blob_id: ObjectId) {
        self.removed.remove(&file_path);
        self.staged.insert(file_path, blob_id);
        self.changed = true;
    }

    pub fn unstage(&mut self, file_path: &str) {
        if self.staged.remove(file_path).is_some() {
            self.changed = true;
        }
    }

    pub fn mark_removed(&mut self, file_path: String) {
        self.staged.remove(&file_path);
        self.removed.insert(file_path);
        self.changed = true;
    }

    pub fn unmark_removed(&mut self, file_path: &str) {
        if self.removed.remove(file_path) {
            self.changed = true;
        }
    }

    pub fn clear(&mut self) {
        if !self.staged.is_empty() || !self.removed.is_empty() {
            self.changed = true;
        }
        self.staged.clear();
        self.removed.clear();
    }

    /// Load the index from disk
    ///
    /// An absent index file is created empty so later locks have a file to
    /// attach to.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        if !self.path.exists() {
            self.staged.clear();
            self.removed.clear();
            self.changed = false;
            std::fs::File::create(&self.path)?;
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(&self.path)?;
        let lock = file_guard::lock(&mut index_file, Lock::Shared, 0, 1)?;

        let content = std::fs::read_to_string(&self.path)?;
        drop(lock);

        if content.trim().is_empty() {
            self.staged.clear();
            self.removed.clear();
        } else {
            let file: IndexFile = serde_json::from_str(&content)?;
            self.staged = file.staged;
            self.removed = file.removed;
        }
        self.changed = false;

        Ok(())
    }

    /// Persist the index when it changed since rehydration
    pub fn save(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let file = IndexFile {
            staged: self.staged.clone(),
            removed: self.removed.clone(),
        };
        let content = serde_json::to_string(&file)?;

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(content.as_bytes())?;

        self.changed = false;
        Ok(())
    }
}
