//! Working tree access
//!
//! Files are addressed by repository-relative paths with `/` separators,
//! regardless of platform. The `.nit` directory is invisible to every
//! operation here.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const VCS_DIR: &str = ".nit";

#[derive(Debug, new)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn root(&self) -> &Path {
        &self.path
    }

    fn absolute(&self, file_path: &str) -> PathBuf {
        self.path.join(file_path)
    }

    pub fn exists(&self, file_path: &str) -> bool {
        self.absolute(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &str) -> anyhow::Result<String> {
        let path = self.absolute(file_path);
        std::fs::read_to_string(&path)
            .with_context(|| format!("Unable to read working file {}", path.display()))
    }

    pub fn write_file(&self, file_path: &str, content: &str) -> anyhow::Result<()> {
        let path = self.absolute(file_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create directory {}", parent.display())
            })?;
        }

        std::fs::write(&path, content)
            .with_context(|| format!("Unable to write working file {}", path.display()))
    }

    /// Delete a working file, quietly accepting that it is already gone
    pub fn remove_file(&self, file_path: &str) -> anyhow::Result<()> {
        let path = self.absolute(file_path);

        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Unable to remove working file {}", path.display()))?;
        }

        Ok(())
    }

    /// Hash every working file into a path -> blob id table
    ///
    /// The ids match what [`crate::areas::database::Database::store`] would
    /// produce for the same content, so snapshot entries compare directly
    /// against commit and index tables.
    pub fn snapshot(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let mut snapshot = BTreeMap::new();

        let walker = WalkDir::new(&self.path)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != VCS_DIR);

        for entry in walker {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.path)
                .context("workspace entry outside the workspace root")?;
            let file_path = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            let content = self.read_file(&file_path)?;
            let blob_id = Blob::new(content).object_id()?;
            snapshot.insert(file_path, blob_id);
        }

        Ok(snapshot)
    }
}
