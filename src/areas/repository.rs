//! Repository facade
//!
//! Owns the four areas plus the output writer every operation prints through.
//! Operations load their view of the repository (current branch, head commit,
//! staging index, working snapshot) fresh at the start of each call; nothing
//! is cached across invocations.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::EngineError;
use std::cell::{RefCell, RefMut};
use std::path::Path;

pub const VCS_DIR: &str = ".nit";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Assemble the areas around `path` without requiring `.nit` to exist
    ///
    /// Used by `init`; every other entry point goes through [`Repository::open`].
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);

        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let vcs_path = path.join(VCS_DIR);
        let index = Index::new(vcs_path.join("index").into_boxed_path());
        let database = Database::new(vcs_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(vcs_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    /// Open an existing repository, loading the staging index
    pub fn open(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let repository = Self::new(path, writer)?;

        if !repository.vcs_path().exists() {
            return Err(EngineError::NotInitialized.into());
        }

        repository.index.borrow_mut().rehydrate()?;
        Ok(repository)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn vcs_path(&self) -> Box<Path> {
        self.path.join(VCS_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        self.refs.current_branch()
    }

    pub fn head_commit_id(&self) -> anyhow::Result<ObjectId> {
        self.refs.head_commit_id()
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let head_id = self.head_commit_id()?;
        self.database.load_commit(&head_id)
    }

    /// Look up the commit a branch points at, or the caller-chosen error
    pub fn branch_commit_id(
        &self,
        name: &BranchName,
        missing: impl FnOnce() -> EngineError,
    ) -> anyhow::Result<ObjectId> {
        self.refs
            .read_branch(name)?
            .ok_or_else(|| missing().into())
    }
}
