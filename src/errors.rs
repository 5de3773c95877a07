//! Engine error kinds
//!
//! Every user-visible failure of the engine is one of these variants. They are
//! carried inside `anyhow::Error` so operations keep the usual `anyhow::Result`
//! signature while callers (the CLI, tests) can still downcast and inspect the
//! exact failure. Messages are the strings printed to the user; none of these
//! errors are ever retried.

use thiserror::Error;

/// Coarse classification of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input to an otherwise well-formed repository (empty message, empty commit).
    Validation,
    /// A file, branch or commit the user named does not exist.
    NotFound,
    /// The operation would clobber an untracked working file.
    Safety,
    /// The repository is in a state where the operation is meaningless.
    State,
    /// A referenced object is missing from the store; store corruption, not user error.
    ObjectIntegrity,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Not in an initialized nit directory.")]
    NotInitialized,

    #[error("A repository already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("Could not find file {0} in working directory")]
    FileNotInWorkingTree(String),

    #[error("Could not find file {0}")]
    FileNotTracked(String),

    #[error("File does not exist in that commit.")]
    FileNotInCommit(String),

    #[error("A branch with that name does not exist.")]
    BranchNotFound(String),

    #[error("No such branch exists.")]
    NoSuchBranch(String),

    #[error("A branch with that name already exists.")]
    BranchExists(String),

    #[error("Cannot remove the current branch.")]
    CannotDeleteCurrent(String),

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch(String),

    #[error("No commit with that id exists.")]
    CommitNotFound(String),

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("Given branch is an ancestor of the current branch.")]
    AlreadyUpToDate,

    #[error("No common ancestor!")]
    NoCommonAncestor,

    #[error("Object {0} is missing from the object store")]
    ObjectMissing(String),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::EmptyMessage | EngineError::NothingToCommit => ErrorKind::Validation,
            EngineError::FileNotInWorkingTree(_)
            | EngineError::FileNotTracked(_)
            | EngineError::FileNotInCommit(_)
            | EngineError::BranchNotFound(_)
            | EngineError::NoSuchBranch(_)
            | EngineError::CommitNotFound(_) => ErrorKind::NotFound,
            EngineError::UntrackedFileInTheWay => ErrorKind::Safety,
            EngineError::NotInitialized
            | EngineError::AlreadyInitialized
            | EngineError::BranchExists(_)
            | EngineError::CannotDeleteCurrent(_)
            | EngineError::AlreadyOnBranch(_)
            | EngineError::UncommittedChanges
            | EngineError::SelfMerge
            | EngineError::AlreadyUpToDate
            | EngineError::NoCommonAncestor => ErrorKind::State,
            EngineError::ObjectMissing(_) => ErrorKind::ObjectIntegrity,
        }
    }
}
