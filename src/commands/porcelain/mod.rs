//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository with a root commit
//! - `add`: Stage a file for the next commit
//! - `rm`: Unstage a file or mark it for removal
//! - `commit`: Record the staged snapshot as a new commit
//! - `status`: Show branches, staged files and working tree changes
//! - `log`: Show the first-parent history of the current branch
//! - `checkout`: Switch branches or restore a file from a commit
//! - `branch`: Create or delete branches
//! - `reset`: Move the current branch to a commit and check it out
//! - `merge`: Merge a branch into the current branch

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
