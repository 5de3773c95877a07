//! Command implementations
//!
//! Every user-facing operation is implemented as a method on
//! [`crate::areas::repository::Repository`], one file per command.

pub mod porcelain;
