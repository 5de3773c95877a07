//! Repository areas
//!
//! Each area owns one slice of on-disk state:
//! - [`database::Database`]: the content-addressed object store under `.nit/objects`
//! - [`index::Index`]: the staging tables under `.nit/index`
//! - [`refs::Refs`]: HEAD and the branch table under `.nit/refs/heads`
//! - [`workspace::Workspace`]: the working tree around `.nit`
//! - [`repository::Repository`]: the facade tying the areas together

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
