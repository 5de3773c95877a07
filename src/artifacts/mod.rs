//! Engine data structures and algorithms
//!
//! This module contains the core types and algorithms of the engine:
//!
//! - `branch`: Branch name validation
//! - `merge`: Split-point discovery and three-way reconciliation
//! - `objects`: Immutable object types (blob, commit)
//! - `status`: Working tree status classification

pub mod branch;
pub mod merge;
pub mod objects;
pub mod status;
