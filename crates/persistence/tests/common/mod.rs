//! Test infrastructure for the persistence layer.
//!
//! Fixtures seed rows with fixed ids and timestamps so page boundaries are
//! deterministic; assertions cover cursor rejections and full traversals.

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;
