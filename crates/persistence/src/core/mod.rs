//! Core storage traits.
//!
//! - [`RowSource`] - Fetches the rows of one page of a paginated listing
//! - [`WateringStorage`] - Creates plants, tasks and plans
//! - [`VerdantStorage`] - Both of the above for every listing
//!
//! # Trait Hierarchy
//!
//! ```text
//! VerdantStorage
//!     ├── WateringStorage
//!     ├── RowSource<Plants>
//!     ├── RowSource<WateringTasks>
//!     └── RowSource<PlanHistory>
//! ```
//!
//! `VerdantStorage` is implemented automatically for any type that
//! implements its supertraits.

mod source;
mod storage;

pub use source::RowSource;
pub use storage::{VerdantStorage, WateringStorage};
