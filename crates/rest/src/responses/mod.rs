//! Response bodies.
//!
//! - [`ListResponse`] - One page of a listing

mod list;

pub use list::{ListResponse, PageMeta};
