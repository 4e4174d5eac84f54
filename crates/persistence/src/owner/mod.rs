//! Ownership of stored records.
//!
//! Every record in the store belongs to exactly one principal, identified by
//! an [`OwnerId`]. The identity layer resolves the owner for each request;
//! this crate only carries the identifier through queries and cursors.

mod id;

pub use id::OwnerId;
