//! Verdant Persistence Layer
//!
//! This crate provides keyset (cursor) pagination and storage for the Verdant
//! houseplant watering tracker: plants, watering tasks and watering-plan
//! history.
//!
//! # Features
//!
//! - **Opaque cursors**: versioned, URL-safe tokens bound to the owner, sort
//!   and filters they were minted under
//! - **Keyset pagination**: no offset drift, no counts, stable under inserts
//! - **One generic engine**: every listing is a [`Paginated`](cursor::Paginated)
//!   type, sharing one codec, validator, predicate builder and assembler
//! - **SQLite backend**: pooled connections, owner-scoped indexes
//!
//! # Backend Features
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//!
//! # Architecture
//!
//! - [`owner`] - The requesting principal
//! - [`types`] - Sorting, pages and the storage query model
//! - [`cursor`] - The pagination engine
//! - [`resources`] - Plants, watering tasks and plan history
//! - [`core`](crate::core) - Storage traits
//! - [`backends`] - Backend implementations
//! - [`config`] - Page-size limits
//! - [`error`] - Error types for all operations
//!
//! # Quick Start
//!
//! ```
//! use verdant_persistence::cursor::{ListRequest, assemble_page, build_page};
//! use verdant_persistence::owner::OwnerId;
//! use verdant_persistence::resources::{Plant, PlantFilters, PlantSortField, Plants};
//! use verdant_persistence::types::Sort;
//!
//! let request = ListRequest::<Plants>::new(
//!     OwnerId::new("user-1"),
//!     Sort::asc(PlantSortField::Nickname),
//!     PlantFilters::new(Some("fern".into()), None),
//!     2,
//! )
//! .unwrap();
//!
//! // 1. Build the storage query (first page: no cursor).
//! let query = build_page(&request, None).unwrap();
//! assert_eq!(query.limit, 3);
//!
//! // 2. Fetch up to `query.limit` rows from storage...
//! let rows: Vec<Plant> = Vec::new();
//!
//! // 3. ...and assemble the page.
//! let page = assemble_page(rows, &request).unwrap();
//! assert!(page.next_cursor().is_none());
//! ```
//!
//! # Invalid cursors
//!
//! A cursor that cannot be decoded, or that was minted for another owner,
//! sort or filter set, fails with [`InvalidCursor`](error::InvalidCursor).
//! Clients restart from the first page.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod config;
pub mod core;
pub mod cursor;
pub mod error;
pub mod owner;
pub mod resources;
pub mod types;

pub use config::PaginationConfig;
pub use error::{InvalidCursor, StorageError, StorageResult};
pub use owner::OwnerId;
pub use types::{Page, PageInfo, Sort, SortOrder};

pub use crate::core::{RowSource, VerdantStorage, WateringStorage};
pub use cursor::{ListRequest, Paginated, build_page, paginate};
