//! SQLite backend implementation.
//!
//! This module provides a SQLite implementation of [`WateringStorage`] and of
//! [`RowSource`] for every listing. It supports both in-memory databases
//! (great for testing) and file-based databases.
//!
//! # Example
//!
//! ```no_run
//! use verdant_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create an in-memory database
//! let backend = SqliteBackend::in_memory()?;
//!
//! // Initialize the schema
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE plants (
//!     id TEXT PRIMARY KEY,
//!     owner_id TEXT NOT NULL,
//!     nickname TEXT NOT NULL,
//!     species_name TEXT NOT NULL,
//!     location TEXT,
//!     notes TEXT,
//!     created_at TEXT NOT NULL   -- 2024-01-01T09:30:00.000000Z
//! );
//!
//! CREATE TABLE watering_tasks (
//!     id TEXT PRIMARY KEY,
//!     owner_id TEXT NOT NULL,
//!     plant_id TEXT NOT NULL REFERENCES plants(id),
//!     due_on TEXT NOT NULL,      -- 2024-01-01
//!     status TEXT NOT NULL,      -- pending | completed | skipped
//!     source TEXT NOT NULL,      -- scheduled | adhoc
//!     completed_at TEXT,
//!     note TEXT,
//!     created_at TEXT NOT NULL
//! );
//!
//! CREATE TABLE watering_plans (
//!     id TEXT PRIMARY KEY,
//!     owner_id TEXT NOT NULL,
//!     plant_id TEXT NOT NULL REFERENCES plants(id),
//!     interval_days INTEGER NOT NULL,
//!     valid_from TEXT NOT NULL,
//!     valid_to TEXT,
//!     created_at TEXT NOT NULL
//! );
//! ```
//!
//! [`WateringStorage`]: crate::core::WateringStorage
//! [`RowSource`]: crate::core::RowSource

mod backend;
mod query_builder;
mod records;
mod schema;
mod source;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use schema::SCHEMA_VERSION;
pub use source::SqliteTable;
