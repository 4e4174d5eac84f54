//! SQLite schema definitions and migrations.

use rusqlite::Connection;

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version > SCHEMA_VERSION {
        return Err(StorageError::Backend(BackendError::MigrationError {
            message: format!(
                "database schema version {} is newer than supported version {}",
                current_version, SCHEMA_VERSION
            ),
        }));
    }

    Ok(())
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| migration_error("create schema_version table", e))?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| migration_error("clear schema_version", e))?;

    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
        .map_err(|e| migration_error("set schema_version", e))?;

    Ok(())
}

/// Create the initial schema (version 1).
///
/// Timestamps are stored as fixed-width RFC 3339 UTC text and dates as
/// `YYYY-MM-DD`, so the default BINARY collation orders them
/// chronologically. Every listing index leads with `owner_id` and ends with
/// `id` to serve `ORDER BY (sort column, id)` within one owner.
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS plants (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            nickname TEXT NOT NULL,
            species_name TEXT NOT NULL,
            location TEXT,
            notes TEXT,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_plants_created
            ON plants(owner_id, created_at, id);
        CREATE INDEX IF NOT EXISTS idx_plants_species
            ON plants(owner_id, species_name, id);
        CREATE INDEX IF NOT EXISTS idx_plants_nickname
            ON plants(owner_id, nickname, id);",
    )
    .map_err(|e| migration_error("create plants table", e))?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS watering_tasks (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            plant_id TEXT NOT NULL REFERENCES plants(id) ON DELETE CASCADE,
            due_on TEXT NOT NULL,
            status TEXT NOT NULL CHECK (status IN ('pending', 'completed', 'skipped')),
            source TEXT NOT NULL CHECK (source IN ('scheduled', 'adhoc')),
            completed_at TEXT,
            note TEXT,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_tasks_due
            ON watering_tasks(owner_id, due_on, id);
        CREATE INDEX IF NOT EXISTS idx_tasks_created
            ON watering_tasks(owner_id, created_at, id);
        CREATE INDEX IF NOT EXISTS idx_tasks_plant
            ON watering_tasks(owner_id, plant_id, due_on, id);",
    )
    .map_err(|e| migration_error("create watering_tasks table", e))?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS watering_plans (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            plant_id TEXT NOT NULL REFERENCES plants(id) ON DELETE CASCADE,
            interval_days INTEGER NOT NULL CHECK (interval_days > 0),
            valid_from TEXT NOT NULL,
            valid_to TEXT,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_plans_valid_from
            ON watering_plans(owner_id, plant_id, valid_from, id);
        CREATE INDEX IF NOT EXISTS idx_plans_created
            ON watering_plans(owner_id, plant_id, created_at, id);",
    )
    .map_err(|e| migration_error("create watering_plans table", e))?;

    Ok(())
}

fn migration_error(step: &str, err: rusqlite::Error) -> StorageError {
    StorageError::Backend(BackendError::MigrationError {
        message: format!("Failed to {}: {}", step, err),
    })
}
