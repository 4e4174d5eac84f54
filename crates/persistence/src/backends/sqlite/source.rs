//! Paginated listing queries.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use rusqlite::types::Type;
use tracing::trace;

use crate::core::RowSource;
use crate::cursor::Paginated;
use crate::error::StorageResult;
use crate::owner::OwnerId;
use crate::resources::{
    PlanHistory, Plant, Plants, TaskSource, TaskStatus, WateringPlan, WateringTask, WateringTasks,
};
use crate::types::PageQuery;

use super::SqliteBackend;
use super::query_builder::select_page;

/// A listing stored in one SQLite table.
pub trait SqliteTable: Paginated {
    /// Table name.
    const TABLE: &'static str;

    /// Selected columns, in the order [`SqliteTable::from_row`] reads them.
    const COLUMNS: &'static str;

    /// Maps one result row.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self::Row>;
}

#[async_trait]
impl<R: SqliteTable> RowSource<R> for SqliteBackend {
    async fn fetch(&self, owner: &OwnerId, query: &PageQuery) -> StorageResult<Vec<R::Row>> {
        let conn = self.get_connection()?;
        let fragment = select_page(R::TABLE, R::COLUMNS, owner, query);

        trace!(table = R::TABLE, sql = %fragment.sql, "Executing page query");

        let mut stmt = conn.prepare(&fragment.sql)?;
        let rows = stmt
            .query_map(fragment.bind().as_slice(), |row| R::from_row(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }
}

impl SqliteTable for Plants {
    const TABLE: &'static str = "plants";
    const COLUMNS: &'static str =
        "id, owner_id, nickname, species_name, location, notes, created_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Plant> {
        Ok(Plant {
            id: row.get(0)?,
            owner_id: OwnerId::new(row.get::<_, String>(1)?),
            nickname: row.get(2)?,
            species_name: row.get(3)?,
            location: row.get(4)?,
            notes: row.get(5)?,
            created_at: timestamp_column(row, 6)?,
        })
    }
}

impl SqliteTable for WateringTasks {
    const TABLE: &'static str = "watering_tasks";
    const COLUMNS: &'static str =
        "id, owner_id, plant_id, due_on, status, source, completed_at, note, created_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<WateringTask> {
        let status: String = row.get(4)?;
        let source: String = row.get(5)?;

        Ok(WateringTask {
            id: row.get(0)?,
            owner_id: OwnerId::new(row.get::<_, String>(1)?),
            plant_id: row.get(2)?,
            due_on: date_column(row, 3)?,
            status: TaskStatus::parse(&status)
                .ok_or_else(|| conversion_error(4, format!("unknown task status '{}'", status)))?,
            source: TaskSource::parse(&source)
                .ok_or_else(|| conversion_error(5, format!("unknown task source '{}'", source)))?,
            completed_at: optional_timestamp_column(row, 6)?,
            note: row.get(7)?,
            created_at: timestamp_column(row, 8)?,
        })
    }
}

impl SqliteTable for PlanHistory {
    const TABLE: &'static str = "watering_plans";
    const COLUMNS: &'static str =
        "id, owner_id, plant_id, interval_days, valid_from, valid_to, created_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<WateringPlan> {
        let valid_to: Option<String> = row.get(5)?;

        Ok(WateringPlan {
            id: row.get(0)?,
            owner_id: OwnerId::new(row.get::<_, String>(1)?),
            plant_id: row.get(2)?,
            interval_days: row.get(3)?,
            valid_from: date_column(row, 4)?,
            valid_to: valid_to
                .map(|s| parse_date(5, &s))
                .transpose()?,
            created_at: timestamp_column(row, 6)?,
        })
    }
}

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, message.into())
}

fn parse_timestamp(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_date(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_timestamp(idx, &raw)
}

fn optional_timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| parse_timestamp(idx, &s)).transpose()
}

fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    parse_date(idx, &raw)
}
