//! Plant, task and plan writes.

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use tracing::debug;
use uuid::Uuid;

use crate::core::WateringStorage;
use crate::error::{BackendError, ResourceError, StorageError, StorageResult};
use crate::owner::OwnerId;
use crate::resources::{
    NewPlant, NewWateringPlan, NewWateringTask, Plant, TaskStatus, WateringPlan, WateringTask,
};
use crate::types::{date_sort_value, timestamp_sort_value};

use super::SqliteBackend;

/// Creation timestamp, truncated to the stored precision.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Maps a uniqueness violation on insert to `AlreadyExists`.
fn insert_error(resource: &str, id: &str, err: rusqlite::Error) -> StorageError {
    match err {
        rusqlite::Error::SqliteFailure(ref e, _) if e.code == ErrorCode::ConstraintViolation => {
            StorageError::Resource(ResourceError::AlreadyExists {
                resource: resource.to_string(),
                id: id.to_string(),
            })
        }
        other => other.into(),
    }
}

fn require_plant(conn: &Connection, owner: &OwnerId, plant_id: &str) -> StorageResult<()> {
    if plant_exists(conn, owner, plant_id)? {
        Ok(())
    } else {
        Err(StorageError::Resource(ResourceError::NotFound {
            resource: "plant".to_string(),
            id: plant_id.to_string(),
        }))
    }
}

fn plant_exists(conn: &Connection, owner: &OwnerId, plant_id: &str) -> StorageResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM plants WHERE owner_id = ?1 AND id = ?2",
            params![owner.as_str(), plant_id],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

impl SqliteBackend {
    /// Stores a fully specified plant record.
    ///
    /// [`WateringStorage::create_plant`] is the usual entry point; this is for
    /// imports and fixtures that carry their own ids and timestamps.
    pub fn insert_plant(&self, plant: &Plant) -> StorageResult<()> {
        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO plants (id, owner_id, nickname, species_name, location, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                plant.id,
                plant.owner_id.as_str(),
                plant.nickname,
                plant.species_name,
                plant.location,
                plant.notes,
                timestamp_sort_value(&plant.created_at),
            ],
        )
        .map_err(|e| insert_error("plant", &plant.id, e))?;
        Ok(())
    }

    /// Stores a fully specified watering task.
    ///
    /// Fails with `NotFound` if the plant does not belong to the task's owner.
    pub fn insert_watering_task(&self, task: &WateringTask) -> StorageResult<()> {
        let conn = self.get_connection()?;
        require_plant(&conn, &task.owner_id, &task.plant_id)?;

        conn.execute(
            "INSERT INTO watering_tasks
                (id, owner_id, plant_id, due_on, status, source, completed_at, note, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                task.id,
                task.owner_id.as_str(),
                task.plant_id,
                date_sort_value(&task.due_on),
                task.status.as_str(),
                task.source.as_str(),
                task.completed_at.as_ref().map(timestamp_sort_value),
                task.note,
                timestamp_sort_value(&task.created_at),
            ],
        )
        .map_err(|e| insert_error("watering task", &task.id, e))?;
        Ok(())
    }

    /// Stores a fully specified watering plan.
    ///
    /// Fails with `NotFound` if the plant does not belong to the plan's owner.
    pub fn insert_watering_plan(&self, plan: &WateringPlan) -> StorageResult<()> {
        let conn = self.get_connection()?;
        require_plant(&conn, &plan.owner_id, &plan.plant_id)?;

        conn.execute(
            "INSERT INTO watering_plans
                (id, owner_id, plant_id, interval_days, valid_from, valid_to, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                plan.id,
                plan.owner_id.as_str(),
                plan.plant_id,
                plan.interval_days,
                date_sort_value(&plan.valid_from),
                plan.valid_to.as_ref().map(date_sort_value),
                timestamp_sort_value(&plan.created_at),
            ],
        )
        .map_err(|e| insert_error("watering plan", &plan.id, e))?;
        Ok(())
    }
}

#[async_trait]
impl WateringStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create_plant(&self, owner: &OwnerId, input: NewPlant) -> StorageResult<Plant> {
        input.validate()?;

        let plant = Plant {
            id: new_id(),
            owner_id: owner.clone(),
            nickname: input.nickname.trim().to_string(),
            species_name: input.species_name.trim().to_string(),
            location: input.location,
            notes: input.notes,
            created_at: now(),
        };
        self.insert_plant(&plant)?;

        debug!(owner = %owner, plant_id = %plant.id, "Created plant");
        Ok(plant)
    }

    async fn create_watering_task(
        &self,
        owner: &OwnerId,
        input: NewWateringTask,
    ) -> StorageResult<WateringTask> {
        input.validate()?;

        let created_at = now();
        let task = WateringTask {
            id: new_id(),
            owner_id: owner.clone(),
            plant_id: input.plant_id,
            due_on: input.due_on,
            status: input.status,
            source: input.source,
            completed_at: (input.status == TaskStatus::Completed).then_some(created_at),
            note: input.note,
            created_at,
        };
        self.insert_watering_task(&task)?;

        debug!(owner = %owner, task_id = %task.id, plant_id = %task.plant_id, "Created watering task");
        Ok(task)
    }

    async fn create_watering_plan(
        &self,
        owner: &OwnerId,
        input: NewWateringPlan,
    ) -> StorageResult<WateringPlan> {
        input.validate()?;

        let plan = WateringPlan {
            id: new_id(),
            owner_id: owner.clone(),
            plant_id: input.plant_id,
            interval_days: input.interval_days,
            valid_from: input.valid_from,
            valid_to: input.valid_to,
            created_at: now(),
        };
        self.insert_watering_plan(&plan)?;

        debug!(owner = %owner, plan_id = %plan.id, plant_id = %plan.plant_id, "Recorded watering plan");
        Ok(plan)
    }

    async fn plant_exists(&self, owner: &OwnerId, plant_id: &str) -> StorageResult<bool> {
        let conn = self.get_connection()?;
        plant_exists(&conn, owner, plant_id)
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        self.ping()
    }
}
