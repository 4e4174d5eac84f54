//! Seeded rows for pagination tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use verdant_persistence::backends::sqlite::SqliteBackend;
use verdant_persistence::owner::OwnerId;
use verdant_persistence::resources::{Plant, TaskSource, TaskStatus, WateringPlan, WateringTask};

/// An in-memory backend with the schema installed.
pub fn create_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

/// Midnight UTC on the given day of 2024, plus `seconds`.
pub fn ts(month: u32, day: u32, seconds: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, 0, 0, 0)
        .single()
        .expect("valid timestamp")
        + chrono::Duration::seconds(i64::from(seconds))
}

/// A day of 2024.
pub fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
}

/// Builds a plant row with explicit id and creation time.
#[derive(Debug, Clone)]
pub struct PlantFixture {
    plant: Plant,
}

impl PlantFixture {
    /// A plant owned by `owner`.
    pub fn new(owner: &str, id: &str, nickname: &str, species: &str) -> Self {
        Self {
            plant: Plant {
                id: id.to_string(),
                owner_id: OwnerId::new(owner),
                nickname: nickname.to_string(),
                species_name: species.to_string(),
                location: None,
                notes: None,
                created_at: ts(1, 1, 0),
            },
        }
    }

    /// Sets the creation time.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.plant.created_at = created_at;
        self
    }

    /// Inserts the plant.
    pub fn seed(self, backend: &SqliteBackend) -> Plant {
        backend
            .insert_plant(&self.plant)
            .expect("Failed to insert plant");
        self.plant
    }
}

/// Builds a watering task row with explicit id and due date.
#[derive(Debug, Clone)]
pub struct TaskFixture {
    task: WateringTask,
}

impl TaskFixture {
    /// A pending scheduled task.
    pub fn new(owner: &str, id: &str, plant_id: &str, due_on: NaiveDate) -> Self {
        Self {
            task: WateringTask {
                id: id.to_string(),
                owner_id: OwnerId::new(owner),
                plant_id: plant_id.to_string(),
                due_on,
                status: TaskStatus::Pending,
                source: TaskSource::Scheduled,
                completed_at: None,
                note: None,
                created_at: ts(1, 1, 0),
            },
        }
    }

    /// Sets the status.
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.task.status = status;
        if status == TaskStatus::Completed {
            self.task.completed_at = Some(self.task.created_at);
        }
        self
    }

    /// Sets the source.
    pub fn source(mut self, source: TaskSource) -> Self {
        self.task.source = source;
        self
    }

    /// Sets the creation time.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.task.created_at = created_at;
        self
    }

    /// Inserts the task.
    pub fn seed(self, backend: &SqliteBackend) -> WateringTask {
        backend
            .insert_watering_task(&self.task)
            .expect("Failed to insert watering task");
        self.task
    }
}

/// Inserts a plan version for `plant_id`.
pub fn seed_plan(
    backend: &SqliteBackend,
    owner: &str,
    id: &str,
    plant_id: &str,
    interval_days: u32,
    valid_from: NaiveDate,
    valid_to: Option<NaiveDate>,
) -> WateringPlan {
    let plan = WateringPlan {
        id: id.to_string(),
        owner_id: OwnerId::new(owner),
        plant_id: plant_id.to_string(),
        interval_days,
        valid_from,
        valid_to,
        created_at: ts(1, 1, 0),
    };
    backend
        .insert_watering_plan(&plan)
        .expect("Failed to insert watering plan");
    plan
}
