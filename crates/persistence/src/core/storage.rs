//! Record storage for the watering tracker.
//!
//! This module defines the [`WateringStorage`] trait, which provides the write
//! and lookup operations around the paginated listings, and [`VerdantStorage`],
//! the full capability set the HTTP layer is generic over.

use async_trait::async_trait;

use super::source::RowSource;
use crate::error::{BackendError, StorageResult};
use crate::owner::OwnerId;
use crate::resources::{
    NewPlant, NewWateringPlan, NewWateringTask, PlanHistory, Plant, Plants, WateringPlan,
    WateringTask, WateringTasks,
};

/// Write and lookup operations for plants, tasks and plans.
///
/// Every operation takes the [`OwnerId`] first. Records are never visible
/// to, or attachable from, another owner.
///
/// # Example
///
/// ```ignore
/// use verdant_persistence::core::WateringStorage;
/// use verdant_persistence::owner::OwnerId;
/// use verdant_persistence::resources::{NewPlant, NewWateringTask};
///
/// async fn example<S: WateringStorage>(storage: &S) -> StorageResult<()> {
///     let owner = OwnerId::new("user-1");
///
///     let plant = storage
///         .create_plant(&owner, NewPlant::new("Fernando", "Boston fern"))
///         .await?;
///
///     let due = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
///     storage
///         .create_watering_task(&owner, NewWateringTask::new(&plant.id, due))
///         .await?;
///
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait WateringStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Creates a plant.
    ///
    /// # Errors
    ///
    /// * `StorageError::Validation` - If a required field is blank
    async fn create_plant(&self, owner: &OwnerId, plant: NewPlant) -> StorageResult<Plant>;

    /// Creates a watering task for one of the owner's plants.
    ///
    /// # Errors
    ///
    /// * `StorageError::Validation` - If the input is invalid
    /// * `StorageError::Resource(NotFound)` - If the plant does not belong to the owner
    async fn create_watering_task(
        &self,
        owner: &OwnerId,
        task: NewWateringTask,
    ) -> StorageResult<WateringTask>;

    /// Records a watering plan for one of the owner's plants.
    ///
    /// # Errors
    ///
    /// * `StorageError::Validation` - If the interval or window is invalid
    /// * `StorageError::Resource(NotFound)` - If the plant does not belong to the owner
    async fn create_watering_plan(
        &self,
        owner: &OwnerId,
        plan: NewWateringPlan,
    ) -> StorageResult<WateringPlan>;

    /// Checks whether a plant exists for the owner.
    async fn plant_exists(&self, owner: &OwnerId, plant_id: &str) -> StorageResult<bool>;

    /// Checks that the backend can serve queries.
    async fn health_check(&self) -> Result<(), BackendError>;
}

/// Everything the application needs from storage: record operations plus a
/// row source for each paginated listing.
pub trait VerdantStorage:
    WateringStorage + RowSource<Plants> + RowSource<WateringTasks> + RowSource<PlanHistory>
{
}

impl<T> VerdantStorage for T where
    T: WateringStorage + RowSource<Plants> + RowSource<WateringTasks> + RowSource<PlanHistory>
{
}
