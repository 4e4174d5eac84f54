//! Watering task handlers.
//!
//! - `GET /watering-tasks?sort=&order=&status=&source=&plant_id=&due_from=&due_to=&limit=&cursor=`
//! - `POST /watering-tasks`

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;
use verdant_persistence::cursor::{ListRequest, Paginated};
use verdant_persistence::resources::{
    NewWateringTask, TaskFilters, TaskSortField, TaskSource, TaskStatus, WateringTask,
    WateringTasks,
};
use verdant_persistence::{SortOrder, VerdantStorage};

use super::{list_page, resolve_sort};
use crate::error::RestResult;
use crate::extractors::{OwnerExtractor, Pagination};
use crate::responses::ListResponse;
use crate::state::AppState;

/// Query parameters for the watering-task listing.
#[derive(Debug, Deserialize, Default)]
pub struct TaskListQuery {
    /// `due_on` or `created_at`.
    pub sort: Option<TaskSortField>,

    /// `asc` or `desc`.
    pub order: Option<SortOrder>,

    /// `pending`, `completed` or `skipped`.
    pub status: Option<TaskStatus>,

    /// `scheduled` or `adhoc`.
    pub source: Option<TaskSource>,

    /// Only tasks for this plant.
    pub plant_id: Option<String>,

    /// Earliest due date, inclusive (`YYYY-MM-DD`).
    pub due_from: Option<NaiveDate>,

    /// Latest due date, inclusive (`YYYY-MM-DD`).
    pub due_to: Option<NaiveDate>,
}

impl TaskListQuery {
    fn filters(&self) -> TaskFilters {
        let mut filters = TaskFilters::default().due_between(self.due_from, self.due_to);
        if let Some(status) = self.status {
            filters = filters.with_status(status);
        }
        if let Some(source) = self.source {
            filters = filters.with_source(source);
        }
        if let Some(plant_id) = &self.plant_id {
            filters = filters.for_plant(plant_id.as_str());
        }
        filters
    }
}

/// Handler for listing watering tasks.
///
/// # HTTP Request
///
/// `GET [base]/watering-tasks`
///
/// # Response
///
/// - `200 OK` - One page of tasks, earliest due first by default
/// - `400 Bad Request` - Invalid cursor, parameters or date range
/// - `401 Unauthorized` - Missing `X-User-ID`
pub async fn list_watering_tasks_handler<S>(
    State(state): State<AppState<S>>,
    owner: OwnerExtractor,
    pagination: Pagination,
    query: Result<Query<TaskListQuery>, QueryRejection>,
) -> RestResult<Json<ListResponse<WateringTask>>>
where
    S: VerdantStorage + 'static,
{
    let Query(params) = query?;
    debug!(owner = %owner, params = ?params, "Processing watering task list request");

    let request = ListRequest::<WateringTasks>::new(
        owner.into_owner(),
        resolve_sort(WateringTasks::default_sort(), params.sort, params.order),
        params.filters(),
        pagination.limit(),
    )?;

    list_page(state.storage(), request, &pagination).await
}

/// Handler for creating a watering task.
///
/// # HTTP Request
///
/// `POST [base]/watering-tasks` with a JSON body
/// `{plantId, dueOn, status?, source?, note?}`
///
/// # Response
///
/// - `201 Created` - The stored task
/// - `400 Bad Request` - Malformed body
/// - `404 Not Found` - The plant does not belong to the user
pub async fn create_watering_task_handler<S>(
    State(state): State<AppState<S>>,
    owner: OwnerExtractor,
    body: Result<Json<NewWateringTask>, JsonRejection>,
) -> RestResult<(StatusCode, Json<WateringTask>)>
where
    S: VerdantStorage + 'static,
{
    let Json(input) = body?;
    let task = state
        .storage()
        .create_watering_task(owner.owner(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}
