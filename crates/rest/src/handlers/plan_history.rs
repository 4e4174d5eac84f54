//! Watering-plan history handlers.
//!
//! - `GET /plants/{plant_id}/watering-plans?sort=&order=&limit=&cursor=`
//! - `POST /plants/{plant_id}/watering-plans`

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;
use verdant_persistence::cursor::{ListRequest, Paginated};
use verdant_persistence::resources::{
    NewWateringPlan, PlanHistory, PlanHistoryFilters, PlanSortField, WateringPlan,
};
use verdant_persistence::{SortOrder, VerdantStorage};

use super::{list_page, resolve_sort};
use crate::error::{RestError, RestResult};
use crate::extractors::{OwnerExtractor, Pagination};
use crate::responses::ListResponse;
use crate::state::AppState;

/// Query parameters for the plan-history listing.
#[derive(Debug, Deserialize, Default)]
pub struct PlanListQuery {
    /// `valid_from` or `created_at`.
    pub sort: Option<PlanSortField>,

    /// `asc` or `desc`.
    pub order: Option<SortOrder>,
}

/// Body of a new plan version. The plant comes from the path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanBody {
    /// Days between waterings.
    pub interval_days: u32,
    /// First day the plan applies.
    pub valid_from: NaiveDate,
    /// Last day the plan applies.
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
}

/// Handler for listing one plant's watering-plan history.
///
/// # HTTP Request
///
/// `GET [base]/plants/{plant_id}/watering-plans`
///
/// # Response
///
/// - `200 OK` - One page of plan versions, newest first by default
/// - `400 Bad Request` - Invalid cursor or parameters
/// - `401 Unauthorized` - Missing `X-User-ID`
/// - `404 Not Found` - The plant does not belong to the user
pub async fn list_watering_plans_handler<S>(
    State(state): State<AppState<S>>,
    owner: OwnerExtractor,
    Path(plant_id): Path<String>,
    pagination: Pagination,
    query: Result<Query<PlanListQuery>, QueryRejection>,
) -> RestResult<Json<ListResponse<WateringPlan>>>
where
    S: VerdantStorage + 'static,
{
    let Query(params) = query?;
    debug!(owner = %owner, plant_id = %plant_id, params = ?params, "Processing plan history request");

    if !state.storage().plant_exists(owner.owner(), &plant_id).await? {
        return Err(RestError::NotFound {
            resource: "plant".to_string(),
            id: plant_id,
        });
    }

    let request = ListRequest::<PlanHistory>::new(
        owner.into_owner(),
        resolve_sort(PlanHistory::default_sort(), params.sort, params.order),
        PlanHistoryFilters::for_plant(plant_id),
        pagination.limit(),
    )?;

    list_page(state.storage(), request, &pagination).await
}

/// Handler for recording a new plan version for a plant.
///
/// # HTTP Request
///
/// `POST [base]/plants/{plant_id}/watering-plans` with a JSON body
/// `{intervalDays, validFrom, validTo?}`
///
/// # Response
///
/// - `201 Created` - The stored plan
/// - `400 Bad Request` - Malformed body, zero interval or inverted window
/// - `404 Not Found` - The plant does not belong to the user
pub async fn create_watering_plan_handler<S>(
    State(state): State<AppState<S>>,
    owner: OwnerExtractor,
    Path(plant_id): Path<String>,
    body: Result<Json<PlanBody>, JsonRejection>,
) -> RestResult<(StatusCode, Json<WateringPlan>)>
where
    S: VerdantStorage + 'static,
{
    let Json(body) = body?;
    let input = NewWateringPlan {
        plant_id,
        interval_days: body.interval_days,
        valid_from: body.valid_from,
        valid_to: body.valid_to,
    };

    let plan = state
        .storage()
        .create_watering_plan(owner.owner(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(plan)))
}
