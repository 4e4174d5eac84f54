//! Plant handlers.
//!
//! - `GET /plants?sort=&order=&q=&species=&limit=&cursor=` - List plants
//! - `POST /plants` - Create a plant

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use tracing::debug;
use verdant_persistence::cursor::{ListRequest, Paginated};
use verdant_persistence::resources::{NewPlant, Plant, PlantFilters, PlantSortField, Plants};
use verdant_persistence::{SortOrder, VerdantStorage};

use super::{list_page, resolve_sort};
use crate::error::RestResult;
use crate::extractors::{OwnerExtractor, Pagination};
use crate::responses::ListResponse;
use crate::state::AppState;

/// Query parameters for the plant listing.
#[derive(Debug, Deserialize, Default)]
pub struct PlantListQuery {
    /// `created_at`, `species_name` or `nickname`.
    pub sort: Option<PlantSortField>,

    /// `asc` or `desc`.
    pub order: Option<SortOrder>,

    /// Case-insensitive substring of nickname or species name.
    pub q: Option<String>,

    /// Exact species name.
    pub species: Option<String>,
}

/// Handler for listing plants.
///
/// # HTTP Request
///
/// `GET [base]/plants`
///
/// # Response
///
/// - `200 OK` - One page of plants, newest first by default
/// - `400 Bad Request` - Invalid cursor or parameters
/// - `401 Unauthorized` - Missing `X-User-ID`
pub async fn list_plants_handler<S>(
    State(state): State<AppState<S>>,
    owner: OwnerExtractor,
    pagination: Pagination,
    query: Result<Query<PlantListQuery>, QueryRejection>,
) -> RestResult<Json<ListResponse<Plant>>>
where
    S: VerdantStorage + 'static,
{
    let Query(params) = query?;
    debug!(owner = %owner, params = ?params, "Processing plant list request");

    let request = ListRequest::<Plants>::new(
        owner.into_owner(),
        resolve_sort(Plants::default_sort(), params.sort, params.order),
        PlantFilters::new(params.q, params.species),
        pagination.limit(),
    )?;

    list_page(state.storage(), request, &pagination).await
}

/// Handler for creating a plant.
///
/// # HTTP Request
///
/// `POST [base]/plants` with a JSON body `{nickname, speciesName, location?, notes?}`
///
/// # Response
///
/// - `201 Created` - The stored plant
/// - `400 Bad Request` - Malformed body or blank required field
pub async fn create_plant_handler<S>(
    State(state): State<AppState<S>>,
    owner: OwnerExtractor,
    body: Result<Json<NewPlant>, JsonRejection>,
) -> RestResult<(StatusCode, Json<Plant>)>
where
    S: VerdantStorage + 'static,
{
    let Json(input) = body?;
    let plant = state.storage().create_plant(owner.owner(), input).await?;
    Ok((StatusCode::CREATED, Json(plant)))
}
