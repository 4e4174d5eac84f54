//! HTTP request handlers.
//!
//! - [`plants`] - List and create plants
//! - [`watering_tasks`] - List and create watering tasks
//! - [`plan_history`] - List and record a plant's watering plans
//! - [`health`] - Health check endpoint
//!
//! Every listing goes through [`list_page`], so the three resources share
//! one cursor codec, validator and page assembler.

pub mod health;
pub mod plan_history;
pub mod plants;
pub mod watering_tasks;

pub use health::health_handler;
pub use plan_history::{create_watering_plan_handler, list_watering_plans_handler};
pub use plants::{create_plant_handler, list_plants_handler};
pub use watering_tasks::{create_watering_task_handler, list_watering_tasks_handler};

use axum::Json;
use tracing::debug;
use verdant_persistence::cursor::{ListRequest, Paginated, SortKey, paginate};
use verdant_persistence::{RowSource, Sort, SortOrder};

use crate::error::RestResult;
use crate::extractors::Pagination;
use crate::responses::ListResponse;

/// Serves one page of `request`, resuming from the request's cursor.
pub(crate) async fn list_page<R, S>(
    storage: &S,
    request: ListRequest<R>,
    pagination: &Pagination,
) -> RestResult<Json<ListResponse<R::Row>>>
where
    R: Paginated,
    S: RowSource<R>,
{
    let page = paginate(storage, &request, pagination.cursor()).await?;

    debug!(
        resource = R::RESOURCE,
        owner = %request.owner(),
        limit = request.limit(),
        resumed = pagination.cursor().is_some(),
        returned = page.len(),
        has_next = page.page_info.has_next,
        "Served page"
    );

    Ok(Json(ListResponse::from_page(page, request.limit())))
}

/// Resolves the requested sort against a listing's default.
///
/// An omitted field uses the default sort. An omitted order uses the
/// default order for the default field and ascending for any other.
pub(crate) fn resolve_sort<F: SortKey>(
    default: Sort<F>,
    field: Option<F>,
    order: Option<SortOrder>,
) -> Sort<F> {
    let field = field.unwrap_or(default.field);
    let order = order.unwrap_or(if field == default.field {
        default.order
    } else {
        SortOrder::Asc
    });
    Sort::new(field, order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_persistence::resources::PlantSortField;

    #[test]
    fn test_resolve_sort_defaults() {
        let default = Sort::desc(PlantSortField::CreatedAt);

        assert_eq!(resolve_sort(default, None, None), default);
        assert_eq!(
            resolve_sort(default, Some(PlantSortField::CreatedAt), None),
            default
        );
        assert_eq!(
            resolve_sort(default, Some(PlantSortField::Nickname), None),
            Sort::asc(PlantSortField::Nickname)
        );
        assert_eq!(
            resolve_sort(default, None, Some(SortOrder::Asc)),
            Sort::asc(PlantSortField::CreatedAt)
        );
    }
}
