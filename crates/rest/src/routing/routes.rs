//! Route table.

use axum::{Router, routing::get};
use verdant_persistence::VerdantStorage;

use crate::handlers;
use crate::state::AppState;

/// Creates all API routes.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `GET /plants` - List plants
/// - `POST /plants` - Create a plant
/// - `GET /watering-tasks` - List watering tasks
/// - `POST /watering-tasks` - Create a watering task
/// - `GET /plants/{plant_id}/watering-plans` - A plant's plan history
/// - `POST /plants/{plant_id}/watering-plans` - Record a plan version
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: VerdantStorage + 'static,
{
    Router::new()
        .route("/health", get(handlers::health_handler::<S>))
        .route(
            "/plants",
            get(handlers::list_plants_handler::<S>).post(handlers::create_plant_handler::<S>),
        )
        .route(
            "/watering-tasks",
            get(handlers::list_watering_tasks_handler::<S>)
                .post(handlers::create_watering_task_handler::<S>),
        )
        .route(
            "/plants/{plant_id}/watering-plans",
            get(handlers::list_watering_plans_handler::<S>)
                .post(handlers::create_watering_plan_handler::<S>),
        )
        .with_state(state)
}
