//! Health check endpoint handler.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::{debug, warn};
use verdant_persistence::VerdantStorage;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Pings the storage backend, so a failing database reports unhealthy.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` - Server and storage are healthy
/// - `503 Service Unavailable` - Storage is unreachable
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Json<Value>>
where
    S: VerdantStorage + 'static,
{
    debug!("Processing health check request");

    let backend_name = state.storage().backend_name();
    if let Err(e) = state.storage().health_check().await {
        warn!(backend = backend_name, error = %e, "Health check failed");
        return Err(RestError::ServiceUnavailable {
            message: format!("{} backend is unavailable", backend_name),
        });
    }

    Ok(Json(json!({
        "status": "healthy",
        "backend": backend_name,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
