//! HTTP API test harness.
//!
//! Builds a test server over an in-memory SQLite backend and seeds rows with
//! fixed ids and timestamps.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use verdant_persistence::backends::sqlite::SqliteBackend;
use verdant_persistence::owner::OwnerId;
use verdant_persistence::resources::{Plant, TaskSource, TaskStatus, WateringPlan, WateringTask};
use verdant_rest::{AppState, ServerConfig};

/// Header carrying the requesting user.
pub const X_USER_ID: HeaderName = HeaderName::from_static("x-user-id");

/// Creates a test server with an empty database.
pub fn create_test_server() -> (TestServer, Arc<SqliteBackend>) {
    create_test_server_with_config(ServerConfig::for_testing())
}

/// Creates a test server with the given configuration.
pub fn create_test_server_with_config(config: ServerConfig) -> (TestServer, Arc<SqliteBackend>) {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    let backend = Arc::new(backend);

    let state = AppState::new(Arc::clone(&backend), config);
    let app = verdant_rest::routing::create_routes(state);
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, backend)
}

/// Adds the `X-User-ID` header.
pub fn as_user(request: TestRequest, owner: &str) -> TestRequest {
    request.add_header(
        X_USER_ID,
        HeaderValue::from_str(owner).expect("valid header value"),
    )
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

/// Inserts a plant created at `created_at`.
pub fn seed_plant(
    backend: &SqliteBackend,
    owner: &str,
    id: &str,
    nickname: &str,
    species: &str,
    created_at: DateTime<Utc>,
) -> Plant {
    let plant = Plant {
        id: id.to_string(),
        owner_id: OwnerId::new(owner),
        nickname: nickname.to_string(),
        species_name: species.to_string(),
        location: None,
        notes: None,
        created_at,
    };
    backend.insert_plant(&plant).expect("Failed to seed plant");
    plant
}

/// Inserts a scheduled watering task.
pub fn seed_task(
    backend: &SqliteBackend,
    owner: &str,
    id: &str,
    plant_id: &str,
    due_on: NaiveDate,
    status: TaskStatus,
) -> WateringTask {
    let created_at = ts(1, 1, 0);
    let task = WateringTask {
        id: id.to_string(),
        owner_id: OwnerId::new(owner),
        plant_id: plant_id.to_string(),
        due_on,
        status,
        source: TaskSource::Scheduled,
        completed_at: (status == TaskStatus::Completed).then_some(created_at),
        note: None,
        created_at,
    };
    backend
        .insert_watering_task(&task)
        .expect("Failed to seed watering task");
    task
}

/// Inserts an open-ended plan version.
pub fn seed_plan(
    backend: &SqliteBackend,
    owner: &str,
    id: &str,
    plant_id: &str,
    interval_days: u32,
    valid_from: NaiveDate,
) -> WateringPlan {
    let plan = WateringPlan {
        id: id.to_string(),
        owner_id: OwnerId::new(owner),
        plant_id: plant_id.to_string(),
        interval_days,
        valid_from,
        valid_to: None,
        created_at: ts(1, 1, 0),
    };
    backend
        .insert_watering_plan(&plan)
        .expect("Failed to seed watering plan");
    plan
}

/// Ids in the `data` array of a listing response.
pub fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|row| row["id"].as_str().expect("row id").to_string())
        .collect()
}

/// The `nextCursor` of a listing response.
pub fn next_cursor(body: &Value) -> Option<String> {
    body["page"]["nextCursor"].as_str().map(String::from)
}

/// Appends a cursor parameter to `path`. Tokens are URL-safe as issued.
pub fn with_cursor(path: &str, token: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}cursor={}", path, separator, token)
}

/// Follows `nextCursor` from `path` to the end, returning all ids.
pub async fn walk(server: &TestServer, owner: &str, path: &str) -> Vec<String> {
    let mut all = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let url = match &cursor {
            Some(token) => with_cursor(path, token),
            None => path.to_string(),
        };
        let response = as_user(server.get(&url), owner).await;
        response.assert_status_ok();

        let body: Value = response.json();
        all.extend(ids(&body));
        cursor = next_cursor(&body);
        if cursor.is_none() {
            break;
        }
        assert!(all.len() < 10_000, "listing did not terminate");
    }

    all
}
