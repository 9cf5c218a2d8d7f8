//! Task API handlers.
//!
//! Validation happens here; nothing invalid reaches the orchestration service.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use taskgate_protocols::{CreateTaskRequest, SearchTaskResponse, Task};

use crate::error::{ApiError, ValidationError};
use crate::state::AppState;

/// Raw listing query. Values stay strings so that junk falls back to the
/// defaults instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub per_page: Option<String>,
    pub page: Option<String>,
}

impl ListTasksQuery {
    pub fn per_page(&self) -> Option<i64> {
        parse_i64(self.per_page.as_deref())
    }

    pub fn page(&self) -> Option<i64> {
        parse_i64(self.page.as_deref())
    }
}

fn parse_i64(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse::<i64>().ok())
}

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Create a task.
///
/// POST /api/v1/task
///
/// The body is decoded as JSON whatever `Content-Type` the client sent.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let request = decode_create(&body)?;
    state.validate_create(&request)?;

    let task = state.service.create_task(request).await?;
    info!(id = task.id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// List tasks page by page.
///
/// GET /api/v1/task?per_page=&page=
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Json<SearchTaskResponse>, ApiError> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(e) => {
            debug!(error = %e, "Unparseable query, using defaults");
            ListTasksQuery::default()
        }
    };

    let response = state
        .service
        .get_tasks_by_filter(query.per_page(), query.page())
        .await?;
    Ok(Json(response))
}

/// Get a task by id.
///
/// GET /api/v1/task/{id}
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = raw_id
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidId(raw_id.clone()))?;

    let task = state.service.get_task_by_id(id).await?;
    Ok(Json(task))
}

fn decode_create(body: &[u8]) -> Result<CreateTaskRequest, ValidationError> {
    serde_json::from_slice(body).map_err(|e| ValidationError::MalformedBody(e.to_string()))
}

/// Liveness check.
///
/// GET /healthz
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Known path, unsupported verb.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Unknown path.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
