//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::http::handlers::{
    create_task, get_task, health, list_tasks, method_not_allowed, not_found,
};
use crate::state::AppState;

/// Create the gateway router.
///
/// ## Route Structure
///
/// ```text
/// /api/v1/task
///   POST   /api/v1/task       - Create task (agent)
///   GET    /api/v1/task       - List tasks, ?per_page=&page= (data provider)
///   GET    /api/v1/task/{id}  - Get task (data provider)
///
/// /healthz - Liveness check
/// ```
///
/// Every response is `application/json`. With `cors_permissive` the router
/// answers cross-origin requests from any origin.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors_permissive = state.cors_permissive;

    let router = Router::new()
        .route("/api/v1/task", get(list_tasks).post(create_task))
        .route("/api/v1/task/", get(list_tasks).post(create_task))
        .route("/api/v1/task/{id}", get(get_task))
        .route("/healthz", get(health))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let router = if cors_permissive {
        router.layer(cors_layer())
    } else {
        router
    };

    router.layer(SetResponseHeaderLayer::if_not_present(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    ))
}

/// Any origin, the standard verb set, any request header.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
