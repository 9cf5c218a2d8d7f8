//! # taskgate API
//!
//! Inbound side of the taskgate gateway.
//!
//! - **Service**: [`TaskService`] turns validated requests into backend calls
//! - **HTTP**: REST endpoints under `/api/v1/task` plus `/healthz`
//! - **Server**: [`GatewayServer`] binds, serves and drains on shutdown
//!
//! ## Request Flow
//!
//! ```text
//! client ──HTTP/JSON──▶ handlers ──▶ TaskService ──▶ TaskBackend
//!                          │                           ├─ agent (create)
//!                          └─ 400 on bad input         └─ data provider (read)
//! ```
//!
//! Invalid input never reaches a backend. Backend failures surface as a 500
//! with a generic message; details go to the log.

pub mod error;
pub mod http;
pub mod server;
pub mod service;
pub mod state;

#[cfg(test)]
mod test_support;

pub use error::{ApiError, ValidationError, BACKEND_FAILURE_MESSAGE};
pub use http::routes::create_router;
pub use server::{GatewayServer, ServerError};
pub use service::TaskService;
pub use state::AppState;
