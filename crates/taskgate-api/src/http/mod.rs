//! HTTP interface module.
//!
//! Provides the task REST endpoints and a liveness check.

pub mod handlers;
pub mod routes;
