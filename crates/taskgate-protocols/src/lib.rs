//! # taskgate Protocols
//!
//! Shared domain model for the taskgate gateway.
//! Contains only types and interface definitions - no transports.
//!
//! ## Contents
//!
//! - [`Task`], [`Status`] - task entities as seen by API callers
//! - [`CreateTaskRequest`], [`SearchTaskResponse`], [`Pagination`] - request/response DTOs
//! - [`TaskBackend`] - capability trait implemented by every backend transport
//! - [`BackendError`] - the single failure kind surfaced by backends

pub mod backend;
pub mod error;
pub mod task;

pub use backend::{BackendKind, TaskBackend};
pub use error::BackendError;
pub use task::{
    CreateTaskRequest, Pagination, SearchTaskResponse, Status, Task, DEFAULT_PAGE,
    DEFAULT_PER_PAGE, STATUS_QUEUED,
};
