//! Backend capability trait.
//!
//! The gateway talks to two services: the agent creates tasks and starts
//! solving them, the data provider stores and searches them. Each transport
//! (JSON over HTTP, gRPC) implements [`TaskBackend`] once for both services, so
//! the orchestration layer never branches on transport.

use std::fmt;

use async_trait::async_trait;

use crate::error::BackendError;
use crate::task::{CreateTaskRequest, Pagination, SearchTaskResponse, Task};

/// Which remote service a call was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Agent,
    DataProvider,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::DataProvider => "data-provider",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core trait for backend transports.
///
/// Implementations hold long-lived connection handles and must be safe to
/// call concurrently; issuing a call never mutates the handle.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// Short transport identifier, used in logs.
    fn transport(&self) -> &str;

    /// Hand a new task to the agent.
    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, BackendError>;

    /// Read a single task from the data provider.
    async fn get_task(&self, id: i64) -> Result<Task, BackendError>;

    /// Read one page of tasks from the data provider.
    async fn search_task(&self, pagination: Pagination)
        -> Result<SearchTaskResponse, BackendError>;
}
