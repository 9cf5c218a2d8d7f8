//! Task orchestration service.
//!
//! Converts domain requests into backend calls and backend replies into
//! domain values. Input is assumed to be validated already; the HTTP adapter
//! does that before calling in.

use std::sync::Arc;

use tracing::{debug, warn};

use taskgate_protocols::{
    BackendError, CreateTaskRequest, Pagination, SearchTaskResponse, Status, Task, TaskBackend,
};

/// Stateless orchestration over an injected backend handle.
#[derive(Clone)]
pub struct TaskService {
    backend: Arc<dyn TaskBackend>,
}

impl TaskService {
    pub fn new(backend: Arc<dyn TaskBackend>) -> Self {
        Self { backend }
    }

    /// Transport name of the underlying backend.
    pub fn transport(&self) -> &str {
        self.backend.transport()
    }

    /// Hand a task to the agent.
    ///
    /// After a successful hand-off the gateway appends a queued status stamped
    /// with the current time, whatever history the agent returned.
    pub async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, BackendError> {
        debug!(name = %request.name, difficulty = request.difficulty, "Creating task");

        let mut task = self
            .backend
            .create_task(request)
            .await
            .inspect_err(|e| warn!(error = %e, "CreateTask failed"))?;

        task.push_status(Status::queued_now());
        debug!(id = task.id, "Task queued");
        Ok(task)
    }

    /// Read one task from the data provider.
    pub async fn get_task_by_id(&self, id: i64) -> Result<Task, BackendError> {
        debug!(id, "Fetching task");
        self.backend
            .get_task(id)
            .await
            .inspect_err(|e| warn!(id, error = %e, "GetTask failed"))
    }

    /// Read one page of tasks. Absent, zero or negative values fall back to
    /// the defaults.
    pub async fn get_tasks_by_filter(
        &self,
        per_page: Option<i64>,
        page: Option<i64>,
    ) -> Result<SearchTaskResponse, BackendError> {
        let pagination = Pagination::resolve(per_page, page);
        debug!(
            per_page = pagination.per_page,
            page = pagination.page,
            "Searching tasks"
        );
        self.backend
            .search_task(pagination)
            .await
            .inspect_err(|e| warn!(error = %e, "SearchTask failed"))
    }
}
