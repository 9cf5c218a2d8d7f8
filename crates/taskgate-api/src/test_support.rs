//! In-memory backend used by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use taskgate_protocols::{
    BackendError, BackendKind, CreateTaskRequest, Pagination, SearchTaskResponse, Status, Task,
    TaskBackend,
};

/// Echoes requests back as tasks and counts every call.
#[derive(Default)]
pub struct StubBackend {
    fail: bool,
    history: Vec<Status>,
    create_calls: AtomicUsize,
    get_calls: AtomicUsize,
    search_calls: AtomicUsize,
    last_pagination: Mutex<Option<Pagination>>,
}

impl StubBackend {
    /// A backend whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Status history the stub agent reports for created tasks.
    pub fn with_history(mut self, history: Vec<Status>) -> Self {
        self.history = history;
        self
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.create_calls() + self.get_calls() + self.search_calls()
    }

    pub fn last_pagination(&self) -> Option<Pagination> {
        *self.last_pagination.lock().unwrap()
    }
}

#[async_trait]
impl TaskBackend for StubBackend {
    fn transport(&self) -> &str {
        "stub"
    }

    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, BackendError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(BackendError::transport(BackendKind::Agent, "connection refused"));
        }
        Ok(Task {
            id: 1,
            name: request.name,
            difficulty: request.difficulty,
            status_history: self.history.clone(),
        })
    }

    async fn get_task(&self, id: i64) -> Result<Task, BackendError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(BackendError::status(BackendKind::DataProvider, "404", "not found"));
        }
        Ok(Task {
            id,
            name: format!("task-{id}"),
            difficulty: 1,
            status_history: Vec::new(),
        })
    }

    async fn search_task(
        &self,
        pagination: Pagination,
    ) -> Result<SearchTaskResponse, BackendError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_pagination.lock().unwrap() = Some(pagination);
        if self.fail {
            return Err(BackendError::transport(BackendKind::DataProvider, "timeout"));
        }
        Ok(SearchTaskResponse {
            tasks: vec![Task {
                id: 1,
                name: "task-1".to_string(),
                difficulty: 1,
                status_history: Vec::new(),
            }],
            pages: 1,
        })
    }
}
