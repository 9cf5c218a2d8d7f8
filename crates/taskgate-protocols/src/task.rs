//! Task entities and request/response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status code recorded when a task has been handed off to the agent.
pub const STATUS_QUEUED: i64 = 0;

/// Page size used when the caller gives none (or an unusable one).
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Page number used when the caller gives none (or an unusable one).
pub const DEFAULT_PAGE: i64 = 1;

/// A single entry in a task's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub status: i64,
    pub timestamp: DateTime<Utc>,
}

impl Status {
    pub fn new(status: i64, timestamp: DateTime<Utc>) -> Self {
        Self { status, timestamp }
    }

    /// A queued status stamped with the current time.
    pub fn queued_now() -> Self {
        Self::new(STATUS_QUEUED, Utc::now())
    }
}

/// A task as returned to API callers.
///
/// The id is assigned by the data provider and never changes afterwards.
/// `status_history` is in chronological order and is only ever appended to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub difficulty: i64,
    #[serde(default)]
    pub status_history: Vec<Status>,
}

impl Task {
    /// Append a status entry.
    pub fn push_status(&mut self, status: Status) {
        self.status_history.push(status);
    }
}

/// Request body for creating a task. A missing difficulty decodes as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
    #[serde(default)]
    pub difficulty: i64,
}

impl CreateTaskRequest {
    pub fn new(name: impl Into<String>, difficulty: i64) -> Self {
        Self {
            name: name.into(),
            difficulty,
        }
    }
}

/// One page of tasks plus the total number of pages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchTaskResponse {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub pages: i64,
}

/// Resolved pagination parameters forwarded to the data provider.
///
/// Both values are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub per_page: i64,
    pub page: i64,
}

impl Pagination {
    /// Resolve optional caller input, replacing absent, zero or negative values
    /// with the defaults.
    pub fn resolve(per_page: Option<i64>, page: Option<i64>) -> Self {
        Self {
            per_page: per_page.filter(|v| *v > 0).unwrap_or(DEFAULT_PER_PAGE),
            page: page.filter(|v| *v > 0).unwrap_or(DEFAULT_PAGE),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            page: DEFAULT_PAGE,
        }
    }
}
