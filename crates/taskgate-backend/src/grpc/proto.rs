//! Protobuf messages for the agent and data-provider services.
//!
//! Mirrors `taskresolver/v1/task.proto`:
//!
//! ```text
//! service AgentService {
//!   rpc CreateTask(CreateTaskRequest) returns (Task);
//! }
//! service DataProviderService {
//!   rpc GetTask(GetTaskRequest) returns (Task);
//!   rpc SearchTask(SearchTaskRequest) returns (SearchTaskResponse);
//! }
//! ```

/// Fully qualified method paths.
pub mod paths {
    pub const CREATE_TASK: &str = "/taskresolver.v1.AgentService/CreateTask";
    pub const GET_TASK: &str = "/taskresolver.v1.DataProviderService/GetTask";
    pub const SEARCH_TASK: &str = "/taskresolver.v1.DataProviderService/SearchTask";
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Status {
    #[prost(int64, tag = "1")]
    pub status: i64,
    #[prost(message, optional, tag = "2")]
    pub timestamp: Option<::prost_types::Timestamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Task {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(int64, tag = "3")]
    pub difficulty: i64,
    #[prost(message, repeated, tag = "4")]
    pub status_history: Vec<Status>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateTaskRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(int64, tag = "2")]
    pub difficulty: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetTaskRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SearchTaskRequest {
    #[prost(int64, tag = "1")]
    pub page: i64,
    #[prost(int64, tag = "2")]
    pub per_page: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SearchTaskResponse {
    #[prost(message, repeated, tag = "1")]
    pub tasks: Vec<Task>,
    #[prost(int64, tag = "2")]
    pub pages: i64,
}
