//! Conversions between protobuf messages and the domain model.

use chrono::{DateTime, Utc};

use taskgate_protocols::{self as domain, BackendError, BackendKind};

use super::proto;

pub(crate) fn create_request(request: &domain::CreateTaskRequest) -> proto::CreateTaskRequest {
    proto::CreateTaskRequest {
        name: request.name.clone(),
        difficulty: request.difficulty,
    }
}

pub(crate) fn search_request(pagination: domain::Pagination) -> proto::SearchTaskRequest {
    proto::SearchTaskRequest {
        page: pagination.page,
        per_page: pagination.per_page,
    }
}

pub(crate) fn task(kind: BackendKind, task: proto::Task) -> Result<domain::Task, BackendError> {
    let status_history = task
        .status_history
        .into_iter()
        .map(|status| self::status(kind, status))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(domain::Task {
        id: task.id,
        name: task.name,
        difficulty: task.difficulty,
        status_history,
    })
}

pub(crate) fn search_response(
    kind: BackendKind,
    response: proto::SearchTaskResponse,
) -> Result<domain::SearchTaskResponse, BackendError> {
    let tasks = response
        .tasks
        .into_iter()
        .map(|t| task(kind, t))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(domain::SearchTaskResponse {
        tasks,
        pages: response.pages,
    })
}

fn status(kind: BackendKind, status: proto::Status) -> Result<domain::Status, BackendError> {
    let timestamp = status
        .timestamp
        .ok_or_else(|| BackendError::decode(kind, "status entry without timestamp"))?;
    Ok(domain::Status::new(status.status, timestamp_to_utc(kind, &timestamp)?))
}

fn timestamp_to_utc(
    kind: BackendKind,
    ts: &prost_types::Timestamp,
) -> Result<DateTime<Utc>, BackendError> {
    let nanos = u32::try_from(ts.nanos)
        .map_err(|_| BackendError::decode(kind, format!("negative nanos in timestamp: {}", ts.nanos)))?;
    DateTime::from_timestamp(ts.seconds, nanos).ok_or_else(|| {
        BackendError::decode(
            kind,
            format!("timestamp out of range: {}s {}ns", ts.seconds, ts.nanos),
        )
    })
}
