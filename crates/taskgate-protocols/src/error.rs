//! Backend errors.

use thiserror::Error;

use crate::backend::BackendKind;

/// Failure of a call to the agent or the data provider.
///
/// Unreachable backends and backends that reject a request are the same
/// error kind to callers; the variants only carry context for logging.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{backend} transport error: {message}")]
    Transport {
        backend: BackendKind,
        message: String,
    },

    #[error("{backend} returned status {status}: {message}")]
    Status {
        backend: BackendKind,
        status: String,
        message: String,
    },

    #[error("{backend} sent an undecodable reply: {message}")]
    Decode {
        backend: BackendKind,
        message: String,
    },
}

impl BackendError {
    pub fn transport(backend: BackendKind, message: impl Into<String>) -> Self {
        Self::Transport {
            backend,
            message: message.into(),
        }
    }

    pub fn status(
        backend: BackendKind,
        status: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Status {
            backend,
            status: status.into(),
            message: message.into(),
        }
    }

    pub fn decode(backend: BackendKind, message: impl Into<String>) -> Self {
        Self::Decode {
            backend,
            message: message.into(),
        }
    }

    /// The backend the failed call was addressed to.
    pub fn backend(&self) -> BackendKind {
        match self {
            Self::Transport { backend, .. }
            | Self::Status { backend, .. }
            | Self::Decode { backend, .. } => *backend,
        }
    }

    /// The status reported by the backend, if it answered at all.
    pub fn backend_status(&self) -> Option<&str> {
        match self {
            Self::Status { status, .. } => Some(status),
            _ => None,
        }
    }
}
