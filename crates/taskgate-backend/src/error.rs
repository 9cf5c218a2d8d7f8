//! Startup errors.

use std::path::PathBuf;

use thiserror::Error;

use taskgate_protocols::BackendKind;

/// Failure while building backend channels. Always fatal: the gateway must
/// not serve with a broken trust configuration or an unreachable backend.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("TLS is enabled for {0} but no CA certificate is configured")]
    MissingCaCertificate(BackendKind),

    #[error("Failed to read {what} from {path}: {source}")]
    ReadCertificate {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {what} in {path}: {message}")]
    InvalidCertificate {
        what: &'static str,
        path: PathBuf,
        message: String,
    },

    #[error("Invalid address for {backend}: {addr} ({message})")]
    InvalidAddress {
        backend: BackendKind,
        addr: String,
        message: String,
    },

    #[error("TLS configuration for {backend} failed: {message}")]
    Tls {
        backend: BackendKind,
        message: String,
    },

    #[error("Failed to connect to {backend} at {addr}: {message}")]
    Connect {
        backend: BackendKind,
        addr: String,
        message: String,
    },
}
