//! # taskgate Backend
//!
//! Backend channel factory for the taskgate gateway.
//!
//! Builds one long-lived handle per backend (agent, data provider), optionally
//! secured with mutual TLS, and wraps both in a single [`TaskBackend`]
//! implementation for the configured transport:
//!
//! - [`HttpTaskBackend`] - JSON over HTTP via `reqwest`
//! - [`GrpcTaskBackend`] - gRPC via `tonic`
//!
//! Every failure while loading certificates or dialing is a [`StartupError`].
//!
//! [`TaskBackend`]: taskgate_protocols::TaskBackend

mod error;
mod factory;
pub mod grpc;
pub mod http;
pub mod tls;

#[cfg(test)]
mod test_support;

pub use error::StartupError;
pub use factory::BackendFactory;
pub use grpc::GrpcTaskBackend;
pub use http::{HttpChannel, HttpTaskBackend};
pub use tls::{ClientIdentity, TlsMaterial};
