//! gRPC transport: hand-maintained protobuf messages, their mapping to the
//! domain model, and the client.

mod client;
mod convert;
pub mod proto;

pub use client::{connect, endpoint, GrpcTaskBackend};
