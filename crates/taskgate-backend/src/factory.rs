//! Backend channel factory.

use std::sync::Arc;

use tracing::info;

use taskgate_config::{BackendsConfig, Transport};
use taskgate_protocols::{BackendKind, TaskBackend};

use crate::error::StartupError;
use crate::grpc::GrpcTaskBackend;
use crate::http::HttpTaskBackend;
use crate::tls::TlsMaterial;

/// Builds the backend handle the gateway uses for its whole lifetime.
pub struct BackendFactory;

impl BackendFactory {
    /// Load TLS material if any backend needs it, then build the transport
    /// named in the configuration.
    pub async fn connect(config: &BackendsConfig) -> Result<Arc<dyn TaskBackend>, StartupError> {
        let tls = Self::load_tls(config)?;

        let backend: Arc<dyn TaskBackend> = match config.transport {
            Transport::Http => Arc::new(HttpTaskBackend::from_config(
                &config.agent,
                &config.data_provider,
                tls.as_ref(),
            )?),
            Transport::Grpc => Arc::new(
                GrpcTaskBackend::connect(&config.agent, &config.data_provider, tls.as_ref())
                    .await?,
            ),
        };

        info!(
            transport = backend.transport(),
            mutual_tls = tls.as_ref().is_some_and(TlsMaterial::has_identity),
            agent = %config.agent.url(),
            data_provider = %config.data_provider.url(),
            "Backend channels ready"
        );
        Ok(backend)
    }

    /// Read certificates when at least one backend has TLS enabled.
    pub fn load_tls(config: &BackendsConfig) -> Result<Option<TlsMaterial>, StartupError> {
        let first_tls = [
            (BackendKind::Agent, config.agent.use_tls),
            (BackendKind::DataProvider, config.data_provider.use_tls),
        ]
        .into_iter()
        .find_map(|(kind, use_tls)| use_tls.then_some(kind));

        let Some(kind) = first_tls else {
            return Ok(None);
        };

        match TlsMaterial::load(&config.tls)? {
            Some(material) => Ok(Some(material)),
            None => Err(StartupError::MissingCaCertificate(kind)),
        }
    }
}
