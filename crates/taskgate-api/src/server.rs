//! Gateway server implementation.
//!
//! Owns the listener and the router. Shutdown is driven by a
//! [`CancellationToken`]: once it fires the listener stops accepting and
//! in-flight requests get a bounded grace period to finish.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use taskgate_backend::{BackendFactory, StartupError};
use taskgate_config::{Config, GatewayConfig};

use crate::http::routes::create_router;
use crate::service::TaskService;
use crate::state::AppState;

/// Errors raised while binding or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// The gateway server.
pub struct GatewayServer {
    addr: String,
    grace: Duration,
    state: Arc<AppState>,
}

impl GatewayServer {
    /// Create a server around prepared state.
    pub fn new(config: &GatewayConfig, state: Arc<AppState>) -> Self {
        Self {
            addr: config.http.addr.clone(),
            grace: config.shutdown_grace(),
            state,
        }
    }

    /// Build backend channels and application state from a full
    /// configuration. Fails before any listener exists.
    pub async fn from_config(config: &Config) -> Result<Self, StartupError> {
        let backend = BackendFactory::connect(&config.backends).await?;
        let service = TaskService::new(backend);
        let state = Arc::new(AppState::new(service, &config.gateway));
        Ok(Self::new(&config.gateway, state))
    }

    /// Get the configured listen address.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Grace period for in-flight requests at shutdown.
    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Build the router for this server.
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        TcpListener::bind(&self.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.addr.clone(),
                source,
            })
    }

    /// Serve on an already bound listener until `token` is cancelled.
    pub async fn serve(
        &self,
        listener: TcpListener,
        token: CancellationToken,
    ) -> Result<(), ServerError> {
        let local_addr = listener
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| self.addr.clone());
        info!(
            addr = %local_addr,
            transport = self.state.service.transport(),
            "Gateway listening"
        );

        let shutdown = token.clone();
        let server = axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .into_future();
        tokio::pin!(server);

        tokio::select! {
            result = &mut server => return result.map_err(ServerError::Serve),
            _ = token.cancelled() => {}
        }

        info!(
            grace_secs = self.grace.as_secs(),
            "Shutdown requested, draining in-flight requests"
        );
        match tokio::time::timeout(self.grace, server).await {
            Ok(result) => {
                info!("Gateway stopped");
                result.map_err(ServerError::Serve)
            }
            Err(_) => {
                warn!("Grace period elapsed, abandoning in-flight requests");
                Ok(())
            }
        }
    }

    /// Bind and serve until `token` is cancelled.
    pub async fn run(&self, token: CancellationToken) -> Result<(), ServerError> {
        let listener = self.bind().await?;
        self.serve(listener, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubBackend;
    use std::path::PathBuf;
    use taskgate_config::{BackendsConfig, EndpointConfig, HttpConfig, Transport};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn stub_server(addr: &str, grace_secs: u64) -> GatewayServer {
        let config = GatewayConfig {
            http: HttpConfig {
                addr: addr.to_string(),
            },
            shutdown_grace_secs: grace_secs,
            ..GatewayConfig::default()
        };
        let service = TaskService::new(Arc::new(StubBackend::default()));
        GatewayServer::new(&config, Arc::new(AppState::new(service, &config)))
    }

    fn http_backends() -> BackendsConfig {
        BackendsConfig {
            transport: Transport::Http,
            agent: EndpointConfig::new("127.0.0.1:1"),
            data_provider: EndpointConfig::new("127.0.0.1:1"),
            ..BackendsConfig::default()
        }
    }

    async fn raw_get(addr: &str, path: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[test]
    fn test_server_from_gateway_config() {
        let server = stub_server("127.0.0.1:9999", 7);
        assert_eq!(server.addr(), "127.0.0.1:9999");
        assert_eq!(server.grace(), Duration::from_secs(7));
    }

    #[tokio::test]
    async fn test_from_config_http_is_lazy() {
        let config = Config {
            backends: http_backends(),
            ..Config::default()
        };
        let server = GatewayServer::from_config(&config).await.unwrap();
        assert_eq!(server.addr(), "0.0.0.0:8080");
        assert_eq!(server.state.service.transport(), "http");
    }

    #[tokio::test]
    async fn test_from_config_unreadable_ca_fails() {
        let mut backends = http_backends();
        backends.agent.use_tls = true;
        backends.tls.ca_cert = Some(PathBuf::from("/nonexistent/taskgate/ca.pem"));
        let config = Config {
            backends,
            ..Config::default()
        };

        let result = GatewayServer::from_config(&config).await;
        assert!(matches!(result, Err(StartupError::ReadCertificate { .. })));
    }

    #[tokio::test]
    async fn test_bind_address_in_use() {
        let holder = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = holder.local_addr().unwrap().to_string();

        let server = stub_server(&addr, 1);
        let err = server.bind().await.unwrap_err();
        assert!(matches!(err, ServerError::Bind { .. }));
        assert!(err.to_string().contains(&addr));
    }

    #[tokio::test]
    async fn test_serve_and_shutdown() {
        let server = Arc::new(stub_server("127.0.0.1:0", 1));
        let listener = server.bind().await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let token = CancellationToken::new();

        let handle = {
            let server = server.clone();
            let token = token.clone();
            tokio::spawn(async move { server.serve(listener, token).await })
        };

        let response = raw_get(&addr, "/healthz").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains(r#"{"status":"ok"}"#));

        token.cancel();
        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_cancelled_before_serving_returns() {
        let server = stub_server("127.0.0.1:0", 1);
        let listener = server.bind().await.unwrap();
        let token = CancellationToken::new();
        token.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), server.serve(listener, token))
            .await
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_shutdown_stops_accepting() {
        let server = Arc::new(stub_server("127.0.0.1:0", 1));
        let listener = server.bind().await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let token = CancellationToken::new();

        let handle = {
            let server = server.clone();
            let token = token.clone();
            tokio::spawn(async move { server.serve(listener, token).await })
        };

        token.cancel();
        handle.await.unwrap().unwrap();
        assert!(tokio::net::TcpStream::connect(&addr).await.is_err());
    }
}
