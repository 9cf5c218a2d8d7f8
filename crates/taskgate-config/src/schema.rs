//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub backends: BackendsConfig,
}

/// Inbound side of the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub http: HttpConfig,

    /// Inclusive upper bound for task difficulty. The lower bound is 0.
    #[serde(default = "default_max_difficulty")]
    pub max_difficulty: i64,

    /// Attach permissive CORS headers (any origin, standard verbs).
    #[serde(default = "default_true")]
    pub cors_permissive: bool,

    /// How long in-flight requests may drain after a shutdown signal.
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace_secs: u64,
}

impl GatewayConfig {
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            max_difficulty: default_max_difficulty(),
            cors_permissive: true,
            shutdown_grace_secs: default_shutdown_grace(),
        }
    }
}

fn default_max_difficulty() -> i64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_shutdown_grace() -> u64 {
    5
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_http_addr")]
    pub addr: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            addr: default_http_addr(),
        }
    }
}

fn default_http_addr() -> String {
    "0.0.0.0:8080".to_string()
}

/// Wire transport used for both backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// JSON over HTTP.
    Http,
    /// gRPC over an HTTP/2 channel.
    #[default]
    Grpc,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Grpc => "grpc",
        }
    }
}

/// Outbound side of the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendsConfig {
    #[serde(default)]
    pub transport: Transport,

    #[serde(default)]
    pub agent: EndpointConfig,

    #[serde(default)]
    pub data_provider: EndpointConfig,

    /// Client-side TLS material shared by both backends.
    #[serde(default)]
    pub tls: ClientTlsConfig,
}

/// Connection settings for one backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// `host:port` or a full URL.
    #[serde(default)]
    pub addr: String,

    #[serde(default, alias = "useTLS")]
    pub use_tls: bool,

    /// Expected server identity for certificate hostname verification.
    #[serde(default, alias = "grpcServerName", skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Per-call deadline. `None` leaves calls unbounded.
    #[serde(default = "default_request_timeout", skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl EndpointConfig {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            ..Self::default()
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// The address as a URL, adding a scheme that matches `use_tls` when the
    /// configured address has none.
    pub fn url(&self) -> String {
        let addr = self.addr.trim().trim_end_matches('/');
        if addr.starts_with("http://") || addr.starts_with("https://") {
            addr.to_string()
        } else if self.use_tls {
            format!("https://{addr}")
        } else {
            format!("http://{addr}")
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            addr: String::new(),
            use_tls: false,
            server_name: None,
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_request_timeout() -> Option<u64> {
    Some(30)
}

/// Client TLS material paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientTlsConfig {
    #[serde(default, alias = "caCert", skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    #[serde(default, alias = "clientCert", skip_serializing_if = "Option::is_none")]
    pub client_cert: Option<PathBuf>,

    #[serde(default, alias = "clientKey", skip_serializing_if = "Option::is_none")]
    pub client_key: Option<PathBuf>,
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
