//! JSON-over-HTTP transport.
//!
//! Each backend gets one pooled `reqwest::Client`, built at startup and
//! shared by all requests.

use std::net::{SocketAddr, ToSocketAddrs};

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use taskgate_config::EndpointConfig;
use taskgate_protocols::{
    BackendError, BackendKind, CreateTaskRequest, Pagination, SearchTaskResponse, Task,
    TaskBackend,
};

use crate::error::StartupError;
use crate::tls::TlsMaterial;

const TASK_PATH: &str = "/api/v1/task";

/// A long-lived HTTP handle to one backend.
#[derive(Debug, Clone)]
pub struct HttpChannel {
    kind: BackendKind,
    base_url: String,
    client: reqwest::Client,
}

impl HttpChannel {
    /// Build the client for one backend.
    ///
    /// When the endpoint requires TLS, the CA from `tls` replaces the built-in
    /// roots and the client identity, if any, is presented for mutual TLS.
    /// A configured `server_name` becomes the request host and is pinned to
    /// the configured address, so the certificate is verified against it.
    pub fn new(
        kind: BackendKind,
        endpoint: &EndpointConfig,
        tls: Option<&TlsMaterial>,
    ) -> Result<Self, StartupError> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .connect_timeout(endpoint.connect_timeout());

        if let Some(timeout) = endpoint.request_timeout() {
            builder = builder.timeout(timeout);
        }

        if endpoint.use_tls {
            let material = tls.ok_or(StartupError::MissingCaCertificate(kind))?;
            let ca = reqwest::Certificate::from_pem(&material.ca_pem).map_err(|e| {
                StartupError::Tls {
                    backend: kind,
                    message: format!("CA certificate: {e}"),
                }
            })?;
            builder = builder.tls_built_in_root_certs(false).add_root_certificate(ca);

            if let Some(identity) = &material.identity {
                let identity = reqwest::Identity::from_pem(&identity.pem_bundle()).map_err(|e| {
                    StartupError::Tls {
                        backend: kind,
                        message: format!("client identity: {e}"),
                    }
                })?;
                builder = builder.identity(identity);
            }
        }

        let mut base_url = endpoint.url();
        if let (true, Some(server_name)) = (endpoint.use_tls, endpoint.server_name.as_deref()) {
            let (url, addrs) = pin_server_name(kind, &base_url, server_name)?;
            builder = builder.resolve_to_addrs(server_name, &addrs);
            base_url = url;
        }

        let client = builder.build().map_err(|e| StartupError::Tls {
            backend: kind,
            message: e.to_string(),
        })?;

        Ok(Self::with_client(kind, base_url, client))
    }

    /// Wrap an existing client.
    pub fn with_client(kind: BackendKind, base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            kind,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode the body, accepting only `expected` as success.
    async fn call<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        expected: StatusCode,
    ) -> Result<T, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::transport(self.kind, e.to_string()))?;

        let status = response.status();
        if status != expected {
            let text = response.text().await.unwrap_or_default();
            return Err(BackendError::status(self.kind, status.as_u16().to_string(), text));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::decode(self.kind, e.to_string()))
    }
}

/// Swap the URL host for `server_name` and resolve the configured host to the
/// addresses the client should dial for it.
fn pin_server_name(
    kind: BackendKind,
    base_url: &str,
    server_name: &str,
) -> Result<(String, Vec<SocketAddr>), StartupError> {
    let invalid = |message: String| StartupError::InvalidAddress {
        backend: kind,
        addr: base_url.to_string(),
        message,
    };

    let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    let host = url
        .host_str()
        .ok_or_else(|| invalid("missing host".to_string()))?
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_string();
    let port = url
        .port_or_known_default()
        .ok_or_else(|| invalid("missing port".to_string()))?;

    let addrs: Vec<SocketAddr> = (host.as_str(), port)
        .to_socket_addrs()
        .map_err(|e| invalid(format!("cannot resolve {host}: {e}")))?
        .collect();
    if addrs.is_empty() {
        return Err(invalid(format!("{host} resolved to no addresses")));
    }

    url.set_host(Some(server_name))
        .map_err(|e| invalid(format!("invalid server_name '{server_name}': {e}")))?;
    let url = url.as_str().trim_end_matches('/').to_string();
    Ok((url, addrs))
}

/// [`TaskBackend`] over JSON/HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskBackend {
    agent: HttpChannel,
    data_provider: HttpChannel,
}

impl HttpTaskBackend {
    pub fn new(agent: HttpChannel, data_provider: HttpChannel) -> Self {
        Self {
            agent,
            data_provider,
        }
    }

    /// Build both channels from configuration.
    pub fn from_config(
        agent: &EndpointConfig,
        data_provider: &EndpointConfig,
        tls: Option<&TlsMaterial>,
    ) -> Result<Self, StartupError> {
        let agent = HttpChannel::new(BackendKind::Agent, agent, tls)?;
        let data_provider = HttpChannel::new(BackendKind::DataProvider, data_provider, tls)?;
        debug!(
            agent = agent.base_url(),
            data_provider = data_provider.base_url(),
            "HTTP channels built"
        );
        Ok(Self::new(agent, data_provider))
    }
}

#[async_trait]
impl TaskBackend for HttpTaskBackend {
    fn transport(&self) -> &str {
        "http"
    }

    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, BackendError> {
        let url = self.agent.url(TASK_PATH);
        debug!(%url, name = %request.name, "POST task to agent");
        let builder = self.agent.client.post(&url).json(&request);
        self.agent.call(builder, StatusCode::CREATED).await
    }

    async fn get_task(&self, id: i64) -> Result<Task, BackendError> {
        let url = self.data_provider.url(&format!("{TASK_PATH}/{id}"));
        debug!(%url, "GET task from data provider");
        let builder = self.data_provider.client.get(&url);
        self.data_provider.call(builder, StatusCode::OK).await
    }

    async fn search_task(
        &self,
        pagination: Pagination,
    ) -> Result<SearchTaskResponse, BackendError> {
        let url = self.data_provider.url(TASK_PATH);
        debug!(%url, per_page = pagination.per_page, page = pagination.page, "Search tasks");
        let builder = self
            .data_provider
            .client
            .get(&url)
            .query(&[("per_page", pagination.per_page), ("page", pagination.page)]);
        self.data_provider.call(builder, StatusCode::OK).await
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
