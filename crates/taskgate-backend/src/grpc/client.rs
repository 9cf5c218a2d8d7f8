//! gRPC transport.

use async_trait::async_trait;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint, Identity};
use tonic::Code;
use tracing::{debug, info};

use taskgate_config::EndpointConfig;
use taskgate_protocols::{
    BackendError, BackendKind, CreateTaskRequest, Pagination, SearchTaskResponse, Task,
    TaskBackend,
};

use super::convert;
use super::proto::{self, paths};
use crate::error::StartupError;
use crate::tls::TlsMaterial;

/// Build the endpoint for one backend, applying timeouts and TLS settings.
///
/// Does not dial.
pub fn endpoint(
    kind: BackendKind,
    config: &EndpointConfig,
    tls: Option<&TlsMaterial>,
) -> Result<Endpoint, StartupError> {
    let url = config.url();
    let mut endpoint = Endpoint::from_shared(url.clone())
        .map_err(|e| StartupError::InvalidAddress {
            backend: kind,
            addr: url,
            message: e.to_string(),
        })?
        .connect_timeout(config.connect_timeout());

    if let Some(timeout) = config.request_timeout() {
        endpoint = endpoint.timeout(timeout);
    }

    if config.use_tls {
        let material = tls.ok_or(StartupError::MissingCaCertificate(kind))?;
        let mut tls_config =
            ClientTlsConfig::new().ca_certificate(Certificate::from_pem(&material.ca_pem));
        if let Some(identity) = &material.identity {
            tls_config =
                tls_config.identity(Identity::from_pem(&identity.cert_pem, &identity.key_pem));
        }
        if let Some(server_name) = &config.server_name {
            tls_config = tls_config.domain_name(server_name.clone());
        }
        endpoint = endpoint.tls_config(tls_config).map_err(|e| StartupError::Tls {
            backend: kind,
            message: format!("{e:?}"),
        })?;
    }

    Ok(endpoint)
}

/// Dial one backend. The channel is multiplexed and reused for the process
/// lifetime; a failed dial is not retried.
pub async fn connect(
    kind: BackendKind,
    config: &EndpointConfig,
    tls: Option<&TlsMaterial>,
) -> Result<Channel, StartupError> {
    let endpoint = endpoint(kind, config, tls)?;
    let channel = endpoint
        .connect()
        .await
        .map_err(|e| StartupError::Connect {
            backend: kind,
            addr: config.url(),
            message: format!("{e:?}"),
        })?;

    info!(
        backend = %kind,
        addr = %config.url(),
        tls = config.use_tls,
        "gRPC channel established"
    );
    Ok(channel)
}

/// [`TaskBackend`] over gRPC.
#[derive(Debug, Clone)]
pub struct GrpcTaskBackend {
    agent: Channel,
    data_provider: Channel,
}

impl GrpcTaskBackend {
    pub fn new(agent: Channel, data_provider: Channel) -> Self {
        Self {
            agent,
            data_provider,
        }
    }

    /// Dial both backends from configuration.
    pub async fn connect(
        agent: &EndpointConfig,
        data_provider: &EndpointConfig,
        tls: Option<&TlsMaterial>,
    ) -> Result<Self, StartupError> {
        let agent = connect(BackendKind::Agent, agent, tls).await?;
        let data_provider = connect(BackendKind::DataProvider, data_provider, tls).await?;
        Ok(Self::new(agent, data_provider))
    }

    fn channel(&self, kind: BackendKind) -> Channel {
        match kind {
            BackendKind::Agent => self.agent.clone(),
            BackendKind::DataProvider => self.data_provider.clone(),
        }
    }

    async fn unary<Req, Resp>(
        &self,
        kind: BackendKind,
        path: &'static str,
        request: Req,
    ) -> Result<Resp, BackendError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut grpc = tonic::client::Grpc::new(self.channel(kind));
        grpc.ready()
            .await
            .map_err(|e| BackendError::transport(kind, format!("channel not ready: {e}")))?;

        let codec = ProstCodec::<Req, Resp>::default();
        grpc.unary(
            tonic::Request::new(request),
            PathAndQuery::from_static(path),
            codec,
        )
        .await
        .map(tonic::Response::into_inner)
        .map_err(|status| status_error(kind, status))
    }
}

fn status_error(kind: BackendKind, status: tonic::Status) -> BackendError {
    match status.code() {
        Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled => {
            BackendError::transport(kind, format!("{:?}: {}", status.code(), status.message()))
        }
        code => BackendError::status(kind, format!("{code:?}"), status.message()),
    }
}

#[async_trait]
impl TaskBackend for GrpcTaskBackend {
    fn transport(&self) -> &str {
        "grpc"
    }

    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, BackendError> {
        debug!(name = %request.name, "CreateTask via gRPC");
        let reply: proto::Task = self
            .unary(
                BackendKind::Agent,
                paths::CREATE_TASK,
                convert::create_request(&request),
            )
            .await?;
        convert::task(BackendKind::Agent, reply)
    }

    async fn get_task(&self, id: i64) -> Result<Task, BackendError> {
        debug!(id, "GetTask via gRPC");
        let reply: proto::Task = self
            .unary(
                BackendKind::DataProvider,
                paths::GET_TASK,
                proto::GetTaskRequest { id },
            )
            .await?;
        convert::task(BackendKind::DataProvider, reply)
    }

    async fn search_task(
        &self,
        pagination: Pagination,
    ) -> Result<SearchTaskResponse, BackendError> {
        debug!(
            per_page = pagination.per_page,
            page = pagination.page,
            "SearchTask via gRPC"
        );
        let reply: proto::SearchTaskResponse = self
            .unary(
                BackendKind::DataProvider,
                paths::SEARCH_TASK,
                convert::search_request(pagination),
            )
            .await?;
        convert::search_response(BackendKind::DataProvider, reply)
    }
}
