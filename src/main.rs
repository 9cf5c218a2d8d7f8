//! taskgate - Task API gateway
//!
//! Main entry point: loads configuration, dials the backends and serves the
//! task API until SIGINT or SIGTERM.

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use taskgate_api::GatewayServer;
use taskgate_config::{Config, ConfigLoader, ConfigValidator};

mod cli;

use cli::{Cli, LogFormat};

/// Initialize tracing on stderr.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

/// Load and validate the configuration file.
fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = ConfigLoader::load(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    let warnings = ConfigValidator::validate(&config)
        .into_result()
        .with_context(|| format!("Invalid config in {}", path.display()))?;
    for warning in warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }

    Ok(config)
}

/// Cancel `token` on the first SIGINT or SIGTERM.
async fn wait_for_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
        _ = token.cancelled() => return,
    }
    token.cancel();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = load_config(&cli.config)?;
    if cli.check {
        info!(config = %cli.config.display(), "Configuration is valid");
        return Ok(());
    }

    info!("Starting taskgate v{}", env!("CARGO_PKG_VERSION"));
    info!(
        transport = config.backends.transport.as_str(),
        agent = %config.backends.agent.url(),
        data_provider = %config.backends.data_provider.url(),
        "Connecting to backends"
    );

    let server = GatewayServer::from_config(&config)
        .await
        .context("Failed to initialize backends")?;

    let token = CancellationToken::new();
    tokio::spawn(wait_for_signal(token.clone()));

    server.run(token).await?;
    info!("taskgate stopped");
    Ok(())
}
