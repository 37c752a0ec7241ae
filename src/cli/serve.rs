//! Serve command implementation

use crate::action::ActionDispatcher;
use crate::api::{create_router, AppState};
use crate::cli::{load_config, ServeArgs};
use crate::config::FinopsConfig;
use crate::logging::init_tracing;
use crate::sources::DataSources;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<FinopsConfig, Box<dyn std::error::Error>> {
    let mut config = load_config(&args.source)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
        _ = cancel_token.cancelled() => {}
    }

    cancel_token.cancel();
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load and merge configuration
    let config = load_config_with_overrides(&args)?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;

    tracing::info!("Starting finops action group server");
    tracing::debug!(?config, "Loaded configuration");

    // 3. Pick data sources once for the process lifetime
    let sources = DataSources::from_config(&config).await;
    let dispatcher = ActionDispatcher::new(sources).with_event_logging(config.logging.log_events);

    // 4. Build API router
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(dispatcher, Arc::new(config)));
    let app = create_router(state);

    // 5. Bind and serve
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "finops API server listening");

    let cancel_token = CancellationToken::new();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    tracing::info!("finops server stopped");
    Ok(())
}
