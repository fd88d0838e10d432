pub mod handlers;
mod types;

pub use handlers::{AppState, StageTimeouts};
pub use types::*;

use crate::{
    Result,
    config::Config,
    llm::OpenAiClient,
    query::LlmQueryGenerator,
    search::FoursquareClient,
};
use axum::{Router, routing::get};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Wires the production collaborators from configuration.
pub fn build_state(config: &Config) -> Result<AppState> {
    let llm_client = Arc::new(OpenAiClient::new(config.llm.clone())?);
    let generator = LlmQueryGenerator::new(llm_client, &config.llm);
    let search = FoursquareClient::new(config.search.clone())?;

    Ok(AppState {
        auth_code: Arc::from(config.auth.code.as_str()),
        generator: Arc::new(generator),
        search: Arc::new(search),
        timeouts: StageTimeouts {
            generation: Duration::from_secs(config.llm.timeout_secs),
            search: Duration::from_secs(config.search.timeout_secs),
        },
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/execute", get(handlers::execute))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let app = router(build_state(&config)?);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
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
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
