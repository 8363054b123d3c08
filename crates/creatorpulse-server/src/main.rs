mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = creatorpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let categories = Arc::new(creatorpulse_core::load_categories(&config.categories_path)?);
    let store = Arc::new(creatorpulse_store::SnapshotStore::load(&config.data_dir)?);
    tracing::info!(
        creators = store.len(),
        data_dir = %config.data_dir.display(),
        "snapshot store loaded"
    );
    if config.generator_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set; generation endpoints will refuse requests");
    }

    let orchestrator = Arc::new(creatorpulse_generate::Orchestrator::from_config(
        store,
        categories,
        &config,
    )?);
    let app = build_app(AppState { orchestrator });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
