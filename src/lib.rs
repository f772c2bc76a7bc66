pub mod api;
pub mod classification;
pub mod config;
pub mod core_state;
pub mod directory;
pub mod filter;
pub mod models;
pub mod reconcile;
pub mod selection;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::classification::ClassificationGateway;
use crate::config::{AppConfig, ConfigError};
use crate::core_state::CoreState;
use crate::directory::{Directory, DirectoryError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the shared state from resolved configuration.
pub fn build_core_state(config: &AppConfig) -> Result<Arc<CoreState>, StartupError> {
    let directory = Directory::load(config.directory_path.as_deref())?;
    let gateway = ClassificationGateway::from_settings(&config.llm);
    Ok(Arc::new(CoreState::new(directory, gateway)))
}

/// Start DocFinder and serve until Ctrl-C.
pub fn run() -> Result<(), StartupError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;
    tracing::info!(
        bind = %config.bind,
        llm_url = %config.llm.base_url,
        model = %config.llm.model,
        "Configuration resolved"
    );

    let core = build_core_state(&config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let server = api::start_server(core, config.bind)
            .await
            .map_err(StartupError::Server)?;

        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Cannot listen for shutdown signal: {e}");
        }
        server.stop().await;
        Ok::<(), StartupError>(())
    })
}
