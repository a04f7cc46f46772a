//! firsttask-gateway server entry point.
//!
//! Starts the Axum HTTP server for the lead form.

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use firsttask_gateway::api;
use firsttask_gateway::app_state::AppState;
use firsttask_gateway::config::{self, AppConfig};
use firsttask_gateway::notify::{Mailer, SmtpMailer};
use firsttask_gateway::service::SubmissionService;
use firsttask_gateway::storage::StorageManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing before config so the port guard can log.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_env_filter())),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env();
    tracing::info!(addr = %config.listen_addr, "starting firsttask-gateway");

    // Select the storage backend (one-shot probe) and build the mailer
    let storage = Arc::new(
        StorageManager::connect(config.database_url.as_deref(), &config.db_path).await,
    );
    tracing::info!(backend = %storage.active_backend(), "storage backend selected");

    let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::from_config(&config));

    // Build service and application state
    let service = Arc::new(SubmissionService::new(
        storage,
        mailer,
        config.owner_recipient().map(str::to_string),
    ));
    let app_state = AppState {
        service,
        admin_key: config.admin_key.clone(),
    };

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
