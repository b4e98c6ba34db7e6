use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use common::storage::UploadStore;
use common::storage::filesystem::FilesystemUploadStore;
use dashboard::{CdrClient, Dashboard};
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::config::AppConfig;
use server::database::init_db;
use server::state::AppState;
use server::upload::UploadField;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to initialise database")?;

    let store = FilesystemUploadStore::new(
        config.upload.root_dir.clone(),
        config.upload.max_file_size,
    )
    .await
    .context("Failed to open upload store")?;
    for field in UploadField::ALL {
        store.ensure_dir(field.directory()).await?;
    }
    info!(root = %store.root().display(), "Upload store ready");

    let timeout = config.dashboard.request_timeout_secs.map(Duration::from_secs);
    let client = CdrClient::new(&config.dashboard.base_url, timeout)?;
    let dashboard = Dashboard::new(client, config.dashboard.top_destinations);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        db,
        config,
        store: Arc::new(store),
        dashboard,
    };
    let app = server::build_router(state);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
