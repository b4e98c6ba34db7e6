use std::sync::Arc;

use common::storage::UploadStore;
use dashboard::Dashboard;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub store: Arc<dyn UploadStore>,
    pub dashboard: Dashboard,
}
