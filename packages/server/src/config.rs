use common::UploadConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Upper bound of the connection pool. Default: 20.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    20
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Base URL of the CDR reporting API.
    pub base_url: String,
    /// Per-request timeout for remote fetches. Unset means no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Number of destinations kept in the destinations chart.
    pub top_destinations: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", vec!["*"])?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite:./records.db?mode=rwc")?
            .set_default("dashboard.base_url", "http://127.0.0.1:8080/api")?
            .set_default("dashboard.top_destinations", 10)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., RECORDS__DATABASE__URL)
            .add_source(Environment::with_prefix("RECORDS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
