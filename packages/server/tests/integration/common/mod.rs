use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ::common::UploadConfig;
use ::common::storage::UploadStore;
use ::common::storage::filesystem::FilesystemUploadStore;
use dashboard::{CdrClient, Dashboard};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use sea_orm::{Database, DatabaseConnection};
use serde_json::Value;
use tempfile::TempDir;

use server::config::{AppConfig, CorsConfig, DashboardConfig, DatabaseConfig, ServerConfig};
use server::state::AppState;

/// Address nothing listens on, so dashboard fetches fail fast.
pub const UNREACHABLE_CDR_API: &str = "http://127.0.0.1:9";

pub mod routes {
    pub const STUDENTS: &str = "/api/v1/students";
    pub const DASHBOARD: &str = "/api/v1/dashboard";

    pub fn student(id: i64) -> String {
        format!("/api/v1/students/{id}")
    }

    pub fn chart(slug: &str) -> String {
        format!("/api/v1/dashboard/{slug}")
    }

    pub fn upload(path: &str) -> String {
        format!("/uploads/{path}")
    }
}

/// A running test server backed by a temporary SQLite database and upload root.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    /// Absolute upload root.
    pub upload_root: PathBuf,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    /// Integer id of the record in `data`.
    pub fn id(&self) -> i64 {
        self.body["data"]["id"].as_i64().expect("response has data.id")
    }

    /// String field of `data`.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.body["data"][key].as_str()
    }

    /// Gallery paths of the record in `data`.
    pub fn gallery(&self) -> Vec<String> {
        self.body["data"]["galleryImages"]
            .as_array()
            .expect("response has data.galleryImages")
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }
}

/// Required fields of a new record.
pub fn student_form(email: &str) -> Form {
    Form::new()
        .text("programType", "MS Thesis")
        .text("supervisionRole", "Supervisor")
        .text("studentName", "Jane Doe")
        .text("email", email.to_string())
}

/// Attach an in-memory file to `form`.
pub fn with_file(form: Form, field: &str, file_name: &str, content: &[u8]) -> Form {
    form.part(
        field.to_string(),
        Part::bytes(content.to_vec()).file_name(file_name.to_string()),
    )
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn with a configuration adjusted by `customize`.
    pub async fn spawn_with(customize: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite:{}?mode=rwc", dir.path().join("test.db").display());

        let mut app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: db_url,
                max_connections: 5,
            },
            upload: UploadConfig {
                root_dir: dir.path().join("uploads"),
                ..Default::default()
            },
            dashboard: DashboardConfig {
                base_url: UNREACHABLE_CDR_API.to_string(),
                request_timeout_secs: Some(5),
                top_destinations: 10,
            },
        };
        customize(&mut app_config);

        let db = server::database::init_db(&app_config.database)
            .await
            .expect("Failed to initialize test database");
        let store = FilesystemUploadStore::new(
            app_config.upload.root_dir.clone(),
            app_config.upload.max_file_size,
        )
        .await
        .expect("Failed to create upload store");
        let upload_root = store.root().to_path_buf();

        let timeout = app_config
            .dashboard
            .request_timeout_secs
            .map(std::time::Duration::from_secs);
        let client = CdrClient::new(&app_config.dashboard.base_url, timeout)
            .expect("Failed to build CDR client");
        let dashboard = Dashboard::new(client, app_config.dashboard.top_destinations);

        let state = AppState {
            db: db.clone(),
            config: app_config,
            store: Arc::new(store),
            dashboard,
        };

        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            upload_root,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        TestResponse::from_response(res).await
    }

    pub async fn get_raw(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self.client.delete(self.url(path)).send().await.unwrap();
        TestResponse::from_response(res).await
    }

    pub async fn create_student(&self, form: Form) -> TestResponse {
        let res = self
            .client
            .post(self.url(routes::STUDENTS))
            .multipart(form)
            .send()
            .await
            .unwrap();
        TestResponse::from_response(res).await
    }

    pub async fn update_student(&self, id: i64, form: Form) -> TestResponse {
        let res = self
            .client
            .put(self.url(&routes::student(id)))
            .multipart(form)
            .send()
            .await
            .unwrap();
        TestResponse::from_response(res).await
    }

    /// PUT a plain-text body, without a multipart content type.
    pub async fn put_text(&self, path: &str, body: &'static str) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .header("content-type", "text/plain")
            .body(body)
            .send()
            .await
            .unwrap();
        TestResponse::from_response(res).await
    }

    /// Whether a store-relative path exists on disk.
    pub fn stored(&self, path: &str) -> bool {
        self.upload_root.join(path).is_file()
    }

    /// Regular files directly inside an upload sub-directory.
    pub fn files_in(&self, dir: &str) -> Vec<PathBuf> {
        list_files(&self.upload_root.join(dir))
    }

    /// Regular files in every upload sub-directory, excluding the staging area.
    pub fn all_stored_files(&self) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(&self.upload_root) else {
            return Vec::new();
        };
        entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir() && p.file_name().is_some_and(|n| n != ".tmp"))
            .flat_map(|p| list_files(&p))
            .collect()
    }
}

fn list_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect()
}
