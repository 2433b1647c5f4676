use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Client;
use sea_orm::{ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, QueryFilter};
use tempfile::TempDir;

use resultdesk_common::render::Templates;
use resultdesk_common::session::SessionStore;
use resultdesk_common::upload::UploadStore;
use scansheet::config::{AppConfig, AssetsConfig, AuthConfig, DatabaseConfig, ServerConfig};
use scansheet::entity::student;
use scansheet::state::AppState;

pub const ADMIN_USER: &str = "superadmin";
pub const ADMIN_PASS: &str = "India@123";

/// A running test server over a fresh in-memory database and a throwaway
/// static directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    static_dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // A single connection keeps the in-memory database alive and shared.
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts)
            .await
            .expect("Failed to open in-memory SQLite");
        db.get_schema_registry("scansheet::entity::*")
            .sync(&db)
            .await
            .expect("Failed to sync schema");

        let static_dir = tempfile::tempdir().expect("Failed to create static dir");
        let uploads_dir = static_dir.path().join("uploads");
        let uploads = UploadStore::new(uploads_dir.clone())
            .await
            .expect("Failed to create upload store");

        let manifest_dir = env!("CARGO_MANIFEST_DIR");
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
            },
            auth: AuthConfig {
                username: ADMIN_USER.to_string(),
                password: ADMIN_PASS.to_string(),
                session_ttl_minutes: 120,
            },
            assets: AssetsConfig {
                templates_dir: format!("{manifest_dir}/templates"),
                static_dir: static_dir.path().to_string_lossy().into_owned(),
            },
        };

        let state = AppState {
            db: db.clone(),
            sessions: Arc::new(SessionStore::new(config.auth.session_ttl_minutes)),
            templates: Arc::new(Templates::new(&config.assets.templates_dir)),
            uploads: Arc::new(uploads),
            config,
        };

        let app = scansheet::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build client");

        Self {
            addr,
            client,
            db,
            static_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.static_dir.path().join("uploads")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request")
    }

    pub async fn post_form(&self, path: &str, form: &[(String, String)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Failed to send POST request")
    }

    /// POST a student form, optionally with an uploaded scan.
    pub async fn post_student(
        &self,
        path: &str,
        name: &str,
        roll_no: &str,
        email: &str,
        file: Option<(&str, &[u8])>,
    ) -> reqwest::Response {
        let mut form = reqwest::multipart::Form::new()
            .text("name", name.to_string())
            .text("roll_no", roll_no.to_string())
            .text("email", email.to_string());

        if let Some((file_name, bytes)) = file {
            let part = reqwest::multipart::Part::bytes(bytes.to_vec())
                .file_name(file_name.to_string())
                .mime_str("image/png")
                .expect("Failed to set MIME type");
            form = form.part("image", part);
        }

        self.client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart request")
    }

    /// Log in with the fixed admin credentials.
    pub async fn login(&self) {
        let res = self
            .post_form(
                "/login",
                &[
                    ("username".to_string(), ADMIN_USER.to_string()),
                    ("password".to_string(), ADMIN_PASS.to_string()),
                ],
            )
            .await;
        assert_eq!(res.url().path(), "/admin", "login should land on the dashboard");
    }

    pub async fn student_by_roll(&self, roll_no: &str) -> student::Model {
        student::Entity::find()
            .filter(student::Column::RollNo.eq(roll_no))
            .one(&self.db)
            .await
            .expect("DB query failed")
            .expect("student not found")
    }
}
