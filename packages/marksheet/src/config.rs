use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Fixed admin credential pair; there is no account management.
    pub username: String,
    pub password: String,
    pub session_ttl_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    pub templates_dir: String,
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub assets: AssetsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("database.url", "sqlite://data/marksheet.db?mode=rwc")?
            .set_default("auth.username", "superadmin")?
            .set_default("auth.password", "India@123")?
            .set_default("auth.session_ttl_minutes", 120)?
            .set_default("assets.templates_dir", "templates")?
            .set_default("assets.static_dir", "static")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., MARKSHEET__AUTH__PASSWORD)
            .add_source(Environment::with_prefix("MARKSHEET").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
