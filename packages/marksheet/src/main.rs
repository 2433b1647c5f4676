use std::net::SocketAddr;
use std::sync::Arc;

use resultdesk_common::render::Templates;
use resultdesk_common::session::SessionStore;
use tracing::{Level, info};

use marksheet::config::AppConfig;
use marksheet::database;
use marksheet::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;
    let db = database::init_db(&config.database.url).await?;
    tokio::fs::create_dir_all(&config.assets.static_dir).await?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState {
        db,
        sessions: Arc::new(SessionStore::new(config.auth.session_ttl_minutes)),
        templates: Arc::new(Templates::new(&config.assets.templates_dir)),
        config,
    };

    let app = marksheet::build_router(state);

    info!("marksheet listening at http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
