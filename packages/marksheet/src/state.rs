use std::sync::Arc;

use resultdesk_common::render::Templates;
use resultdesk_common::session::SessionStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub sessions: Arc<SessionStore>,
    pub templates: Arc<Templates>,
}
