pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.assets.static_dir.clone();
    routes::routes()
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::not_found)
        .with_state(state)
}
