use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::public::home))
        .route("/result", post(handlers::public::result))
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route("/logout", get(handlers::auth::logout))
        .merge(admin_routes())
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(handlers::admin::list))
        .route(
            "/admin/add",
            get(handlers::admin::add_page).post(handlers::admin::add),
        )
        .route(
            "/admin/edit/{id}",
            get(handlers::admin::edit_page).post(handlers::admin::edit),
        )
        .route("/admin/delete/{id}", post(handlers::admin::delete))
}
