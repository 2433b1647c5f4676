use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use minijinja::context;
use resultdesk_common::flash::{self, Flash};
use resultdesk_common::session::SESSION_COOKIE;
use tracing::instrument;

use crate::error::AppError;
use crate::models::student::LoginForm;
use crate::state::AppState;

/// Render the admin login form.
#[instrument(skip_all)]
pub async fn login_page(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let (jar, flash) = flash::take(jar);
    let page = state.templates.render("login.html", context! { flash })?;
    Ok((jar, Html(page)).into_response())
}

/// Check the fixed credential pair and open an admin session.
#[instrument(skip(state, jar, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if form.username == state.config.auth.username && form.password == state.config.auth.password {
        let token = state.sessions.create();
        let jar = jar.add(
            Cookie::build((SESSION_COOKIE, token))
                .path("/")
                .http_only(true)
                .build(),
        );
        return Ok((jar, Redirect::to("/admin")).into_response());
    }

    let jar = flash::push(jar, &Flash::error("Invalid credentials"));
    Ok((jar, Redirect::to("/login")).into_response())
}

/// Revoke the current session and drop its cookie.
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let jar = match token {
        Some(token) => {
            state.sessions.revoke(&token);
            jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build())
        }
        None => jar,
    };
    Ok((jar, Redirect::to("/")).into_response())
}
