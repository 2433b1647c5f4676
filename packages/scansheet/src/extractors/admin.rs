use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use resultdesk_common::session::SESSION_COOKIE;

use crate::error::AppError;
use crate::state::AppState;

/// Proof of a live admin session.
///
/// Add this as a handler parameter to gate a route. Requests without a
/// valid, unexpired session token are redirected to the login page before
/// the handler body runs, so gated handlers never see them.
pub struct AdminSession {
    pub token: String,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(AppError::Unauthenticated)?;

        if !state.sessions.is_valid(&token) {
            return Err(AppError::Unauthenticated);
        }

        Ok(AdminSession { token })
    }
}
