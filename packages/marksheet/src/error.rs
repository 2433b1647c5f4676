use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use sea_orm::DbErr;

/// Application-level error type.
///
/// Recoverable outcomes (empty input, lookup miss) never pass through here;
/// handlers turn those into a flash message and a redirect. What remains is
/// the unrecovered taxonomy: a missing identity renders the generic
/// not-found page, everything else the generic failure page.
#[derive(Debug)]
pub enum AppError {
    /// Request lacks a live admin session; short-circuits to the login page.
    Unauthenticated,
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated => Redirect::to("/login").into_response(),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Html(format!("<h1>404 Not Found</h1><p>{msg}</p>")),
            )
                .into_response(),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(
                        "<h1>500 Internal Server Error</h1>\
                         <p>Something went wrong. Please try again later.</p>"
                            .to_string(),
                    ),
                )
                    .into_response()
            }
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<resultdesk_common::render::RenderError> for AppError {
    fn from(err: resultdesk_common::render::RenderError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::Internal(format!("malformed numeric form value: {err}"))
    }
}

impl From<std::num::ParseFloatError> for AppError {
    fn from(err: std::num::ParseFloatError) -> Self {
        AppError::Internal(format!("malformed numeric form value: {err}"))
    }
}
