pub mod admin;
pub mod auth;
pub mod public;

use crate::error::AppError;

/// Fallback for paths outside the route table.
pub async fn not_found() -> AppError {
    AppError::NotFound("no such page".into())
}
