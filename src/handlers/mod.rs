// src/handlers/mod.rs

pub mod admin;

use crate::error::AppError;

/// JSON 404 for any route the router does not know.
pub async fn fallback() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
