//! Handlers for unmatched routes and methods.

use crate::error::AppError;

/// Answers requests that match no route.
pub async fn not_found_handler() -> AppError {
    AppError::NotFound
}

/// Answers requests whose path exists but whose method is not routed.
pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}
