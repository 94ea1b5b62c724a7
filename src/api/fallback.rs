use axum::http::{Method, Uri};

use crate::shared::errors::AppError;

/// Route exists but not for this method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed(format!("Method \"{}\" not allowed on {}", method, uri.path()))
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
