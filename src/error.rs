use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// AppError
///
/// The application's error taxonomy. Every failure a handler can surface maps
/// to exactly one of these variants, and each variant maps to exactly one
/// HTTP status. Failures are terminal per request; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A single-record lookup missed (user row partial, single-user API fetch).
    #[error("Not found.")]
    NotFound,

    /// The caller presented no valid credentials. No data is leaked.
    #[error("Authentication credentials were not provided or are invalid.")]
    Unauthorized,

    /// The caller is authenticated but lacks the required permission.
    #[error("You do not have permission to perform this action.")]
    Forbidden,

    /// Form input violated a field constraint. Carries the user-visible message.
    #[error("{0}")]
    Validation(String),

    /// Template rendering failed. Logged in full, surfaced as a generic 500.
    #[error("template rendering failed: {0}")]
    Render(#[from] tera::Error),

    /// A write the store should have accepted did not happen. Details are in
    /// the repository's own log line.
    #[error("Internal server error.")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Render(e) => {
                // The template name and line are useful server-side but must
                // never reach the client.
                tracing::error!("render error: {:?}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                    .into_response();
            }
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
