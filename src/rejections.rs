use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Application errors surfaced to HTTP callers. Anything with a defined
/// fallback (generator failures, malformed generator output) is handled
/// long before it reaches this type.
#[derive(Debug)]
pub enum AppError {
    NotFound(&'static str),
    Input(&'static str),
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Input(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
        };

        (code, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Adapters from service-layer results to `AppError`, logging the cause at
/// the boundary so handlers stay one-liners.
pub trait ResultExt<T> {
    fn reject(self, message: &'static str) -> Result<T, AppError>;
    fn reject_input(self, message: &'static str) -> Result<T, AppError>;
}

impl<T> ResultExt<T> for color_eyre::Result<T> {
    fn reject(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{message}: {e}");
            AppError::Internal
        })
    }

    fn reject_input(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{message}: {e}");
            AppError::Input(message)
        })
    }
}
