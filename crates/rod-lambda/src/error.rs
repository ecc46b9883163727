use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use rod_core::error::CoreError;
use rod_export::error::ExportError;

pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "Formato no soportado. Usa ?formato=pdf|xlsx|csv";
pub const INTERNAL_ERROR_MESSAGE: &str = "Error generando el archivo";

/// Unified error type for the route handlers. Bodies are plain text.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                internal_error_response()
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::UnsupportedFormat(raw) => {
                tracing::info!(formato = %raw, "unsupported format requested");
                ApiError::BadRequest(UNSUPPORTED_FORMAT_MESSAGE.to_string())
            }
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

fn internal_error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response()
}

/// Response for a handler that panicked; used with `CatchPanicLayer`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!("handler panicked: {detail}");
    internal_error_response()
}
