use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docsearch_core::{DocsearchError, ErrorEnvelope};

pub struct AppError {
    pub status: StatusCode,
    pub body: ErrorEnvelope,
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorEnvelope::new(
                "not_found",
                format!("{} not found", what),
                "GET /sources lists the configured sources",
            ),
        }
    }

    pub fn internal(msg: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorEnvelope::internal(&msg.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, axum::Json(self.body)).into_response()
    }
}

impl From<DocsearchError> for AppError {
    fn from(err: DocsearchError) -> Self {
        match &err {
            DocsearchError::Backend { .. } => AppError {
                status: StatusCode::BAD_GATEWAY,
                body: err.envelope(),
            },
            _ => AppError::internal(err),
        }
    }
}
