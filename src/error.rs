//! Typed errors and the JSON error envelope.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config load: {0}")]
    Load(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("unknown table in primary key override: {0}")]
    UnknownTable(String),
    #[error("invalid primary key override: table {table} column {column}")]
    InvalidPrimaryKey { table: String, column: String },
}

/// Failure while building the schema catalog. Fatal at startup.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("introspection query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("introspection row for {context} is missing field '{field}'")]
    MissingField { context: String, field: &'static str },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("no content")]
    NoContent,
    #[error("request body exceeds the configured limit")]
    PayloadTooLarge,
    #[error("unreadable request body: {0}")]
    BadRequest(String),
    #[error("unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        AppError::NotFound(what.into())
    }

    /// HTTP status and the `code` field of the envelope.
    pub fn status(&self) -> (StatusCode, u16) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, 404),
            // A 204 response cannot carry a body, so the envelope travels with 200.
            AppError::NoContent => (StatusCode::OK, 204),
            AppError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, 413),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, 400),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, 500),
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "Not Found",
            AppError::NoContent => "No Content",
            AppError::PayloadTooLarge => "Payload Too Large",
            AppError::BadRequest(_) => "Bad Request",
            _ => "Internal Server Error",
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: &'static str,
    pub code: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();
        match &self {
            AppError::NotFound(what) => tracing::debug!(what = %what, "not found"),
            AppError::NoContent => {}
            AppError::PayloadTooLarge | AppError::BadRequest(_) => {
                tracing::warn!(error = %self, "request body rejected")
            }
            other => tracing::error!(error = %other, "request failed"),
        }
        let body = ErrorBody {
            error: ErrorDetail {
                message: self.public_message(),
                code,
            },
        };
        (status, Json(body)).into_response()
    }
}
