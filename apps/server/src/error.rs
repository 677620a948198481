//! Error types for the listing service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid JSON format in {field}: {reason}")]
    InvalidJson { field: String, reason: String },

    #[error("{0}")]
    UnsupportedUpload(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// SQLSTATEs Postgres raises for text it cannot store: a NUL byte in a text value
/// (`22021`) or a `\u0000` escape inside JSONB (`22P05`).
const UNSTORABLE_TEXT_CODES: [&str; 2] = ["22021", "22P05"];

const UNSTORABLE_TEXT_MESSAGE: &str = "Text values must not contain NUL characters";

impl Error {
    /// Whether the store rejected a client-supplied value rather than failing itself.
    fn is_unstorable_text(&self) -> bool {
        match self {
            Error::Database(sqlx::Error::Database(db)) => db
                .code()
                .is_some_and(|code| UNSTORABLE_TEXT_CODES.contains(&&*code)),
            _ => false,
        }
    }

    pub fn status(&self) -> StatusCode {
        if self.is_unstorable_text() {
            return StatusCode::BAD_REQUEST;
        }
        match self {
            Error::Validation(_)
            | Error::InvalidJson { .. }
            | Error::UnsupportedUpload(_)
            | Error::AlreadyExists(_)
            | Error::InvalidCredentials(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Database(_)
            | Error::Migration(_)
            | Error::Io(_)
            | Error::Internal(_)
            | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        if self.is_unstorable_text() {
            return "validation";
        }
        match self {
            Error::Validation(_) => "validation",
            Error::InvalidJson { .. } => "invalid_json",
            Error::UnsupportedUpload(_) => "unsupported_upload",
            Error::AlreadyExists(_) => "already_exists",
            Error::InvalidCredentials(_) => "invalid_credentials",
            Error::NotFound(_) => "not_found",
            _ => "internal",
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        fields.sort_unstable();
        Error::Validation(format!("Invalid or missing fields: {}", fields.join(", ")))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            // Store and runtime details stay in the logs.
            tracing::error!(error = %self, "Internal error");
            "Internal server error".to_string()
        } else if self.is_unstorable_text() {
            tracing::debug!(error = %self, "Rejected unstorable text");
            UNSTORABLE_TEXT_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "message": message,
            "error": self.kind(),
        }));

        (status, body).into_response()
    }
}
