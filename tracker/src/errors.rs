use crate::db::errors::{ConstraintKind, DbError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

/// Errors returned by services and turned into HTTP responses at the handler boundary.
#[derive(ThisError, Debug)]
pub enum Error {
    /// The caller sent something the tracker will not accept
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{resource} with key {key} not found")]
    NotFound { resource: &'static str, key: String },

    /// Rejected at startup, never produced while serving
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn not_found(resource: &'static str, key: impl ToString) -> Self {
        Error::NotFound {
            resource,
            key: key.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Error::BadRequest { message: message.into() }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfig { message: message.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } | Error::Database(DbError::NotFound) => StatusCode::NOT_FOUND,
            Error::Database(DbError::Constraint { kind, .. }) => match kind {
                ConstraintKind::Unique => StatusCode::CONFLICT,
                ConstraintKind::ForeignKey | ConstraintKind::Check => StatusCode::BAD_REQUEST,
            },
            Error::InvalidConfig { .. } | Error::Database(DbError::Other(_)) | Error::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Response body text. Database and unexpected failures get a fixed message so
    /// driver details never reach the client.
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest { .. } | Error::NotFound { .. } => self.to_string(),
            Error::Database(DbError::NotFound) => "Resource not found".to_string(),
            Error::Database(DbError::Constraint { kind, .. }) => match kind {
                ConstraintKind::Unique => "Record already exists".to_string(),
                ConstraintKind::ForeignKey => "Referenced habit does not exist".to_string(),
                ConstraintKind::Check => "Invalid data provided".to_string(),
            },
            Error::InvalidConfig { .. } | Error::Database(DbError::Other(_)) | Error::Other(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {:#}", self);
        } else if matches!(self, Error::Database(_)) {
            tracing::warn!("Write rejected by the database: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        (status, self.user_message()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
