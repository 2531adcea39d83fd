//! Shared error types for the services crate.

use thiserror::Error;

use lms_core::model::{QuizAnswerError, Role};
use lms_core::upload::UploadError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors produced while talking to the backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("session expired")]
    Unauthorized,
    #[error("request failed with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Server-supplied text when the request was rejected.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Why a page refused to load for the stored session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GuardError {
    #[error("not signed in")]
    MissingSession,
    #[error("signed in as {found}, this page needs {expected}")]
    RoleMismatch { expected: Role, found: Role },
}

/// Errors emitted by the role services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error("session expired, please sign in again")]
    SessionExpired,
    #[error(transparent)]
    Guard(#[from] GuardError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    QuizAnswer(#[from] QuizAnswerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Validation(String),
    #[error("could not read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not open {target}: {reason}")]
    Open { target: String, reason: String },
}

impl ServiceError {
    /// True when the caller should return to the login page.
    #[must_use]
    pub fn needs_login(&self) -> bool {
        matches!(self, ServiceError::SessionExpired | ServiceError::Guard(_))
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("invalid api base url: {0}")]
    Config(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
