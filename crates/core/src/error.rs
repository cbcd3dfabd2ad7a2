//! Error model shared across crates.

use thiserror::Error;

/// Result type used for local (non-network) validation.
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type returned by every remote call.
pub type ApiResult<T> = Result<T, ApiError>;

/// Deterministic, client-side failures (validation, parsing).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty name, negative price).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier or amount could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested record is not in the loaded list.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

/// Failure talking to the external inventory API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No session is active; nothing was sent.
    #[error("no active session")]
    Unauthenticated,

    /// The request never produced a response (connect, timeout, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}
