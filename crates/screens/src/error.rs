use thiserror::Error;

use stockroom_core::{ApiError, DomainError};

/// Why a record form was not saved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The draft failed local checks; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
