use core::fmt;

use stockroom_core::{ApiError, OrderId};
use thiserror::Error;

/// A single reason an order cannot be submitted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The order has no lines at all.
    NoLines,
    /// No customer/supplier selected for the header.
    MissingParty,
    /// Line `line` has no product.
    MissingProduct { line: usize },
    /// Line `line` has no quantity, or one below 1.
    InvalidQuantity { line: usize },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::NoLines => f.write_str("order has no lines"),
            ValidationIssue::MissingParty => f.write_str("no counterparty selected"),
            ValidationIssue::MissingProduct { line } => {
                write!(f, "line {} has no product", line + 1)
            }
            ValidationIssue::InvalidQuantity { line } => {
                write!(f, "line {} needs a quantity of at least 1", line + 1)
            }
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Local builder failure; nothing was sent and nothing changed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("line index {index} out of range (order has {len} lines)")]
    OutOfRange { index: usize, len: usize },

    #[error("order is not ready: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// A submission is already in flight.
    #[error("order is being submitted")]
    SubmitInFlight,

    /// `complete_submit`/`abort_submit` called with no submission in flight.
    #[error("no submission in flight")]
    NotSubmitting,
}

/// Failure of the full submit round-trip.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Refused before any request was sent.
    #[error(transparent)]
    Rejected(#[from] OrderError),

    /// The header request failed; nothing exists server-side.
    #[error("failed to create order header: {0}")]
    Header(ApiError),

    /// The header exists but at least one item request failed.
    #[error("order {order} created but an item failed: {source}")]
    Partial {
        order: OrderId,
        source: ApiError,
        /// Whether the orphaned header was deleted again.
        compensated: bool,
    },
}
