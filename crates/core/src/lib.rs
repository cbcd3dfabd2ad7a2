//! Shared domain building blocks.
//!
//! Identifiers, money, error types and the record/gateway traits that every
//! other crate builds on. No HTTP or UI concerns live here.

pub mod error;
pub mod id;
pub mod money;
pub mod record;

pub use error::{ApiError, ApiResult, DomainError, DomainResult};
pub use id::{CategoryId, CustomerId, OrderId, ProductId, SupplierId};
pub use money::Money;
pub use record::{Draft, Record, RecordGateway, find_record};
