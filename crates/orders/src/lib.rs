//! Sales and purchase orders.
//!
//! `OrderBuilder` keeps one pending order in memory: lines priced from the
//! product catalog, a selected counterparty, and a subtotal derived on demand.
//! `submit_order` turns it into one header request plus one request per line
//! against an `OrderGateway`.

pub mod builder;
pub mod error;
pub mod gateway;
pub mod kind;
pub mod line;
pub mod submit;
pub mod summary;

pub use builder::{BuilderState, OrderBuilder, PlannedItem, SubmissionPlan};
pub use error::{OrderError, SubmitError, ValidationIssue};
pub use gateway::OrderGateway;
pub use kind::{CatalogScope, OrderKind, PartyId, Purchases, Sales};
pub use line::{LineField, LineItem, subtotal};
pub use submit::{PartialFailurePolicy, SubmitOutcome, submit_order};
pub use summary::{NewOrderItem, OrderSummary};
