//! REST client for the inventory API.
//!
//! `ApiClient` implements both gateway ports (`RecordGateway` for the
//! list-and-form resources, `OrderGateway` for sales and purchases) so the
//! screens can be driven against the real backend.

pub mod client;
pub mod config;
pub mod orders;
pub mod records;
pub mod session;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use records::RecordEndpoint;
pub use session::{AuthTokens, SessionContext};
