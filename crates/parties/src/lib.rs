//! Parties: customers and suppliers.
//!
//! Both share the same row shape and the same form payload; they differ only
//! in which endpoint they live behind and which order kind references them.

pub mod party;

pub use party::{ContactInfo, Customer, PartyDraft, Supplier};
