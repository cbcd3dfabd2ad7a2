//! Process-wide tracing setup shared by every binary and test harness.

/// Initialize process-wide tracing.
///
/// Safe to call multiple times; returns `true` only for the call that
/// installed the subscriber.
pub fn init() -> bool {
    tracing::init()
}

/// Subscriber configuration (filter, formatter).
pub mod tracing;
