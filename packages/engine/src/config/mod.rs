//! Engine configuration.

pub mod timeouts;
