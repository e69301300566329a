//! Common utilities module
//!
//! Shared error type used by every stage of the fingerprint pipeline.

pub mod error;

pub use error::{FingerprintError, Result};
