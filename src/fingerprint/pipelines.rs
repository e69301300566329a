//! Fingerprint pipelines module
//!
//! Orchestrates loading, colour reduction and the algorithm-specific stages.

mod fingerprint_pipeline;


pub use fingerprint_pipeline::{FingerprintPipeline, dct_fingerprint, legacy_fingerprint};
