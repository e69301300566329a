//! Fingerprint encoding module
//!
//! Terminal stages of both pipelines: median-threshold bit packing of DCT
//! coefficients, and gap encoding of zero crossings in an FFT spectrum.

mod crossing_hash;
mod dct_hash;
pub mod types;

pub use crossing_hash::encode_crossings;
pub use dct_hash::{HASH_BLOCK, encode_dct};
pub use types::{DctHash, Fingerprint};
