//! Perceptual image fingerprinting
//!
//! Loads a raster image, reduces it to a single intensity channel and derives
//! a rendering-tolerant fingerprint from its frequency content:
//!
//! - `dct` (default): a 64-bit hash rendered as 16 uppercase hex digits.
//!   Two hashes are compared by counting differing bits.
//! - `original`: the gaps between zero crossings of a column-wise FFT.

pub mod color;
pub mod common;
pub mod config;
pub mod crossing;
pub mod hash;
pub mod loader;
pub mod pipelines;
pub mod resample;
pub mod transform;

pub use common::{FingerprintError, Result};

pub use config::{Algorithm, FingerprintConfig, FingerprintConfigBuilder, HsvChannel, LumaFallback};

pub use loader::{DecoderRegistry, ImageLoader, RasterDecoder, RasterFormat, RasterImage, RasterSource};

pub use crossing::detect_crossings;

pub use hash::{DctHash, Fingerprint};

pub use pipelines::{FingerprintPipeline, dct_fingerprint, legacy_fingerprint};
