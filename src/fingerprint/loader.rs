//! Image loading module
//!
//! Resolves a path to a decoder by extension, unwraps gzip containers through
//! a scoped temporary file, and normalizes every decoder's output into a
//! 3-channel `RasterImage`.

mod decoder;
mod format;
mod image_decoder;
mod image_loader;
mod registry;
pub mod types;

pub use decoder::RasterDecoder;
pub use format::{RasterFormat, SourceKind};
pub use image_decoder::{BmpDecoder, JpegDecoder, PngDecoder};
pub use image_loader::{ImageLoader, RasterSource};
pub use registry::DecoderRegistry;
pub use types::{DecodedRaster, RasterImage};
