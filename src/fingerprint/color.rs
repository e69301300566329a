//! Colour reduction module
//!
//! Collapses a 3-channel raster to a single intensity matrix.

mod hsv;
mod reducer;

pub use hsv::rgb_to_hsv;
pub use reducer::{ColorReducer, IntensityMatrix};
