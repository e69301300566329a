//! Frequency transforms
//!
//! A separable 2-D DCT-II for the DCT fingerprint and a column-wise FFT for
//! the legacy fingerprint. Both round their output to a fixed number of
//! significant digits after every stage so that sign and threshold decisions
//! downstream do not depend on platform-specific floating point noise.

mod dct;
mod fft;
mod rounding;

pub use dct::{Dct1d, dct_2d};
pub use fft::column_fft;
pub use rounding::round_significant;
