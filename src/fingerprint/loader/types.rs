//! Raster data types

use ndarray::{Array2, Array3, ArrayD, Axis, Ix2, Ix3, s};

use crate::fingerprint::common::error::{FingerprintError, Result};

/// Samples exactly as a decoder produced them, before rank normalization.
///
/// Greyscale-style decoders yield rank 2 `[row, col]`, everything else rank 3
/// `[row, col, channel]` with however many channels the source carried.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRaster {
    samples: ArrayD<f64>,
}

impl DecodedRaster {
    pub fn new(samples: ArrayD<f64>) -> Self {
        Self { samples }
    }

    pub fn from_shape_vec(shape: &[usize], samples: Vec<f64>) -> Result<Self> {
        let samples = ArrayD::from_shape_vec(shape.to_vec(), samples)
            .map_err(|e| FingerprintError::Decode(e.to_string()))?;
        Ok(Self { samples })
    }

    pub fn shape(&self) -> &[usize] {
        self.samples.shape()
    }

    pub fn into_inner(self) -> ArrayD<f64> {
        self.samples
    }
}

/// A decoded image as floating point samples indexed `[row, col, channel]`.
///
/// Always holds exactly 3 channels. Sample range is format dependent and is
/// not clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: Array3<f64>,
}

impl RasterImage {
    pub fn from_rgb(pixels: Array3<f64>) -> Result<Self> {
        let channels = pixels.dim().2;
        if channels != 3 {
            return Err(FingerprintError::InvalidChannelCount(channels));
        }
        Ok(Self { pixels })
    }

    /// Normalizes a decoder's output to 3 channels.
    ///
    /// Alpha and any channel beyond the third are dropped. Single-channel
    /// samples are rescaled by `2^floor(sqrt(max))` and replicated into R, G and B.
    pub fn from_decoded(decoded: DecodedRaster) -> Result<Self> {
        let samples = decoded.into_inner();
        let rank = samples.ndim();
        match rank {
            2 => {
                let grey = samples
                    .into_dimensionality::<Ix2>()
                    .map_err(|_| FingerprintError::UnexpectedShape(rank))?;
                Ok(Self::replicate(&rescale_greyscale(grey)))
            }
            3 => {
                let pixels = samples
                    .into_dimensionality::<Ix3>()
                    .map_err(|_| FingerprintError::UnexpectedShape(rank))?;
                match pixels.dim().2 {
                    0 => Err(FingerprintError::InvalidChannelCount(0)),
                    1 | 2 => {
                        let grey = pixels.index_axis(Axis(2), 0).to_owned();
                        Ok(Self::replicate(&rescale_greyscale(grey)))
                    }
                    _ => Ok(Self {
                        pixels: pixels.slice(s![.., .., ..3]).to_owned(),
                    }),
                }
            }
            _ => Err(FingerprintError::UnexpectedShape(rank)),
        }
    }

    fn replicate(grey: &Array2<f64>) -> Self {
        let (rows, cols) = grey.dim();
        let pixels = Array3::from_shape_fn((rows, cols, 3), |(r, c, _)| grey[[r, c]]);
        Self { pixels }
    }

    pub fn rows(&self) -> usize {
        self.pixels.dim().0
    }

    pub fn cols(&self) -> usize {
        self.pixels.dim().1
    }

    pub fn pixels(&self) -> &Array3<f64> {
        &self.pixels
    }

    pub fn into_inner(self) -> Array3<f64> {
        self.pixels
    }
}

/// Brings raw greyscale samples of arbitrary range into a display-like range.
fn rescale_greyscale(grey: Array2<f64>) -> Array2<f64> {
    let max = grey.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exponent = if max > 0.0 { max.sqrt().floor() } else { 0.0 };
    let divisor = 2f64.powf(exponent);
    grey.mapv(|v| v / divisor)
}
