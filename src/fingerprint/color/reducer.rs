use ndarray::{Array2, Array3, Axis, Zip};
use tracing::{debug, warn};

use crate::fingerprint::color::hsv::rgb_to_hsv;
use crate::fingerprint::common::error::{FingerprintError, Result};
use crate::fingerprint::config::{FingerprintConfig, HsvChannel, LumaFallback};

/// One intensity sample per pixel, indexed `[row, col]`
pub type IntensityMatrix = Array2<f64>;

/// Extracts an HSV channel, falling back to a luma sum when that channel is flat.
#[derive(Debug, Clone, Copy)]
pub struct ColorReducer {
    channel: HsvChannel,
    flat_epsilon: f64,
    luma_fallback: LumaFallback,
}

impl ColorReducer {
    pub fn new(channel: HsvChannel, flat_epsilon: f64, luma_fallback: LumaFallback) -> Self {
        Self {
            channel,
            flat_epsilon,
            luma_fallback,
        }
    }

    pub fn from_config(config: &FingerprintConfig) -> Self {
        Self::new(config.channel, config.flat_epsilon, config.luma_fallback)
    }

    pub fn reduce(&self, pixels: &Array3<f64>) -> Result<IntensityMatrix> {
        let intensity = self.hsv_channel(pixels)?;

        if is_flat(&intensity, self.flat_epsilon) {
            debug!(
                channel = ?self.channel,
                fallback = ?self.luma_fallback,
                "HSV channel is flat, switching to luma"
            );
            if self.luma_fallback == LumaFallback::Legacy {
                warn!("Legacy luma fallback weights green by 587 instead of 0.587");
            }
            return self.luma(pixels);
        }

        Ok(intensity)
    }

    pub fn hsv_channel(&self, pixels: &Array3<f64>) -> Result<IntensityMatrix> {
        check_channels(pixels)?;
        let index = match self.channel {
            HsvChannel::Hue => 0,
            HsvChannel::Saturation => 1,
            HsvChannel::Value => 2,
        };

        Ok(Zip::from(pixels.lanes(Axis(2))).map_collect(|rgb| rgb_to_hsv(rgb[0], rgb[1], rgb[2])[index]))
    }

    pub fn luma(&self, pixels: &Array3<f64>) -> Result<IntensityMatrix> {
        check_channels(pixels)?;
        let [wr, wg, wb] = self.luma_fallback.weights();

        Ok(Zip::from(pixels.lanes(Axis(2))).map_collect(|rgb| wr * rgb[0] + wg * rgb[1] + wb * rgb[2]))
    }
}

fn check_channels(pixels: &Array3<f64>) -> Result<()> {
    let channels = pixels.dim().2;
    if channels != 3 {
        return Err(FingerprintError::InvalidChannelCount(channels));
    }
    Ok(())
}

fn is_flat(matrix: &Array2<f64>, epsilon: f64) -> bool {
    let (min, max) = matrix
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    max - min < epsilon || matrix.is_empty()
}
