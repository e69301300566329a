//! Fingerprint configuration types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fingerprint algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// 64×64 resample, 2-D DCT-II, median threshold over the 8×8 low-frequency block
    #[default]
    Dct,
    /// Column-wise FFT followed by zero-crossing gap encoding
    Legacy,
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dct" => Ok(Algorithm::Dct),
            "original" | "legacy" => Ok(Algorithm::Legacy),
            other => Err(format!("unknown algorithm '{other}' (expected 'dct' or 'original')")),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Dct => f.write_str("dct"),
            Algorithm::Legacy => f.write_str("original"),
        }
    }
}

/// HSV channel extracted by the colour reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HsvChannel {
    Hue,
    Saturation,
    #[default]
    Value,
}

impl FromStr for HsvChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h" | "hue" => Ok(HsvChannel::Hue),
            "s" | "saturation" => Ok(HsvChannel::Saturation),
            "v" | "value" => Ok(HsvChannel::Value),
            other => Err(format!("unknown HSV channel '{other}'")),
        }
    }
}

/// Weights used when the extracted HSV channel is flat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LumaFallback {
    /// `0.299 R + 0.587 G + 0.114 B`
    #[default]
    Corrected,
    /// `0.299 R + 587 G + 0.114 B`, matching fingerprints stored by older tooling
    Legacy,
}

impl LumaFallback {
    pub fn weights(self) -> [f64; 3] {
        match self {
            LumaFallback::Corrected => [0.299, 0.587, 0.114],
            LumaFallback::Legacy => [0.299, 587.0, 0.114],
        }
    }
}

impl FromStr for LumaFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "corrected" => Ok(LumaFallback::Corrected),
            "legacy" => Ok(LumaFallback::Legacy),
            other => Err(format!("unknown luma fallback '{other}' (expected 'corrected' or 'legacy')")),
        }
    }
}

/// Default degeneracy threshold for the extracted HSV channel
pub const DEFAULT_FLAT_EPSILON: f64 = 1e-10;

/// Default number of significant digits kept after each transform
pub const DEFAULT_SIGNIFICANT_DIGITS: u32 = 8;

/// Default window length of the legacy crossing detector
pub const DEFAULT_CROSSING_WINDOW: usize = 3;

/// Configuration for fingerprint extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintConfig {
    /// Which pipeline produces the fingerprint
    pub algorithm: Algorithm,
    /// HSV channel used as the intensity signal
    pub channel: HsvChannel,
    /// Max minus min below this switches to the luma fallback
    pub flat_epsilon: f64,
    /// Luma weights applied on the fallback path
    pub luma_fallback: LumaFallback,
    /// Significant decimal digits kept after every transform stage
    pub significant_digits: u32,
    /// Window length for the legacy crossing detector
    pub crossing_window: usize,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Dct,
            channel: HsvChannel::Value,
            flat_epsilon: DEFAULT_FLAT_EPSILON,
            luma_fallback: LumaFallback::Corrected,
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
            crossing_window: DEFAULT_CROSSING_WINDOW,
        }
    }
}

impl FingerprintConfig {
    pub fn builder() -> FingerprintConfigBuilder {
        FingerprintConfigBuilder::default()
    }
}

/// Builder for FingerprintConfig
#[derive(Default)]
pub struct FingerprintConfigBuilder {
    algorithm: Option<Algorithm>,
    channel: Option<HsvChannel>,
    flat_epsilon: Option<f64>,
    luma_fallback: Option<LumaFallback>,
    significant_digits: Option<u32>,
    crossing_window: Option<usize>,
}

impl FingerprintConfigBuilder {
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn channel(mut self, channel: HsvChannel) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn flat_epsilon(mut self, epsilon: f64) -> Self {
        self.flat_epsilon = Some(epsilon);
        self
    }

    pub fn luma_fallback(mut self, fallback: LumaFallback) -> Self {
        self.luma_fallback = Some(fallback);
        self
    }

    pub fn significant_digits(mut self, digits: u32) -> Self {
        self.significant_digits = Some(digits);
        self
    }

    pub fn crossing_window(mut self, window: usize) -> Self {
        self.crossing_window = Some(window);
        self
    }

    pub fn build(self) -> FingerprintConfig {
        let default = FingerprintConfig::default();
        FingerprintConfig {
            algorithm: self.algorithm.unwrap_or(default.algorithm),
            channel: self.channel.unwrap_or(default.channel),
            flat_epsilon: self.flat_epsilon.unwrap_or(default.flat_epsilon),
            luma_fallback: self.luma_fallback.unwrap_or(default.luma_fallback),
            significant_digits: self.significant_digits.unwrap_or(default.significant_digits),
            crossing_window: self.crossing_window.unwrap_or(default.crossing_window),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = FingerprintConfig::builder()
            .algorithm(Algorithm::Legacy)
            .channel(HsvChannel::Saturation)
            .luma_fallback(LumaFallback::Legacy)
            .significant_digits(6)
            .build();

        assert_eq!(config.algorithm, Algorithm::Legacy);
        assert_eq!(config.channel, HsvChannel::Saturation);
        assert_eq!(config.luma_fallback, LumaFallback::Legacy);
        assert_eq!(config.significant_digits, 6);
        assert_eq!(config.flat_epsilon, DEFAULT_FLAT_EPSILON);
        assert_eq!(config.crossing_window, DEFAULT_CROSSING_WINDOW);
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!("dct".parse::<Algorithm>(), Ok(Algorithm::Dct));
        assert_eq!("original".parse::<Algorithm>(), Ok(Algorithm::Legacy));
        assert_eq!("ORIGINAL".parse::<Algorithm>(), Ok(Algorithm::Legacy));
        assert!("phash".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::Legacy.to_string(), "original");
    }

    #[test]
    fn test_legacy_luma_weights_keep_green_scale() {
        assert_eq!(LumaFallback::Corrected.weights()[1], 0.587);
        assert_eq!(LumaFallback::Legacy.weights()[1], 587.0);
    }
}
