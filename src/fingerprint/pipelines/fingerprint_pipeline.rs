use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::fingerprint::{
    color::ColorReducer,
    common::error::{FingerprintError, Result},
    config::{Algorithm, FingerprintConfig},
    hash::{DctHash, Fingerprint, encode_crossings, encode_dct},
    loader::{ImageLoader, RasterImage, RasterSource},
    resample::{BilinearResampler, DCT_GRID},
    transform::{column_fft, dct_2d},
};

pub struct FingerprintPipeline<S: RasterSource> {
    source: S,
    config: FingerprintConfig,
}

impl FingerprintPipeline<ImageLoader> {
    pub fn new(config: FingerprintConfig) -> Self {
        Self {
            source: ImageLoader::new(),
            config,
        }
    }
}

impl<S: RasterSource> FingerprintPipeline<S> {
    pub fn with_custom(source: S, config: FingerprintConfig) -> Self {
        Self { source, config }
    }

    /// Fingerprints the first path; extra paths are ignored with a warning.
    pub fn fingerprint_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Fingerprint> {
        let (first, rest) = paths.split_first().ok_or(FingerprintError::MissingInput)?;

        if !rest.is_empty() {
            warn!(
                ignored = rest.len(),
                "Only the first input file is fingerprinted, {} extra path(s) ignored",
                rest.len()
            );
        }

        self.fingerprint_file(first)
    }

    #[instrument(skip(self, path), fields(path = %path.as_ref().display(), algorithm = %self.config.algorithm))]
    pub fn fingerprint_file<P: AsRef<Path>>(&self, path: P) -> Result<Fingerprint> {
        let path = path.as_ref();
        info!("Fingerprinting file");

        let raster = {
            let _span = tracing::info_span!("load_image").entered();
            self.source.load(path)?
        };

        self.fingerprint_raster(&raster)
    }

    pub fn fingerprint_raster(&self, raster: &RasterImage) -> Result<Fingerprint> {
        let fingerprint = match self.config.algorithm {
            Algorithm::Dct => Fingerprint::Dct(dct_fingerprint(raster, &self.config)?),
            Algorithm::Legacy => Fingerprint::Legacy(legacy_fingerprint(raster, &self.config)?),
        };

        info!(
            rows = raster.rows(),
            cols = raster.cols(),
            %fingerprint,
            "Fingerprint complete"
        );
        Ok(fingerprint)
    }

    pub fn config(&self) -> &FingerprintConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: FingerprintConfig) {
        self.config = config;
    }
}

/// Value channel, 64×64 bilinear resample, 2-D DCT-II, median threshold.
pub fn dct_fingerprint(raster: &RasterImage, config: &FingerprintConfig) -> Result<DctHash> {
    let intensity = {
        let _span = tracing::info_span!("reduce_color").entered();
        ColorReducer::from_config(config).reduce(raster.pixels())?
    };

    let grid = {
        let _span = tracing::info_span!("resample", rows = DCT_GRID, cols = DCT_GRID).entered();
        BilinearResampler::square(DCT_GRID).resample_matrix(&intensity)
    };

    let coefficients = {
        let _span = tracing::info_span!("dct_2d").entered();
        dct_2d(&grid, config.significant_digits)
    };

    let hash = encode_dct(&coefficients);
    debug!(%hash, "Encoded DCT hash");
    Ok(hash)
}

/// Value channel, column-wise FFT, crossing gaps of the summed imaginary parts.
pub fn legacy_fingerprint(raster: &RasterImage, config: &FingerprintConfig) -> Result<Vec<usize>> {
    let intensity = {
        let _span = tracing::info_span!("reduce_color").entered();
        ColorReducer::from_config(config).reduce(raster.pixels())?
    };

    let spectrum = {
        let _span = tracing::info_span!("column_fft").entered();
        column_fft(&intensity, config.significant_digits)
    };

    let _span = tracing::info_span!("encode_crossings", window = config.crossing_window).entered();
    encode_crossings(&spectrum, config.crossing_window)
}
