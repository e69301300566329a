use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tempfile::TempPath;
use tracing::{debug, instrument};

use crate::fingerprint::common::error::{FingerprintError, Result};
use crate::fingerprint::loader::format::{RasterFormat, SourceKind};
use crate::fingerprint::loader::registry::DecoderRegistry;
use crate::fingerprint::loader::types::RasterImage;

/// Anything that can turn a path into a `RasterImage`.
pub trait RasterSource {
    fn load(&self, path: &Path) -> Result<RasterImage>;
}

/// Loads PNG, JPEG and BMP files, optionally wrapped in gzip.
pub struct ImageLoader {
    registry: DecoderRegistry,
    staging_dir: Option<PathBuf>,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::with_registry(DecoderRegistry::standard())
    }

    pub fn with_registry(registry: DecoderRegistry) -> Self {
        Self {
            registry,
            staging_dir: None,
        }
    }

    /// Stage decompressed inputs in `dir` instead of the system temp directory.
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    pub fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> Result<RasterImage> {
        match SourceKind::from_path(path)? {
            SourceKind::Plain(format) => self.load_plain(path, format),
            SourceKind::Gzip(inner) => self.load_gzip(path, inner),
        }
    }

    fn load_plain(&self, path: &Path, format: RasterFormat) -> Result<RasterImage> {
        let decoder = self.registry.decoder(format)?;

        let data = std::fs::read(path)
            .map_err(|e| FingerprintError::InputRead(format!("{}: {}", path.display(), e)))?;

        let decoded = decoder.decode(&data)?;
        debug!(shape = ?decoded.shape(), "Decoded {} samples", format);

        RasterImage::from_decoded(decoded)
    }

    fn load_gzip(&self, path: &Path, inner: RasterFormat) -> Result<RasterImage> {
        // Fail before decompressing when the inner format cannot be decoded anyway.
        self.registry.decoder(inner)?;

        let staged = self.stage_gzip(path, inner)?;
        debug!(staged = %staged.display(), "Decompressed into temporary file");

        // `staged` removes the file when it goes out of scope, on success and on error.
        self.load(&staged)
    }

    fn stage_gzip(&self, path: &Path, inner: RasterFormat) -> Result<TempPath> {
        let input = File::open(path)
            .map_err(|e| FingerprintError::InputRead(format!("{}: {}", path.display(), e)))?;
        let mut decoder = GzDecoder::new(BufReader::new(input));

        let suffix = format!(".{}", inner.extension());
        let mut builder = tempfile::Builder::new();
        builder.prefix("raster-fingerprint-").suffix(&suffix);
        let mut staged = match &self.staging_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        std::io::copy(&mut decoder, &mut staged)
            .map_err(|e| FingerprintError::Decode(format!("{}: {}", path.display(), e)))?;
        staged.flush()?;

        Ok(staged.into_temp_path())
    }
}

impl RasterSource for ImageLoader {
    fn load(&self, path: &Path) -> Result<RasterImage> {
        ImageLoader::load(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::loader::decoder::RasterDecoder;
    use crate::fingerprint::loader::types::DecodedRaster;
    use flate2::{Compression, write::GzEncoder};
    use ndarray::Array3;
    use tempfile::TempDir;

    struct FixedDecoder;

    impl RasterDecoder for FixedDecoder {
        fn decode(&self, data: &[u8]) -> Result<DecodedRaster> {
            let value = data.len() as f64;
            Ok(DecodedRaster::new(Array3::from_elem((2, 3, 3), value).into_dyn()))
        }
    }

    struct FailingDecoder;

    impl RasterDecoder for FailingDecoder {
        fn decode(&self, _data: &[u8]) -> Result<DecodedRaster> {
            Err(FingerprintError::Decode("Mock decode error".to_string()))
        }
    }

    fn gzip(path: &Path, payload: &[u8]) {
        let mut encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
        encoder.write_all(payload).unwrap();
        encoder.finish().unwrap();
    }

    fn loader_with(decoder: impl RasterDecoder + Send + Sync + 'static, staging: &Path) -> ImageLoader {
        let mut registry = DecoderRegistry::empty();
        registry.register(RasterFormat::Png, decoder);
        ImageLoader::with_registry(registry).with_staging_dir(staging)
    }

    fn is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[test]
    fn test_plain_and_gzip_load_the_same_bytes() {
        let inputs = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let payload = b"pretend png bytes";

        let plain = inputs.path().join("plot.png");
        std::fs::write(&plain, payload).unwrap();
        let wrapped = inputs.path().join("plot.png.gz");
        gzip(&wrapped, payload);

        let loader = loader_with(FixedDecoder, staging.path());

        let from_plain = loader.load(&plain).unwrap();
        let from_gzip = loader.load(&wrapped).unwrap();

        assert_eq!(from_plain, from_gzip);
        assert_eq!(from_gzip.pixels()[[0, 0, 0]], payload.len() as f64);
        assert!(is_empty(staging.path()));
    }

    #[test]
    fn test_staged_file_removed_when_decode_fails() {
        let inputs = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let wrapped = inputs.path().join("plot.png.gz");
        gzip(&wrapped, b"whatever");

        let loader = loader_with(FailingDecoder, staging.path());

        assert!(matches!(loader.load(&wrapped), Err(FingerprintError::Decode(_))));
        assert!(is_empty(staging.path()));
    }

    #[test]
    fn test_corrupt_gzip_is_a_decode_error() {
        let inputs = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let wrapped = inputs.path().join("plot.png.gz");
        std::fs::write(&wrapped, b"definitely not gzip").unwrap();

        let loader = loader_with(FixedDecoder, staging.path());

        assert!(matches!(loader.load(&wrapped), Err(FingerprintError::Decode(_))));
        assert!(is_empty(staging.path()));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let inputs = TempDir::new().unwrap();
        let loader = ImageLoader::new();

        let result = loader.load(&inputs.path().join("absent.png"));

        assert!(matches!(result, Err(FingerprintError::InputRead(_))));
    }

    #[test]
    fn test_unregistered_format_is_unsupported() {
        let inputs = TempDir::new().unwrap();
        let path = inputs.path().join("plot.bmp");
        std::fs::write(&path, b"BM").unwrap();

        let loader = ImageLoader::with_registry(DecoderRegistry::empty());

        assert!(matches!(loader.load(&path), Err(FingerprintError::UnsupportedFormat(_))));
    }
}
