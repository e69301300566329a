use crate::fingerprint::common::error::{FingerprintError, Result};
use crate::fingerprint::loader::decoder::RasterDecoder;
use crate::fingerprint::loader::format::RasterFormat;
#[cfg(feature = "bmp")]
use crate::fingerprint::loader::image_decoder::BmpDecoder;
#[cfg(feature = "jpeg")]
use crate::fingerprint::loader::image_decoder::JpegDecoder;
#[cfg(feature = "png")]
use crate::fingerprint::loader::image_decoder::PngDecoder;

type BoxedDecoder = Box<dyn RasterDecoder + Send + Sync>;

/// One decoder slot per supported format.
///
/// An empty slot means the capability was not compiled in or not injected;
/// asking for it yields `UnsupportedFormat` naming the missing decoder.
#[derive(Default)]
pub struct DecoderRegistry {
    png: Option<BoxedDecoder>,
    jpeg: Option<BoxedDecoder>,
    bmp: Option<BoxedDecoder>,
}

impl DecoderRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registers every decoder enabled through crate features.
    pub fn standard() -> Self {
        Self {
            #[cfg(feature = "png")]
            png: Some(Box::new(PngDecoder)),
            #[cfg(feature = "jpeg")]
            jpeg: Some(Box::new(JpegDecoder)),
            #[cfg(feature = "bmp")]
            bmp: Some(Box::new(BmpDecoder)),
            ..Self::empty()
        }
    }

    pub fn register<D>(&mut self, format: RasterFormat, decoder: D) -> &mut Self
    where
        D: RasterDecoder + Send + Sync + 'static,
    {
        *self.slot_mut(format) = Some(Box::new(decoder));
        self
    }

    pub fn unregister(&mut self, format: RasterFormat) -> &mut Self {
        *self.slot_mut(format) = None;
        self
    }

    pub fn supports(&self, format: RasterFormat) -> bool {
        self.slot(format).is_some()
    }

    pub fn decoder(&self, format: RasterFormat) -> Result<&dyn RasterDecoder> {
        match self.slot(format) {
            Some(decoder) => Ok(decoder.as_ref()),
            None => Err(FingerprintError::UnsupportedFormat(format!(
                "{} decoder unavailable (enable the `{}` feature or register one)",
                format,
                format.feature()
            ))),
        }
    }

    fn slot(&self, format: RasterFormat) -> &Option<BoxedDecoder> {
        match format {
            RasterFormat::Png => &self.png,
            RasterFormat::Jpeg => &self.jpeg,
            RasterFormat::Bmp => &self.bmp,
        }
    }

    fn slot_mut(&mut self, format: RasterFormat) -> &mut Option<BoxedDecoder> {
        match format {
            RasterFormat::Png => &mut self.png,
            RasterFormat::Jpeg => &mut self.jpeg,
            RasterFormat::Bmp => &mut self.bmp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_covers_default_features() {
        let registry = DecoderRegistry::standard();
        for format in RasterFormat::ALL {
            assert!(registry.supports(format), "{format} should be registered");
        }
    }

    #[test]
    fn test_missing_decoder_names_capability() {
        let mut registry = DecoderRegistry::standard();
        registry.unregister(RasterFormat::Jpeg);

        let err = registry.decoder(RasterFormat::Jpeg).err().unwrap();
        match err {
            FingerprintError::UnsupportedFormat(message) => {
                assert!(message.contains("JPEG decoder unavailable"));
                assert!(message.contains("`jpeg`"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(registry.decoder(RasterFormat::Png).is_ok());
    }
}
