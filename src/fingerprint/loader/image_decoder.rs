//! Raster decoders backed by the `image` crate.
//!
//! PNG and JPEG samples are scaled to [0, 1]. BMP samples keep their raw
//! 8-bit integer values; single-channel results are brought back into range
//! by `RasterImage::from_decoded`.

use image::{DynamicImage, GenericImageView, ImageFormat};
use tracing::debug;

use crate::fingerprint::common::error::{FingerprintError, Result};
use crate::fingerprint::loader::decoder::RasterDecoder;
use crate::fingerprint::loader::types::DecodedRaster;

pub struct PngDecoder;

pub struct JpegDecoder;

pub struct BmpDecoder;

impl RasterDecoder for PngDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedRaster> {
        let image = load(data, ImageFormat::Png)?;
        unit_range_samples(&image)
    }
}

impl RasterDecoder for JpegDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedRaster> {
        let image = load(data, ImageFormat::Jpeg)?;
        unit_range_samples(&image)
    }
}

impl RasterDecoder for BmpDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedRaster> {
        let image = load(data, ImageFormat::Bmp)?;
        raw_samples(&image)
    }
}

fn load(data: &[u8], format: ImageFormat) -> Result<DynamicImage> {
    debug!("Decoding {:?} image, {} bytes", format, data.len());

    let image = image::load_from_memory_with_format(data, format)
        .map_err(|e| FingerprintError::Decode(e.to_string()))?;

    debug!(
        "Decoded image: {}x{} ({:?})",
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image)
}

/// Samples in [0, 1], greyscale kept at rank 2 and alpha kept as a trailing channel.
fn unit_range_samples(image: &DynamicImage) -> Result<DecodedRaster> {
    let rows = image.height() as usize;
    let cols = image.width() as usize;
    let color = image.color();

    match (color.has_color(), color.has_alpha()) {
        (false, false) => DecodedRaster::from_shape_vec(&[rows, cols], widen(image.to_luma32f().into_raw())),
        (false, true) => {
            DecodedRaster::from_shape_vec(&[rows, cols, 2], widen(image.to_luma_alpha32f().into_raw()))
        }
        (true, false) => DecodedRaster::from_shape_vec(&[rows, cols, 3], widen(image.to_rgb32f().into_raw())),
        (true, true) => DecodedRaster::from_shape_vec(&[rows, cols, 4], widen(image.to_rgba32f().into_raw())),
    }
}

/// Raw 8-bit sample values without normalization.
///
/// The BMP codec expands palette files to RGB, so greyscale palettes land
/// in the colour branch.
fn raw_samples(image: &DynamicImage) -> Result<DecodedRaster> {
    let rows = image.height() as usize;
    let cols = image.width() as usize;
    let color = image.color();

    match (color.has_color(), color.has_alpha()) {
        (false, _) => DecodedRaster::from_shape_vec(&[rows, cols], widen_bytes(image.to_luma8().into_raw())),
        (true, false) => DecodedRaster::from_shape_vec(&[rows, cols, 3], widen_bytes(image.to_rgb8().into_raw())),
        (true, true) => DecodedRaster::from_shape_vec(&[rows, cols, 4], widen_bytes(image.to_rgba8().into_raw())),
    }
}

fn widen(samples: Vec<f32>) -> Vec<f64> {
    samples.into_iter().map(f64::from).collect()
}

fn widen_bytes(samples: Vec<u8>) -> Vec<f64> {
    samples.into_iter().map(f64::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, format).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_png_rgb_is_unit_range() {
        let image = RgbImage::from_pixel(3, 2, Rgb([255, 0, 51]));
        let bytes = encode(DynamicImage::ImageRgb8(image), ImageFormat::Png);

        let decoded = PngDecoder.decode(&bytes).unwrap();

        assert_eq!(decoded.shape(), &[2, 3, 3]);
        let samples = decoded.into_inner();
        assert_eq!(samples[[1, 2, 0]], 1.0);
        assert_eq!(samples[[1, 2, 1]], 0.0);
        assert!((samples[[1, 2, 2]] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_png_rgba_keeps_alpha_channel() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 128]));
        let bytes = encode(DynamicImage::ImageRgba8(image), ImageFormat::Png);

        let decoded = PngDecoder.decode(&bytes).unwrap();

        assert_eq!(decoded.shape(), &[2, 2, 4]);
    }

    #[test]
    fn test_png_greyscale_is_rank_two() {
        let image = GrayImage::from_pixel(4, 3, Luma([128]));
        let bytes = encode(DynamicImage::ImageLuma8(image), ImageFormat::Png);

        let decoded = PngDecoder.decode(&bytes).unwrap();

        assert_eq!(decoded.shape(), &[3, 4]);
    }

    #[test]
    fn test_bmp_keeps_raw_values() {
        let image = RgbImage::from_pixel(2, 2, Rgb([200, 100, 0]));
        let bytes = encode(DynamicImage::ImageRgb8(image), ImageFormat::Bmp);

        let samples = BmpDecoder.decode(&bytes).unwrap().into_inner();

        assert_eq!(samples[[0, 0, 0]], 200.0);
        assert_eq!(samples[[0, 0, 1]], 100.0);
        assert_eq!(samples[[0, 0, 2]], 0.0);
    }

    #[test]
    fn test_bmp_palette_greyscale_expands_to_rgb() {
        let image = GrayImage::from_pixel(3, 2, Luma([128]));
        let bytes = encode(DynamicImage::ImageLuma8(image), ImageFormat::Bmp);

        let decoded = BmpDecoder.decode(&bytes).unwrap();

        assert_eq!(decoded.shape(), &[2, 3, 3]);
        assert!(decoded.into_inner().iter().all(|&sample| sample == 128.0));
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        let result = JpegDecoder.decode(b"not a jpeg");
        assert!(matches!(result, Err(FingerprintError::Decode(_))));
    }
}
