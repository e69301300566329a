use std::fmt;
use std::path::Path;

use crate::fingerprint::common::error::{FingerprintError, Result};

/// Raster formats with a decoder slot in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RasterFormat {
    Png,
    Jpeg,
    Bmp,
}

impl RasterFormat {
    pub const ALL: [RasterFormat; 3] = [RasterFormat::Png, RasterFormat::Jpeg, RasterFormat::Bmp];

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(RasterFormat::Png),
            "jpg" | "jpeg" => Some(RasterFormat::Jpeg),
            "bmp" => Some(RasterFormat::Bmp),
            _ => None,
        }
    }

    /// Extension used when staging a decompressed file of this format
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Jpeg => "jpg",
            RasterFormat::Bmp => "bmp",
        }
    }

    /// Cargo feature providing the decoder
    pub fn feature(self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Jpeg => "jpeg",
            RasterFormat::Bmp => "bmp",
        }
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterFormat::Png => f.write_str("PNG"),
            RasterFormat::Jpeg => f.write_str("JPEG"),
            RasterFormat::Bmp => f.write_str("BMP"),
        }
    }
}

/// How an input path is read: directly, or through a gzip wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Plain(RasterFormat),
    Gzip(RasterFormat),
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = extension_of(path)
            .ok_or_else(|| FingerprintError::UnsupportedFormat(format!("{}: no file extension", path.display())))?;

        if extension.eq_ignore_ascii_case("gz") {
            let inner = path
                .file_stem()
                .map(Path::new)
                .and_then(extension_of)
                .and_then(RasterFormat::from_extension)
                .ok_or_else(|| {
                    FingerprintError::UnsupportedFormat(format!(
                        "{}: compressed input must wrap a .png, .jpg, .jpeg or .bmp file",
                        path.display()
                    ))
                })?;
            return Ok(SourceKind::Gzip(inner));
        }

        RasterFormat::from_extension(extension)
            .map(SourceKind::Plain)
            .ok_or_else(|| {
                FingerprintError::UnsupportedFormat(format!(
                    "{}: unknown extension '.{}'",
                    path.display(),
                    extension
                ))
            })
    }

    pub fn format(self) -> RasterFormat {
        match self {
            SourceKind::Plain(format) | SourceKind::Gzip(format) => format,
        }
    }
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}
