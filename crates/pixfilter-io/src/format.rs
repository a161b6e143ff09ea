//! Image format inference
//!
//! Files are typed by their extension when read from or written to a path.

use crate::{IoError, IoResult};
use std::path::Path;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// PNG format
    Png,
    /// JFIF JPEG format
    Jpeg,
    /// BMP format
    Bmp,
    /// PNM family (PBM/PGM/PPM); RGB data is written as binary PPM (P6)
    Pnm,
    /// TIFF format
    Tiff,
    /// GIF format
    Gif,
}

impl ImageFormat {
    /// Look up a format by file extension (case-insensitive, without dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" | "jpe" | "jfif" => Some(ImageFormat::Jpeg),
            "bmp" => Some(ImageFormat::Bmp),
            "pnm" | "ppm" | "pgm" | "pbm" => Some(ImageFormat::Pnm),
            "tif" | "tiff" => Some(ImageFormat::Tiff),
            "gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }

    /// Infer the format of a path from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedFormat`] if the path has no extension
    /// or the extension is not recognised.
    pub fn from_path<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| {
                IoError::UnsupportedFormat(format!(
                    "cannot infer image format from '{}'",
                    path.display()
                ))
            })
    }

    /// Canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Pnm => "ppm",
            ImageFormat::Tiff => "tif",
            ImageFormat::Gif => "gif",
        }
    }

    /// Whether an RGB image survives a write/read cycle unchanged.
    ///
    /// JPEG is lossy; GIF quantizes to a 256-entry palette.
    pub fn is_lossless(&self) -> bool {
        !matches!(self, ImageFormat::Jpeg | ImageFormat::Gif)
    }

    pub(crate) fn to_codec(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Pnm => image::ImageFormat::Pnm,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::Gif => image::ImageFormat::Gif,
        }
    }
}
