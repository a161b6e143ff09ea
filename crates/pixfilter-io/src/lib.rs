//! pixfilter-io - Image reading and writing
//!
//! Decoding and encoding are delegated to the `image` crate. This crate
//! picks the format, converts between the codec's RGB8 buffers and
//! [`PixelGrid`], and maps codec errors into [`IoError`].
//!
//! Every decoded image is converted to 8-bit RGB; alpha and extra bit depth
//! are dropped.

mod error;
pub mod format;

pub use error::{IoError, IoResult};
pub use format::ImageFormat;

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use pixfilter_core::{PixelGrid, Rgb};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Read an image from a file, typed by its extension.
///
/// # Errors
///
/// - [`IoError::UnsupportedFormat`] if the extension is not recognised
/// - [`IoError::Io`] if the file cannot be opened
/// - [`IoError::DecodeError`] if the data is corrupt
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixelGrid> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;

    let mut reader = image::ImageReader::open(path)?;
    reader.set_format(format.to_codec());
    let img = reader.decode().map_err(IoError::from_decode)?;

    let grid = grid_from_rgb(img.into_rgb8())?;
    debug!(
        path = %path.display(),
        ?format,
        width = grid.width(),
        height = grid.height(),
        "read image"
    );
    Ok(grid)
}

/// Write an image to a file, typed by its extension.
///
/// # Errors
///
/// - [`IoError::UnsupportedFormat`] if the extension is not recognised
/// - [`IoError::EncodeError`] if encoding or writing fails
pub fn write_image<P: AsRef<Path>>(grid: &PixelGrid, path: P) -> IoResult<()> {
    let format = ImageFormat::from_path(path.as_ref())?;
    write_image_format(grid, path, format)
}

/// Write an image to a file in an explicit format.
pub fn write_image_format<P: AsRef<Path>>(
    grid: &PixelGrid,
    path: P,
    format: ImageFormat,
) -> IoResult<()> {
    let path = path.as_ref();
    let img = rgb_from_grid(grid)?;
    match format {
        ImageFormat::Pnm => write_ppm(&img, path)?,
        _ => img
            .save_with_format(path, format.to_codec())
            .map_err(IoError::from_encode)?,
    }
    debug!(
        path = %path.display(),
        ?format,
        width = grid.width(),
        height = grid.height(),
        "wrote image"
    );
    Ok(())
}

/// Write binary PPM (P6). The codec's default for RGB is PAM (P7).
fn write_ppm(img: &RgbImage, path: &Path) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    PnmEncoder::new(&mut writer)
        .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .map_err(IoError::from_encode)?;
    writer.flush()?;
    Ok(())
}

fn grid_from_rgb(img: RgbImage) -> IoResult<PixelGrid> {
    let (width, height) = img.dimensions();
    let pixels = img
        .into_raw()
        .chunks_exact(3)
        .map(|c| Rgb::new(c[0], c[1], c[2]))
        .collect();
    Ok(PixelGrid::from_pixels(width, height, pixels)?)
}

fn rgb_from_grid(grid: &PixelGrid) -> IoResult<RgbImage> {
    let raw: Vec<u8> = grid.pixels().iter().flat_map(|p| p.channels()).collect();
    RgbImage::from_raw(grid.width(), grid.height(), raw)
        .ok_or_else(|| IoError::EncodeError("pixel buffer does not match dimensions".to_string()))
}
