//! Image I/O regression test
//!
//! Write/read round trips in every supported format, the file header of
//! each format, and the error paths for missing files, unknown extensions
//! and corrupt data.

use pixfilter_core::Rgb;
use pixfilter_io::{ImageFormat, IoError, read_image, write_image};
use pixfilter_test::{RegParams, checker_image, gradient_image, regout_dir};
use std::fs;

const FORMATS: [ImageFormat; 6] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Bmp,
    ImageFormat::Pnm,
    ImageFormat::Tiff,
    ImageFormat::Gif,
];

/// Whether `data` starts with the signature of `format`.
fn has_magic(format: ImageFormat, data: &[u8]) -> bool {
    match format {
        ImageFormat::Png => data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
        ImageFormat::Jpeg => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        ImageFormat::Bmp => data.starts_with(b"BM"),
        // RGB is written as binary PPM, not PAM (P7)
        ImageFormat::Pnm => data.starts_with(b"P6"),
        ImageFormat::Tiff => data.starts_with(b"II*\0") || data.starts_with(b"MM\0*"),
        ImageFormat::Gif => data.starts_with(b"GIF8"),
    }
}

#[test]
fn io_roundtrip_reg() {
    let mut rp = RegParams::new("io_roundtrip");

    let pixs = gradient_image(53, 37);
    for format in FORMATS {
        let path = rp
            .write_grid_and_check(&pixs, format)
            .expect("write and read back");
        eprintln!("  {:?}: {}", format, path);

        let data = fs::read(&path).expect("read written file");
        rp.check(
            has_magic(format, &data),
            "file header matches written format",
        );
    }

    // Extension-typed write
    let dir = regout_dir();
    fs::create_dir_all(&dir).expect("create regout");
    let path = format!("{}/io_ext.bmp", dir);
    let checker = checker_image(16, 16, 4, Rgb::new(10, 20, 30), Rgb::new(200, 100, 50));
    write_image(&checker, &path).expect("write by extension");
    let back = read_image(&path).expect("read by extension");
    rp.compare_grids(&checker, &back);

    assert!(rp.cleanup(), "io_roundtrip regression test failed");
}

#[test]
fn ppm_header_reg() {
    let mut rp = RegParams::new("ppm_header");

    let dir = regout_dir();
    fs::create_dir_all(&dir).expect("create regout");
    let path = format!("{}/io_ppm_header.ppm", dir);
    let pixs = checker_image(5, 3, 1, Rgb::new(1, 2, 3), Rgb::new(250, 128, 7));
    write_image(&pixs, &path).expect("write ppm");

    let data = fs::read(&path).expect("read ppm bytes");
    rp.check(data.starts_with(b"P6"), "ppm is written with a P6 header");
    // Binary payload: three bytes per pixel after the header, last pixel last.
    rp.check(data.len() > 5 * 3 * 3, "ppm holds header and pixels");
    rp.check(data.ends_with(&[1, 2, 3]), "last pixel ends the file");
    rp.compare_grids(&pixs, &read_image(&path).expect("read ppm"));

    assert!(rp.cleanup(), "ppm_header regression test failed");
}

#[test]
fn io_errors_reg() {
    let mut rp = RegParams::new("io_errors");
    let dir = regout_dir();
    fs::create_dir_all(&dir).expect("create regout");

    // Missing file
    let missing = format!("{}/does_not_exist.png", dir);
    rp.check(
        matches!(read_image(&missing), Err(IoError::Io(_))),
        "missing file is an I/O error",
    );

    // Unknown extension, on read and on write
    let pixs = gradient_image(8, 8);
    let odd = format!("{}/io_errors.xyz", dir);
    rp.check(
        matches!(write_image(&pixs, &odd), Err(IoError::UnsupportedFormat(_))),
        "unknown extension rejected on write",
    );
    rp.check(
        matches!(read_image(&odd), Err(IoError::UnsupportedFormat(_))),
        "unknown extension rejected on read",
    );

    // Corrupt data under a known extension
    let corrupt = format!("{}/io_errors_corrupt.png", dir);
    fs::write(&corrupt, b"this is not a png file at all").expect("write corrupt file");
    rp.check(
        matches!(read_image(&corrupt), Err(IoError::DecodeError(_))),
        "corrupt data is a decode error",
    );

    assert!(rp.cleanup(), "io_errors regression test failed");
}
