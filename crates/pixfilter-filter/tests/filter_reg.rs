//! Filter catalogue regression test
//!
//! Runs every [`Filter`] variant through `process`, checks that the
//! per-pixel rule agrees with the whole-image driver, and covers the
//! displacement filters.

use pixfilter_core::{PixelGrid, Rgb};
use pixfilter_filter::{Filter, glass, waves};
use pixfilter_io::ImageFormat;
use pixfilter_morph::MorphOp;
use pixfilter_test::{RegParams, checker_image, gradient_image, noise_image};

fn catalogue() -> Vec<Filter> {
    let mut filters = vec![
        Filter::Invert,
        Filter::Grayscale,
        Filter::Sepia,
        Filter::Bright,
        Filter::Correction,
        Filter::blur(),
        Filter::gaussian(),
        Filter::sobel(),
        Filter::emboss(),
        Filter::sharpen(),
        Filter::motion_blur(),
        Filter::median(2),
        Filter::GreyWorld,
        Filter::Histogram,
        Filter::Waves,
        Filter::glass(7),
    ];
    filters.extend(MorphOp::ALL.iter().map(|&op| Filter::morph(op)));
    filters
}

#[test]
fn filter_catalogue_reg() {
    let mut rp = RegParams::new("filter_catalogue");

    let pixs = noise_image(24, 18, 42);
    let copy: PixelGrid = pixs.to_mut().into();

    for filter in catalogue() {
        let out = filter.process(&pixs).expect("process");
        rp.check(out.sizes_equal(&pixs), filter.name());

        let by_pixel = PixelGrid::from_fn(pixs.width(), pixs.height(), |x, y| {
            filter.pixel_color(&pixs, x, y)
        })
        .unwrap();
        rp.compare_grids(&out, &by_pixel);
        eprintln!("  {:<12} ok", filter.name());
    }

    // The source is never modified.
    rp.compare_grids(&copy, &pixs);

    assert!(rp.cleanup(), "filter_catalogue regression test failed");
}

#[test]
fn filter_write_reg() {
    let mut rp = RegParams::new("filter_write");

    let pixs = gradient_image(80, 60);
    for filter in catalogue() {
        let out = filter.process(&pixs).expect("process");
        rp.write_grid_and_check(&out, ImageFormat::Png)
            .expect("write filtered image");
    }

    assert!(rp.cleanup(), "filter_write regression test failed");
}

#[test]
fn displace_reg() {
    let mut rp = RegParams::new("displace");

    // --- Waves: rows are only shifted horizontally ---
    let pixs = PixelGrid::from_fn(120, 10, |x, y| Rgb::new(x as u8, y as u8, 0)).unwrap();
    let out = waves(&pixs);
    let rows_kept = (0..out.height()).all(|y| out.row(y).iter().all(|p| p.g as u32 == y));
    rp.check(rows_kept, "waves keeps every pixel on its row");
    let sample = out.pixel(15, 0).unwrap();
    // 15 + 20 * sin(pi / 2) = 35, give or take truncation of the sine
    rp.compare_values(35.0, sample.r as f64, 1.0);

    // --- Glass: deterministic for a seed, bounded offsets ---
    let a = glass(&pixs, 99);
    let b = glass(&pixs, 99);
    rp.compare_grids(&a, &b);
    let bounded = (0..a.height()).all(|y| {
        (0..a.width()).all(|x| {
            let p = a.pixel(x, y).unwrap();
            (p.r as i64 - x as i64).abs() <= 3 && (p.g as i64 - y as i64).abs() <= 3
        })
    });
    rp.check(bounded, "glass offsets stay within 3 pixels");

    // A uniform image is unchanged by any displacement.
    let flat = checker_image(30, 30, 30, Rgb::gray(77), Rgb::gray(77));
    rp.compare_grids(&flat, &waves(&flat));
    rp.compare_grids(&flat, &glass(&flat, 1));

    assert!(rp.cleanup(), "displace regression test failed");
}
