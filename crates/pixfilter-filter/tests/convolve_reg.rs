//! Convolution regression test
//!
//! Box blur, Gaussian blur, Sobel, emboss, sharpen and motion blur on
//! synthetic images.

use pixfilter_core::{PixelGrid, Rgb};
use pixfilter_filter::{
    Kernel, box_blur, convolve, emboss, gaussian_blur, motion_blur, sharpen, sobel_edge,
};
use pixfilter_io::ImageFormat;
use pixfilter_test::{RegParams, checker_image, gradient_image, noise_image};

fn variance(pix: &PixelGrid) -> f64 {
    let vals: Vec<f64> = pix.pixels().iter().map(|p| p.r as f64).collect();
    let n = vals.len() as f64;
    let mean = vals.iter().sum::<f64>() / n;
    vals.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

#[test]
fn convolve_reg() {
    let mut rp = RegParams::new("convolve");

    let pixs = noise_image(64, 48, 17);
    let (w, h) = pixs.dimensions();
    eprintln!("Image size: {}x{}", w, h);

    // --- Test 1: Box blur keeps size and reduces variance ---
    let orig_var = variance(&pixs);
    for &radius in &[0, 1, 2, 3, 5] {
        let blurred = box_blur(&pixs, radius);
        rp.compare_values(w as f64, blurred.width() as f64, 0.0);
        rp.compare_values(h as f64, blurred.height() as f64, 0.0);
        let v = variance(&blurred);
        rp.check(v <= orig_var, "blur does not increase variance");
        eprintln!("  box_blur({}): variance {:.1} -> {:.1}", radius, orig_var, v);
    }

    // --- Test 2: Gaussian blur ---
    for &(radius, sigma) in &[(1, 0.5), (2, 1.0), (3, 2.0), (5, 3.0)] {
        let blurred = gaussian_blur(&pixs, radius, sigma).expect("gaussian_blur");
        rp.compare_values(w as f64, blurred.width() as f64, 0.0);
        rp.compare_values(h as f64, blurred.height() as f64, 0.0);
    }

    // --- Test 3: Identity kernel ---
    let identity = Kernel::from_slice(3, &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0])
        .expect("identity kernel");
    let conv = convolve(&pixs, &identity);
    rp.compare_grids(&pixs, &conv);

    // --- Test 4: Uniform image is a fixed point of normalised kernels ---
    let gray = PixelGrid::filled(3, 3, Rgb::gray(128)).unwrap();
    rp.compare_grids(&gray, &box_blur(&gray, 1));
    rp.compare_grids(&gray, &gaussian_blur(&gray, 3, 2.0).unwrap());
    rp.compare_grids(&gray, &motion_blur(&gray, 3, 1).unwrap());
    rp.compare_grids(&gray, &sharpen(&gray));

    // --- Test 5: Zero-sum kernels give black on a uniform image ---
    let flat = PixelGrid::filled(8, 8, Rgb::new(10, 200, 90)).unwrap();
    let black = PixelGrid::new(8, 8).unwrap();
    rp.compare_grids(&black, &sobel_edge(&flat));
    rp.compare_grids(&black, &emboss(&flat));

    // --- Test 6: Channel range on strong kernels ---
    // Values are u8, so the check is that nothing panicked and sizes hold.
    let checker = checker_image(32, 32, 4, Rgb::BLACK, Rgb::WHITE);
    for out in [sobel_edge(&checker), emboss(&checker), sharpen(&checker)] {
        rp.compare_values(32.0, out.width() as f64, 0.0);
    }

    // --- Test 7: Write results ---
    let grad = gradient_image(64, 48);
    rp.write_grid_and_check(&box_blur(&grad, 2), ImageFormat::Png)
        .expect("write blur");
    rp.write_grid_and_check(&gaussian_blur(&grad, 3, 2.0).unwrap(), ImageFormat::Png)
        .expect("write gaussian");
    rp.write_grid_and_check(&sobel_edge(&grad), ImageFormat::Bmp)
        .expect("write sobel");

    assert!(rp.cleanup(), "convolve regression test failed");
}

#[test]
fn gaussian_kernel_sum_reg() {
    let mut rp = RegParams::new("gaussian_kernel_sum");

    for radius in 0..=8 {
        for &sigma in &[0.3f32, 0.8, 1.0, 2.0, 4.5, 10.0] {
            let k = Kernel::gaussian(radius, sigma).expect("gaussian kernel");
            rp.compare_values(1.0, k.sum() as f64, 1e-4);
        }
    }

    assert!(rp.cleanup(), "gaussian kernel sum regression test failed");
}
