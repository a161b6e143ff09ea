//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use pixfilter_core::PixelGrid;
use pixfilter_io::ImageFormat;
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Check results, including image read-back (default)
    #[default]
    Compare,
    /// Write images for visual inspection only
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "convolve")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta || diff.is_nan() {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Record a boolean check
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            self.fail(format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            ));
        }
        condition
    }

    /// Compare two grids for exact equality
    ///
    /// # Returns
    ///
    /// `true` if images are identical, `false` otherwise.
    pub fn compare_grids(&mut self, pix1: &PixelGrid, pix2: &PixelGrid) -> bool {
        self.index += 1;

        if !pix1.sizes_equal(pix2) {
            self.fail(format!(
                "Failure in {}_reg: grid comparison for index {} - dimension mismatch ({:?} vs {:?})",
                self.test_name,
                self.index,
                pix1.dimensions(),
                pix2.dimensions()
            ));
            return false;
        }

        let mismatch = pix1
            .pixels()
            .iter()
            .zip(pix2.pixels())
            .position(|(a, b)| a != b);

        if let Some(i) = mismatch {
            let w = pix1.width() as usize;
            self.fail(format!(
                "Failure in {}_reg: grid comparison for index {} - pixel mismatch at ({}, {}): {:?} vs {:?}",
                self.test_name,
                self.index,
                i % w,
                i / w,
                pix1.pixels()[i],
                pix2.pixels()[i]
            ));
            return false;
        }

        true
    }

    /// Write a grid to the regout directory and check it
    ///
    /// In compare mode the file is read back; lossless formats must
    /// reproduce every pixel, lossy ones only the dimensions. In display
    /// mode the file is only written.
    ///
    /// # Returns
    ///
    /// The path written, or an error if the write or read-back failed.
    pub fn write_grid_and_check(
        &mut self,
        pix: &PixelGrid,
        format: ImageFormat,
    ) -> TestResult<String> {
        self.index += 1;

        let dir = regout_dir();
        fs::create_dir_all(&dir)?;
        let local_path = format!(
            "{}/{}.{:02}.{}",
            dir,
            self.test_name,
            self.index,
            format.extension()
        );

        pixfilter_io::write_image_format(pix, &local_path, format).map_err(|e| {
            TestError::ImageWrite {
                path: local_path.clone(),
                message: e.to_string(),
            }
        })?;

        if self.display() {
            eprintln!("Wrote: {}", local_path);
            return Ok(local_path);
        }

        let back = pixfilter_io::read_image(&local_path).map_err(|e| TestError::ImageLoad {
            path: local_path.clone(),
            message: e.to_string(),
        })?;

        let same = if format.is_lossless() {
            back.equals(pix)
        } else {
            back.sizes_equal(pix)
        };
        if !same {
            self.fail(format!(
                "Failure in {}_reg, index {}: {} does not read back as written",
                self.test_name, self.index, local_path
            ));
        }

        Ok(local_path)
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
