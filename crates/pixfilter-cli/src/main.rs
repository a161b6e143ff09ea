//! pixfilter CLI - run the filter catalogue over one image
//!
//! ```text
//! pixfilter -p giraffe.png
//! ```
//!
//! Writes one file per filter into the current directory, named after the
//! filter (`invert.png`, `blur.png`, `gaus.png`, ..., `bright.jpg`). Failures,
//! including bad arguments, are logged and the process always exits with
//! status 0.

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use pixfilter_core::PixelGrid;
use pixfilter_filter::Filter;
use pixfilter_io::{ImageFormat, read_image, write_image_format};
use pixfilter_morph::MorphOp;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Median radius used by the catalogue.
const MEDIAN_RADIUS: u32 = 2;

/// Seed for the glass filter, fixed so repeated runs agree.
const GLASS_SEED: u64 = 0x5EED;

#[derive(Parser)]
#[command(name = "pixfilter")]
#[command(version, about = "Apply the pixfilter filter catalogue to an image", long_about = None)]
struct Cli {
    /// Input image
    #[arg(short, long)]
    path: Option<PathBuf>,
}

/// Every filter the CLI runs, with the format its output is saved in.
fn catalogue() -> Vec<(Filter, ImageFormat)> {
    let mut filters = vec![
        (Filter::Invert, ImageFormat::Png),
        (Filter::blur(), ImageFormat::Png),
        (Filter::gaussian(), ImageFormat::Png),
        (Filter::Grayscale, ImageFormat::Png),
        (Filter::Sepia, ImageFormat::Png),
        (Filter::Bright, ImageFormat::Jpeg),
        (Filter::Correction, ImageFormat::Png),
        (Filter::sobel(), ImageFormat::Png),
        (Filter::emboss(), ImageFormat::Png),
        (Filter::sharpen(), ImageFormat::Png),
        (Filter::motion_blur(), ImageFormat::Png),
        (Filter::median(MEDIAN_RADIUS), ImageFormat::Png),
        (Filter::GreyWorld, ImageFormat::Png),
        (Filter::Histogram, ImageFormat::Png),
        (Filter::Waves, ImageFormat::Png),
        (Filter::glass(GLASS_SEED), ImageFormat::Png),
    ];
    filters.extend(
        MorphOp::ALL
            .iter()
            .map(|&op| (Filter::morph(op), ImageFormat::Png)),
    );
    filters
}

fn output_name(filter: &Filter, format: ImageFormat) -> String {
    format!("{}.{}", filter.name(), format.extension())
}

fn setup_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("pixfilter: logging already initialised");
    }
}

fn apply_and_save(src: &PixelGrid, filter: &Filter, format: ImageFormat, out: &Path) -> Result<()> {
    let result = filter
        .process(src)
        .with_context(|| format!("Failed to apply {}", filter.name()))?;
    write_image_format(&result, out, format)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    info!("Wrote {}", out.display());
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let path = cli
        .path
        .context("No input image given (use -p <path>)")?;
    let src = read_image(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    info!("Input: {} ({} x {})", path.display(), src.width(), src.height());

    for (filter, format) in catalogue() {
        let out = PathBuf::from(output_name(&filter, format));
        if let Err(e) = apply_and_save(&src, &filter, format, &out) {
            error!("{:#}", e);
        }
    }
    Ok(())
}

/// Parse the command line without exiting on bad arguments.
///
/// `--help` and `--version` are printed as usual; any other parse error is
/// logged. Both yield `None`.
fn parse_args<I, T>(args: I) -> Option<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Some(cli),
        Err(e) => {
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if let Err(print_err) = e.print() {
                        error!("{}", print_err);
                    }
                }
                _ => error!("{}", e.render()),
            }
            None
        }
    }
}

fn main() {
    setup_logging();

    let Some(cli) = parse_args(std::env::args_os()) else {
        return;
    };
    if let Err(e) = run(cli) {
        error!("{:#}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfilter_test::{gradient_image, regout_dir};
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_names_unique() {
        let names: Vec<String> = catalogue()
            .iter()
            .map(|(f, fmt)| output_name(f, *fmt))
            .collect();
        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
        for expected in [
            "invert.png",
            "blur.png",
            "gaus.png",
            "gray.png",
            "sepia.png",
            "bright.jpg",
        ] {
            assert!(names.iter().any(|n| n == expected), "{expected}");
        }
    }

    #[test]
    fn test_missing_path_is_error() {
        assert!(run(Cli { path: None }).is_err());
        let missing = Cli {
            path: Some(PathBuf::from("no/such/image.png")),
        };
        assert!(run(missing).is_err());
    }

    #[test]
    fn test_parse_args() {
        let cli = parse_args(["pixfilter", "-p", "in.png"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("in.png")));
        let cli = parse_args(["pixfilter", "--path", "in.png"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("in.png")));
        assert!(parse_args(["pixfilter"]).unwrap().path.is_none());
    }

    #[test]
    fn test_bad_args_do_not_exit() {
        assert!(parse_args(["pixfilter", "-x"]).is_none());
        assert!(parse_args(["pixfilter", "-p"]).is_none());
        assert!(parse_args(["pixfilter", "-p", "a.png", "extra"]).is_none());
    }

    #[test]
    fn test_apply_and_save() {
        let dir = PathBuf::from(regout_dir());
        std::fs::create_dir_all(&dir).unwrap();
        let out = dir.join("cli_invert.png");
        let src = gradient_image(20, 10);
        apply_and_save(&src, &Filter::Invert, ImageFormat::Png, &out).unwrap();
        let back = read_image(&out).unwrap();
        assert!(back.equals(&pixfilter_filter::invert(&src)));
    }
}
