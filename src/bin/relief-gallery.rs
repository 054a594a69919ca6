//! Render the full textbook figure set.
//!
//! With no arguments, writes every figure as SVG and PNG into `images/`.

use anyhow::{Context, Result};
use clap::Parser;
use relief::gallery::{self, GalleryConfig};
use relief::render::Format;
use relief::Mountain;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Synthetic mountain figure gallery
#[derive(Parser)]
#[command(name = "relief-gallery")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render quiver, contour and surface figures of a synthetic mountain", long_about = None)]
struct Cli {
    /// Output directory
    #[arg(short, long, default_value = "images")]
    out_dir: PathBuf,

    /// Output format (repeatable): svg, png
    #[arg(short, long = "format")]
    formats: Vec<Format>,

    /// Mountain peak height [m]
    #[arg(long, default_value_t = Mountain::TEXTBOOK.peak())]
    peak: f64,

    /// Mountain radius [km]
    #[arg(long, default_value_t = Mountain::TEXTBOOK.radius())]
    radius: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value_t = Level::INFO)]
    log_level: Level,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mountain = Mountain::new(cli.peak, cli.radius)
        .with_context(|| format!("invalid mountain (--peak {}, --radius {})", cli.peak, cli.radius))?;
    let formats = if cli.formats.is_empty() {
        Format::ALL.to_vec()
    } else {
        cli.formats
    };
    let cfg = GalleryConfig {
        out_dir: cli.out_dir,
        formats,
        mountain,
        ..GalleryConfig::default()
    };

    let start = Instant::now();
    let written = gallery::export(&cfg)
        .with_context(|| format!("failed to export gallery to {}", cfg.out_dir.display()))?;
    info!(
        files = written.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "done"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn defaults_render_everything_at_info() {
        let cli = Cli::try_parse_from(["relief-gallery"]).unwrap();
        assert_eq!(cli.log_level, Level::INFO);
        assert_eq!(cli.out_dir, PathBuf::from("images"));
        assert!(cli.formats.is_empty());
        assert_eq!(cli.peak, 2277.0);
        assert_eq!(cli.radius, 4.0);
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let cli = Cli::try_parse_from(["relief-gallery", "--log-level", "DEBUG"]).unwrap();
        assert_eq!(cli.log_level, Level::DEBUG);
    }

    #[test]
    fn misspelt_log_level_is_rejected() {
        let err = match Cli::try_parse_from(["relief-gallery", "--log-level", "verbose"]) {
            Ok(_) => panic!("`verbose` is not a log level"),
            Err(e) => e,
        };
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("--log-level"), "{err}");
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["relief-gallery", "-f", "pdf"]).is_err());
        let cli = Cli::try_parse_from(["relief-gallery", "-f", "svg", "-f", "png"]).unwrap();
        assert_eq!(cli.formats, vec![Format::Svg, Format::Png]);
    }
}
