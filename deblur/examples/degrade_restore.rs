//! Example: blur an image with every PSF type, restore it and write the results.
//!
//! The input image comes from `DEBLUR_INPUT` (any format the codec reads); without
//! it a synthetic test card is used. `DEBLUR_CONFIG` may point at a YAML or JSON
//! `PipelineConfig` whose kernel size, noise, seed and restoration settings are
//! applied to every blur type.
//!
//! Output structure:
//! ```text
//! test_output/degrade_restore/
//!   gaussian_observed.bmp
//!   gaussian_restored.bmp
//!   gaussian_difference.bmp
//!   gaussian_median.bmp
//!   box_...
//! ```
//!
//! # Usage
//!
//! ```bash
//! DEBLUR_INPUT=/path/to/image.bmp cargo run --example degrade_restore
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use common::log_setup::{setup_logging, LogConfig};
use deblur::{
    median_denoise, psnr, to_grayscale, BlurType, ImageCodec, Pipeline, PipelineConfig,
    PixelGrid, RgbCodec,
};

fn main() -> Result<()> {
    setup_logging(&LogConfig {
        directory: None,
        ..Default::default()
    })?;

    let codec = RgbCodec;
    let clean = match env::var("DEBLUR_INPUT") {
        Ok(path) => codec
            .load(Path::new(&path))
            .with_context(|| format!("Failed to load input image {}", path))?,
        Err(_) => test_card(256)?,
    };
    let base = match env::var("DEBLUR_CONFIG") {
        Ok(path) => PipelineConfig::from_file(&path)
            .with_context(|| format!("Failed to load config {}", path))?,
        Err(_) => PipelineConfig::default(),
    };

    let output_dir = PathBuf::from("test_output/degrade_restore");
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;
    codec.save(&clean, &output_dir.join("clean.bmp"))?;

    tracing::info!(
        width = clean.width(),
        height = clean.height(),
        method = %base.restore.method,
        iterations = base.restore.iterations,
        "Starting degrade/restore sweep"
    );

    for blur in [
        BlurType::Gaussian { sigma: 3.0 },
        BlurType::Box,
        BlurType::Motion { angle: 45.0 },
        BlurType::Identity,
    ] {
        let mut config = base;
        config.degrade.blur = blur;

        let start = Instant::now();
        let output = Pipeline::run(&clean, &config)
            .with_context(|| format!("Pipeline failed for {}", blur))?;
        let elapsed = start.elapsed();

        let name = blur.to_string();
        codec.save(&output.observed, &output_dir.join(format!("{}_observed.bmp", name)))?;
        codec.save(&output.restored, &output_dir.join(format!("{}_restored.bmp", name)))?;
        codec.save(
            &to_grayscale(&output.difference),
            &output_dir.join(format!("{}_difference.bmp", name)),
        )?;
        codec.save(
            &median_denoise(&output.observed, 3)?,
            &output_dir.join(format!("{}_median.bmp", name)),
        )?;

        tracing::info!(
            blur = %name,
            psnr_observed = psnr(&clean, &output.observed)?,
            psnr_restored = psnr(&clean, &output.restored)?,
            elapsed_ms = elapsed.as_millis() as u64,
            "Blur type done"
        );
    }

    tracing::info!(path = %output_dir.display(), "Results written");
    Ok(())
}

/// Gradient background with a checkerboard and a bright disc.
fn test_card(size: usize) -> Result<PixelGrid> {
    let center = size as f64 / 2.0;
    let radius = size as f64 / 6.0;
    Ok(PixelGrid::from_fn(size, size, |x, y| {
        let dx = x as f64 - center;
        let dy = y as f64 - center;
        if dx.hypot(dy) < radius {
            return [250, 240, 200];
        }
        let checker = if (x / 32 + y / 32) % 2 == 0 { 180 } else { 60 };
        [(x * 255 / size) as u8, checker, (y * 255 / size) as u8]
    })?)
}
