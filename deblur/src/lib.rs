//! Deblur - synthetic image degradation and non-blind deconvolution.
//!
//! This library provides:
//! - PSF synthesis (Gaussian, box, motion, identity kernels)
//! - 2D correlation with a zero-contribution border policy
//! - Noise models (Gaussian, salt-and-pepper, Poisson, speckle)
//! - Richardson-Lucy restoration with Tikhonov and Total Variation variants
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use deblur::{BlurType, DegradeConfig, PixelGrid, RestoreConfig, restore, synthesize_degraded};
//!
//! let clean = PixelGrid::filled(64, 64, [128, 128, 128])?;
//! let config = DegradeConfig {
//!     blur: BlurType::Gaussian { sigma: 2.0 },
//!     kernel_size: 9,
//!     ..Default::default()
//! };
//! let degraded = synthesize_degraded(&clean, &config)?;
//! let restored = restore(&degraded.observed, &degraded.kernel, &RestoreConfig::default())?;
//! ```

mod analysis;
mod config;
mod convolution;
mod degrade;
mod denoise;
mod error;
mod gradient;
mod grid;
mod io;
mod kernel;
mod noise;
mod pipeline;
mod restore;

#[cfg(test)]
pub(crate) mod testing;

#[cfg(feature = "bench")]
pub mod bench;

// ============================================================================
// Core data types
// ============================================================================

pub use error::{Dimensions, Error, Result};
pub use grid::{PixelGrid, Rgb, CHANNELS};
pub use kernel::{BlurType, Kernel};

// ============================================================================
// Engine operations
// ============================================================================

pub use analysis::{compute_difference, mean_squared_error, psnr, to_grayscale};
pub use convolution::{correlate, correlate_grid};
pub use degrade::{synthesize_degraded, DegradeConfig, Degraded};
pub use denoise::median_denoise;
pub use gradient::{grad_x, grad_y};
pub use noise::{NoiseInjector, NoiseType, DEFAULT_NOISE_SEED};
pub use restore::{
    restore, restore_with_stats, ChannelRestorer, DeconvolutionMethod, RestorationState,
    RestoreConfig, RestoreStats,
};

// ============================================================================
// Configuration, pipeline and codec boundary
// ============================================================================

pub use config::{ConfigError, PipelineConfig};
pub use io::{ImageCodec, ImageIoError, RgbCodec};
pub use pipeline::{Pipeline, PipelineOutput};

/// Channel working buffer used during restoration.
pub type Channel = common::Plane<f64>;
