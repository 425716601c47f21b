//! Richardson-Lucy restoration with Tikhonov and Total Variation variants.
//!
//! Every color channel is restored independently by a [`ChannelRestorer`],
//! starting from the observed values. One iteration:
//!
//! 1. `blurred = correlate(estimate, kernel)`
//! 2. `ratio = observed / max(blurred, EPSILON)`, where Tikhonov adds
//!    `lambda * correlate(estimate, laplacian)` to the denominator first
//! 3. `correction = correlate(ratio, flip(kernel))`
//! 4. TV only: `correction += alpha / (|grad estimate| + lambda) * (estimate - correction)`
//! 5. `estimate *= correction`
//!
//! The ratio numerator is intentionally the observation, not the running
//! estimate.
//!
//! The TV variant scales the final estimate by `scaling_factor` before the
//! image is reassembled. Reassembly clamps to `[0, 255]` and rounds.

mod channel;

pub use channel::{ChannelRestorer, RestorationState, RestoreStats};

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::{Error, Result};
use crate::grid::{PixelGrid, CHANNELS};
use crate::kernel::Kernel;

/// Restoration algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeconvolutionMethod {
    #[default]
    RichardsonLucy,
    /// Adds `lambda` times the Laplacian of the estimate to the forward model.
    RichardsonLucyTikhonov { lambda: f64 },
    /// Gradient-weighted correction followed by a final `scaling_factor`.
    RichardsonLucyTv {
        lambda: f64,
        alpha: f64,
        scaling_factor: f64,
    },
}

impl DeconvolutionMethod {
    pub fn tikhonov(lambda: f64) -> Self {
        Self::RichardsonLucyTikhonov { lambda }
    }

    pub fn total_variation(lambda: f64, alpha: f64, scaling_factor: f64) -> Self {
        Self::RichardsonLucyTv {
            lambda,
            alpha,
            scaling_factor,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            DeconvolutionMethod::RichardsonLucy => Ok(()),
            DeconvolutionMethod::RichardsonLucyTikhonov { lambda } => {
                if !lambda.is_finite() {
                    return Err(Error::invalid(
                        "lambda",
                        format!("must be finite, got {}", lambda),
                    ));
                }
                Ok(())
            }
            DeconvolutionMethod::RichardsonLucyTv {
                lambda,
                alpha,
                scaling_factor,
            } => {
                if !(lambda.is_finite() && lambda > 0.0) {
                    return Err(Error::invalid(
                        "lambda",
                        format!("must be positive and finite, got {}", lambda),
                    ));
                }
                if !(alpha.is_finite() && alpha >= 0.0) {
                    return Err(Error::invalid(
                        "alpha",
                        format!("must be non-negative and finite, got {}", alpha),
                    ));
                }
                if !(scaling_factor.is_finite() && scaling_factor > 0.0) {
                    return Err(Error::invalid(
                        "scaling_factor",
                        format!("must be positive and finite, got {}", scaling_factor),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Parameters of one restoration request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestoreConfig {
    pub method: DeconvolutionMethod,
    /// Fixed number of iterations. There is no early stopping.
    pub iterations: usize,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            method: DeconvolutionMethod::RichardsonLucy,
            iterations: 3,
        }
    }
}

impl RestoreConfig {
    pub fn validate(&self) -> Result<()> {
        self.method.validate()
    }
}

/// Restores `observed`, which was blurred by `kernel`.
pub fn restore(
    observed: &PixelGrid,
    kernel: &Kernel,
    config: &RestoreConfig,
) -> Result<PixelGrid> {
    restore_with_stats(observed, kernel, config).map(|(grid, _)| grid)
}

/// Like [`restore`], also returning per-channel statistics in R, G, B order.
pub fn restore_with_stats(
    observed: &PixelGrid,
    kernel: &Kernel,
    config: &RestoreConfig,
) -> Result<(PixelGrid, [RestoreStats; CHANNELS])> {
    config.validate()?;

    tracing::info!(
        width = observed.width(),
        height = observed.height(),
        method = %config.method,
        iterations = config.iterations,
        kernel_size = kernel.size(),
        "Restoring image"
    );

    let mut stats = [RestoreStats::default(); CHANNELS];
    let mut channels = observed.working_channels();
    for (index, channel) in channels.iter_mut().enumerate() {
        let restorer = ChannelRestorer::new(channel, kernel, config.method, config.iterations)?;
        let (estimate, channel_stats) = restorer.finish();
        tracing::debug!(
            channel = index,
            iterations = channel_stats.iterations_run,
            floored = channel_stats.floored_denominators,
            "Channel restored"
        );
        stats[index] = channel_stats;
        *channel = estimate;
    }

    Ok((PixelGrid::from_working_channels(channels)?, stats))
}
