//! Synthetic degradation: blur a clean image with a known PSF, then add noise.

use serde::{Deserialize, Serialize};

use crate::convolution::correlate_grid;
use crate::error::{Error, Result};
use crate::grid::PixelGrid;
use crate::kernel::{BlurType, Kernel};
use crate::noise::{NoiseInjector, NoiseType, DEFAULT_NOISE_SEED};

/// Parameters of one degradation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DegradeConfig {
    pub blur: BlurType,
    /// Side length of the square PSF.
    pub kernel_size: usize,
    pub noise: NoiseType,
    /// Noise seed. `None` draws a fresh seed from the operating system and
    /// makes the output non-reproducible.
    pub seed: Option<u64>,
}

impl Default for DegradeConfig {
    fn default() -> Self {
        Self {
            blur: BlurType::default(),
            kernel_size: 3,
            noise: NoiseType::None,
            seed: Some(DEFAULT_NOISE_SEED),
        }
    }
}

impl DegradeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.kernel_size == 0 {
            return Err(Error::invalid("kernel_size", "must be positive, got 0"));
        }
        self.blur.validate()?;
        self.noise.validate()
    }
}

/// The simulated observation together with the PSF that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Degraded {
    pub observed: PixelGrid,
    pub kernel: Kernel,
}

/// Blurs `clean` with the configured PSF and perturbs the result with the
/// configured noise model.
pub fn synthesize_degraded(clean: &PixelGrid, config: &DegradeConfig) -> Result<Degraded> {
    config.validate()?;

    let kernel = Kernel::from_blur(config.blur, config.kernel_size)?;
    let mut observed = correlate_grid(clean, &kernel);
    NoiseInjector::new(config.seed).apply(&mut observed, &config.noise)?;

    tracing::info!(
        width = clean.width(),
        height = clean.height(),
        blur = %config.blur,
        kernel_size = config.kernel_size,
        noise = %config.noise,
        "Synthesized degraded image"
    );

    Ok(Degraded { observed, kernel })
}
