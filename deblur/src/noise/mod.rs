//! Stochastic perturbation models applied in place to a [`PixelGrid`].
//!
//! Pixels are visited in row-major order. Reproducibility depends only on the
//! seed handed to [`NoiseInjector::new`]: the same seed, grid and model always
//! produce the same output.


use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Poisson};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::{Error, Result};
use crate::grid::{quantize_value, PixelGrid};

/// Seed used when a configuration does not choose one.
pub const DEFAULT_NOISE_SEED: u64 = 0x5EED_DEB1;

/// Noise model applied after blurring.
#[derive(Debug, Clone, Copy, PartialEq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NoiseType {
    #[default]
    None,
    /// Additive `N(mean, stddev)`, drawn independently per channel.
    Gaussian { mean: f64, stddev: f64 },
    /// One uniform draw per pixel gates all three channels: below
    /// `salt_prob` the pixel turns white, above `1 - pepper_prob` black.
    SaltAndPepper { salt_prob: f64, pepper_prob: f64 },
    /// Each channel value `v` becomes `min(255, v + Poisson(v))`.
    Poisson,
    /// Multiplicative `v + v * N(0, stddev)` with one draw shared by the
    /// channels of a pixel.
    Speckle { stddev: f64 },
}

impl NoiseType {
    /// Gaussian noise with mean 0 and standard deviation 10.
    pub fn default_gaussian() -> Self {
        NoiseType::Gaussian {
            mean: 0.0,
            stddev: 10.0,
        }
    }

    /// Salt-and-pepper noise at 3% salt and 3% pepper.
    pub fn default_salt_and_pepper() -> Self {
        NoiseType::SaltAndPepper {
            salt_prob: 0.03,
            pepper_prob: 0.03,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            NoiseType::None | NoiseType::Poisson => Ok(()),
            NoiseType::Gaussian { mean, stddev } => {
                if !mean.is_finite() {
                    return Err(Error::invalid(
                        "mean",
                        format!("must be finite, got {}", mean),
                    ));
                }
                check_stddev(stddev)
            }
            NoiseType::SaltAndPepper {
                salt_prob,
                pepper_prob,
            } => {
                check_probability("salt_prob", salt_prob)?;
                check_probability("pepper_prob", pepper_prob)
            }
            NoiseType::Speckle { stddev } => check_stddev(stddev),
        }
    }
}

/// Owns the random source used for noise injection.
#[derive(Debug, Clone)]
pub struct NoiseInjector {
    rng: ChaCha8Rng,
}

impl NoiseInjector {
    /// `Some(seed)` makes every call sequence reproducible; `None` seeds from
    /// the operating system.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self { rng }
    }

    /// Perturbs `grid` in place according to `noise`.
    pub fn apply(&mut self, grid: &mut PixelGrid, noise: &NoiseType) -> Result<()> {
        noise.validate()?;

        match *noise {
            NoiseType::None => {}
            NoiseType::Gaussian { mean, stddev } => {
                let normal = normal(mean, stddev)?;
                self.for_each_pixel(grid, |rng, rgb| {
                    rgb.map(|v| quantize_value(f64::from(v) + normal.sample(rng)))
                });
            }
            NoiseType::SaltAndPepper {
                salt_prob,
                pepper_prob,
            } => {
                self.for_each_pixel(grid, |rng, rgb| {
                    let u: f64 = rng.random();
                    if u < salt_prob {
                        [255; 3]
                    } else if u > 1.0 - pepper_prob {
                        [0; 3]
                    } else {
                        rgb
                    }
                });
            }
            NoiseType::Poisson => {
                self.for_each_pixel(grid, |rng, rgb| rgb.map(|v| add_poisson(v, rng)));
            }
            NoiseType::Speckle { stddev } => {
                let normal = normal(0.0, stddev)?;
                self.for_each_pixel(grid, |rng, rgb| {
                    let n = normal.sample(rng);
                    rgb.map(|v| {
                        let v = f64::from(v);
                        quantize_value(v + v * n)
                    })
                });
            }
        }

        tracing::debug!(
            noise = %noise,
            width = grid.width(),
            height = grid.height(),
            "Applied noise"
        );
        Ok(())
    }

    fn for_each_pixel(
        &mut self,
        grid: &mut PixelGrid,
        mut f: impl FnMut(&mut ChaCha8Rng, [u8; 3]) -> [u8; 3],
    ) {
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let rgb = f(&mut self.rng, grid.pixel(x, y));
                grid.set_pixel(x, y, rgb);
            }
        }
    }
}

/// `Poisson(0)` is degenerate and always 0, so zero values stay untouched.
fn add_poisson(value: u8, rng: &mut ChaCha8Rng) -> u8 {
    if value == 0 {
        return 0;
    }
    match Poisson::new(f64::from(value)) {
        Ok(poisson) => {
            let sample: f64 = poisson.sample(rng);
            (f64::from(value) + sample).min(255.0) as u8
        }
        Err(_) => value,
    }
}

fn normal(mean: f64, stddev: f64) -> Result<Normal<f64>> {
    Normal::new(mean, stddev).map_err(|e| Error::invalid("stddev", e.to_string()))
}

fn check_stddev(stddev: f64) -> Result<()> {
    if !(stddev.is_finite() && stddev >= 0.0) {
        return Err(Error::invalid(
            "stddev",
            format!("must be non-negative and finite, got {}", stddev),
        ));
    }
    Ok(())
}

fn check_probability(what: &'static str, p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::invalid(
            what,
            format!("must be within [0, 1], got {}", p),
        ));
    }
    Ok(())
}
