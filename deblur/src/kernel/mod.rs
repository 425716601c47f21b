//! Point-spread function synthesis.
//!
//! Kernels are square `k x k` matrices addressed as `(i, j)`, where `i` runs
//! along the image x axis and `j` along the y axis. The cell `(k / 2, k / 2)`
//! is the center for both odd and even sizes, so offsets run from `-k / 2` to
//! `k - 1 - k / 2`.


use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::{Error, Result};

/// Blur model used to synthesize a PSF.
#[derive(Debug, Clone, Copy, PartialEq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BlurType {
    /// Isotropic Gaussian with the given standard deviation in pixels.
    Gaussian { sigma: f64 },
    /// Uniform average over the kernel window.
    Box,
    /// Linear motion along a line at `angle` degrees from the x axis.
    Motion { angle: f64 },
    /// No blur; the center tap only.
    Identity,
}

impl Default for BlurType {
    fn default() -> Self {
        BlurType::Gaussian { sigma: 3.0 }
    }
}

impl BlurType {
    pub fn validate(&self) -> Result<()> {
        match *self {
            BlurType::Gaussian { sigma } => check_sigma(sigma),
            BlurType::Motion { angle } => {
                if !angle.is_finite() {
                    return Err(Error::invalid(
                        "angle",
                        format!("must be finite, got {}", angle),
                    ));
                }
                Ok(())
            }
            BlurType::Box | BlurType::Identity => Ok(()),
        }
    }
}

/// Immutable square convolution kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    values: Vec<f64>,
}

impl Kernel {
    /// Builds the kernel described by `blur` with side length `size`.
    pub fn from_blur(blur: BlurType, size: usize) -> Result<Self> {
        match blur {
            BlurType::Gaussian { sigma } => Self::gaussian(size, sigma),
            BlurType::Box => Self::box_blur(size),
            BlurType::Motion { angle } => Self::motion(size, angle),
            BlurType::Identity => Self::identity(size),
        }
    }

    /// Sampled Gaussian `exp(-(x^2 + y^2) / (2 sigma^2)) / (2 pi sigma^2)`,
    /// normalized so the whole grid sums to 1.
    pub fn gaussian(size: usize, sigma: f64) -> Result<Self> {
        check_size(size)?;
        check_sigma(sigma)?;

        let two_sigma_sq = 2.0 * sigma * sigma;
        let mut kernel = Self::from_offsets(size, |x, y| {
            (-(x * x + y * y) / two_sigma_sq).exp() / (PI * two_sigma_sq)
        });

        let sum = kernel.sum();
        for v in &mut kernel.values {
            *v /= sum;
        }
        Ok(kernel)
    }

    /// Every entry is `1 / k^2`.
    pub fn box_blur(size: usize) -> Result<Self> {
        check_size(size)?;
        let value = 1.0 / (size * size) as f64;
        Ok(Self {
            size,
            values: vec![value; size * size],
        })
    }

    /// Line kernel: `1 / k` where `|y - x tan(angle)| <= 0.5`, 0 elsewhere.
    ///
    /// Angles next to +-90 degrees make `tan` explode so only the center row
    /// survives and the kernel no longer sums to 1. This is left untrapped.
    pub fn motion(size: usize, angle_degrees: f64) -> Result<Self> {
        check_size(size)?;
        BlurType::Motion {
            angle: angle_degrees,
        }
        .validate()?;

        let slope = angle_degrees.to_radians().tan();
        let tap = 1.0 / size as f64;
        Ok(Self::from_offsets(size, |x, y| {
            if (y - x * slope).abs() <= 0.5 {
                tap
            } else {
                0.0
            }
        }))
    }

    /// All zeros except a 1.0 at the center cell.
    pub fn identity(size: usize) -> Result<Self> {
        check_size(size)?;
        let mut values = vec![0.0; size * size];
        let c = size / 2;
        values[c * size + c] = 1.0;
        Ok(Self { size, values })
    }

    /// Discrete Laplacian `{{0,-1,0},{-1,4,-1},{0,-1,0}}`.
    pub fn laplacian() -> Self {
        Self {
            size: 3,
            values: vec![0.0, -1.0, 0.0, -1.0, 4.0, -1.0, 0.0, -1.0, 0.0],
        }
    }

    /// Wraps a caller-supplied PSF. `rows[i][j]` becomes cell `(i, j)`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        check_size(size)?;
        if let Some(bad) = rows.iter().position(|row| row.len() != size) {
            return Err(Error::invalid(
                "kernel",
                format!(
                    "must be square, row {} has {} entries for {} rows",
                    bad,
                    rows[bad].len(),
                    size
                ),
            ));
        }
        if rows.iter().flatten().any(|v| !v.is_finite()) {
            return Err(Error::invalid("kernel", "entries must be finite"));
        }
        Ok(Self {
            size,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// The kernel reversed along both axes.
    pub fn flipped(&self) -> Self {
        Self {
            size: self.size,
            values: self.values.iter().rev().copied().collect(),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the center cell along either axis.
    #[inline]
    pub fn center(&self) -> usize {
        self.size / 2
    }

    #[inline]
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    /// Entries in `(i, j)` order with `j` varying fastest.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values.chunks(self.size).map(<[f64]>::to_vec).collect()
    }

    fn from_offsets(size: usize, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        let c = (size / 2) as f64;
        let mut values = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                values.push(f(i as f64 - c, j as f64 - c));
            }
        }
        Self { size, values }
    }
}

fn check_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(Error::invalid("kernel_size", "must be positive, got 0"));
    }
    Ok(())
}

fn check_sigma(sigma: f64) -> Result<()> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(Error::invalid(
            "sigma",
            format!("must be positive and finite, got {}", sigma),
        ));
    }
    Ok(())
}
