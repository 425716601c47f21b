use common::EPSILON;

use crate::convolution::correlate;
use crate::error::Result;
use crate::gradient::{grad_x, grad_y};
use crate::kernel::Kernel;
use crate::Channel;

use super::DeconvolutionMethod;

/// Progress of a [`ChannelRestorer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestorationState {
    /// No iteration has run yet.
    Initialized,
    /// Iteration `n` (zero-based) is the last one completed.
    Iterating(usize),
    /// The configured iteration count has been reached.
    Converged,
}

/// Counters gathered while restoring one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreStats {
    pub iterations_run: usize,
    /// Ratio denominators that were NaN or at most `EPSILON` and got replaced
    /// by `EPSILON`.
    pub floored_denominators: usize,
}

/// Iterative restoration of a single channel working buffer.
#[derive(Debug)]
pub struct ChannelRestorer<'a> {
    observed: &'a Channel,
    kernel: &'a Kernel,
    flipped: Kernel,
    laplacian: Kernel,
    method: DeconvolutionMethod,
    iterations: usize,
    estimate: Channel,
    state: RestorationState,
    stats: RestoreStats,
}

impl<'a> ChannelRestorer<'a> {
    /// The estimate starts as a copy of `observed`.
    pub fn new(
        observed: &'a Channel,
        kernel: &'a Kernel,
        method: DeconvolutionMethod,
        iterations: usize,
    ) -> Result<Self> {
        method.validate()?;
        Ok(Self {
            observed,
            kernel,
            flipped: kernel.flipped(),
            laplacian: Kernel::laplacian(),
            method,
            iterations,
            estimate: observed.clone(),
            state: RestorationState::Initialized,
            stats: RestoreStats::default(),
        })
    }

    #[inline]
    pub fn state(&self) -> RestorationState {
        self.state
    }

    #[inline]
    pub fn stats(&self) -> RestoreStats {
        self.stats
    }

    /// Current estimate, before any TV scaling.
    #[inline]
    pub fn estimate(&self) -> &Channel {
        &self.estimate
    }

    /// Runs the next iteration. Returns `false` once all iterations have run,
    /// moving the restorer to [`RestorationState::Converged`].
    pub fn step(&mut self) -> bool {
        let n = self.stats.iterations_run;
        if n >= self.iterations {
            self.state = RestorationState::Converged;
            return false;
        }

        self.iterate();
        self.stats.iterations_run += 1;
        self.state = RestorationState::Iterating(n);
        true
    }

    /// Runs all remaining iterations.
    pub fn run(&mut self) {
        while self.step() {}
    }

    /// Runs to convergence and returns the final estimate, scaled for the TV
    /// variant, with the statistics gathered on the way.
    pub fn finish(mut self) -> (Channel, RestoreStats) {
        self.run();
        let mut estimate = self.estimate;
        if let DeconvolutionMethod::RichardsonLucyTv { scaling_factor, .. } = self.method {
            estimate.iter_mut().for_each(|v| *v *= scaling_factor);
        }
        (estimate, self.stats)
    }

    fn iterate(&mut self) {
        let blurred = correlate(&self.estimate, self.kernel);
        let denominator = match self.method {
            DeconvolutionMethod::RichardsonLucyTikhonov { lambda } => {
                let roughness = correlate(&self.estimate, &self.laplacian);
                blurred.zip_map(&roughness, |&b, &r| b + lambda * r)
            }
            DeconvolutionMethod::RichardsonLucy | DeconvolutionMethod::RichardsonLucyTv { .. } => {
                blurred
            }
        };

        let mut floored = 0;
        let ratio = self.observed.zip_map(&denominator, |&o, &d| {
            // NaN fails the comparison and is floored too.
            if d > EPSILON {
                o / d
            } else {
                floored += 1;
                o / EPSILON
            }
        });
        self.stats.floored_denominators += floored;

        let mut correction = correlate(&ratio, &self.flipped);

        if let DeconvolutionMethod::RichardsonLucyTv { lambda, alpha, .. } = self.method {
            let gx = grad_x(&self.estimate);
            let gy = grad_y(&self.estimate);
            for (((c, &e), &dx), &dy) in correction
                .iter_mut()
                .zip(self.estimate.iter())
                .zip(gx.iter())
                .zip(gy.iter())
            {
                let weight = alpha / (dx.hypot(dy) + lambda);
                *c += weight * (e - *c);
            }
        }

        for (e, &c) in self.estimate.iter_mut().zip(correction.iter()) {
            *e *= c;
        }
    }
}
