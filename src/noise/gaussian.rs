//! Gaussian noise generator implementation.

use crate::{Signal, SignalError};
use rand::Rng;
use std::f64::consts::PI;

/// A Gaussian (normal) noise generator.
///
/// Samples are drawn from `N(mean, std_dev²)` using the Box-Muller
/// transform. Each transform yields two independent values; the second is
/// kept and returned by the following call.
pub struct GaussianNoise<R: Rng = rand::rngs::ThreadRng> {
    mean: f64,
    std_dev: f64,
    /// Random number generator
    rng: R,
    /// Second output of the last Box-Muller transform
    spare: Option<f64>,
}

impl GaussianNoise<rand::rngs::ThreadRng> {
    /// Creates a new Gaussian noise generator with the default ThreadRng.
    ///
    /// # Arguments
    ///
    /// * `mean` - Mean of the distribution
    /// * `std_dev` - Standard deviation, must be finite and non-negative
    ///
    /// # Examples
    ///
    /// ```
    /// use sigtoy::{GaussianNoise, Signal};
    ///
    /// let mut noise = GaussianNoise::new(0.0, 0.5).unwrap();
    /// let sample = noise.next_sample();
    /// assert!(sample.is_finite());
    /// ```
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, SignalError> {
        Self::with_rng(mean, std_dev, rand::thread_rng())
    }
}

impl<R: Rng> GaussianNoise<R> {
    /// Creates a new Gaussian noise generator with a custom RNG.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigtoy::{GaussianNoise, Signal};
    /// use rand::SeedableRng;
    ///
    /// let rng = rand::rngs::StdRng::seed_from_u64(42);
    /// let mut noise = GaussianNoise::with_rng(1.0, 0.1, rng).unwrap();
    /// let sample = noise.next_sample();
    /// ```
    pub fn with_rng(mean: f64, std_dev: f64, rng: R) -> Result<Self, SignalError> {
        if !mean.is_finite() {
            return Err(SignalError::InvalidValue {
                field: "noise mean",
                value: mean,
            });
        }
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(SignalError::InvalidValue {
                field: "noise standard deviation",
                value: std_dev,
            });
        }

        Ok(Self {
            mean,
            std_dev,
            rng,
            spare: None,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Draws one standard normal value.
    fn standard_normal(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }

        // gen() is in [0, 1); flip it so ln() never sees zero
        let u1 = 1.0 - self.rng.r#gen::<f64>();
        let u2 = self.rng.r#gen::<f64>();
        let radius = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;

        self.spare = Some(radius * theta.sin());
        radius * theta.cos()
    }
}

impl<R: Rng> Signal for GaussianNoise<R> {
    fn next_sample(&mut self) -> f64 {
        self.mean + self.std_dev * self.standard_normal()
    }
}
