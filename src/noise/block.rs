//! Fixed-length noise blocks.

use super::GaussianNoise;
use crate::{ParseError, Signal, SignalError};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Supported noise distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseForm {
    /// Additive white Gaussian noise, key `"awg"`
    AdditiveWhiteGaussian,
}

impl NoiseForm {
    /// Short key used in strings, e.g. `"awg"`.
    pub fn key(&self) -> &'static str {
        match self {
            NoiseForm::AdditiveWhiteGaussian => "awg",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            NoiseForm::AdditiveWhiteGaussian => "Additive Gaussian White Noise",
        }
    }
}

impl fmt::Display for NoiseForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl FromStr for NoiseForm {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "awg" => Ok(NoiseForm::AdditiveWhiteGaussian),
            other => Err(ParseError::UnknownNoiseForm(other.to_string())),
        }
    }
}

/// A block of noise samples generated once at construction.
///
/// # Examples
///
/// ```
/// use sigtoy::Noise;
///
/// let noise = Noise::awg(0.0, 0.5, 1024).unwrap();
/// assert_eq!(noise.len(), 1024);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Noise {
    form: NoiseForm,
    mean: f64,
    std_dev: f64,
    samples: Vec<f64>,
}

impl Noise {
    /// Generates `size` samples of the given form using the thread RNG.
    pub fn new(form: NoiseForm, mean: f64, std_dev: f64, size: usize) -> Result<Self, SignalError> {
        Self::with_rng(form, mean, std_dev, size, rand::thread_rng())
    }

    /// Generates `size` samples of additive white Gaussian noise.
    pub fn awg(mean: f64, std_dev: f64, size: usize) -> Result<Self, SignalError> {
        Self::new(NoiseForm::AdditiveWhiteGaussian, mean, std_dev, size)
    }

    /// Generates `size` samples using a caller-supplied RNG.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigtoy::{Noise, NoiseForm};
    /// use rand::SeedableRng;
    ///
    /// let a = Noise::with_rng(NoiseForm::AdditiveWhiteGaussian, 0.0, 1.0, 16,
    ///     rand::rngs::StdRng::seed_from_u64(1)).unwrap();
    /// let b = Noise::with_rng(NoiseForm::AdditiveWhiteGaussian, 0.0, 1.0, 16,
    ///     rand::rngs::StdRng::seed_from_u64(1)).unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn with_rng<R: Rng>(
        form: NoiseForm,
        mean: f64,
        std_dev: f64,
        size: usize,
        rng: R,
    ) -> Result<Self, SignalError> {
        let mut samples = vec![0.0; size];
        match form {
            NoiseForm::AdditiveWhiteGaussian => {
                GaussianNoise::with_rng(mean, std_dev, rng)?.process(&mut samples);
            }
        }
        log::debug!("generated {} samples of {} (mean={}, std={})", size, form, mean, std_dev);

        Ok(Self {
            form,
            mean,
            std_dev,
            samples,
        })
    }

    pub fn form(&self) -> NoiseForm {
        self.form
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}
