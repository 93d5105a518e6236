//! Noise generators for corrupting sampled signals.
//!
//! `GaussianNoise` streams normally distributed samples; `Noise` renders a
//! fixed-length block that can be added to a `SampledSignal`.

mod block;
mod gaussian;

pub use block::{Noise, NoiseForm};
pub use gaussian::GaussianNoise;
