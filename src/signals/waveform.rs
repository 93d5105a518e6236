//! Periodic waveform shapes.

/// A periodic shape evaluated at an angle in radians.
///
/// Implementors are zero-sized marker types used as the type parameter of
/// [`Oscillator`](super::Oscillator) and
/// [`SampledSignal`](crate::SampledSignal).
pub trait Waveform {
    /// Human-readable name of the shape.
    const NAME: &'static str;

    /// Evaluates the shape at `x` radians. The result lies in `[-1.0, 1.0]`.
    fn evaluate(x: f64) -> f64;
}

/// Sine shape: `sin(x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sine;

impl Waveform for Sine {
    const NAME: &'static str = "Sine";

    fn evaluate(x: f64) -> f64 {
        x.sin()
    }
}

/// Cosine shape: `cos(x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cosine;

impl Waveform for Cosine {
    const NAME: &'static str = "Cosine";

    fn evaluate(x: f64) -> f64 {
        x.cos()
    }
}
