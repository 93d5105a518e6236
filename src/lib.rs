//! Sigtoy - sampled sine and cosine signals for DSP experiments
//!
//! This library generates discretely-sampled waveforms from a small set of
//! settings (amplitude, DC offset, frequency or period, phase, sample count
//! and sampling rate), optionally corrupted by additive Gaussian noise.
//! Settings can be built in code or parsed from strings such as
//! `"a=2; fs=200kHz; ft=5kHz; n=64"` whose values accept SI-unit suffixes.

mod error;
pub mod noise;
pub mod sampled;
pub mod settings;
pub mod signals;
pub mod units;

// Re-export commonly used types at the crate root
pub use error::{ParseError, SignalError};
pub use noise::{GaussianNoise, Noise, NoiseForm};
pub use sampled::{CosineSignal, SampledSignal, SineSignal};
pub use settings::{DEFAULT_SAMPLES_PER_CYCLE, MAX_SAMPLES, ResolvedSettings, SignalSettings};
pub use signals::{Cosine, Oscillator, Signal, Sine, Waveform};
pub use units::parse_si;
