//! Error types for settings parsing and signal construction.

use thiserror::Error;

/// Error type for parsing SI-unit values and settings strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input string was empty
    #[error("input string is empty")]
    Empty,
    /// The numeric part of a value could not be parsed
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
    /// The unit suffix is not in the SI table
    #[error("unknown SI unit: '{0}'")]
    UnknownUnit(String),
    /// A settings item named a field that does not exist
    #[error("unknown settings field: '{0}'")]
    UnknownField(String),
    /// A settings item had no `=` or nothing after it
    #[error("missing value for settings field: '{0}'")]
    MissingValue(String),
    /// The noise form key is not supported
    #[error("unknown noise form: '{0}' (supported: awg)")]
    UnknownNoiseForm(String),
}

/// Error type for resolving settings and generating signals.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Neither a frequency nor a period was supplied
    #[error("signal needs a frequency (ft=<value>) or a period (per=<value>)")]
    MissingFrequency,
    /// The sample count could not be determined
    #[error("signal needs a sample count (n=<int>) or a cycle count (m=<int>)")]
    MissingSamples,
    /// Frequency and period were both supplied and disagree
    #[error("frequency {frequency} Hz and period {period} s are not reciprocal")]
    InconsistentFrequency { frequency: f64, period: f64 },
    /// Sampling frequency and sampling period were both supplied and disagree
    #[error("sampling frequency {frequency} Hz and sampling period {period} s are not reciprocal")]
    InconsistentSampling { frequency: f64, period: f64 },
    /// A field holds a value outside its domain
    #[error("invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
    /// The noise block and the waveform have different lengths
    #[error("noise has {noise} samples but the signal has {signal}")]
    NoiseLengthMismatch { signal: usize, noise: usize },
}
