//! Signal configuration: the settings-string parser and the resolver that
//! turns partial settings into a complete, consistent configuration.

use crate::units::parse_si;
use crate::{ParseError, SignalError};
use std::f64::consts::PI;
use std::str::FromStr;

/// Samples per fundamental cycle used when no sampling rate is given.
pub const DEFAULT_SAMPLES_PER_CYCLE: usize = 16;

const SETTINGS_DELIMITER: char = ';';
const FIELD_DELIMITER: char = '=';

/// Largest sample count a signal may hold: the most `f64` values a single
/// allocation can address.
pub const MAX_SAMPLES: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Relative tolerance for the frequency/period reciprocal checks.
const RECIPROCAL_TOLERANCE: f64 = 1e-9;

/// A settings field identifier as written in a settings string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Amplitude,
    DcOffset,
    Phase,
    Samples,
    SamplingFrequency,
    SamplingPeriod,
    Frequency,
    Period,
    Cycles,
}

impl FromStr for Field {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" | "A" => Ok(Field::Amplitude),
            "dc" => Ok(Field::DcOffset),
            "phase" => Ok(Field::Phase),
            "n" | "N" => Ok(Field::Samples),
            "fs" => Ok(Field::SamplingFrequency),
            "ts" => Ok(Field::SamplingPeriod),
            "ft" | "fo" | "f" => Ok(Field::Frequency),
            "per" | "p" => Ok(Field::Period),
            "m" | "cycles" => Ok(Field::Cycles),
            _ => Err(ParseError::UnknownField(s.to_string())),
        }
    }
}

/// Partial signal configuration.
///
/// Every field is optional until [`resolve`](SignalSettings::resolve) is
/// called. Settings can be built with the builder methods or parsed from a
/// `;`-separated settings string whose frequency and time values accept SI
/// suffixes.
///
/// # Settings string keys
///
/// | key              | field                | value            |
/// |------------------|----------------------|------------------|
/// | `a`, `A`         | amplitude            | number           |
/// | `dc`             | DC offset            | number           |
/// | `phase`          | phase (radians)      | number           |
/// | `n`, `N`         | sample count         | unsigned integer |
/// | `fs`             | sampling frequency   | SI value         |
/// | `ts`             | sampling period      | SI value         |
/// | `ft`, `fo`, `f`  | fundamental frequency| SI value         |
/// | `per`, `p`       | fundamental period   | SI value         |
/// | `m`, `cycles`    | cycle count          | unsigned integer |
///
/// # Examples
///
/// ```
/// use sigtoy::SignalSettings;
///
/// let parsed: SignalSettings = "a=2; fs=200kHz; ft=5kHz; n=64".parse().unwrap();
/// let built = SignalSettings::new()
///     .amplitude(2.0)
///     .sampling_frequency(200e3)
///     .frequency(5e3)
///     .samples(64);
/// assert_eq!(parsed, built);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSettings {
    amplitude: f64,
    dc_offset: f64,
    phase: f64,
    samples: Option<usize>,
    sampling_frequency: Option<f64>,
    sampling_period: Option<f64>,
    frequency: Option<f64>,
    period: Option<f64>,
    cycles: Option<u32>,
}

impl Default for SignalSettings {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            dc_offset: 0.0,
            phase: 0.0,
            samples: None,
            sampling_frequency: None,
            sampling_period: None,
            frequency: None,
            period: None,
            cycles: None,
        }
    }
}

impl SignalSettings {
    /// Creates settings with unit amplitude, no DC offset and zero phase.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn dc_offset(mut self, dc_offset: f64) -> Self {
        self.dc_offset = dc_offset;
        self
    }

    /// Sets the phase offset in radians.
    pub fn phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Sets the sampling frequency in Hz.
    pub fn sampling_frequency(mut self, hz: f64) -> Self {
        self.sampling_frequency = Some(hz);
        self
    }

    /// Sets the sampling period in seconds.
    pub fn sampling_period(mut self, seconds: f64) -> Self {
        self.sampling_period = Some(seconds);
        self
    }

    /// Sets the fundamental frequency in Hz.
    pub fn frequency(mut self, hz: f64) -> Self {
        self.frequency = Some(hz);
        self
    }

    /// Sets the fundamental period in seconds.
    pub fn period(mut self, seconds: f64) -> Self {
        self.period = Some(seconds);
        self
    }

    /// Sets how many fundamental cycles the signal should cover.
    pub fn cycles(mut self, cycles: u32) -> Self {
        self.cycles = Some(cycles);
        self
    }

    fn apply(&mut self, field: Field, value: &str) -> Result<(), ParseError> {
        log::debug!("settings field {:?} = {}", field, value);
        match field {
            Field::Amplitude => self.amplitude = parse_number(value)?,
            Field::DcOffset => self.dc_offset = parse_number(value)?,
            Field::Phase => self.phase = parse_number(value)?,
            Field::Samples => self.samples = Some(parse_count(value)?),
            Field::SamplingFrequency => self.sampling_frequency = Some(parse_si(value)?),
            Field::SamplingPeriod => self.sampling_period = Some(parse_si(value)?),
            Field::Frequency => self.frequency = Some(parse_si(value)?),
            Field::Period => self.period = Some(parse_si(value)?),
            Field::Cycles => self.cycles = Some(parse_count(value)?),
        }
        Ok(())
    }

    /// Resolves these settings into a complete configuration.
    ///
    /// Frequency and period are derived from each other, as are sampling
    /// frequency and sampling period. When both halves of a pair are given
    /// they must be reciprocals. Without any sampling information the
    /// signal is sampled at [`DEFAULT_SAMPLES_PER_CYCLE`] samples per cycle.
    ///
    /// The sample count is taken from `n` if present. Otherwise it covers
    /// `cycles` fundamental periods (one if sampling was defaulted).
    ///
    /// # Errors
    ///
    /// * [`SignalError::MissingFrequency`] if neither frequency nor period is set
    /// * [`SignalError::MissingSamples`] if the sample count cannot be derived
    /// * [`SignalError::InconsistentFrequency`] / [`SignalError::InconsistentSampling`]
    ///   if a reciprocal pair disagrees
    /// * [`SignalError::InvalidValue`] for zero, negative or non-finite values,
    ///   including reciprocals that overflow, sample counts above
    ///   [`MAX_SAMPLES`], and frequencies whose last sample angle is infinite
    ///
    /// # Examples
    ///
    /// ```
    /// use sigtoy::SignalSettings;
    ///
    /// let resolved = SignalSettings::new().period(1e-3).cycles(2).resolve().unwrap();
    /// assert!((resolved.frequency() - 1000.0).abs() < 1e-9);
    /// assert!((resolved.sampling_frequency() - 16_000.0).abs() < 1e-6);
    /// assert_eq!(resolved.samples(), 32);
    /// ```
    pub fn resolve(&self) -> Result<ResolvedSettings, SignalError> {
        let amplitude = finite("amplitude", self.amplitude)?;
        let dc_offset = finite("dc offset", self.dc_offset)?;
        let phase = finite("phase", self.phase)?;

        let (frequency, period) = match (self.frequency, self.period) {
            (None, None) => return Err(SignalError::MissingFrequency),
            (Some(frequency), None) => {
                let frequency = positive("frequency", frequency)?;
                (frequency, positive("period", 1.0 / frequency)?)
            }
            (None, Some(period)) => {
                let period = positive("period", period)?;
                (positive("frequency", 1.0 / period)?, period)
            }
            (Some(frequency), Some(period)) => {
                let frequency = positive("frequency", frequency)?;
                let period = positive("period", period)?;
                if !is_reciprocal(frequency, period) {
                    return Err(SignalError::InconsistentFrequency { frequency, period });
                }
                (frequency, period)
            }
        };

        let cycles = match self.cycles {
            Some(0) => {
                return Err(SignalError::InvalidValue {
                    field: "cycles",
                    value: 0.0,
                });
            }
            Some(cycles) => cycles,
            None => 1,
        };

        let (sampling_frequency, sampling_period, defaulted) =
            match (self.sampling_frequency, self.sampling_period) {
                (None, None) => {
                    let fs = positive(
                        "sampling frequency",
                        DEFAULT_SAMPLES_PER_CYCLE as f64 * frequency,
                    )?;
                    log::warn!(
                        "no sampling frequency provided, defaulting to {} Hz \
                         ({} samples per cycle)",
                        fs,
                        DEFAULT_SAMPLES_PER_CYCLE
                    );
                    (fs, positive("sampling period", 1.0 / fs)?, true)
                }
                (Some(fs), None) => {
                    let fs = positive("sampling frequency", fs)?;
                    (fs, positive("sampling period", 1.0 / fs)?, false)
                }
                (None, Some(ts)) => {
                    let ts = positive("sampling period", ts)?;
                    (positive("sampling frequency", 1.0 / ts)?, ts, false)
                }
                (Some(fs), Some(ts)) => {
                    let fs = positive("sampling frequency", fs)?;
                    let ts = positive("sampling period", ts)?;
                    if !is_reciprocal(fs, ts) {
                        return Err(SignalError::InconsistentSampling {
                            frequency: fs,
                            period: ts,
                        });
                    }
                    (fs, ts, false)
                }
            };

        let samples = match (self.samples, self.cycles) {
            (Some(0), _) => {
                return Err(SignalError::InvalidValue {
                    field: "samples",
                    value: 0.0,
                });
            }
            (Some(samples), _) => within_limit(samples)?,
            (None, _) if defaulted => DEFAULT_SAMPLES_PER_CYCLE
                .checked_mul(cycles as usize)
                .map_or(Err(too_many_samples(f64::INFINITY)), within_limit)?,
            (None, Some(cycles)) => {
                whole_samples(f64::from(cycles) * sampling_frequency / frequency)?
            }
            (None, None) => return Err(SignalError::MissingSamples),
        };

        // The last sample's angle must stay finite or sin/cos yield NaN
        let last_time = (samples - 1) as f64 * sampling_period;
        let last_angle = (frequency * 2.0 * PI) * last_time + phase;
        if !last_angle.is_finite() {
            return Err(SignalError::InvalidValue {
                field: "frequency",
                value: frequency,
            });
        }

        log::debug!(
            "resolved signal: fo={} Hz, fs={} Hz, n={}, cycles={}",
            frequency,
            sampling_frequency,
            samples,
            cycles
        );

        Ok(ResolvedSettings {
            amplitude,
            dc_offset,
            phase,
            frequency,
            period,
            sampling_frequency,
            sampling_period,
            samples,
            cycles,
        })
    }
}

impl FromStr for SignalSettings {
    type Err = ParseError;

    /// Parses a settings string such as `"a=1; fs=200kHz; ft=5kHz; n=64"`.
    ///
    /// Items are separated by `;` and written as `key=value`. Whitespace is
    /// ignored and empty items are skipped. A key given more than once keeps
    /// its last value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut settings = SignalSettings::new();

        for item in s.split(SETTINGS_DELIMITER) {
            let item: String = item.chars().filter(|c| !c.is_whitespace()).collect();
            if item.is_empty() {
                continue;
            }

            let (key, value) = match item.split_once(FIELD_DELIMITER) {
                Some((key, value)) if !value.is_empty() => (key, value),
                Some((key, _)) => return Err(ParseError::MissingValue(key.to_string())),
                None => return Err(ParseError::MissingValue(item.clone())),
            };

            settings.apply(key.parse()?, value)?;
        }

        Ok(settings)
    }
}

/// A complete, validated signal configuration.
///
/// Only [`SignalSettings::resolve`] produces values of this type, so every
/// field is known to be consistent: frequency and period are reciprocals,
/// sampling frequency and period are reciprocals, and the sample count is
/// non-zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSettings {
    amplitude: f64,
    dc_offset: f64,
    phase: f64,
    frequency: f64,
    period: f64,
    sampling_frequency: f64,
    sampling_period: f64,
    samples: usize,
    cycles: u32,
}

impl ResolvedSettings {
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn dc_offset(&self) -> f64 {
        self.dc_offset
    }

    /// Phase offset in radians.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Fundamental frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Fundamental period in seconds.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Sampling frequency in Hz.
    pub fn sampling_frequency(&self) -> f64 {
        self.sampling_frequency
    }

    /// Sampling period in seconds.
    pub fn sampling_period(&self) -> f64 {
        self.sampling_period
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }
}

fn parse_number(value: &str) -> Result<f64, ParseError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber(value.to_string()))
}

fn parse_count<T: FromStr>(value: &str) -> Result<T, ParseError> {
    value
        .parse::<T>()
        .map_err(|_| ParseError::InvalidNumber(value.to_string()))
}

fn finite(field: &'static str, value: f64) -> Result<f64, SignalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SignalError::InvalidValue { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, SignalError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SignalError::InvalidValue { field, value })
    }
}

/// Rounds a fractional sample count up, ignoring rounding noise from the
/// reciprocal conversions.
fn whole_samples(exact: f64) -> Result<usize, SignalError> {
    if !exact.is_finite() || exact > MAX_SAMPLES as f64 {
        return Err(too_many_samples(exact));
    }
    let nearest = exact.round();
    let whole = if nearest >= 1.0 && (exact - nearest).abs() <= RECIPROCAL_TOLERANCE * nearest {
        nearest
    } else {
        exact.ceil()
    };
    within_limit(whole as usize)
}

fn within_limit(samples: usize) -> Result<usize, SignalError> {
    if samples <= MAX_SAMPLES {
        Ok(samples)
    } else {
        Err(too_many_samples(samples as f64))
    }
}

fn too_many_samples(value: f64) -> SignalError {
    SignalError::InvalidValue {
        field: "samples",
        value,
    }
}

fn is_reciprocal(frequency: f64, period: f64) -> bool {
    (frequency * period - 1.0).abs() <= RECIPROCAL_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_full_settings_string() {
        let settings: SignalSettings = "a=3.2; dc=3.4; phase=5.8; fs=61.7kHz; ft=5kHz; n=1024"
            .parse()
            .unwrap();
        assert_eq!(settings.amplitude, 3.2);
        assert_eq!(settings.dc_offset, 3.4);
        assert_eq!(settings.phase, 5.8);
        assert_relative_eq!(settings.sampling_frequency.unwrap(), 61_700.0, max_relative = 1e-12);
        assert_eq!(settings.frequency, Some(5000.0));
        assert_eq!(settings.samples, Some(1024));
    }

    #[test]
    fn test_key_aliases() {
        let upper: SignalSettings = "A=2; N=8; fo=1kHz".parse().unwrap();
        let lower: SignalSettings = "a=2; n=8; f=1kHz".parse().unwrap();
        let long: SignalSettings = "a=2; n=8; ft=1kHz".parse().unwrap();
        assert_eq!(upper, lower);
        assert_eq!(lower, long);

        let p: SignalSettings = "p=1ms; cycles=3".parse().unwrap();
        let per: SignalSettings = "per=1ms; m=3".parse().unwrap();
        assert_eq!(p, per);
    }

    #[test]
    fn test_empty_items_are_skipped() {
        let settings: SignalSettings = ";; ft=1kHz ;\n; n=4;".parse().unwrap();
        assert_eq!(settings.frequency, Some(1000.0));
        assert_eq!(settings.samples, Some(4));
        assert_eq!("".parse::<SignalSettings>().unwrap(), SignalSettings::new());
    }

    #[test]
    fn test_last_value_wins() {
        let settings: SignalSettings = "ft=1kHz; ft=2kHz".parse().unwrap();
        assert_eq!(settings.frequency, Some(2000.0));
    }

    #[test]
    fn test_unknown_field() {
        assert_eq!(
            "ft=1kHz; volume=11".parse::<SignalSettings>(),
            Err(ParseError::UnknownField("volume".to_string()))
        );
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            "ft=".parse::<SignalSettings>(),
            Err(ParseError::MissingValue("ft".to_string()))
        );
        assert_eq!(
            "ft 1kHz".parse::<SignalSettings>(),
            Err(ParseError::MissingValue("ft1kHz".to_string()))
        );
    }

    #[test]
    fn test_bad_values() {
        assert!(matches!(
            "n=12.5".parse::<SignalSettings>(),
            Err(ParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            "a=1k".parse::<SignalSettings>(),
            Err(ParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            "fs=10qHz".parse::<SignalSettings>(),
            Err(ParseError::UnknownUnit(_))
        ));
    }

    #[test]
    fn test_resolve_frequency_from_period() {
        let resolved = SignalSettings::new()
            .period(2e-3)
            .sampling_frequency(8e3)
            .samples(10)
            .resolve()
            .unwrap();
        assert_relative_eq!(resolved.frequency(), 500.0, max_relative = 1e-12);
        assert_eq!(resolved.period(), 2e-3);
    }

    #[test]
    fn test_resolve_period_from_frequency() {
        let resolved = SignalSettings::new()
            .frequency(250.0)
            .sampling_frequency(8e3)
            .samples(10)
            .resolve()
            .unwrap();
        assert_relative_eq!(resolved.period(), 4e-3, max_relative = 1e-12);
        assert_relative_eq!(resolved.sampling_period(), 125e-6, max_relative = 1e-12);
    }

    #[test]
    fn test_resolve_consistent_pair_accepted() {
        // 1/3 cannot be represented exactly
        let resolved = SignalSettings::new()
            .frequency(3.0)
            .period(1.0 / 3.0)
            .sampling_frequency(48.0)
            .samples(16)
            .resolve();
        assert!(resolved.is_ok());
    }

    #[test]
    fn test_resolve_inconsistent_frequency() {
        let result = SignalSettings::new()
            .frequency(1000.0)
            .period(2e-3)
            .sampling_frequency(8e3)
            .samples(8)
            .resolve();
        assert_eq!(
            result,
            Err(SignalError::InconsistentFrequency {
                frequency: 1000.0,
                period: 2e-3
            })
        );
    }

    #[test]
    fn test_resolve_inconsistent_sampling() {
        let result = SignalSettings::new()
            .frequency(1000.0)
            .sampling_frequency(8e3)
            .sampling_period(1e-3)
            .samples(8)
            .resolve();
        assert!(matches!(result, Err(SignalError::InconsistentSampling { .. })));
    }

    #[test]
    fn test_resolve_sampling_from_period() {
        let resolved: ResolvedSettings = "ft=1kHz; ts=125us; n=8"
            .parse::<SignalSettings>()
            .unwrap()
            .resolve()
            .unwrap();
        assert_relative_eq!(resolved.sampling_frequency(), 8000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_resolve_missing_frequency() {
        let result = SignalSettings::new().sampling_frequency(8e3).samples(8).resolve();
        assert_eq!(result, Err(SignalError::MissingFrequency));
    }

    #[test]
    fn test_resolve_missing_samples() {
        let result = SignalSettings::new()
            .frequency(1e3)
            .sampling_frequency(8e3)
            .resolve();
        assert_eq!(result, Err(SignalError::MissingSamples));
    }

    #[test]
    fn test_resolve_samples_from_cycles() {
        let resolved = SignalSettings::new()
            .frequency(1e3)
            .sampling_frequency(10e3)
            .cycles(3)
            .resolve()
            .unwrap();
        assert_eq!(resolved.samples(), 30);
        assert_eq!(resolved.cycles(), 3);

        // Partial samples round up
        let resolved = SignalSettings::new()
            .frequency(3e3)
            .sampling_frequency(10e3)
            .cycles(1)
            .resolve()
            .unwrap();
        assert_eq!(resolved.samples(), 4);
    }

    #[test]
    fn test_resolve_default_sampling() {
        let resolved = SignalSettings::new().frequency(100.0).resolve().unwrap();
        assert_eq!(resolved.sampling_frequency(), 1600.0);
        assert_eq!(resolved.samples(), DEFAULT_SAMPLES_PER_CYCLE);
        assert_eq!(resolved.cycles(), 1);

        let resolved = SignalSettings::new().frequency(100.0).cycles(4).resolve().unwrap();
        assert_eq!(resolved.samples(), 4 * DEFAULT_SAMPLES_PER_CYCLE);
    }

    #[test]
    fn test_resolve_default_sampling_keeps_explicit_samples() {
        let resolved = SignalSettings::new().frequency(100.0).samples(5).resolve().unwrap();
        assert_eq!(resolved.samples(), 5);
        assert_eq!(resolved.sampling_frequency(), 1600.0);
    }

    #[test]
    fn test_resolve_rejects_unallocatable_sample_count() {
        let settings: SignalSettings = "ft=1p; fs=1T; m=1".parse().unwrap();
        assert!(matches!(
            settings.resolve(),
            Err(SignalError::InvalidValue { field: "samples", .. })
        ));

        let explicit = SignalSettings::new()
            .frequency(1e3)
            .sampling_frequency(8e3)
            .samples(MAX_SAMPLES + 1);
        assert!(matches!(
            explicit.resolve(),
            Err(SignalError::InvalidValue { field: "samples", .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_infinite_reciprocals() {
        let subnormal: SignalSettings = "ft=1e-310".parse().unwrap();
        assert!(matches!(
            subnormal.resolve(),
            Err(SignalError::InvalidValue { field: "period", .. })
        ));

        let result = SignalSettings::new()
            .frequency(1e3)
            .sampling_period(1e-310)
            .samples(4)
            .resolve();
        assert!(matches!(
            result,
            Err(SignalError::InvalidValue { field: "sampling frequency", .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_overflowing_angle() {
        let result = SignalSettings::new()
            .frequency(1e308)
            .sampling_frequency(1.0)
            .samples(2)
            .resolve();
        assert!(matches!(
            result,
            Err(SignalError::InvalidValue { field: "frequency", .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_bad_values() {
        let base = SignalSettings::new().sampling_frequency(8e3).samples(8);
        assert!(matches!(
            base.clone().frequency(0.0).resolve(),
            Err(SignalError::InvalidValue { field: "frequency", .. })
        ));
        assert!(matches!(
            base.clone().period(-1.0).resolve(),
            Err(SignalError::InvalidValue { field: "period", .. })
        ));
        assert!(matches!(
            base.clone().frequency(1e3).amplitude(f64::NAN).resolve(),
            Err(SignalError::InvalidValue { field: "amplitude", .. })
        ));
        assert!(matches!(
            base.clone().frequency(1e3).samples(0).resolve(),
            Err(SignalError::InvalidValue { field: "samples", .. })
        ));
        assert!(matches!(
            base.frequency(1e3).cycles(0).resolve(),
            Err(SignalError::InvalidValue { field: "cycles", .. })
        ));
    }
}
