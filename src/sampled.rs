//! Eagerly generated sampled signals.
//!
//! A `SampledSignal` resolves its settings, evaluates the waveform at every
//! sample time and stores the result. Nothing changes after construction.

use crate::noise::Noise;
use crate::signals::{Cosine, Oscillator, Signal, Sine, Waveform};
use crate::{ResolvedSettings, SignalError, SignalSettings};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// A sampled sine signal.
pub type SineSignal = SampledSignal<Sine>;

/// A sampled cosine signal.
pub type CosineSignal = SampledSignal<Cosine>;

/// A finite, discretely-sampled waveform.
///
/// Sample `n` holds `A·W(2π·Fo·n·Ts + phase) + DC`, plus `noise[n]` when
/// constructed with [`with_noise`](SampledSignal::with_noise).
///
/// # Examples
///
/// ```
/// use sigtoy::{SignalSettings, SineSignal};
///
/// let settings: SignalSettings = "a=2; ft=1kHz; fs=8kHz; n=8".parse().unwrap();
/// let signal = SineSignal::new(&settings).unwrap();
/// assert_eq!(signal.len(), 8);
/// assert!((signal.samples()[2] - 2.0).abs() < 1e-12);
/// assert_eq!(signal.frequency_resolution(), 1000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampledSignal<W: Waveform> {
    settings: ResolvedSettings,
    /// Sample times `n·Ts` in seconds
    time_index: Vec<f64>,
    samples: Vec<f64>,
    noise: Option<Noise>,
    waveform: PhantomData<W>,
}

impl<W: Waveform> SampledSignal<W> {
    /// Resolves `settings` and generates the waveform.
    pub fn new(settings: &SignalSettings) -> Result<Self, SignalError> {
        Self::from_resolved(settings.resolve()?, None)
    }

    /// Resolves `settings`, generates the waveform and adds `noise` to it
    /// element-wise.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::NoiseLengthMismatch`] if the noise block does
    /// not have exactly as many samples as the signal.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigtoy::{CosineSignal, Noise, SignalSettings};
    ///
    /// let settings = SignalSettings::new()
    ///     .frequency(5e3)
    ///     .sampling_frequency(61.7e3)
    ///     .samples(1024);
    /// let noise = Noise::awg(0.0, 0.5, 1024).unwrap();
    /// let signal = CosineSignal::with_noise(&settings, &noise).unwrap();
    /// assert!(signal.has_noise());
    /// ```
    pub fn with_noise(settings: &SignalSettings, noise: &Noise) -> Result<Self, SignalError> {
        Self::from_resolved(settings.resolve()?, Some(noise))
    }

    /// Generates the waveform from an already resolved configuration.
    pub fn from_resolved(
        settings: ResolvedSettings,
        noise: Option<&Noise>,
    ) -> Result<Self, SignalError> {
        let len = settings.samples();
        if let Some(noise) = noise {
            if noise.len() != len {
                return Err(SignalError::NoiseLengthMismatch {
                    signal: len,
                    noise: noise.len(),
                });
            }
        }

        let mut oscillator = Oscillator::<W>::new(&settings);
        let time_index: Vec<f64> = (0..len as u64).map(|n| oscillator.time_at(n)).collect();
        let mut samples = vec![0.0; len];
        oscillator.process(&mut samples);

        if let Some(noise) = noise {
            for (sample, offset) in samples.iter_mut().zip(noise.samples()) {
                *sample += offset;
            }
        }

        log::debug!(
            "generated {} signal: {} samples at {} Hz{}",
            W::NAME,
            len,
            settings.sampling_frequency(),
            if noise.is_some() { " with noise" } else { "" }
        );

        Ok(Self {
            settings,
            time_index,
            samples,
            noise: noise.cloned(),
            waveform: PhantomData,
        })
    }

    /// Name of the waveform shape, `"Sine"` or `"Cosine"`.
    pub fn name(&self) -> &'static str {
        W::NAME
    }

    pub fn settings(&self) -> &ResolvedSettings {
        &self.settings
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample times `n·Ts` in seconds.
    pub fn time_index(&self) -> &[f64] {
        &self.time_index
    }

    /// Iterates over `(time, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time_index.iter().copied().zip(self.samples.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Frequency resolution `Fs / N` in Hz.
    pub fn frequency_resolution(&self) -> f64 {
        self.settings.sampling_frequency() / self.samples.len() as f64
    }

    pub fn noise(&self) -> Option<&Noise> {
        self.noise.as_ref()
    }

    pub fn has_noise(&self) -> bool {
        self.noise.is_some()
    }
}

impl<W: Waveform> FromStr for SampledSignal<W> {
    type Err = SignalError;

    /// Parses a settings string and generates the signal in one step.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(&s.parse::<SignalSettings>()?)
    }
}

impl<W: Waveform> fmt::Display for SampledSignal<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.settings;
        writeln!(f, "{} signal", W::NAME)?;
        writeln!(f, "  amplitude:          {}", s.amplitude())?;
        writeln!(f, "  dc offset:          {}", s.dc_offset())?;
        writeln!(f, "  phase:              {} rad", s.phase())?;
        writeln!(f, "  frequency:          {} Hz", s.frequency())?;
        writeln!(f, "  period:             {} s", s.period())?;
        writeln!(f, "  sampling frequency: {} Hz", s.sampling_frequency())?;
        writeln!(f, "  sampling period:    {} s", s.sampling_period())?;
        writeln!(f, "  samples:            {}", self.len())?;
        writeln!(f, "  cycles:             {}", s.cycles())?;
        writeln!(f, "  resolution:         {} Hz", self.frequency_resolution())?;
        match &self.noise {
            Some(noise) => write!(
                f,
                "  noise:              {} (mean {}, std {})",
                noise.form(),
                noise.mean(),
                noise.std_dev()
            ),
            None => write!(f, "  noise:              none"),
        }
    }
}
