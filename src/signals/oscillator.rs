//! Closed-form oscillator driven by a resolved configuration.

use super::{Signal, Waveform};
use crate::ResolvedSettings;
use std::f64::consts::PI;
use std::marker::PhantomData;

/// Streams samples of `A·W(2π·Fo·n·Ts + phase) + DC` for `n = 0, 1, 2, ...`.
///
/// Unlike an accumulating phase oscillator, each sample is computed directly
/// from its index, so long runs do not drift.
///
/// # Type Parameters
///
/// * `W` - The waveform shape ([`Sine`](super::Sine) or [`Cosine`](super::Cosine))
///
/// # Examples
///
/// ```
/// use sigtoy::{Oscillator, Signal, SignalSettings, Sine};
///
/// let settings = SignalSettings::new().frequency(1e3).sampling_frequency(4e3).samples(4);
/// let mut osc = Oscillator::<Sine>::new(&settings.resolve().unwrap());
/// let first = osc.next_sample();
/// assert!(first.abs() < 1e-12);
/// assert!((osc.next_sample() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Oscillator<W: Waveform> {
    amplitude: f64,
    dc_offset: f64,
    phase: f64,
    frequency: f64,
    sampling_period: f64,
    /// Index of the next sample to generate
    index: u64,
    waveform: PhantomData<W>,
}

impl<W: Waveform> Oscillator<W> {
    /// Creates an oscillator positioned at sample zero.
    pub fn new(settings: &ResolvedSettings) -> Self {
        Self {
            amplitude: settings.amplitude(),
            dc_offset: settings.dc_offset(),
            phase: settings.phase(),
            frequency: settings.frequency(),
            sampling_period: settings.sampling_period(),
            index: 0,
            waveform: PhantomData,
        }
    }

    /// Fundamental frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Index of the next sample `next_sample()` will return.
    pub fn position(&self) -> u64 {
        self.index
    }

    /// Rewinds the oscillator to sample zero.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Time in seconds of sample `index`.
    pub fn time_at(&self, index: u64) -> f64 {
        index as f64 * self.sampling_period
    }
}

impl<W: Waveform> Signal for Oscillator<W> {
    fn next_sample(&mut self) -> f64 {
        let t = self.time_at(self.index);
        self.index += 1;
        self.amplitude * W::evaluate((self.frequency * 2.0 * PI) * t + self.phase) + self.dc_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{Cosine, Sine};
    use crate::SignalSettings;
    use approx::assert_abs_diff_eq;

    fn quarter_rate() -> ResolvedSettings {
        SignalSettings::new()
            .frequency(1e3)
            .sampling_frequency(4e3)
            .samples(8)
            .resolve()
            .unwrap()
    }

    #[test]
    fn test_sine_quarter_steps() {
        let mut osc = Oscillator::<Sine>::new(&quarter_rate());
        let expected = [0.0, 1.0, 0.0, -1.0, 0.0];
        for value in expected {
            assert_abs_diff_eq!(osc.next_sample(), value, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_cosine_quarter_steps() {
        let mut osc = Oscillator::<Cosine>::new(&quarter_rate());
        let expected = [1.0, 0.0, -1.0, 0.0, 1.0];
        for value in expected {
            assert_abs_diff_eq!(osc.next_sample(), value, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_amplitude_dc_and_phase() {
        let settings = SignalSettings::new()
            .amplitude(2.0)
            .dc_offset(0.5)
            .phase(std::f64::consts::FRAC_PI_2)
            .frequency(1e3)
            .sampling_frequency(4e3)
            .samples(4)
            .resolve()
            .unwrap();
        let mut osc = Oscillator::<Sine>::new(&settings);
        // sin(x + pi/2) = cos(x)
        assert_abs_diff_eq!(osc.next_sample(), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(osc.next_sample(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(osc.next_sample(), -1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_position_and_reset() {
        let mut osc = Oscillator::<Sine>::new(&quarter_rate());
        let first = osc.next_sample();
        osc.next_sample();
        osc.next_sample();
        assert_eq!(osc.position(), 3);
        osc.reset();
        assert_eq!(osc.position(), 0);
        assert_eq!(osc.next_sample(), first);
    }

    #[test]
    fn test_process_matches_next_sample() {
        let settings = quarter_rate();
        let mut streamed = Oscillator::<Cosine>::new(&settings);
        let mut buffered = Oscillator::<Cosine>::new(&settings);
        let mut buffer = vec![0.0; 64];
        buffered.process(&mut buffer);
        for sample in buffer {
            assert_eq!(sample, streamed.next_sample());
        }
    }

    #[test]
    fn test_time_at() {
        let osc = Oscillator::<Sine>::new(&quarter_rate());
        assert_eq!(osc.time_at(0), 0.0);
        assert_abs_diff_eq!(osc.time_at(4), 1e-3, epsilon = 1e-15);
        assert_eq!(osc.frequency(), 1e3);
    }
}
