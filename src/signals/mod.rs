//! Signal generation types and traits.
//!
//! This module provides the streaming abstractions the sampled signals are
//! built from:
//! - `Signal` trait for anything that produces samples one at a time
//! - `Waveform` trait with the `Sine` and `Cosine` shapes
//! - `Oscillator` for closed-form evaluation of a resolved configuration

mod core;
mod oscillator;
mod waveform;

pub use self::core::Signal;
pub use oscillator::Oscillator;
pub use waveform::{Cosine, Sine, Waveform};
