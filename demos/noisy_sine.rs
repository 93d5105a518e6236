//! Generates a noisy sine wave and prints its summary and first samples.
//!
//! Run with `RUST_LOG=debug` to see how the settings are resolved.

use anyhow::Result;
use sigtoy::{Noise, SignalSettings, SineSignal};

fn main() -> Result<()> {
    env_logger::init();

    let settings: SignalSettings = "a=3.2; dc=3.4; phase=5.8; fo=5kHz; fs=61.7kHz; n=1024".parse()?;
    let noise = Noise::awg(0.0, 0.5, 1024)?;
    let signal = SineSignal::with_noise(&settings, &noise)?;

    println!("{}", signal);
    println!();
    for (t, value) in signal.points().take(8) {
        println!("  t = {:>10.3e} s  x = {:>8.4}", t, value);
    }

    Ok(())
}
