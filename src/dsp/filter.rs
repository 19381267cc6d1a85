//! One-pole (RC) low-pass filter used to soften the injected noise.

use std::f64::consts::PI;

/// First-order IIR low-pass: `y = α·x + (1 − α)·y₋₁`.
///
/// α comes from the RC time constant of the cutoff and is fixed for the
/// filter's lifetime.
#[derive(Debug, Clone)]
pub struct OnePoleLowpass {
    alpha: f64,
    /// Last output. The only memory of past input.
    state: f64,
}

impl OnePoleLowpass {
    pub fn new(cutoff_hz: f64, sample_rate: f64) -> Self {
        OnePoleLowpass {
            alpha: Self::alpha(cutoff_hz, sample_rate),
            state: 0.0,
        }
    }

    /// `dt / (RC + dt)` with `RC = 1 / (2π·cutoff)` and `dt = 1 / sample_rate`.
    pub fn alpha(cutoff_hz: f64, sample_rate: f64) -> f64 {
        let dt = 1.0 / sample_rate;
        let rc = 1.0 / (2.0 * PI * cutoff_hz);
        dt / (rc + dt)
    }

    /// Filter one sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        self.state = self.alpha * input + (1.0 - self.alpha) * self.state;
        self.state
    }

    pub fn state(&self) -> f64 {
        self.state
    }

    pub fn coefficient(&self) -> f64 {
        self.alpha
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}
