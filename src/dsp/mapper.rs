//! RPM parameter mapper: pure transforms from the RPM control value to the
//! derived synthesis parameters.
//!
//! Every function clamps its input to `[0, max_rpm]` first, so out-of-range
//! control values are never an error.

use crate::config::EngineConfig;

/// Derived parameters for one RPM value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RpmParams {
    /// The clamped RPM these parameters were computed from.
    pub rpm: f64,
    /// Hz added to every oscillator before pitch lowering.
    pub frequency_offset: f64,
    /// Volume multiplier in [0, 1].
    pub attenuation: f64,
    pub lfo_frequency: f64,
    /// Vibrato depth in Hz.
    pub lfo_amplitude: f64,
    /// Noise scale in [0, 1].
    pub noise_amplitude: f64,
}

/// The RPM breakpoints of an [`EngineConfig`], copied out so the mapper can
/// live next to the voice state without borrowing the config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RpmMapper {
    max_rpm: f64,
    offset_max_hz: f64,
    offset_exponent: f64,
    attenuation_start: f64,
    attenuation_end: f64,
    lfo_min_freq: f64,
    lfo_max_freq: f64,
    lfo_min_amplitude: f64,
    lfo_max_amplitude: f64,
    lfo_activation: f64,
    noise_activation: f64,
}

impl RpmMapper {
    pub fn new(config: &EngineConfig) -> Self {
        RpmMapper {
            max_rpm: config.max_rpm,
            offset_max_hz: config.frequency_offset_max_hz,
            offset_exponent: config.frequency_offset_exponent,
            attenuation_start: config.attenuation_start_rpm,
            attenuation_end: config.attenuation_end_rpm,
            lfo_min_freq: config.lfo_min_freq,
            lfo_max_freq: config.lfo_max_freq,
            lfo_min_amplitude: config.lfo_min_amplitude,
            lfo_max_amplitude: config.lfo_max_amplitude,
            lfo_activation: config.lfo_activation_rpm,
            noise_activation: config.noise_activation_rpm.unwrap_or(0.0),
        }
    }

    /// Clamp to `[0, max_rpm]`. NaN maps to 0.
    #[inline]
    pub fn clamp(&self, rpm: f64) -> f64 {
        if rpm.is_nan() {
            return 0.0;
        }
        rpm.clamp(0.0, self.max_rpm)
    }

    /// All derived parameters at once.
    pub fn map(&self, rpm: f64) -> RpmParams {
        let rpm = self.clamp(rpm);
        RpmParams {
            rpm,
            frequency_offset: self.frequency_offset(rpm),
            attenuation: self.volume_attenuation(rpm),
            lfo_frequency: self.lfo_frequency(rpm),
            lfo_amplitude: self.lfo_amplitude(rpm),
            noise_amplitude: self.noise_amplitude(rpm),
        }
    }

    /// Concave power curve: `max_offset * (rpm / max_rpm)^exponent`.
    pub fn frequency_offset(&self, rpm: f64) -> f64 {
        let x = self.clamp(rpm) / self.max_rpm;
        self.offset_max_hz * x.powf(self.offset_exponent)
    }

    /// 1 up to the attenuation start, 0 from the end on, linear in between.
    pub fn volume_attenuation(&self, rpm: f64) -> f64 {
        1.0 - ramp(self.clamp(rpm), self.attenuation_start, self.attenuation_end)
    }

    /// Constant below the activation RPM, then a linear ramp to the max rate.
    pub fn lfo_frequency(&self, rpm: f64) -> f64 {
        let t = ramp(self.clamp(rpm), self.lfo_activation, self.max_rpm);
        lerp(self.lfo_min_freq, self.lfo_max_freq, t)
    }

    pub fn lfo_amplitude(&self, rpm: f64) -> f64 {
        let t = self.clamp(rpm) / self.max_rpm;
        lerp(self.lfo_min_amplitude, self.lfo_max_amplitude, t)
    }

    pub fn noise_amplitude(&self, rpm: f64) -> f64 {
        ramp(self.clamp(rpm), self.noise_activation, self.max_rpm)
    }
}

/// 0 at or below `start`, 1 at or above `end`, linear in between.
/// An empty or inverted span is a step at `end`.
#[inline]
fn ramp(x: f64, start: f64, end: f64) -> f64 {
    if x >= end {
        1.0
    } else if x <= start {
        0.0
    } else {
        (x - start) / (end - start)
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
