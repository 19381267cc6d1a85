//! Motor/inverter whine: a thin tone at a fixed offset above the fundamental.

use crate::config::EngineConfig;

use super::mapper::RpmParams;
use super::oscillator::PhaseAccumulator;
use super::waveform::Waveform;

#[derive(Debug, Clone)]
pub struct Whine {
    phase: PhaseAccumulator,
    /// First base frequency plus the fixed whine offset.
    base_hz: f64,
    amplitude: f64,
    sample_rate: f64,
}

impl Whine {
    pub fn new(config: &EngineConfig) -> Self {
        let fundamental = config.base_frequencies.first().copied().unwrap_or(0.0);
        Whine {
            phase: PhaseAccumulator::new(),
            base_hz: fundamental + config.whine_offset_hz,
            amplitude: config.whine_amplitude,
            sample_rate: config.sample_rate_hz,
        }
    }

    /// Frequency in Hz for the given parameters and vibrato offset.
    /// Not divided by the pitch lowering factor.
    #[inline]
    pub fn frequency(&self, params: &RpmParams, vibrato_hz: f64) -> f64 {
        self.base_hz + params.frequency_offset + vibrato_hz
    }

    /// Whine contribution at the current phase, then advance.
    #[inline]
    pub fn next_sample(&mut self, waveform: Waveform, params: &RpmParams, vibrato_hz: f64) -> f64 {
        let sample = self.amplitude * waveform.value(self.phase.phase());
        self.phase
            .advance(self.frequency(params, vibrato_hz) / self.sample_rate);
        sample
    }

    pub fn phase(&self) -> f64 {
        self.phase.phase()
    }

    pub fn reset(&mut self) {
        self.phase.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::mapper::RpmMapper;

    #[test]
    fn frequency_tracks_fundamental_offset_and_vibrato() {
        let config = EngineConfig::default();
        let mapper = RpmMapper::new(&config);
        let whine = Whine::new(&config);

        let idle = mapper.map(0.0);
        assert_eq!(whine.frequency(&idle, 0.0), 190.0 + 1000.0);

        let cruise = mapper.map(3000.0);
        let expected = 190.0 + cruise.frequency_offset + 1000.0 + 2.5;
        assert!((whine.frequency(&cruise, 2.5) - expected).abs() < 1e-9);
    }

    #[test]
    fn amplitude_is_fixed_not_rpm_scaled() {
        let config = EngineConfig {
            whine_amplitude: 0.1,
            ..EngineConfig::default()
        };
        let mapper = RpmMapper::new(&config);
        for rpm in [0.0, 3000.0, 7500.0] {
            let params = mapper.map(rpm);
            let mut whine = Whine::new(&config);
            let mut peak = 0.0_f64;
            for _ in 0..44100 {
                peak = peak.max(whine.next_sample(Waveform::Square, &params, 0.0).abs());
            }
            assert_eq!(peak, 0.1, "whine peak at {rpm} rpm");
        }
    }

    #[test]
    fn phase_stays_in_unit_interval() {
        let config = EngineConfig::default();
        let params = RpmMapper::new(&config).map(7500.0);
        let mut whine = Whine::new(&config);
        for _ in 0..44100 {
            whine.next_sample(Waveform::Sine, &params, -6.0);
            assert!((0.0..1.0).contains(&whine.phase()));
        }
    }
}
