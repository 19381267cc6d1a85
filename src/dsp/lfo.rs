//! Vibrato LFO whose rate and depth follow the RPM.

use super::mapper::RpmParams;
use super::oscillator::PhaseAccumulator;
use super::waveform::Waveform;

/// Low-frequency oscillator producing a frequency offset in Hz.
#[derive(Debug, Clone)]
pub struct Vibrato {
    phase: PhaseAccumulator,
    sample_rate: f64,
}

impl Vibrato {
    pub fn new(sample_rate: f64) -> Self {
        Vibrato {
            phase: PhaseAccumulator::new(),
            sample_rate,
        }
    }

    /// Vibrato offset at the current phase, then advance at the LFO rate.
    ///
    /// The returned offset is shared by the harmonic bank and the whine.
    #[inline]
    pub fn next_offset(&mut self, waveform: Waveform, params: &RpmParams) -> f64 {
        let offset = waveform.value(self.phase.phase()) * params.lfo_amplitude;
        self.phase.advance(params.lfo_frequency / self.sample_rate);
        offset
    }

    pub fn phase(&self) -> f64 {
        self.phase.phase()
    }

    pub fn reset(&mut self) {
        self.phase.reset();
    }
}
