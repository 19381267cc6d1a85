//! Phase accumulators and the harmonic oscillator bank.

use crate::config::EngineConfig;

use super::waveform::Waveform;

/// A running position within one cycle, always in [0, 1).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseAccumulator {
    phase: f64,
}

impl PhaseAccumulator {
    pub fn new() -> Self {
        PhaseAccumulator { phase: 0.0 }
    }

    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Advance by `inc` cycles and wrap back into [0, 1).
    #[inline]
    pub fn advance(&mut self, inc: f64) {
        self.phase += inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        // Increments above one cycle per sample, or negative ones.
        if !(0.0..1.0).contains(&self.phase) {
            self.phase = wrap(self.phase);
        }
        debug_assert!(
            (0.0..1.0).contains(&self.phase),
            "phase escaped [0, 1): {}",
            self.phase
        );
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// `rem_euclid` can round up to exactly 1.0 for tiny negative inputs.
#[inline]
fn wrap(x: f64) -> f64 {
    let p = x.rem_euclid(1.0);
    if p < 1.0 { p } else { 0.0 }
}

/// One phase accumulator per harmonic base frequency.
///
/// Frequencies and phases are allocated once at construction; advancing the
/// bank never allocates.
#[derive(Debug, Clone)]
pub struct OscillatorBank {
    base_frequencies: Box<[f64]>,
    phases: Box<[PhaseAccumulator]>,
    /// `1 / (pitch_lowering_factor * sample_rate)`
    inc_scale: f64,
}

impl OscillatorBank {
    pub fn new(config: &EngineConfig) -> Self {
        OscillatorBank {
            base_frequencies: config.base_frequencies.clone().into_boxed_slice(),
            phases: vec![PhaseAccumulator::new(); config.oscillator_count()].into_boxed_slice(),
            inc_scale: 1.0 / (config.pitch_lowering_factor * config.sample_rate_hz),
        }
    }

    /// Mean of `waveform` over all current phases. Averaging keeps the bank
    /// within [-1, 1] for any oscillator count.
    #[inline]
    pub fn sample(&self, waveform: Waveform) -> f64 {
        let sum: f64 = self.phases.iter().map(|p| waveform.value(p.phase())).sum();
        sum / self.phases.len() as f64
    }

    /// Advance oscillator `k` by `(f_k + offset_hz) / pitch_lowering / sample_rate`.
    #[inline]
    pub fn advance(&mut self, offset_hz: f64) {
        for (phase, &base) in self.phases.iter_mut().zip(self.base_frequencies.iter()) {
            phase.advance((base + offset_hz) * self.inc_scale);
        }
    }

    /// Current bank output, then advance every oscillator.
    #[inline]
    pub fn next_sample(&mut self, waveform: Waveform, offset_hz: f64) -> f64 {
        let sample = self.sample(waveform);
        self.advance(offset_hz);
        sample
    }

    pub fn phases(&self) -> impl Iterator<Item = f64> + '_ {
        self.phases.iter().map(PhaseAccumulator::phase)
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn reset(&mut self) {
        self.phases.iter_mut().for_each(PhaseAccumulator::reset);
    }
}
