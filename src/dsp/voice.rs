//! Voice: the complete synthesis state for one output channel, plus the
//! per-sample step that advances it.

use crate::config::EngineConfig;
use crate::error::ConfigError;

use super::filter::OnePoleLowpass;
use super::lfo::Vibrato;
use super::mapper::{RpmMapper, RpmParams};
use super::mixer::Mixer;
use super::noise::WhiteNoise;
use super::oscillator::OscillatorBank;
use super::waveform::Waveform;
use super::whine::Whine;

/// Snapshot of a voice's persistent state.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    pub oscillator_phases: Vec<f64>,
    pub lfo_phase: f64,
    pub whine_phase: f64,
    pub filter_state: f64,
}

/// One independent motor sound. All buffers are allocated in [`MotorVoice::new`];
/// rendering never allocates, blocks or loops beyond the oscillator count.
#[derive(Debug, Clone)]
pub struct MotorVoice {
    waveform: Waveform,
    mapper: RpmMapper,
    mixer: Mixer,
    bank: OscillatorBank,
    vibrato: Vibrato,
    whine: Whine,
    noise: WhiteNoise,
    filter: OnePoleLowpass,
}

impl MotorVoice {
    /// Build a voice whose noise stream starts from `noise_seed`.
    pub fn new(config: &EngineConfig, noise_seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(MotorVoice {
            waveform: config.waveform,
            mapper: RpmMapper::new(config),
            mixer: Mixer::new(config.noise_placement),
            bank: OscillatorBank::new(config),
            vibrato: Vibrato::new(config.sample_rate_hz),
            whine: Whine::new(config),
            noise: WhiteNoise::new(noise_seed),
            filter: OnePoleLowpass::new(config.filter_cutoff_hz, config.sample_rate_hz),
        })
    }

    /// Render one sample for `rpm` and advance every accumulator once.
    #[inline]
    pub fn next_sample(&mut self, rpm: f64) -> f64 {
        let params = self.mapper.map(rpm);
        self.step(&params)
    }

    #[inline]
    fn step(&mut self, params: &RpmParams) -> f64 {
        let vibrato = self.vibrato.next_offset(self.waveform, params);
        let harmonics = self
            .bank
            .next_sample(self.waveform, params.frequency_offset + vibrato);
        let whine = self.whine.next_sample(self.waveform, params, vibrato);
        let noise = self
            .filter
            .process(self.noise.next_sample() * params.noise_amplitude);
        self.mixer.mix(harmonics, whine, noise, params.attenuation)
    }

    /// Render `output.len()` samples.
    ///
    /// `rpm` holds one value per sample, or a single value for the whole
    /// block. A short control block holds its last value; an empty one is RPM 0.
    pub fn render_block(&mut self, rpm: &[f32], output: &mut [f32]) {
        if let [only] = rpm {
            // Block-rate control: map once.
            let params = self.mapper.map(*only as f64);
            for out in output.iter_mut() {
                *out = self.step(&params) as f32;
            }
            return;
        }
        for (i, out) in output.iter_mut().enumerate() {
            *out = self.next_sample(control_at(rpm, i)) as f32;
        }
    }

    /// Derived parameters for `rpm` under this voice's config.
    pub fn params(&self, rpm: f64) -> RpmParams {
        self.mapper.map(rpm)
    }

    /// Copy of the persistent state. Allocates; not for the audio thread.
    pub fn state(&self) -> EngineState {
        EngineState {
            oscillator_phases: self.bank.phases().collect(),
            lfo_phase: self.vibrato.phase(),
            whine_phase: self.whine.phase(),
            filter_state: self.filter.state(),
        }
    }

    /// Back to construction state: phases and filter at zero, noise reseeded.
    pub fn reset(&mut self) {
        self.bank.reset();
        self.vibrato.reset();
        self.whine.reset();
        self.noise.reset();
        self.filter.reset();
    }
}

/// RPM for sample `i` of a control block.
#[inline]
pub(crate) fn control_at(rpm: &[f32], i: usize) -> f64 {
    match rpm {
        [] => 0.0,
        [only] => *only as f64,
        _ => rpm[i.min(rpm.len() - 1)] as f64,
    }
}
