//! Motor Engine: renders an RPM control stream to audio.
//!
//! The engine owns one [`MotorVoice`] per output channel. Voices never share
//! state, so every channel advances exactly once per sample no matter how the
//! host interleaves its calls.

use log::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::ConfigError;

use super::voice::{EngineState, MotorVoice};

/// Samples per block for offline rendering.
const BLOCK_SIZE: usize = 128;

/// The audio rendering engine.
#[derive(Debug, Clone)]
pub struct MotorEngine {
    config: EngineConfig,
    voices: Vec<MotorVoice>,
}

impl MotorEngine {
    /// Validate `config` and build `channels` independent voices.
    ///
    /// Channel `c` seeds its noise with `config.noise_seed + c`.
    pub fn new(config: EngineConfig, channels: usize) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            warn!("rejected engine config: {e}");
            return Err(e);
        }
        if channels == 0 {
            warn!("rejected engine with zero channels");
            return Err(ConfigError::InvalidChannelCount(channels));
        }

        let voices = (0..channels)
            .map(|c| MotorVoice::new(&config, config.noise_seed.wrapping_add(c as u64)))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("engine config: {config:?}");
        info!(
            "motor engine ready: {} channel(s), {} oscillator(s), {} Hz, {:?}",
            channels,
            config.oscillator_count(),
            config.sample_rate_hz,
            config.waveform
        );
        Ok(MotorEngine { config, voices })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn channels(&self) -> usize {
        self.voices.len()
    }

    pub fn voice(&self, channel: usize) -> Option<&MotorVoice> {
        self.voices.get(channel)
    }

    pub fn voice_mut(&mut self, channel: usize) -> Option<&mut MotorVoice> {
        self.voices.get_mut(channel)
    }

    pub fn state(&self, channel: usize) -> Option<EngineState> {
        self.voices.get(channel).map(MotorVoice::state)
    }

    /// Render one host block into every output channel.
    ///
    /// `rpm` is either one value per sample or one value for the block.
    /// Outputs past the engine's channel count are filled with silence.
    /// Always returns `true`: the generator never ends on its own.
    pub fn process_block(&mut self, rpm: &[f32], outputs: &mut [&mut [f32]]) -> bool {
        for (channel, output) in outputs.iter_mut().enumerate() {
            self.process_channel(channel, rpm, output);
        }
        true
    }

    /// Render one block for a single channel. Only that channel's voice advances.
    pub fn process_channel(&mut self, channel: usize, rpm: &[f32], output: &mut [f32]) -> bool {
        match self.voices.get_mut(channel) {
            Some(voice) => voice.render_block(rpm, output),
            None => output.fill(0.0),
        }
        true
    }

    /// Render one RPM value per sample for every channel.
    pub fn render(&mut self, rpm: &[f64]) -> Vec<Vec<f32>> {
        let total_samples = rpm.len();
        let mut output = vec![vec![0.0_f32; total_samples]; self.voices.len()];

        let mut block_start = 0;
        while block_start < total_samples {
            let block_end = (block_start + BLOCK_SIZE).min(total_samples);
            for (voice, out) in self.voices.iter_mut().zip(output.iter_mut()) {
                for i in block_start..block_end {
                    out[i] = voice.next_sample(rpm[i]) as f32;
                }
            }
            block_start = block_end;
        }

        debug!(
            "rendered {} sample(s) on {} channel(s)",
            total_samples,
            self.voices.len()
        );
        output
    }

    /// Render channel 0 only, at full precision.
    pub fn render_mono(&mut self, rpm: &[f64]) -> Vec<f64> {
        let voice = &mut self.voices[0];
        rpm.iter().map(|&r| voice.next_sample(r)).collect()
    }

    /// Render to interleaved i16 PCM (for WAV export).
    pub fn render_pcm_i16(&mut self, rpm: &[f64]) -> Vec<i16> {
        let channels = self.render(rpm);
        let mut pcm = Vec::with_capacity(rpm.len() * channels.len());
        for i in 0..rpm.len() {
            for channel in &channels {
                let sample = (channel[i] as f64 * 32767.0).round().clamp(-32768.0, 32767.0) as i16;
                pcm.push(sample);
            }
        }
        pcm
    }

    /// Return every voice to its construction state.
    pub fn reset(&mut self) {
        self.voices.iter_mut().for_each(MotorVoice::reset);
    }
}
