//! WAV renderer: renders an RPM automation curve to a WAV byte buffer.

use std::io::Cursor;

use log::debug;

use crate::config::EngineConfig;
use crate::error::MotorSoundError;

use super::automation::RpmAutomation;
use super::engine::MotorEngine;

/// Render `automation` to 16-bit PCM WAV with `channels` independent voices.
pub fn render_wav(
    config: EngineConfig,
    automation: &RpmAutomation,
    channels: u16,
) -> Result<Vec<u8>, MotorSoundError> {
    let sample_rate = config.sample_rate_hz;
    let mut engine = MotorEngine::new(config, channels as usize)?;
    let control = automation.to_control(sample_rate);
    let pcm = engine.render_pcm_i16(&control);

    debug!(
        "encoding {} frame(s) x {} channel(s) at {} Hz",
        control.len(),
        channels,
        sample_rate
    );
    encode_wav(&pcm, sample_rate.round() as u32, channels)
}

/// Encode interleaved i16 PCM samples to a WAV byte buffer.
fn encode_wav(samples: &[i16], sample_rate: u32, channels: u16) -> Result<Vec<u8>, MotorSoundError> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut buf = Vec::with_capacity(44 + samples.len() * 2);
    let mut writer = hound::WavWriter::new(Cursor::new(&mut buf), spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(buf)
}
