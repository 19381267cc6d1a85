pub mod config;
pub mod dsp;
pub mod error;

pub use crate::config::EngineConfig;
pub use crate::dsp::engine::MotorEngine;
pub use crate::dsp::mixer::NoisePlacement;
pub use crate::dsp::voice::{EngineState, MotorVoice};
pub use crate::dsp::waveform::Waveform;
pub use crate::error::{ConfigError, MotorSoundError};

use crate::dsp::automation::RpmAutomation;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the motor_sound_core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: the default engine config as a JS object.
#[wasm_bindgen]
pub fn default_config() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&EngineConfig::default())
        .map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// Parse a JSON config and an automation curve, render them to WAV.
pub fn render_wav_from_json(
    config_json: &str,
    automation_json: &str,
    channels: u16,
) -> Result<Vec<u8>, MotorSoundError> {
    let config = EngineConfig::from_json(config_json)?;
    let automation = RpmAutomation::from_json(automation_json)?;
    dsp::renderer::render_wav(config, &automation, channels)
}

/// WASM-exposed: render an RPM automation curve to a stereo WAV byte array.
#[wasm_bindgen]
pub fn render_motor_wav(config_json: &str, automation_json: &str) -> Result<Vec<u8>, JsValue> {
    render_wav_from_json(config_json, automation_json, 2)
        .map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed processor for an AudioWorklet host.
///
/// The worklet calls `process` once per output channel per render quantum,
/// passing the `rpm` parameter array (length 1 for k-rate, 128 for a-rate).
#[wasm_bindgen]
pub struct MotorSoundProcessor {
    engine: MotorEngine,
}

#[wasm_bindgen]
impl MotorSoundProcessor {
    /// Build from a (possibly partial) JSON config string.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, channels: usize) -> Result<MotorSoundProcessor, JsValue> {
        Self::from_json(config_json, channels).map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    /// Build from a JS config object.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config: JsValue, channels: usize) -> Result<MotorSoundProcessor, JsValue> {
        let config: EngineConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        let engine = MotorEngine::new(config, channels)
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        Ok(MotorSoundProcessor { engine })
    }

    /// Render one block for `channel`. Returns `true` to keep the node alive.
    pub fn process(&mut self, channel: usize, rpm: &[f32], output: &mut [f32]) -> bool {
        self.engine.process_channel(channel, rpm, output)
    }

    pub fn channels(&self) -> usize {
        self.engine.channels()
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }
}

impl MotorSoundProcessor {
    pub fn from_json(config_json: &str, channels: usize) -> Result<Self, MotorSoundError> {
        let config = EngineConfig::from_json(config_json)?;
        let engine = MotorEngine::new(config, channels)?;
        Ok(MotorSoundProcessor { engine })
    }

    pub fn engine(&self) -> &MotorEngine {
        &self.engine
    }
}
