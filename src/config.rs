//! Engine configuration.
//!
//! Every tuning constant of the synthesizer lives here. The struct maps to the
//! JSON object a host passes in (camelCase keys, any subset of fields), and is
//! validated once before an engine is built from it.

use serde::{Deserialize, Serialize};

use crate::dsp::mixer::NoisePlacement;
use crate::dsp::waveform::Waveform;
use crate::error::{ConfigError, MotorSoundError};

/// Immutable synthesis parameters, shared by every voice of an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Harmonic base frequencies in Hz, lowest first.
    pub base_frequencies: Vec<f64>,
    /// Divisor applied to every harmonic frequency before the phase advance.
    pub pitch_lowering_factor: f64,
    /// Frequency offset reached at `max_rpm`, in Hz.
    pub frequency_offset_max_hz: f64,
    /// Exponent of the offset curve. Values below 1 rise fast, then flatten.
    pub frequency_offset_exponent: f64,

    pub whine_offset_hz: f64,
    pub whine_amplitude: f64,

    pub lfo_min_freq: f64,
    pub lfo_max_freq: f64,
    /// Vibrato depth in Hz at RPM 0. May exceed `lfo_max_amplitude`.
    pub lfo_min_amplitude: f64,
    /// Vibrato depth in Hz at `max_rpm`.
    pub lfo_max_amplitude: f64,
    pub lfo_activation_rpm: f64,

    pub attenuation_start_rpm: f64,
    pub attenuation_end_rpm: f64,
    pub max_rpm: f64,

    /// RPM floor below which no noise is injected. `None` ramps from RPM 0.
    pub noise_activation_rpm: Option<f64>,
    pub filter_cutoff_hz: f64,
    pub sample_rate_hz: f64,

    pub waveform: Waveform,
    pub noise_placement: NoisePlacement,
    /// Seed of the first channel's noise stream. Channel `c` uses `seed + c`.
    pub noise_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            base_frequencies: vec![190.0, 380.0, 650.0],
            pitch_lowering_factor: 5.0,
            frequency_offset_max_hz: 1500.0,
            frequency_offset_exponent: 0.6,
            whine_offset_hz: 1000.0,
            whine_amplitude: 0.05,
            lfo_min_freq: 1.0,
            lfo_max_freq: 12.0,
            lfo_min_amplitude: 6.0,
            lfo_max_amplitude: 2.0,
            lfo_activation_rpm: 1000.0,
            attenuation_start_rpm: 6900.0,
            attenuation_end_rpm: 7300.0,
            max_rpm: 7500.0,
            noise_activation_rpm: Some(2000.0),
            filter_cutoff_hz: 800.0,
            sample_rate_hz: 44100.0,
            waveform: Waveform::FlattenedEnvelope,
            noise_placement: NoisePlacement::PostAttenuation,
            noise_seed: 0x5eed,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, MotorSoundError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value that ends up as a divisor, exponent or loop bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_frequencies.is_empty() {
            return Err(ConfigError::EmptyBaseFrequencies);
        }
        positive(self.sample_rate_hz, ConfigError::InvalidSampleRate)?;
        positive(self.max_rpm, ConfigError::InvalidMaxRpm)?;
        positive(
            self.pitch_lowering_factor,
            ConfigError::InvalidPitchLoweringFactor,
        )?;
        positive(self.filter_cutoff_hz, ConfigError::InvalidFilterCutoff)?;
        positive(
            self.frequency_offset_exponent,
            ConfigError::InvalidOffsetExponent,
        )?;

        if self.base_frequencies.iter().any(|f| !f.is_finite()) {
            return Err(ConfigError::NonFinite {
                field: "baseFrequencies",
            });
        }
        let scalars = [
            ("pitchLoweringFactor", self.pitch_lowering_factor),
            ("frequencyOffsetMaxHz", self.frequency_offset_max_hz),
            ("frequencyOffsetExponent", self.frequency_offset_exponent),
            ("whineOffsetHz", self.whine_offset_hz),
            ("whineAmplitude", self.whine_amplitude),
            ("lfoMinFreq", self.lfo_min_freq),
            ("lfoMaxFreq", self.lfo_max_freq),
            ("lfoMinAmplitude", self.lfo_min_amplitude),
            ("lfoMaxAmplitude", self.lfo_max_amplitude),
            ("lfoActivationRpm", self.lfo_activation_rpm),
            ("attenuationStartRpm", self.attenuation_start_rpm),
            ("attenuationEndRpm", self.attenuation_end_rpm),
            ("maxRpm", self.max_rpm),
            ("noiseActivationRpm", self.noise_activation_rpm.unwrap_or(0.0)),
            ("filterCutoffHz", self.filter_cutoff_hz),
            ("sampleRateHz", self.sample_rate_hz),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        Ok(())
    }

    /// Number of harmonic oscillators per voice.
    pub fn oscillator_count(&self) -> usize {
        self.base_frequencies.len()
    }
}

/// `!(value > 0.0)` also rejects NaN.
fn positive(value: f64, err: fn(f64) -> ConfigError) -> Result<(), ConfigError> {
    if !(value > 0.0) {
        return Err(err(value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_base_frequencies() {
        let config = EngineConfig {
            base_frequencies: vec![],
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyBaseFrequencies));
    }

    #[test]
    fn rejects_non_positive_divisors() {
        let zero_rate = EngineConfig {
            sample_rate_hz: 0.0,
            ..EngineConfig::default()
        };
        assert_eq!(
            zero_rate.validate(),
            Err(ConfigError::InvalidSampleRate(0.0))
        );

        let negative_rpm = EngineConfig {
            max_rpm: -1.0,
            ..EngineConfig::default()
        };
        assert_eq!(
            negative_rpm.validate(),
            Err(ConfigError::InvalidMaxRpm(-1.0))
        );

        let zero_lowering = EngineConfig {
            pitch_lowering_factor: 0.0,
            ..EngineConfig::default()
        };
        assert_eq!(
            zero_lowering.validate(),
            Err(ConfigError::InvalidPitchLoweringFactor(0.0))
        );
    }

    #[test]
    fn rejects_nan_sample_rate() {
        let config = EngineConfig {
            sample_rate_hz: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSampleRate(_))
        ));
    }

    #[test]
    fn rejects_non_finite_fields() {
        let config = EngineConfig {
            whine_amplitude: f64::INFINITY,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "whineAmplitude"
            })
        );

        let config = EngineConfig {
            base_frequencies: vec![190.0, f64::NAN],
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "baseFrequencies"
            })
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(
            r#"{ "baseFrequencies": [100, 200], "waveform": "square", "noiseActivationRpm": null }"#,
        )
        .expect("valid config");
        assert_eq!(config.base_frequencies, vec![100.0, 200.0]);
        assert_eq!(config.waveform, Waveform::Square);
        assert_eq!(config.noise_activation_rpm, None);
        assert_eq!(config.max_rpm, EngineConfig::default().max_rpm);
    }

    #[test]
    fn json_with_invalid_values_fails_validation() {
        let result = EngineConfig::from_json(r#"{ "sampleRateHz": -44100 }"#);
        assert!(matches!(
            result,
            Err(MotorSoundError::Config(ConfigError::InvalidSampleRate(_)))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = EngineConfig::from_json("{ not json");
        assert!(matches!(result, Err(MotorSoundError::Json(_))));
    }

    #[test]
    fn json_round_trip_uses_camel_case() {
        let json = serde_json::to_string(&EngineConfig::default()).expect("serialize");
        assert!(json.contains("\"pitchLoweringFactor\":5.0"), "{json}");
        assert!(json.contains("\"noisePlacement\":\"postAttenuation\""), "{json}");
        assert!(json.contains("\"waveform\":\"flattenedEnvelope\""), "{json}");
    }
}
