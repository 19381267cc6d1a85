use thiserror::Error;

/// Top-level error for everything outside the real-time path.
#[derive(Debug, Error)]
pub enum MotorSoundError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

/// Rejected engine configuration. Raised at construction, never while rendering.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("base frequency list is empty")]
    EmptyBaseFrequencies,
    #[error("sample rate must be positive, got {0}")]
    InvalidSampleRate(f64),
    #[error("max RPM must be positive, got {0}")]
    InvalidMaxRpm(f64),
    #[error("pitch lowering factor must be positive, got {0}")]
    InvalidPitchLoweringFactor(f64),
    #[error("filter cutoff must be positive, got {0}")]
    InvalidFilterCutoff(f64),
    #[error("frequency offset exponent must be positive, got {0}")]
    InvalidOffsetExponent(f64),
    #[error("field `{field}` must be finite")]
    NonFinite { field: &'static str },
    #[error("channel count must be at least 1, got {0}")]
    InvalidChannelCount(usize),
}
