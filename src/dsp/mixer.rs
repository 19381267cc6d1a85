//! Mixer: combines the harmonic bed, whine and filtered noise under the RPM
//! volume envelope.

use serde::{Deserialize, Serialize};

/// Where the filtered noise enters relative to the volume attenuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoisePlacement {
    /// `(harmonics + whine) · attenuation + noise`. Noise survives the limiter.
    #[default]
    PostAttenuation,
    /// `(harmonics + whine + noise) · attenuation`. The limiter mutes everything.
    PreAttenuation,
}

/// Stateless per-sample mixer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mixer {
    pub noise_placement: NoisePlacement,
}

impl Mixer {
    pub fn new(noise_placement: NoisePlacement) -> Self {
        Mixer { noise_placement }
    }

    /// Final output sample. Not clamped.
    #[inline]
    pub fn mix(&self, harmonic_avg: f64, whine: f64, noise: f64, attenuation: f64) -> f64 {
        let tone = harmonic_avg + whine;
        match self.noise_placement {
            NoisePlacement::PostAttenuation => tone * attenuation + noise,
            NoisePlacement::PreAttenuation => (tone + noise) * attenuation,
        }
    }
}
