//! Periodic waveform shapes shared by the harmonic bank, the whine and the LFO.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// A periodic function of phase, period 1, amplitude within [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Waveform {
    Sine,
    Sawtooth,
    Square,
    /// `sin(2πp)·cos²(πp)`: a sine with its peaks pulled toward the zero
    /// crossings, softer and more motor-like than a pure sine.
    #[default]
    FlattenedEnvelope,
}

impl Waveform {
    /// Evaluate the waveform at `phase` (expected in [0, 1)).
    #[inline]
    pub fn value(self, phase: f64) -> f64 {
        match self {
            Waveform::Sine => (2.0 * PI * phase).sin(),
            Waveform::Sawtooth => 2.0 * (phase - (0.5 + phase).floor()),
            Waveform::Square => {
                if phase.rem_euclid(1.0) < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::FlattenedEnvelope => {
                let c = (PI * phase).cos();
                (2.0 * PI * phase).sin() * c * c
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Sawtooth,
        Waveform::Square,
        Waveform::FlattenedEnvelope,
    ];

    #[test]
    fn all_waveforms_stay_in_range() {
        for wf in ALL {
            for i in 0..10_000 {
                let phase = i as f64 / 10_000.0;
                let v = wf.value(phase);
                assert!(
                    (-1.0..=1.0).contains(&v),
                    "{wf:?} out of range at phase {phase}: {v}"
                );
            }
        }
    }

    #[test]
    fn sine_quarter_points() {
        assert!(Waveform::Sine.value(0.0).abs() < 1e-12);
        assert!((Waveform::Sine.value(0.25) - 1.0).abs() < 1e-12);
        assert!((Waveform::Sine.value(0.75) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn sawtooth_wraps_at_half_period() {
        assert_eq!(Waveform::Sawtooth.value(0.0), 0.0);
        assert!((Waveform::Sawtooth.value(0.25) - 0.5).abs() < 1e-12);
        assert_eq!(Waveform::Sawtooth.value(0.5), -1.0);
        assert!((Waveform::Sawtooth.value(0.75) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn square_switches_at_half() {
        assert_eq!(Waveform::Square.value(0.0), 1.0);
        assert_eq!(Waveform::Square.value(0.499), 1.0);
        assert_eq!(Waveform::Square.value(0.5), -1.0);
        assert_eq!(Waveform::Square.value(0.999), -1.0);
    }

    #[test]
    fn flattened_envelope_is_softer_than_sine() {
        let mut peak = 0.0_f64;
        for i in 0..10_000 {
            let phase = i as f64 / 10_000.0;
            let v = Waveform::FlattenedEnvelope.value(phase);
            assert!(v.abs() <= Waveform::Sine.value(phase).abs() + 1e-12);
            peak = peak.max(v.abs());
        }
        assert!(peak > 0.5 && peak < 1.0, "unexpected peak {peak}");
    }

    #[test]
    fn waveforms_are_periodic() {
        for wf in ALL {
            for i in 0..100 {
                let phase = i as f64 / 100.0 + 0.003;
                let a = wf.value(phase);
                let b = wf.value(phase + 1.0);
                assert!((a - b).abs() < 1e-9, "{wf:?} not periodic at {phase}");
            }
        }
    }
}
