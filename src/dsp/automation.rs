//! RPM automation: piecewise-linear RPM curves for offline rendering.

use serde::{Deserialize, Serialize};

/// One breakpoint of an automation curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RpmPoint {
    /// Seconds from the start.
    pub time: f64,
    pub rpm: f64,
}

/// A piecewise-linear RPM curve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpmAutomation {
    /// Breakpoints. Sorted by time on load.
    pub points: Vec<RpmPoint>,
    /// Render length in seconds. Defaults to the last breakpoint's time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl RpmAutomation {
    pub fn new(mut points: Vec<RpmPoint>, duration: Option<f64>) -> Self {
        points.sort_by(|a, b| a.time.total_cmp(&b.time));
        RpmAutomation { points, duration }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let parsed: RpmAutomation = serde_json::from_str(json)?;
        Ok(Self::new(parsed.points, parsed.duration))
    }

    /// Hold `rpm` for `seconds`.
    pub fn constant(rpm: f64, seconds: f64) -> Self {
        Self::new(vec![RpmPoint { time: 0.0, rpm }], Some(seconds))
    }

    /// Linear sweep from `from` to `to` over `seconds`.
    pub fn ramp(from: f64, to: f64, seconds: f64) -> Self {
        Self::new(
            vec![
                RpmPoint { time: 0.0, rpm: from },
                RpmPoint {
                    time: seconds,
                    rpm: to,
                },
            ],
            Some(seconds),
        )
    }

    pub fn duration(&self) -> f64 {
        self.duration
            .or_else(|| self.points.last().map(|p| p.time))
            .unwrap_or(0.0)
            .max(0.0)
    }

    /// RPM at time `t`. Holds the first/last value outside the breakpoints;
    /// an empty curve is RPM 0.
    pub fn rpm_at(&self, t: f64) -> f64 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if t <= first.time {
            return first.rpm;
        }
        if t >= last.time {
            return last.rpm;
        }
        // First breakpoint strictly after t; t > first.time so idx >= 1.
        let idx = self.points.partition_point(|p| p.time <= t);
        let a = self.points[idx - 1];
        let b = self.points[idx];
        let span = b.time - a.time;
        if span <= 0.0 {
            return b.rpm;
        }
        a.rpm + (b.rpm - a.rpm) * (t - a.time) / span
    }

    /// Expand to one RPM value per sample.
    pub fn to_control(&self, sample_rate: f64) -> Vec<f64> {
        let total_samples = (self.duration() * sample_rate).round() as usize;
        (0..total_samples)
            .map(|i| self.rpm_at(i as f64 / sample_rate))
            .collect()
    }
}
