// core/src/classifier.rs
//
// Heuristic: the leg under test shows large force excursions while the
// resting/support leg stays comparatively flat. Best-effort classification;
// the UI may let the user override it.
use crate::models::{ActiveLeg, Sample};

/// Below this many samples the heuristic is unreliable; `Left` is returned
/// as a defined default instead.
pub const MIN_SAMPLES: usize = 100;

/// Fraction trimmed off each end before scoring (setup/teardown noise).
const TRIM_FRACTION: f64 = 0.1;

/// Stddev weight vs range; sustained variability beats one outlier swing.
const STDDEV_WEIGHT: f64 = 10.0;

/// Per-channel activity scores. Exposed so a caller can surface the margin
/// and offer an override when the call is close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegScores {
    pub left: f64,
    pub right: f64,
}

impl LegScores {
    /// Higher score wins; ties resolve to `Right`.
    pub fn active(&self) -> ActiveLeg {
        if self.left > self.right {
            ActiveLeg::Left
        } else {
            ActiveLeg::Right
        }
    }

    /// Relative margin between the scores, 0.0 (coin flip) to 1.0 (one-sided).
    pub fn confidence(&self) -> f64 {
        let hi = self.left.max(self.right);
        if hi <= f64::EPSILON {
            return 0.0;
        }
        ((self.left - self.right).abs() / hi).clamp(0.0, 1.0)
    }
}

/// score = range + stddev * 10 over the given window.
fn channel_score(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }

    let n = values.len() as f64;
    let mean = sum / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

    (max - min) + variance.sqrt() * STDDEV_WEIGHT
}

/// Score both channels over the trimmed middle 80% of the recording.
/// Total: degenerate input yields zero scores, never an error.
pub fn classify(samples: &[Sample]) -> LegScores {
    let n = samples.len();
    let start = (n as f64 * TRIM_FRACTION).floor() as usize;
    let end = (n as f64 * (1.0 - TRIM_FRACTION)).floor() as usize;
    if start >= end {
        return LegScores { left: 0.0, right: 0.0 };
    }

    let window = &samples[start..end];
    let left: Vec<f64> = window.iter().map(|s| s.left).collect();
    let right: Vec<f64> = window.iter().map(|s| s.right).collect();

    LegScores {
        left: channel_score(&left),
        right: channel_score(&right),
    }
}

/// Which leg was actively tested. Never fails; short recordings
/// (`< MIN_SAMPLES`) default to `Left`.
pub fn detect_active_leg(samples: &[Sample]) -> ActiveLeg {
    if samples.len() < MIN_SAMPLES {
        return ActiveLeg::Left;
    }
    classify(samples).active()
}
