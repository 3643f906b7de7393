//! Walks the intensity curve for the minutes of a window.

use crate::curve::IntensityCurve;
use crate::window::PhaseOffset;

/// Lazy, restartable traversal of the curve starting at a phase offset.
///
/// Yields exactly `remaining` values, wrapping from index 1439 back to 0.
#[derive(Debug, Clone)]
pub struct DistributionSampler {
    curve: IntensityCurve,
    cursor: usize,
    remaining: usize,
}

impl DistributionSampler {
    pub fn new(curve: IntensityCurve, phase: PhaseOffset, duration_minutes: usize) -> Self {
        Self {
            curve,
            cursor: phase.minutes(),
            remaining: duration_minutes,
        }
    }
}

impl Iterator for DistributionSampler {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.curve.value_at(self.cursor);
        self.cursor += 1;
        if self.cursor == self.curve.len() {
            self.cursor = 0;
        }
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for DistributionSampler {}

/// Collects the relative intensity of each minute of the window.
pub fn sample_distribution(
    curve: &IntensityCurve,
    phase: PhaseOffset,
    duration_minutes: usize,
) -> Vec<f64> {
    DistributionSampler::new(*curve, phase, duration_minutes).collect()
}
