//! Proportional allocation of records to minutes.
//!
//! # Method
//!
//! For a window of D minutes with relative intensities w₀..w_{D-1} and a
//! requested total T:
//!
//! scale = T / Σw,  countᵢ = round_half_even(wᵢ · scale)
//!
//! Each minute is rounded independently and the remainder is never
//! redistributed, so the achieved total can differ from T. Every minute is off
//! by at most 0.5, giving |Σcount − T| ≤ D/2, or a relative error of at most
//! D/(2T). At the default density floor that is under 2.4%; for a full day of
//! 30000 records it is under 0.1%.
//!
//! # Density floor
//!
//! Requests thinner than the floor (default 30000 records per 1440 minutes)
//! produce a sparse, unrealistic curve and are rejected with the smallest total
//! that would be accepted. The comparison is exact integer arithmetic.

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution, Max, Min, OrderStatistics};
use tracing::{debug, error};

use crate::error::SimulationError;

/// Largest total accepted for a single window.
pub const MAX_TOTAL_RECORDS: u64 = 1_000_000_000;

/// Minimum records-per-minute ratio, kept as an exact fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DensityFloor {
    pub records: u64,
    pub minutes: u64,
}

impl Default for DensityFloor {
    fn default() -> Self {
        Self {
            records: 30_000,
            minutes: 1_440,
        }
    }
}

impl DensityFloor {
    pub fn per_minute(&self) -> f64 {
        self.records as f64 / self.minutes as f64
    }

    /// Whether `total` records over `duration_minutes` meet the floor.
    pub fn admits(&self, total: u64, duration_minutes: usize) -> bool {
        (total as u128) * (self.minutes as u128)
            >= (self.records as u128) * (duration_minutes as u128)
    }

    /// Smallest total accepted for a window of `duration_minutes`.
    pub fn minimum_total(&self, duration_minutes: usize) -> u64 {
        let numerator = (self.records as u128) * (duration_minutes as u128);
        let denominator = self.minutes as u128;
        let min = numerator.div_ceil(denominator);
        u64::try_from(min).unwrap_or(u64::MAX)
    }
}

/// Per-minute record counts for a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    requested_total: u64,
    /// Unrounded proportional share of each minute.
    expected: Vec<f64>,
    counts: Vec<u64>,
}

impl Allocation {
    pub fn requested_total(&self) -> u64 {
        self.requested_total
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn expected(&self) -> &[f64] {
        &self.expected
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total records actually placed after rounding.
    pub fn achieved_total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Achieved minus requested.
    pub fn discrepancy(&self) -> i64 {
        self.achieved_total() as i64 - self.requested_total as i64
    }

    pub fn relative_discrepancy(&self) -> f64 {
        if self.requested_total == 0 {
            return 0.0;
        }
        self.discrepancy() as f64 / self.requested_total as f64
    }

    /// Summary of totals and per-minute statistics.
    pub fn summary(&self) -> AllocationSummary {
        let mut data = Data::new(self.counts.iter().map(|&c| c as f64).collect::<Vec<_>>());

        AllocationSummary {
            requested_total: self.requested_total,
            achieved_total: self.achieved_total(),
            discrepancy: self.discrepancy(),
            relative_discrepancy: self.relative_discrepancy(),
            duration_minutes: self.counts.len(),
            mean_per_minute: data.mean().unwrap_or(0.0),
            std_dev_per_minute: data.std_dev().unwrap_or(0.0),
            min_per_minute: data.min(),
            max_per_minute: data.max(),
            median_per_minute: data.median(),
        }
    }
}

/// Informational totals reported after allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSummary {
    pub requested_total: u64,
    pub achieved_total: u64,
    pub discrepancy: i64,
    pub relative_discrepancy: f64,
    pub duration_minutes: usize,
    pub mean_per_minute: f64,
    pub std_dev_per_minute: f64,
    pub min_per_minute: f64,
    pub max_per_minute: f64,
    pub median_per_minute: f64,
}

/// Converts a distribution into integer per-minute counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Allocator {
    floor: DensityFloor,
}

impl Allocator {
    pub fn new(floor: DensityFloor) -> Self {
        Self { floor }
    }

    /// Allocates `target_total` records across the minutes of `distribution`.
    ///
    /// Fails with [`SimulationError::DivisionByZero`] if the intensities sum to
    /// zero, with [`SimulationError::TotalTooLarge`] above [`MAX_TOTAL_RECORDS`],
    /// and with [`SimulationError::InsufficientDensity`] if the request is
    /// below the density floor. Nothing is produced on failure.
    pub fn allocate(
        &self,
        distribution: &[f64],
        target_total: u64,
    ) -> Result<Allocation, SimulationError> {
        let intensity_sum: f64 = distribution.iter().sum();
        if intensity_sum <= 0.0 || !intensity_sum.is_finite() {
            error!(
                "Intensity sum {} over {} minutes cannot be scaled",
                intensity_sum,
                distribution.len()
            );
            return Err(SimulationError::DivisionByZero {
                requested: target_total,
            });
        }

        if target_total > MAX_TOTAL_RECORDS {
            return Err(SimulationError::TotalTooLarge {
                requested: target_total,
                max: MAX_TOTAL_RECORDS,
            });
        }

        let duration = distribution.len();
        if !self.floor.admits(target_total, duration) {
            debug!(
                "Rejecting {} records over {} minutes (floor {:.2}/min)",
                target_total,
                duration,
                self.floor.per_minute()
            );
            return Err(SimulationError::InsufficientDensity {
                requested: target_total,
                duration_minutes: duration,
                density: target_total as f64 / duration as f64,
                threshold: self.floor.per_minute(),
                minimum_total: self.floor.minimum_total(duration),
            });
        }

        let scale = target_total as f64 / intensity_sum;
        let expected: Vec<f64> = distribution.iter().map(|w| w * scale).collect();
        let counts: Vec<u64> = expected
            .iter()
            .map(|share| share.round_ties_even().max(0.0) as u64)
            .collect();

        debug!(
            "Allocated {} minutes, scale {:.6}, achieved {} of {}",
            duration,
            scale,
            counts.iter().sum::<u64>(),
            target_total
        );

        Ok(Allocation {
            requested_total: target_total,
            expected,
            counts,
        })
    }
}

/// Allocates with the default density floor.
#[allow(dead_code)] // The CLI always allocates through a configured Allocator
pub fn allocate(distribution: &[f64], target_total: u64) -> Result<Allocation, SimulationError> {
    Allocator::default().allocate(distribution, target_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{IntensityCurve, MINUTES_PER_DAY};
    use crate::sampler::sample_distribution;
    use crate::window::PhaseOffset;
    use proptest::prelude::*;

    fn full_day() -> Vec<f64> {
        IntensityCurve::canonical().values().to_vec()
    }

    #[test]
    fn test_full_day_default_total() {
        let allocation = allocate(&full_day(), 30_000).unwrap();

        assert_eq!(allocation.len(), MINUTES_PER_DAY);
        assert_eq!(allocation.achieved_total(), 29_983);
        assert!(allocation.relative_discrepancy().abs() < 0.01);

        let mean = 30_000.0 / MINUTES_PER_DAY as f64;
        let max = *allocation.counts().iter().max().unwrap() as f64;
        assert!(max <= 4.0 * mean, "peak {} exceeds 4x mean {}", max, mean);
    }

    #[test]
    fn test_too_few_records_rejected() {
        let err = allocate(&full_day(), 10).unwrap_err();
        match err {
            SimulationError::InsufficientDensity {
                requested,
                duration_minutes,
                minimum_total,
                ..
            } => {
                assert_eq!(requested, 10);
                assert_eq!(duration_minutes, MINUTES_PER_DAY);
                assert_eq!(minimum_total, 30_000);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_retry_with_minimum_total_succeeds() {
        let distribution = sample_distribution(&IntensityCurve::canonical(), PhaseOffset::new(300), 60);
        let minimum = allocate(&distribution, 100).unwrap_err().minimum_total().unwrap();
        assert_eq!(minimum, 1_250);
        assert!(allocate(&distribution, minimum - 1).is_err());
        assert!(allocate(&distribution, minimum).is_ok());
    }

    #[test]
    fn test_minimum_total_rounds_up() {
        let floor = DensityFloor::default();
        // 30000 * 7 / 1440 = 145.83..
        assert_eq!(floor.minimum_total(7), 146);
        assert!(floor.admits(146, 7));
        assert!(!floor.admits(145, 7));
    }

    #[test]
    fn test_custom_floor() {
        let allocator = Allocator::new(DensityFloor {
            records: 1,
            minutes: 1,
        });
        assert!(allocator.allocate(&[1.0, 1.0], 2).is_ok());
        assert!(allocator.allocate(&[1.0, 1.0], 1).is_err());
    }

    #[test]
    fn test_oversized_total_rejected() {
        assert!(matches!(
            allocate(&full_day(), u64::MAX),
            Err(SimulationError::TotalTooLarge {
                requested: u64::MAX,
                max: MAX_TOTAL_RECORDS
            })
        ));

        let allocation = allocate(&full_day(), MAX_TOTAL_RECORDS).unwrap();
        assert!(allocation.relative_discrepancy().abs() < 1e-6);
    }

    #[test]
    fn test_zero_intensity_guard() {
        let allocator = Allocator::new(DensityFloor {
            records: 0,
            minutes: 1,
        });
        assert!(matches!(
            allocator.allocate(&[0.0, 0.0, 0.0], 100),
            Err(SimulationError::DivisionByZero { requested: 100 })
        ));
        assert!(matches!(
            allocator.allocate(&[], 100),
            Err(SimulationError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_round_half_to_even() {
        let allocator = Allocator::new(DensityFloor {
            records: 1,
            minutes: 1,
        });
        // Four equal minutes sharing 10 records: 2.5 each rounds to 2
        let allocation = allocator.allocate(&[1.0, 1.0, 1.0, 1.0], 10).unwrap();
        assert_eq!(allocation.counts(), &[2, 2, 2, 2]);
        assert_eq!(allocation.discrepancy(), -2);

        // Two equal minutes sharing 7 records: 3.5 each rounds to 4
        let allocation = allocator.allocate(&[1.0, 1.0], 7).unwrap();
        assert_eq!(allocation.counts(), &[4, 4]);
        assert_eq!(allocation.discrepancy(), 1);
    }

    #[test]
    fn test_expected_shares_sum_to_request() {
        let allocation = allocate(&full_day(), 45_000).unwrap();
        let expected: f64 = allocation.expected().iter().sum();
        assert!((expected - 45_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_summary() {
        let allocation = allocate(&full_day(), 30_000).unwrap();
        let summary = allocation.summary();

        assert_eq!(summary.requested_total, 30_000);
        assert_eq!(summary.achieved_total, 29_983);
        assert_eq!(summary.discrepancy, -17);
        assert_eq!(summary.duration_minutes, 1440);
        assert_eq!(summary.min_per_minute, 6.0);
        assert_eq!(summary.max_per_minute, 35.0);
        assert!((summary.mean_per_minute - 29_983.0 / 1440.0).abs() < 1e-9);
    }

    #[test]
    fn test_allocation_is_deterministic() {
        let a = allocate(&full_day(), 31_234).unwrap();
        let b = allocate(&full_day(), 31_234).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_rounding_error_bounded(
            phase in 0usize..MINUTES_PER_DAY,
            duration in 1usize..3000,
            extra in 0u64..50_000,
        ) {
            let distribution = sample_distribution(&IntensityCurve::canonical(), PhaseOffset::new(phase), duration);
            let total = DensityFloor::default().minimum_total(duration) + extra;
            let allocation = allocate(&distribution, total).unwrap();

            prop_assert_eq!(allocation.len(), duration);
            prop_assert!(allocation.discrepancy().unsigned_abs() as f64 <= duration as f64 / 2.0);
        }

        #[test]
        fn prop_hour_window_near_floor_within_half_window(phase in 0usize..MINUTES_PER_DAY, total in 1_250u64..5_000) {
            let distribution = sample_distribution(&IntensityCurve::canonical(), PhaseOffset::new(phase), 60);
            let allocation = allocate(&distribution, total).unwrap();
            prop_assert!(allocation.discrepancy().unsigned_abs() <= 30);
        }

        #[test]
        fn prop_hour_window_within_one_percent(phase in 0usize..MINUTES_PER_DAY, total in 5_000u64..50_000) {
            let distribution = sample_distribution(&IntensityCurve::canonical(), PhaseOffset::new(phase), 60);
            let allocation = allocate(&distribution, total).unwrap();
            prop_assert!(allocation.relative_discrepancy().abs() < 0.01);
        }
    }
}
