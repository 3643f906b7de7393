//! Simulation pipeline.
//!
//! ```text
//! Window ──> resolve_phase ──> DistributionSampler ──> Allocator ──> generate_timestamps ──> RecordGenerator
//!            (PhaseOffset)     (relative weights)      (counts)      (FlowTimestamp)         (FlowRecord)
//! ```
//!
//! Planning (window through allocation) is deterministic. Generation draws
//! from a caller-supplied RNG so a seed reproduces the full table.

use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::allocator::{Allocation, Allocator};
use crate::config::{Config, RecordConfig};
use crate::curve::IntensityCurve;
use crate::error::{Result, SimulationError};
use crate::records::{FlowRecord, IpPool, RecordGenerator};
use crate::sampler::sample_distribution;
use crate::timestamps::generate_timestamps;
use crate::window::{PhaseOffset, Window};

/// Everything decided before any randomness is drawn.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationPlan {
    pub window: Window,
    pub phase: PhaseOffset,
    pub distribution: Vec<f64>,
    pub allocation: Allocation,
}

/// A generated table together with the plan that shaped it.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub plan: SimulationPlan,
    pub pool: IpPool,
    pub records: Vec<FlowRecord>,
}

/// Runs the window → allocation → records pipeline.
#[derive(Debug, Clone)]
pub struct Simulator {
    window: Window,
    curve: IntensityCurve,
    allocator: Allocator,
    records: RecordConfig,
    ip_pool_size: usize,
    max_attempts: usize,
}

impl Simulator {
    /// Builds a simulator from validated configuration.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let window = Window::parse(&config.window.start, &config.window.end)?;
        Ok(Self {
            window,
            curve: IntensityCurve::canonical(),
            allocator: Allocator::new(config.generator.density_floor),
            records: config.records.clone(),
            ip_pool_size: config.generator.ip_pool_size,
            max_attempts: config.generator.max_attempts,
        })
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// Resolves the phase, samples the curve and allocates `total` records.
    pub fn plan(&self, total: u64) -> std::result::Result<SimulationPlan, SimulationError> {
        let phase = self.window.phase();
        let distribution = sample_distribution(&self.curve, phase, self.window.duration_minutes());
        let allocation = self.allocator.allocate(&distribution, total)?;

        info!(
            "Allocated {} records over {} (phase {}, requested {}, discrepancy {:+})",
            allocation.achieved_total(),
            self.window,
            phase,
            allocation.requested_total(),
            allocation.discrepancy()
        );

        Ok(SimulationPlan {
            window: self.window,
            phase,
            distribution,
            allocation,
        })
    }

    /// Plans with bounded resubmission after a density failure.
    ///
    /// `on_insufficient` sees each `InsufficientDensity` error and returns the
    /// next total to try, or `None` to stop. Other errors end the loop at once.
    /// At most `max_attempts` plans are attempted.
    pub fn plan_with_retry<F>(
        &self,
        total: u64,
        mut on_insufficient: F,
    ) -> std::result::Result<SimulationPlan, SimulationError>
    where
        F: FnMut(&SimulationError) -> Option<u64>,
    {
        let mut total = total;
        let mut attempt = 1;
        loop {
            match self.plan(total) {
                Ok(plan) => return Ok(plan),
                Err(err) if err.is_recoverable() && attempt < self.max_attempts => {
                    warn!("Attempt {}/{}: {}", attempt, self.max_attempts, err);
                    match on_insufficient(&err) {
                        Some(next) => total = next,
                        None => return Err(err),
                    }
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Draws timestamps and record fields for a plan.
    pub fn generate<R>(&self, plan: SimulationPlan, rng: &mut R) -> Simulation
    where
        R: Rng + ?Sized,
    {
        let timestamps = generate_timestamps(plan.allocation.counts(), plan.window.start(), rng);
        let pool = IpPool::random(self.ip_pool_size, rng);
        let generator = RecordGenerator::new(self.records.clone(), pool);
        let records = generator.generate(&timestamps, rng);

        info!(
            "Generated {} flow records from {} addresses",
            records.len(),
            generator.pool().len()
        );

        Simulation {
            plan,
            pool: generator.pool().clone(),
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(start: &str, end: &str) -> Config {
        let mut config = Config::default();
        config.window.start = start.to_string();
        config.window.end = end.to_string();
        config
    }

    #[test]
    fn test_plan_default_day() {
        let simulator = Simulator::new(&Config::default()).unwrap();
        let plan = simulator.plan(30_000).unwrap();

        assert_eq!(plan.phase.minutes(), 0);
        assert_eq!(plan.distribution.as_slice(), IntensityCurve::canonical().values());
        assert_eq!(plan.allocation.achieved_total(), 29_983);
    }

    #[test]
    fn test_invalid_window_rejected_at_construction() {
        let err = Simulator::new(&config("24/6/2020 11:00", "23/6/2020 11:00")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SimulationError>(),
            Some(SimulationError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_plan_insufficient_density() {
        let simulator = Simulator::new(&Config::default()).unwrap();
        let err = simulator.plan(10).unwrap_err();
        assert_eq!(err.minimum_total(), Some(30_000));
    }

    #[test]
    fn test_plan_rejects_oversized_total() {
        let simulator = Simulator::new(&Config::default()).unwrap();
        let err = simulator.plan(u64::MAX).unwrap_err();
        assert!(matches!(err, SimulationError::TotalTooLarge { .. }));

        let err = simulator.plan_with_retry(u64::MAX, |_| Some(30_000)).unwrap_err();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_retry_uses_caller_total() {
        let simulator = Simulator::new(&Config::default()).unwrap();
        let mut seen = Vec::new();
        let plan = simulator
            .plan_with_retry(10, |err| {
                seen.push(err.minimum_total().unwrap());
                err.minimum_total()
            })
            .unwrap();

        assert_eq!(seen, vec![30_000]);
        assert_eq!(plan.allocation.requested_total(), 30_000);
    }

    #[test]
    fn test_retry_is_bounded() {
        let simulator = Simulator::new(&Config::default()).unwrap();
        let mut calls = 0;
        let err = simulator
            .plan_with_retry(10, |_| {
                calls += 1;
                Some(20)
            })
            .unwrap_err();

        // Three attempts by default: two resubmissions, then give up
        assert_eq!(calls, 2);
        assert!(matches!(err, SimulationError::InsufficientDensity { requested: 20, .. }));
    }

    #[test]
    fn test_retry_caller_declines() {
        let simulator = Simulator::new(&Config::default()).unwrap();
        let err = simulator.plan_with_retry(10, |_| None).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_generate_matches_allocation() {
        let simulator = Simulator::new(&config("23/6/2020 18:30", "23/6/2020 20:30")).unwrap();
        let plan = simulator.plan(5_000).unwrap();
        let achieved = plan.allocation.achieved_total();

        let mut rng = StdRng::seed_from_u64(2020);
        let simulation = simulator.generate(plan, &mut rng);

        assert_eq!(simulation.records.len() as u64, achieved);
        assert_eq!(simulation.pool.len(), 100);
        let window = simulation.plan.window;
        assert!(simulation.records.iter().all(|r| {
            r.timestamp.instant() >= window.start() && r.timestamp.instant() < window.end_exclusive()
        }));
        assert!(simulation
            .records
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_generate_reproducible_with_seed() {
        let simulator = Simulator::new(&config("2020-06-23 22:00", "2020-06-24 02:00")).unwrap();
        let a = simulator.generate(simulator.plan(6_000).unwrap(), &mut StdRng::seed_from_u64(9));
        let b = simulator.generate(simulator.plan(6_000).unwrap(), &mut StdRng::seed_from_u64(9));
        assert_eq!(a.records, b.records);
    }
}
