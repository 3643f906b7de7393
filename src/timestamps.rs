//! Intra-minute timestamp generation.
//!
//! Each record assigned to minute i gets a uniformly random millisecond offset
//! inside that minute. Timestamps are sorted within their minute and minutes are
//! emitted in order, so the whole sequence is non-decreasing.

use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use serde::{Serialize, Serializer};
use tracing::debug;

/// Milliseconds in one minute; offsets are drawn from `0..MILLIS_PER_MINUTE`.
pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// Display format for flow timestamps (millisecond precision).
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S%.3f";

/// A single flow instant with millisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlowTimestamp(NaiveDateTime);

#[allow(dead_code)] // Accessors used by tests and record consumers
impl FlowTimestamp {
    pub fn new(instant: NaiveDateTime) -> Self {
        Self(instant)
    }

    pub fn instant(&self) -> NaiveDateTime {
        self.0
    }
}

impl std::fmt::Display for FlowTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for FlowTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Generates one timestamp per allocated record.
///
/// Output length equals the sum of `counts`. Records of minute i all lie in
/// `[start + i min, start + (i+1) min)` and precede every record of minute i+1.
pub fn generate_timestamps<R>(counts: &[u64], start: NaiveDateTime, rng: &mut R) -> Vec<FlowTimestamp>
where
    R: Rng + ?Sized,
{
    let total: u64 = counts.iter().sum();
    let mut timestamps = Vec::with_capacity(total as usize);
    let mut minute_offsets: Vec<i64> = Vec::new();

    for (minute, &count) in counts.iter().enumerate() {
        let minute_start = start + Duration::minutes(minute as i64);

        minute_offsets.clear();
        minute_offsets.extend((0..count).map(|_| rng.gen_range(0..MILLIS_PER_MINUTE)));
        minute_offsets.sort_unstable();

        timestamps.extend(
            minute_offsets
                .iter()
                .map(|&ms| FlowTimestamp(minute_start + Duration::milliseconds(ms))),
        );
    }

    debug!(
        "Generated {} timestamps over {} minutes",
        timestamps.len(),
        counts.len()
    );

    timestamps
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn start() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2020-06-23 11:00", "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_count_matches_allocation() {
        let mut rng = StdRng::seed_from_u64(7);
        let timestamps = generate_timestamps(&[3, 0, 5, 1], start(), &mut rng);
        assert_eq!(timestamps.len(), 9);
    }

    #[test]
    fn test_minutes_are_contiguous_runs() {
        let mut rng = StdRng::seed_from_u64(42);
        let counts = [4, 2, 0, 6];
        let timestamps = generate_timestamps(&counts, start(), &mut rng);

        let mut idx = 0;
        for (minute, &count) in counts.iter().enumerate() {
            let lo = start() + Duration::minutes(minute as i64);
            let hi = lo + Duration::minutes(1);
            for ts in &timestamps[idx..idx + count as usize] {
                assert!(ts.instant() >= lo && ts.instant() < hi);
            }
            idx += count as usize;
        }
    }

    #[test]
    fn test_sorted_overall() {
        let mut rng = StdRng::seed_from_u64(1);
        let timestamps = generate_timestamps(&[50; 30], start(), &mut rng);
        assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_seed_reproducible() {
        let a = generate_timestamps(&[10, 20], start(), &mut StdRng::seed_from_u64(99));
        let b = generate_timestamps(&[10, 20], start(), &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_format() {
        let ts = FlowTimestamp::new(start() + Duration::milliseconds(7_412));
        assert_eq!(ts.to_string(), "23/06/2020 11:00:07.412");
    }

    #[test]
    fn test_empty_allocation() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate_timestamps(&[], start(), &mut rng).is_empty());
        assert!(generate_timestamps(&[0, 0, 0], start(), &mut rng).is_empty());
    }

    proptest! {
        #[test]
        fn prop_within_window_and_ordered(
            counts in proptest::collection::vec(0u64..40, 1..120),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let timestamps = generate_timestamps(&counts, start(), &mut rng);

            prop_assert_eq!(timestamps.len() as u64, counts.iter().sum::<u64>());
            let end = start() + Duration::minutes(counts.len() as i64);
            for ts in &timestamps {
                prop_assert!(ts.instant() >= start() && ts.instant() < end);
            }
            prop_assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
