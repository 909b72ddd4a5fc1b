//! Latency accounting for ring benchmarks.
//!
//! The harness times each operation in rounds and wants two numbers back: the
//! average cost (per round, or per sample when a round moves many samples) and
//! the worst round seen.

use std::time::{Duration, Instant};

/// Running total and maximum of timed rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencyStats {
    total: Duration,
    max: Duration,
    rounds: u64,
}

impl LatencyStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one timed round.
    #[inline]
    pub fn record(&mut self, elapsed: Duration) {
        self.total += elapsed;
        self.max = self.max.max(elapsed);
        self.rounds += 1;
    }

    /// Runs `f` once, records how long it took, and returns its result.
    #[inline]
    pub fn time<R>(&mut self, f: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let result = f();
        self.record(start.elapsed());
        result
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    /// Slowest round recorded.
    pub fn max(&self) -> Duration {
        self.max
    }

    /// Average round duration, zero when nothing was recorded.
    pub fn average(&self) -> Duration {
        self.average_per(1)
    }

    /// Average duration of one unit when every round handled
    /// `units_per_round` units (e.g. samples).
    pub fn average_per(&self, units_per_round: u64) -> Duration {
        let units = self.rounds.saturating_mul(units_per_round);
        if units == 0 {
            return Duration::ZERO;
        }
        let nanos = self.total.as_nanos() / u128::from(units);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = LatencyStats::new();
        assert_eq!(stats.rounds(), 0);
        assert_eq!(stats.average(), Duration::ZERO);
        assert_eq!(stats.average_per(100), Duration::ZERO);
        assert_eq!(stats.max(), Duration::ZERO);
    }

    #[test]
    fn test_average_and_max() {
        let mut stats = LatencyStats::new();
        stats.record(Duration::from_nanos(100));
        stats.record(Duration::from_nanos(300));
        stats.record(Duration::from_nanos(200));

        assert_eq!(stats.rounds(), 3);
        assert_eq!(stats.total(), Duration::from_nanos(600));
        assert_eq!(stats.max(), Duration::from_nanos(300));
        assert_eq!(stats.average(), Duration::from_nanos(200));
        // 600ns over 3 rounds of 10 samples
        assert_eq!(stats.average_per(10), Duration::from_nanos(20));
    }

    #[test]
    fn test_time_records_one_round() {
        let mut stats = LatencyStats::new();
        let value = stats.time(|| 7);
        assert_eq!(value, 7);
        assert_eq!(stats.rounds(), 1);
        assert_eq!(stats.max(), stats.total());
    }
}
