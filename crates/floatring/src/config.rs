use crate::storage::MIRROR_FACTOR;
use thiserror::Error;

/// Errors reported by [`Config::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A ring must hold at least one sample.
    #[error("ring capacity must be non-zero")]
    ZeroCapacity,
    /// The mirrored backing allocation would not fit in the address space.
    #[error("ring capacity {capacity} overflows the mirrored backing allocation")]
    CapacityOverflow {
        /// The requested capacity.
        capacity: usize,
    },
}

/// Configuration shared by every ring variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of addressable samples in the ring.
    pub capacity: usize,
    /// Enable metrics collection (slight overhead)
    pub enable_metrics: bool,
}

impl Config {
    /// Creates a configuration without validating the capacity.
    ///
    /// Rings built from a zero capacity violate their contract; use
    /// [`Config::try_new`] when the capacity comes from outside the program.
    pub const fn new(capacity: usize, enable_metrics: bool) -> Self {
        Self {
            capacity,
            enable_metrics,
        }
    }

    /// Creates a configuration, rejecting capacities no ring can be built with.
    pub fn try_new(capacity: usize, enable_metrics: bool) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let fits = capacity
            .checked_mul(MIRROR_FACTOR)
            .and_then(|len| len.checked_mul(std::mem::size_of::<f32>()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !fits {
            return Err(ConfigError::CapacityOverflow { capacity });
        }

        Ok(Self::new(capacity, enable_metrics))
    }

    /// Returns a copy with metrics collection switched on or off.
    pub const fn with_metrics(mut self, enable_metrics: bool) -> Self {
        self.enable_metrics = enable_metrics;
        self
    }

    /// Length of the backing allocation, in samples.
    #[inline]
    pub const fn backing_len(&self) -> usize {
        self.capacity * MIRROR_FACTOR
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 4096,
            enable_metrics: false,
        }
    }
}

/// Low latency configuration (512 samples, canonical region fits in L1 cache)
pub const LOW_LATENCY_CONFIG: Config = Config::new(512, false);

/// Capacity used by the latency harness (50K samples)
pub const BENCHMARK_CONFIG: Config = Config::new(50_000, false);
