//! FloatRing - Mirrored Ring Buffers for `f32` Sample Streams
//!
//! A fixed-capacity circular buffer for a continuous stream of samples. Writes
//! always overwrite and reads always return something (zeros after a reset,
//! stale samples otherwise); there is no empty/full state and no backpressure.
//!
//! # Layout
//!
//! Each ring allocates three ring-widths of storage and addresses the middle
//! third. Bulk writes are copied twice, once at the write cursor and once one
//! ring-width to the left, so a write that wraps never has to be split.
//!
//! # Variants
//!
//! | Type | Writers | Readers / resetters | Locking |
//! |------|---------|---------------------|---------|
//! | [`NonBlockingRing`] | 1 | 1 | none |
//! | [`ThreadSafeRing`] | 1 (more may race) | any | reads and reset |
//! | [`StrictRing`] | any | any | everything |
//!
//! All three implement [`RingBuffer`] and can be shared as
//! `Arc<dyn RingBuffer>`.
//!
//! # Example
//!
//! ```
//! use floatring_rs::{NonBlockingRing, RingBuffer};
//!
//! let ring = NonBlockingRing::with_capacity(10);
//!
//! ring.write(0.5);
//! assert_eq!(ring.read(), 0.5);
//!
//! ring.write_slice(&[1.0, 1.1, 1.2, 1.3]);
//! let mut out = [0.0; 4];
//! ring.read_into(&mut out);
//! assert_eq!(out, [1.0, 1.1, 1.2, 1.3]);
//!
//! ring.reset();
//! assert_eq!(ring.read(), 0.0);
//! ```

mod config;
mod invariants;
mod latency;
mod metrics;
mod non_blocking;
mod position;
mod storage;
mod strict;
mod thread_safe;

pub use config::{Config, ConfigError, BENCHMARK_CONFIG, LOW_LATENCY_CONFIG};
pub use latency::LatencyStats;
pub use metrics::{Metrics, MetricsSnapshot};
pub use non_blocking::NonBlockingRing;
pub use storage::MIRROR_FACTOR;
pub use strict::StrictRing;
pub use thread_safe::ThreadSafeRing;

/// Operations every sample ring provides.
///
/// None of them fail. Lengths are not validated: behaviour past the documented
/// wrap rules follows the cursor arithmetic, and a bulk write whose end falls
/// beyond twice the capacity panics on the slice bound.
pub trait RingBuffer: Send + Sync {
    /// Zero-fills the canonical region and rewinds both cursors to 0.
    fn reset(&self);

    /// Stores one sample at the write cursor and advances it.
    ///
    /// Scalar writes only touch the canonical slot, never the mirror.
    fn write(&self, sample: f32);

    /// Stores `samples` at the write cursor (and at its mirror) and advances
    /// the cursor by `samples.len()`, wrapping at capacity.
    fn write_slice(&self, samples: &[f32]);

    /// Returns the sample at the read cursor and advances it.
    fn read(&self) -> f32;

    /// Fills `out` from the read cursor.
    ///
    /// If `out.len() >= capacity`, the whole canonical region is copied from
    /// offset 0 into `out[..capacity]` and the read cursor restarts at 0.
    /// A read that crosses the end of the ring is copied in two segments, both
    /// starting at the read cursor.
    fn read_into(&self, out: &mut [f32]);

    /// Number of addressable samples.
    fn capacity(&self) -> usize;
}
