use std::sync::atomic::{AtomicU64, Ordering};

/// Optional counters for monitoring ring traffic.
///
/// Counters are updated with Relaxed ordering and only when
/// `Config::enable_metrics` is set on the owning ring.
#[derive(Debug, Default)]
pub struct Metrics {
    samples_written: AtomicU64,
    samples_read: AtomicU64,
    bulk_writes: AtomicU64,
    bulk_reads: AtomicU64,
    resets: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn add_samples_written(&self, n: u64) {
        self.samples_written.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn add_samples_read(&self, n: u64) {
        self.samples_read.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn add_bulk_writes(&self, n: u64) {
        self.bulk_writes.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn add_bulk_reads(&self, n: u64) {
        self.bulk_reads.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn add_resets(&self, n: u64) {
        self.resets.fetch_add(n, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            samples_written: self.samples_written.load(Ordering::Relaxed),
            samples_read: self.samples_read.load(Ordering::Relaxed),
            bulk_writes: self.bulk_writes.load(Ordering::Relaxed),
            bulk_reads: self.bulk_reads.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`Metrics`] at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Samples stored, scalar and bulk.
    pub samples_written: u64,
    /// Samples copied out, scalar and bulk.
    pub samples_read: u64,
    pub bulk_writes: u64,
    pub bulk_reads: u64,
    pub resets: u64,
}
