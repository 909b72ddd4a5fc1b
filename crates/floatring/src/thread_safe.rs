use crate::storage::MirroredStorage;
use crate::{Config, Metrics, MetricsSnapshot, RingBuffer};
use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

// =============================================================================
// LOCKING STRATEGY
// =============================================================================
//
// The read side is serialized; the write side is not.
//
// - `reset`, `read` and `read_into` run under `read_pos`'s mutex, so they are
//   totally ordered against each other. A read never observes half of a reset.
// - `write` and `write_slice` take no lock. `write_pos` is an atomic with a
//   load-compute-store update, so two concurrent writers can lose an advance
//   or overwrite each other's samples. Cursors still stay in range.
// - A read racing a write may observe a partially applied write.
//
// Use `StrictRing` when multiple writers need a coherent write cursor.
//
// =============================================================================

/// Sample ring whose reads and resets are serialized by a mutex.
///
/// Any number of readers and resetters may share it. Writers are not locked:
/// one writer thread is safe, several may race on the write cursor.
#[derive(Debug)]
pub struct ThreadSafeRing {
    /// Next canonical slot to write (unlocked)
    write_pos: CachePadded<AtomicUsize>,
    /// Next canonical slot to read; the mutex also serializes resets
    read_pos: Mutex<usize>,
    storage: MirroredStorage,
    metrics: Metrics,
    config: Config,
}

impl ThreadSafeRing {
    /// Creates a zeroed ring with the given configuration.
    pub fn new(config: Config) -> Self {
        let storage = MirroredStorage::new(config.capacity);
        tracing::debug!(
            variant = "thread_safe",
            capacity = config.capacity,
            backing_len = storage.backing_len(),
            "allocated ring storage"
        );

        Self {
            write_pos: CachePadded::new(AtomicUsize::new(0)),
            read_pos: Mutex::new(0),
            storage,
            metrics: Metrics::new(),
            config,
        }
    }

    /// Creates a zeroed ring of `capacity` samples with metrics disabled.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(Config::new(capacity, false))
    }

    /// Current write cursor.
    #[inline]
    pub fn write_pos(&self) -> usize {
        self.write_pos.load(Ordering::Relaxed)
    }

    /// Current read cursor. Takes the read-side lock.
    pub fn read_pos(&self) -> usize {
        *self.lock_read_side()
    }

    /// Get a snapshot of metrics if enabled.
    pub fn metrics(&self) -> MetricsSnapshot {
        if self.config.enable_metrics {
            self.metrics.snapshot()
        } else {
            MetricsSnapshot::default()
        }
    }

    /// Acquires the read-side lock.
    ///
    /// A reader that panicked mid-copy leaves only valid samples and an
    /// in-range cursor behind, so a poisoned lock is taken over as is.
    #[inline]
    fn lock_read_side(&self) -> MutexGuard<'_, usize> {
        self.read_pos.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RingBuffer for ThreadSafeRing {
    fn reset(&self) {
        let mut read_pos = self.lock_read_side();
        self.storage.clear();
        self.write_pos.store(0, Ordering::Relaxed);
        *read_pos = 0;
        drop(read_pos);

        if self.config.enable_metrics {
            self.metrics.add_resets(1);
        }
    }

    #[inline]
    fn write(&self, sample: f32) {
        let pos = self.write_pos.load(Ordering::Relaxed);
        let next = self.storage.store(pos, sample);
        self.write_pos.store(next, Ordering::Relaxed);

        if self.config.enable_metrics {
            self.metrics.add_samples_written(1);
        }
    }

    #[inline]
    fn write_slice(&self, samples: &[f32]) {
        let pos = self.write_pos.load(Ordering::Relaxed);
        let next = self.storage.store_slice(pos, samples);
        self.write_pos.store(next, Ordering::Relaxed);

        if self.config.enable_metrics {
            self.metrics.add_samples_written(samples.len() as u64);
            self.metrics.add_bulk_writes(1);
        }
    }

    fn read(&self) -> f32 {
        let mut read_pos = self.lock_read_side();
        let (sample, next) = self.storage.load(*read_pos);
        *read_pos = next;
        drop(read_pos);

        if self.config.enable_metrics {
            self.metrics.add_samples_read(1);
        }

        sample
    }

    fn read_into(&self, out: &mut [f32]) {
        let mut read_pos = self.lock_read_side();
        *read_pos = self.storage.load_into(*read_pos, out);
        drop(read_pos);

        if self.config.enable_metrics {
            self.metrics.add_samples_read(out.len().min(self.capacity()) as u64);
            self.metrics.add_bulk_reads(1);
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.storage.capacity()
    }
}
