//! Fully locked sample ring.
//!
//! [`StrictRing`] has the same layout and cursor arithmetic as the other
//! variants, but every operation, writes included, runs under one mutex that
//! owns both cursors. It is the variant to reach for when several producers
//! share a ring: bulk writes become atomic with respect to reads, resets and
//! other writes.

use crate::storage::MirroredStorage;
use crate::{Config, Metrics, MetricsSnapshot, RingBuffer};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Cursors {
    write_pos: usize,
    read_pos: usize,
}

/// Sample ring with every operation serialized by a single mutex.
#[derive(Debug)]
pub struct StrictRing {
    cursors: Mutex<Cursors>,
    storage: MirroredStorage,
    metrics: Metrics,
    config: Config,
}

impl StrictRing {
    /// Creates a zeroed ring with the given configuration.
    pub fn new(config: Config) -> Self {
        let storage = MirroredStorage::new(config.capacity);
        tracing::debug!(
            variant = "strict",
            capacity = config.capacity,
            backing_len = storage.backing_len(),
            "allocated ring storage"
        );

        Self {
            cursors: Mutex::new(Cursors::default()),
            storage,
            metrics: Metrics::new(),
            config,
        }
    }

    /// Creates a zeroed ring of `capacity` samples with metrics disabled.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(Config::new(capacity, false))
    }

    /// Current `(write_pos, read_pos)`, read under one lock acquisition.
    pub fn positions(&self) -> (usize, usize) {
        let cursors = self.lock();
        (cursors.write_pos, cursors.read_pos)
    }

    /// Get a snapshot of metrics if enabled.
    pub fn metrics(&self) -> MetricsSnapshot {
        if self.config.enable_metrics {
            self.metrics.snapshot()
        } else {
            MetricsSnapshot::default()
        }
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, Cursors> {
        self.cursors.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RingBuffer for StrictRing {
    fn reset(&self) {
        let mut cursors = self.lock();
        self.storage.clear();
        *cursors = Cursors::default();
        drop(cursors);

        if self.config.enable_metrics {
            self.metrics.add_resets(1);
        }
    }

    fn write(&self, sample: f32) {
        let mut cursors = self.lock();
        cursors.write_pos = self.storage.store(cursors.write_pos, sample);
        drop(cursors);

        if self.config.enable_metrics {
            self.metrics.add_samples_written(1);
        }
    }

    fn write_slice(&self, samples: &[f32]) {
        let mut cursors = self.lock();
        cursors.write_pos = self.storage.store_slice(cursors.write_pos, samples);
        drop(cursors);

        if self.config.enable_metrics {
            self.metrics.add_samples_written(samples.len() as u64);
            self.metrics.add_bulk_writes(1);
        }
    }

    fn read(&self) -> f32 {
        let mut cursors = self.lock();
        let (sample, next) = self.storage.load(cursors.read_pos);
        cursors.read_pos = next;
        drop(cursors);

        if self.config.enable_metrics {
            self.metrics.add_samples_read(1);
        }

        sample
    }

    fn read_into(&self, out: &mut [f32]) {
        let mut cursors = self.lock();
        cursors.read_pos = self.storage.load_into(cursors.read_pos, out);
        drop(cursors);

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
