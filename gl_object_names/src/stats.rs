/// Translation statistics shared by every context of a virtualizer.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of a virtualizer's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VirtualizerStats {
    /// Application names handed out by gen
    pub generated: u64,
    /// Names realized on the driver (first bind or first translation)
    pub realized: u64,
    /// Driver objects destroyed (delete and teardown)
    pub destroyed: u64,
    /// Driver bind calls issued
    pub binds: u64,
    /// Driver names translated back to application names
    pub translated_back: u64,
}

/// Thread-safe counters (atomics, no lock)
pub(crate) struct StatsTracker {
    generated: AtomicU64,
    realized: AtomicU64,
    destroyed: AtomicU64,
    binds: AtomicU64,
    translated_back: AtomicU64,
}

impl StatsTracker {
    pub(crate) const fn new() -> Self {
        Self {
            generated: AtomicU64::new(0),
            realized: AtomicU64::new(0),
            destroyed: AtomicU64::new(0),
            binds: AtomicU64::new(0),
            translated_back: AtomicU64::new(0),
        }
    }

    pub(crate) fn add_generated(&self, count: usize) {
        self.generated.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub(crate) fn add_realized(&self) {
        self.realized.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_destroyed(&self, count: usize) {
        self.destroyed.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub(crate) fn add_bind(&self) {
        self.binds.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_translated_back(&self) {
        self.translated_back.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> VirtualizerStats {
        VirtualizerStats {
            generated: self.generated.load(Ordering::Relaxed),
            realized: self.realized.load(Ordering::Relaxed),
            destroyed: self.destroyed.load(Ordering::Relaxed),
            binds: self.binds.load(Ordering::Relaxed),
            translated_back: self.translated_back.load(Ordering::Relaxed),
        }
    }
}
