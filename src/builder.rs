//! Fluent interface for configuring [`Progress`] sinks.
//!
//! [`Progress::new`] covers the common case. The [`ProgressBuilder`] exists for callers
//! that need several handles to share one counter, for example a renderer that
//! watches a single global position while several wrapped iterators feed it, or an
//! external system that already owns an `Arc<AtomicU64>`.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64},
};

use compact_str::CompactString;
use parking_lot::RwLock;

use crate::progress::Progress;

/// A builder for [`Progress`] instances.
#[derive(Default)]
pub struct ProgressBuilder {
    name: CompactString,
    total: u64,
    // Optional shared atomic references
    atomic_pos: Option<Arc<AtomicU64>>,
    atomic_total: Option<Arc<AtomicU64>>,
}

impl ProgressBuilder {
    /// Starts building a sink that expects `total` units.
    #[must_use]
    pub fn new(name: impl Into<CompactString>, total: impl Into<u64>) -> Self {
        Self {
            name: name.into(),
            total: total.into(),
            ..Default::default()
        }
    }

    /// Sets a pre-existing atomic counter for the position.
    #[must_use]
    pub fn with_atomic_pos(mut self, atomic_pos: Arc<AtomicU64>) -> Self {
        self.atomic_pos = Some(atomic_pos);
        self
    }

    /// Sets a pre-existing atomic counter for the total.
    ///
    /// The counter's current value wins over the total given to [`new`](Self::new).
    #[must_use]
    pub fn with_atomic_total(mut self, atomic_total: Arc<AtomicU64>) -> Self {
        self.atomic_total = Some(atomic_total);
        self
    }

    /// Consumes the builder and returns the configured [`Progress`].
    #[must_use]
    pub fn build(self) -> Progress {
        Progress {
            name: Arc::new(RwLock::new(self.name)),
            position: self
                .atomic_pos
                .unwrap_or_else(|| Arc::new(AtomicU64::new(0))),
            total: self
                .atomic_total
                .unwrap_or_else(|| Arc::new(AtomicU64::new(self.total))),
            finished: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    };

    use super::ProgressBuilder;
    use crate::iter::ProgressIteratorExt as _;

    #[test]
    fn test_defaults() {
        let p = ProgressBuilder::new("plain", 7u64).build();

        assert_eq!(p.get_name(), "plain");
        assert_eq!(p.get_total(), 7);
        assert_eq!(p.get_pos(), 0);
        assert!(!p.is_finished());
    }

    /// Shared State Injection
    /// Two wrapped iterators feeding the same position counter.
    #[test]
    fn test_shared_position_across_iterators() {
        let shared_pos = Arc::new(AtomicU64::new(0));

        let first = ProgressBuilder::new("first", 6u64)
            .with_atomic_pos(shared_pos.clone())
            .build();
        let second = ProgressBuilder::new("second", 6u64)
            .with_atomic_pos(shared_pos.clone())
            .build();

        let a: Vec<_> = (0..2).progress_with(first).collect();
        let b: Vec<_> = (0..4).progress_with(second.clone()).collect();

        assert_eq!(a.len() + b.len(), 6);
        assert_eq!(shared_pos.load(Ordering::Relaxed), 6);
        assert_eq!(second.get_pos(), 6, "handles see each other's updates");
        assert!(Arc::ptr_eq(&second.atomic_pos(), &shared_pos));
    }

    #[test]
    fn test_shared_total_overrides_builder_total() {
        let shared_total = Arc::new(AtomicU64::new(42));
        let p = ProgressBuilder::new("t", 1u64)
            .with_atomic_total(shared_total.clone())
            .build();

        assert_eq!(p.get_total(), 42);
        shared_total.store(50, Ordering::Relaxed);
        assert_eq!(p.get_total(), 50);
    }
}
