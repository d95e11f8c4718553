//! The progress sink abstraction and the default headless sink.
//!
//! Anything that wants to be told "one more unit is done" implements [`Advance`].
//! The crate never draws anything itself; [`Progress`] is a headless sink that only
//! stores state, so a renderer living elsewhere (another thread, a log line, a GUI)
//! can poll it.
//!
//! * **Hot Data:** Position, Total, and Finished state are stored in `Atomic` primitives.
//!   Advancing inside a tight loop never takes a lock.
//! * **Cold Data:** The label is guarded by an [`RwLock`](parking_lot::RwLock) and is
//!   only read when a renderer takes a [`ProgressSnapshot`].

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use compact_str::CompactString;
use parking_lot::RwLock;

/// A sink that is notified as units of work complete.
///
/// Implementors receive one [`advance`](Advance::advance) call per unit. What they do
/// with it (draw a bar, bump a counter, write a log line) is up to them.
pub trait Advance {
    /// Records that `units` more units have completed.
    fn advance(&mut self, units: u64);

    /// Called once when the tracked work runs to completion.
    ///
    /// Not called when the work is abandoned early.
    fn finish(&mut self) {}
}

impl<S: Advance + ?Sized> Advance for &mut S {
    fn advance(&mut self, units: u64) {
        (**self).advance(units);
    }

    fn finish(&mut self) {
        (**self).finish();
    }
}

impl<S: Advance + ?Sized> Advance for Box<S> {
    fn advance(&mut self, units: u64) {
        (**self).advance(units);
    }

    fn finish(&mut self) {
        (**self).finish();
    }
}

/// A thread-safe, cloneable handle to a progress indicator.
///
/// Cloning a `Progress` is cheap (Arc bump) and points to the same underlying state,
/// so keep a clone around to watch a sink that was moved into an iterator.
#[derive(Clone, Debug)]
pub struct Progress {
    pub(crate) name: Arc<RwLock<CompactString>>,

    // Atomic fields for wait-free updates on the hot path.
    pub(crate) position: Arc<AtomicU64>,
    pub(crate) total: Arc<AtomicU64>,
    pub(crate) finished: Arc<AtomicBool>,
}

impl Progress {
    /// Creates a new `Progress` expecting `total` units.
    pub fn new(name: impl Into<CompactString>, total: impl Into<u64>) -> Self {
        Self {
            name: Arc::new(RwLock::new(name.into())),
            position: Arc::new(AtomicU64::new(0)),
            total: Arc::new(AtomicU64::new(total.into())),
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Gets the current label.
    #[must_use]
    pub fn get_name(&self) -> CompactString {
        self.name.read().clone()
    }

    /// Updates the label.
    pub fn set_name(&self, name: impl Into<CompactString>) {
        *self.name.write() = name.into();
    }

    /// Increments the position by `amount`.
    ///
    /// The position is not clamped to the total.
    pub fn inc(&self, amount: impl Into<u64>) {
        self.position.fetch_add(amount.into(), Ordering::Relaxed);
    }

    /// Gets the current position.
    #[must_use]
    pub fn get_pos(&self) -> u64 {
        self.position.load(Ordering::Relaxed)
    }

    /// Sets the absolute position.
    pub fn set_pos(&self, pos: u64) {
        self.position.store(pos, Ordering::Relaxed);
    }

    /// Gets the total expected count.
    #[must_use]
    pub fn get_total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Updates the total expected count.
    pub fn set_total(&self, total: u64) {
        self.total.store(total, Ordering::Relaxed);
    }

    /// Checks if the work is marked as finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Marks the work as finished.
    pub fn finish(&self) {
        self.finished.store(true, Ordering::Release);
    }

    /// Returns the current completion percentage.
    ///
    /// Returns `0.0` if `total` is zero. Values above `100.0` mean more units were
    /// reported than expected.
    #[must_use]
    pub fn get_percent(&self) -> f64 {
        percent(self.get_pos(), self.get_total())
    }

    /// Returns a shared reference to the atomic position counter.
    #[must_use]
    pub fn atomic_pos(&self) -> Arc<AtomicU64> {
        self.position.clone()
    }

    /// Creates a consistent snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.into()
    }
}

impl Advance for Progress {
    fn advance(&mut self, units: u64) {
        self.inc(units);
    }

    fn finish(&mut self) {
        Self::finish(self);
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(position: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (position as f64 / total as f64) * 100.0
    }
}

/// A plain-data snapshot of a [`Progress`] at a specific point in time.
///
/// Holds owned data, so a renderer can read it without locking.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressSnapshot {
    name: CompactString,
    position: u64,
    total: u64,
    finished: bool,
}

impl From<&Progress> for ProgressSnapshot {
    fn from(progress: &Progress) -> Self {
        Self {
            name: progress.get_name(),
            position: progress.get_pos(),
            total: progress.get_total(),
            finished: progress.is_finished(),
        }
    }
}

impl ProgressSnapshot {
    /// Returns the label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the position.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Returns the total expected count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns whether the work was finished.
    #[must_use]
    pub const fn finished(&self) -> bool {
        self.finished
    }

    /// Returns the completion percentage, see [`Progress::get_percent`].
    #[must_use]
    pub fn percent(&self) -> f64 {
        percent(self.position, self.total)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::{Advance, Progress};

    /// Basic Lifecycle
    /// New -> Advance -> Finish.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_basic_lifecycle() {
        let mut p = Progress::new("job", 100u64);

        assert_eq!(p.get_pos(), 0);
        assert!(!p.is_finished());
        assert_eq!(p.get_percent(), 0.0);

        p.advance(50);
        assert_eq!(p.get_pos(), 50);
        assert_eq!(p.get_percent(), 50.0);

        Advance::finish(&mut p);
        assert!(p.is_finished());
    }

    /// Overflow Passthrough
    /// Reporting more units than the total is stored unmodified.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_overflow_is_not_clamped() {
        let mut p = Progress::new("over", 2u64);
        for _ in 0..3 {
            p.advance(1);
        }

        assert_eq!(p.get_pos(), 3);
        assert_eq!(p.get_percent(), 150.0);
    }

    /// Zero Total
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_zero_total_percent() {
        let mut p = Progress::new("empty", 0u64);
        p.advance(4);
        assert_eq!(p.get_percent(), 0.0);
    }

    /// Clones share state, so an observer sees a sink moved elsewhere.
    #[test]
    fn test_clone_observes_updates() {
        let p = Progress::new("shared", 1000u64);
        let mut handles = vec![];

        for _ in 0..10 {
            let mut p_ref = p.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    p_ref.advance(1);
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(p.get_pos(), 1000, "Atomic updates should be lossless");
    }

    fn drive_one(mut sink: impl Advance) {
        sink.advance(1);
    }

    /// Forwarding impls reach the underlying sink.
    #[test]
    fn test_forwarding_impls() {
        let mut p = Progress::new("fwd", 3u64);

        drive_one(&mut p);
        let mut boxed: Box<dyn Advance> = Box::new(p.clone());
        boxed.advance(2);
        boxed.finish();

        assert_eq!(p.get_pos(), 3);
        assert!(p.is_finished());
    }

    #[test]
    fn test_absolute_setters() {
        let p = Progress::new("reset", 5u64);
        p.inc(3u64);

        p.set_pos(1);
        p.set_total(8);

        assert_eq!(p.get_pos(), 1);
        assert_eq!(p.get_total(), 8);
    }

    #[test]
    fn test_snapshot() {
        let p = Progress::new("before", 10u64);
        p.set_name("after");
        p.inc(4u64);

        let snap = p.snapshot();
        p.inc(1u64);

        assert_eq!(snap.name(), "after");
        assert_eq!(snap.position(), 4);
        assert_eq!(snap.total(), 10);
        assert!(!snap.finished());
        assert!((snap.percent() - 40.0).abs() < f64::EPSILON);
        assert_eq!(p.snapshot().position(), 5, "New snapshot reflects updates");
    }
}
