//! Iterator adapters that advance a progress sink once per yielded item.
//!
//! [`wrap`] is the main entry point. It resolves the total unit count up front, then
//! returns a lazy [`ProgressIter`] that pulls from the source one item at a time.
//!
//! # Resolving the total
//!
//! * An explicit total always wins and is passed to the sink as-is.
//! * Otherwise the iterator must report an exact size through
//!   [`Iterator::size_hint`] (lower bound equal to upper bound).
//! * Otherwise [`Error::InvalidArgument`] is returned before any item is pulled.
//!
//! The declared total is never checked against the number of items actually produced.
//!
//! # Example
//!
//! ```
//! use progbar::ProgressIteratorExt;
//!
//! let bar = (0..3).progress()?;
//! let handle = bar.sink().clone();
//!
//! let squares: Vec<_> = bar.map(|i| i * i).collect();
//!
//! assert_eq!(squares, [0, 1, 4]);
//! assert_eq!(handle.get_pos(), 3);
//! # Ok::<(), progbar::Error>(())
//! ```

use std::iter::FusedIterator;

use compact_str::CompactString;
use tracing::debug;

use crate::{
    error::{Error, Result},
    progress::{Advance, Progress},
};

/// An iterator adapter that advances a sink for every item it yields.
///
/// The sink is advanced by one unit *before* the item is handed back, so anyone
/// watching the sink while the consumer holds an item already sees that item counted.
#[derive(Debug)]
pub struct ProgressIter<I, S = Progress> {
    iter: I,
    sink: S,
    finished: bool,
}

impl<I, S> ProgressIter<I, S> {
    /// Creates a new `ProgressIter`.
    ///
    /// No total is resolved here; the sink is used exactly as given. This is usually
    /// constructed via [`wrap`] or the [`ProgressIteratorExt`] methods.
    pub const fn new(iter: I, sink: S) -> Self {
        Self {
            iter,
            sink,
            finished: false,
        }
    }

    /// Borrows the sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the wrapped iterator and the sink.
    pub fn into_parts(self) -> (I, S) {
        (self.iter, self.sink)
    }
}

impl<I: Iterator, S: Advance> Iterator for ProgressIter<I, S> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.iter.next() {
            self.sink.advance(1);
            return Some(item);
        }

        if !self.finished {
            self.finished = true;
            self.sink.finish();
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I: ExactSizeIterator, S: Advance> ExactSizeIterator for ProgressIter<I, S> {}

impl<I: FusedIterator, S: Advance> FusedIterator for ProgressIter<I, S> {}

/// Wraps `source` so that a fresh [`Progress`] advances once per item.
///
/// `total` is required when the iterator cannot report an exact size.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `total` is `None` and the iterator's size
/// hint is not exact. The source is not advanced in that case.
pub fn wrap<I: IntoIterator>(source: I, total: Option<u64>) -> Result<ProgressIter<I::IntoIter>> {
    wrap_with(source, total, unnamed)
}

/// Like [`wrap`], but the sink is built by `make_sink` from the resolved total.
///
/// `make_sink` is only called once the total is resolved.
///
/// # Errors
///
/// Same as [`wrap`].
pub fn wrap_with<I, S, F>(
    source: I,
    total: Option<u64>,
    make_sink: F,
) -> Result<ProgressIter<I::IntoIter, S>>
where
    I: IntoIterator,
    S: Advance,
    F: FnOnce(u64) -> S,
{
    let iter = source.into_iter();
    let total = resolve_total(&iter, total)?;
    Ok(ProgressIter::new(iter, make_sink(total)))
}

/// Wraps an iterator whose length is known from its type.
pub fn wrap_exact<I>(source: I) -> ProgressIter<I::IntoIter>
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
{
    let iter = source.into_iter();
    let total = iter.len() as u64;
    debug!(total, origin = "len", "resolved progress total");
    ProgressIter::new(iter, unnamed(total))
}

fn unnamed(total: u64) -> Progress {
    Progress::new(CompactString::default(), total)
}

fn resolve_total<I: Iterator>(iter: &I, total: Option<u64>) -> Result<u64> {
    if let Some(total) = total {
        debug!(total, origin = "explicit", "resolved progress total");
        return Ok(total);
    }

    match iter.size_hint() {
        (lower, Some(upper)) if lower == upper => {
            let total = upper as u64;
            debug!(total, origin = "size_hint", "resolved progress total");
            Ok(total)
        }
        (lower, upper) => {
            debug!(lower, ?upper, "cannot resolve progress total");
            Err(Error::unsized_source(lower, upper))
        }
    }
}

/// Extension trait to attach progress tracking to any [`Iterator`].
pub trait ProgressIteratorExt: Iterator + Sized {
    /// Wraps the iterator in an unnamed [`Progress`], taking the total from the size hint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the iterator has no exact size.
    fn progress(self) -> Result<ProgressIter<Self>>;

    /// Same as [`progress`](Self::progress), with a label on the [`Progress`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the iterator has no exact size.
    fn progress_with_name(self, name: impl Into<CompactString>) -> Result<ProgressIter<Self>>;

    /// Wraps the iterator in a [`Progress`] expecting `total` units.
    fn progress_count(self, total: u64) -> ProgressIter<Self>;

    /// Wraps the iterator using an existing sink.
    fn progress_with<S: Advance>(self, sink: S) -> ProgressIter<Self, S>;
}

impl<I: Iterator> ProgressIteratorExt for I {
    fn progress(self) -> Result<ProgressIter<Self>> {
        wrap(self, None)
    }

    fn progress_with_name(self, name: impl Into<CompactString>) -> Result<ProgressIter<Self>> {
        wrap_with(self, None, |total| Progress::new(name, total))
    }

    fn progress_count(self, total: u64) -> ProgressIter<Self> {
        debug!(total, origin = "explicit", "resolved progress total");
        ProgressIter::new(self, unnamed(total))
    }

    fn progress_with<S: Advance>(self, sink: S) -> ProgressIter<Self, S> {
        ProgressIter::new(self, sink)
    }
}
