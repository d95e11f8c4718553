//! # `progbar`
//!
//! Wrap any iterator so that every item it yields first advances a progress sink.
//!
//! The crate is headless: it counts, it does not draw. The sink is anything that
//! implements [`Advance`], and the default [`Progress`] handle just stores position
//! and total in atomics so a renderer can poll it from wherever it lives.
//!
//! ```
//! use progbar::{Error, wrap};
//!
//! let bar = wrap(vec!["a", "b", "c"], None)?;
//! let handle = bar.sink().clone();
//!
//! for (index, letter) in bar.enumerate() {
//!     // the item in hand is already counted
//!     assert_eq!(handle.get_pos(), index as u64 + 1);
//!     assert!(!letter.is_empty());
//! }
//!
//! // No exact size and no explicit total: rejected before anything is pulled.
//! let unsized_source = (0..10).filter(|i| i % 2 == 0);
//! assert!(matches!(wrap(unsized_source, None), Err(Error::InvalidArgument(_))));
//! # Ok::<(), Error>(())
//! ```
//!
//! ## Modules
//!
//! * [`builder`]: Fluent configuration for [`Progress`] sinks, including shared counters.
//! * [`error`]: The crate's [`Error`] type.
//! * [`iter`]: [`wrap`] and the [`ProgressIteratorExt`] extension trait.
//! * [`progress`]: The [`Advance`] sink trait and the headless [`Progress`] handle.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod builder;
pub mod error;
pub mod iter;
pub mod progress;

pub use builder::ProgressBuilder;
pub use error::{Error, Result};
pub use iter::{ProgressIter, ProgressIteratorExt, wrap, wrap_exact, wrap_with};
pub use progress::{Advance, Progress, ProgressSnapshot};
