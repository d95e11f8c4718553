//! Error types for wrapping iterators.

/// Errors raised while setting up progress tracking for an iterator.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The arguments do not allow the total unit count to be resolved.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn unsized_source(lower: usize, upper: Option<usize>) -> Self {
        let upper = upper.map_or_else(|| "unbounded".to_owned(), |u| u.to_string());
        Self::InvalidArgument(format!(
            "an explicit total is required for an iterator without an exact size \
             (size hint: {lower}..{upper})"
        ))
    }
}

/// Shorthand for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;
