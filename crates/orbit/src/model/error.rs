//! Error types for the model layer.

use thiserror::Error;

/// Errors raised by an [`ObservableList`](super::ObservableList).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// The index does not address an item (or insertion point) of the list.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The list was created with a capacity limit and is full.
    #[error("list capacity of {capacity} items exceeded")]
    CapacityExceeded { capacity: usize },
}

/// Result type for source list operations.
pub type ListResult<T> = Result<T, ListError>;

/// Errors raised by the cyclic adapter and the selection-wrap coordinator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    /// An outer index outside `[0, count)`.
    #[error("outer index {index} out of range for cyclic view of {count} items")]
    IndexOutOfRange { index: usize, count: usize },

    /// A missing source, a zero cross length, or another unusable argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A failure raised by the underlying source list, forwarded unchanged.
    #[error(transparent)]
    Source(#[from] ListError),

    /// A configuration fragment that could not be parsed.
    #[error("invalid cycle configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for cyclic adapter operations.
pub type CycleResult<T> = Result<T, CycleError>;
