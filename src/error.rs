//! Error types for block list operations.

use thiserror::Error;

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything a block list operation can fail with.
#[derive(Error, Debug)]
pub enum Error {
    /// A positional read, write, or removal outside `[0, len)`.
    #[error("index ({index}) is out of bounds [0 <= i < {len}]")]
    IndexOutOfBounds { index: usize, len: usize },

    /// An insertion position outside `[0, len]`.
    #[error("insert index ({index}) is out of bounds [0 <= i <= {len}]")]
    InsertOutOfBounds { index: usize, len: usize },

    /// The list was structurally changed behind a cursor's back.
    #[error("list was modified during iteration (expected revision {expected}, found {found})")]
    ConcurrentModification { expected: u64, found: u64 },

    /// Cursor removal with no element yielded since the last removal.
    #[error("cursor has no current element to remove")]
    NoCurrentElement,

    /// Operation that block lists deliberately do not provide.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Rejected construction parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O failure while reading or writing a snapshot.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot stream that does not describe a valid list.
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
}

impl Error {
    /// Create a corrupt snapshot error
    pub fn corrupt(msg: impl Into<String>) -> Self {
        return Error::CorruptSnapshot(msg.into());
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        return Error::InvalidConfig(msg.into());
    }

    /// Whether this error signals an out-of-range position.
    pub fn is_out_of_bounds(&self) -> bool {
        return matches!(
            self,
            Error::IndexOutOfBounds { .. } | Error::InsertOutOfBounds { .. }
        );
    }
}
