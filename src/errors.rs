//! Crate-specific error types for mmap-cursor.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for mmap-cursor operations.
pub type Result<T> = std::result::Result<T, MmapCursorError>;

/// Error type covering resource acquisition, bounds, and argument failures.
#[derive(Debug, Error)]
pub enum MmapCursorError {
    /// The underlying file could not be opened for reading.
    #[error("failed to open {}: {source}", .path.display())]
    OpenFailed {
        /// Path that was requested.
        path: PathBuf,
        /// OS diagnostic.
        #[source]
        source: io::Error,
    },

    /// A mapping could not be established over the opened file.
    #[error("failed to map {}: {source}", .path.display())]
    MapFailed {
        /// Path of the opened file.
        path: PathBuf,
        /// OS diagnostic.
        #[source]
        source: io::Error,
    },

    /// A memory view could not be created over the mapping.
    #[error("failed to create view of {}: {source}", .path.display())]
    ViewFailed {
        /// Path of the mapped file.
        path: PathBuf,
        /// OS diagnostic.
        #[source]
        source: io::Error,
    },

    /// A position, read length, or scan would leave the mapped range.
    #[error("range out of bounds: offset={offset}, len={len}, total={total}")]
    OutOfBounds {
        /// Requested offset.
        offset: u64,
        /// Requested length.
        len: u64,
        /// Total size of the mapped file.
        total: u64,
    },

    /// A structurally invalid argument was supplied.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The file has been explicitly closed and its mapping released.
    #[error("mapped file is closed")]
    Closed,

    /// The OS rejected an access pattern hint.
    #[error("advice failed: {0}")]
    AdviceFailed(String),
}
