//! # mmap-cursor: cursor-oriented reading of memory-mapped files
//!
//! This crate maps a file read-only once and serves every subsequent read as a
//! bounds-checked slice of that mapping, with no per-read system calls. It is
//! aimed at parsers of large binary formats, logs, and delimited records.
//!
//! ## Features
//!
//! - **Zero-copy I/O**: borrow bytes straight from the mapping, or copy them out
//! - **Cursor reads**: fixed-length reads and marker-terminated reads that
//!   advance a single read position
//! - **Strict bounds**: a failed read never moves the cursor
//! - **Deterministic release**: explicit, idempotent `close()` plus release on drop
//! - **Cross-platform**: Windows, Linux, macOS via memmap2
//!
//! ## Quick Start
//!
//! ```no_run
//! use mmap_cursor::MappedFile;
//!
//! let mut file = MappedFile::open("strings.bin")?;
//!
//! let magic = file.read(4)?;
//! let name = file.read_until(b"\0")?;
//! file.set_position(0)?;
//! # Ok::<(), mmap_cursor::MmapCursorError>(())
//! ```
//!
//! ## Modules
//!
//! - [`errors`]: Error types for all operations
//! - [`utils`]: Page size and bounds checking helpers
//! - [`mmap`]: Core `MappedFile` implementation
//! - [`scan`]: Marker scanning modes
//! - [`builder`]: Open-time configuration
//! - [`manager`]: High-level convenience functions
//!
//! ## Feature Flags
//!
//! - `advise` (default): access pattern hints via `MappedFile::advise`
//! - `iterator` (default): record and chunk iterators

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(missing_docs)]

pub mod errors;
pub mod utils;
pub mod mmap;
pub mod scan;
pub mod builder;
pub mod manager;

mod region;

#[cfg(feature = "advise")]
pub mod advise;

#[cfg(feature = "iterator")]
pub mod iterator;

pub use builder::MappedFileBuilder;
pub use errors::{MmapCursorError, Result};
pub use mmap::MappedFile;
pub use scan::ScanMode;
pub use manager::{open_mapped, read_file, split_file};

#[cfg(feature = "advise")]
pub use advise::MmapAdvice;
