//! High-level convenience functions.
//!
//! Each function opens its own mapping and releases it before returning.

use std::path::Path;

use crate::errors::{MmapCursorError, Result};
use crate::mmap::MappedFile;
use crate::scan::ScanMode;

/// Open `path` read-only with default options.
///
/// # Errors
///
/// Returns errors from `MappedFile::open`.
pub fn open_mapped<P: AsRef<Path>>(path: P) -> Result<MappedFile> {
    MappedFile::open(path)
}

/// Read the whole file through a single mapping.
///
/// # Errors
///
/// Returns errors from `MappedFile::open`.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let mut file = MappedFile::open(path)?;
    file.read(file.len())
}

/// Split the file into `marker`-terminated records.
///
/// Returns the records and the bytes after the last marker (empty when the
/// file ends with a marker).
///
/// # Errors
///
/// Returns errors from `MappedFile::open`.
/// Returns `MmapCursorError::InvalidArgument` if `marker` is empty.
pub fn split_file<P: AsRef<Path>>(
    path: P,
    marker: &[u8],
    mode: ScanMode,
) -> Result<(Vec<Vec<u8>>, Vec<u8>)> {
    if marker.is_empty() {
        return Err(MmapCursorError::InvalidArgument("marker must not be empty"));
    }
    let mut file = MappedFile::open(path)?;
    let mut records = Vec::new();
    loop {
        match file.read_until_with(marker, mode) {
            Ok(record) => records.push(record),
            Err(MmapCursorError::OutOfBounds { .. }) => break,
            Err(e) => return Err(e),
        }
    }
    let tail = file.read(file.remaining())?;
    Ok((records, tail))
}
