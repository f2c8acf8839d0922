//! Cursor-oriented reader over a read-only memory-mapped file.

use std::path::{Path, PathBuf};

use crate::builder::MappedFileBuilder;
use crate::errors::{MmapCursorError, Result};
use crate::region::MappedRegion;
use crate::scan::{find_marker, ScanMode};
use crate::utils::{ensure_in_bounds, slice_range};

const ERR_EMPTY_MARKER: &str = "marker must not be empty";

/// Read-only memory-mapped file with a movable read cursor.
///
/// The file is mapped once at open; every read afterwards is a bounds-checked
/// slice of that mapping. The cursor always stays within `[0, len()]`, and a
/// failed operation leaves it exactly where it was.
///
/// # Examples
///
/// ```no_run
/// use mmap_cursor::MappedFile;
///
/// let mut file = MappedFile::open("records.bin")?;
///
/// // Fixed-width header, then a NUL-terminated name.
/// let header = file.read(16)?;
/// let name = file.read_until(b"\0")?;
///
/// assert_eq!(header.len(), 16);
/// println!("{} bytes left after {:?}", file.remaining(), name);
/// # Ok::<(), mmap_cursor::MmapCursorError>(())
/// ```
///
/// The cursor is plain mutable state: share a `MappedFile` across threads only
/// behind external synchronization.
pub struct MappedFile {
    path: PathBuf,
    region: MappedRegion,
    size: u64,
    cursor: u64,
    scan_mode: ScanMode,
}

impl std::fmt::Debug for MappedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedFile")
            .field("path", &self.path)
            .field("len", &self.size)
            .field("position", &self.cursor)
            .field("scan_mode", &self.scan_mode)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl MappedFile {
    /// Open `path` and map its whole contents read-only, with default options.
    ///
    /// # Errors
    ///
    /// Returns `MmapCursorError::OpenFailed` if the file cannot be opened.
    /// Returns `MmapCursorError::MapFailed` if the file cannot be mapped.
    /// Returns `MmapCursorError::ViewFailed` if the view cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder(path).open()
    }

    /// Start configuring how a file is opened.
    pub fn builder<P: AsRef<Path>>(path: P) -> MappedFileBuilder {
        MappedFileBuilder::new(path)
    }

    pub(crate) fn from_region(path: PathBuf, region: MappedRegion, scan_mode: ScanMode) -> Self {
        let size = region.len();
        log::debug!("mapped {} ({} bytes)", path.display(), size);
        Self {
            path,
            region,
            size,
            cursor: 0,
            scan_mode,
        }
    }

    /// Path the file was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total length of the mapped file in bytes, fixed at open.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.size
    }

    /// Whether the mapped file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current cursor offset.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.cursor
    }

    /// Bytes between the cursor and the end of the file.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.size - self.cursor
    }

    /// Whether the cursor sits at the end of the file.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.cursor == self.size
    }

    /// Scan mode used by [`read_until`](Self::read_until).
    #[must_use]
    pub fn scan_mode(&self) -> ScanMode {
        self.scan_mode
    }

    /// Whether [`close`](Self::close) has released the mapping.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.region.is_released()
    }

    /// Move the cursor to an absolute offset in `[0, len()]`.
    ///
    /// # Errors
    ///
    /// Returns `MmapCursorError::OutOfBounds` if `pos > len()`.
    /// Returns `MmapCursorError::Closed` after [`close`](Self::close).
    pub fn set_position(&mut self, pos: u64) -> Result<()> {
        self.ensure_open()?;
        ensure_in_bounds(pos, 0, self.size)?;
        self.cursor = pos;
        Ok(())
    }

    /// Advance the cursor by `len` bytes without copying them.
    ///
    /// # Errors
    ///
    /// Returns `MmapCursorError::OutOfBounds` if fewer than `len` bytes remain.
    /// Returns `MmapCursorError::Closed` after [`close`](Self::close).
    pub fn skip(&mut self, len: u64) -> Result<()> {
        self.ensure_open()?;
        ensure_in_bounds(self.cursor, len, self.size)?;
        self.cursor += len;
        Ok(())
    }

    /// Copy exactly `len` bytes from the cursor into a new buffer and advance.
    ///
    /// `len == 0` returns an empty buffer and leaves the cursor in place.
    ///
    /// # Errors
    ///
    /// Returns `MmapCursorError::OutOfBounds` if fewer than `len` bytes remain.
    /// Returns `MmapCursorError::Closed` after [`close`](Self::close).
    pub fn read(&mut self, len: u64) -> Result<Vec<u8>> {
        self.read_slice(len).map(<[u8]>::to_vec)
    }

    /// Zero-copy variant of [`read`](Self::read): borrow the next `len` bytes
    /// from the mapping and advance.
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read).
    pub fn read_slice(&mut self, len: u64) -> Result<&[u8]> {
        let (start, end) = self.next_range(len)?;
        self.cursor = end as u64;
        Ok(&self.region.bytes()[start..end])
    }

    /// Fill `buf` from the cursor and advance by `buf.len()`.
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read); `buf` is untouched on failure.
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        let (start, end) = self.next_range(buf.len() as u64)?;
        buf.copy_from_slice(&self.region.bytes()[start..end]);
        self.cursor = end as u64;
        Ok(())
    }

    /// Borrow the next `len` bytes without moving the cursor.
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read).
    pub fn peek(&self, len: u64) -> Result<&[u8]> {
        let (start, end) = self.next_range(len)?;
        Ok(&self.region.bytes()[start..end])
    }

    /// Return every byte before the next `marker` and move the cursor past it,
    /// using the file's configured [`ScanMode`].
    ///
    /// # Errors
    ///
    /// Returns `MmapCursorError::InvalidArgument` if `marker` is empty.
    /// Returns `MmapCursorError::OutOfBounds` if no marker is found before the
    /// end of the file; the cursor is left unchanged.
    /// Returns `MmapCursorError::Closed` after [`close`](Self::close).
    pub fn read_until(&mut self, marker: &[u8]) -> Result<Vec<u8>> {
        self.read_until_with(marker, self.scan_mode)
    }

    /// [`read_until`](Self::read_until) with an explicit scan mode.
    ///
    /// # Errors
    ///
    /// Same as [`read_until`](Self::read_until).
    pub fn read_until_with(&mut self, marker: &[u8], mode: ScanMode) -> Result<Vec<u8>> {
        let (start, found) = self.locate(marker, mode)?;
        let record = self.region.bytes()[start..start + found].to_vec();
        self.cursor = (start + found + marker.len()) as u64;
        Ok(record)
    }

    /// Release the mapping and the file handle.
    ///
    /// Idempotent. Afterwards every read or cursor move fails with
    /// `MmapCursorError::Closed`; `len()` and `position()` keep their values.
    /// Dropping the file performs the same release.
    pub fn close(&mut self) {
        if self.region.is_released() {
            return;
        }
        self.region.release();
        log::debug!("released mapping of {}", self.path.display());
    }

    /// Find `marker` from the cursor; returns (cursor as usize, match offset
    /// relative to the cursor).
    fn locate(&self, marker: &[u8], mode: ScanMode) -> Result<(usize, usize)> {
        if marker.is_empty() {
            return Err(MmapCursorError::InvalidArgument(ERR_EMPTY_MARKER));
        }
        let (start, end) = self.next_range(self.remaining())?;
        let found = find_marker(&self.region.bytes()[start..end], marker, mode);
        log::trace!(
            "scan {:?} for {} byte marker from {} in {}: {:?}",
            mode,
            marker.len(),
            start,
            self.path.display(),
            found
        );
        found
            .map(|offset| (start, offset))
            .ok_or(MmapCursorError::OutOfBounds {
                offset: self.cursor,
                len: marker.len() as u64,
                total: self.size,
            })
    }

    #[cfg(feature = "advise")]
    pub(crate) fn region(&self) -> &MappedRegion {
        &self.region
    }

    fn next_range(&self, len: u64) -> Result<(usize, usize)> {
        self.ensure_open()?;
        slice_range(self.cursor, len, self.size)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.region.is_released() {
            return Err(MmapCursorError::Closed);
        }
        Ok(())
    }
}

impl Drop for MappedFile {
    fn drop(&mut self) {
        self.close();
    }
}
