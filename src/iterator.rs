//! Iterator-based access for sequential parsing from the cursor.

use crate::errors::{MmapCursorError, Result};
use crate::mmap::MappedFile;
use crate::scan::ScanMode;

/// Iterator over marker-terminated records, starting at the cursor.
///
/// Each item is the result of one `read_until`. Iteration ends when no
/// further marker exists; the cursor is then left at the start of the
/// unterminated remainder, which can still be read explicitly.
///
/// # Examples
///
/// ```no_run
/// use mmap_cursor::MappedFile;
///
/// let mut file = MappedFile::open("data.csv")?;
/// for line in file.records(b"\n")? {
///     let line = line?;
///     println!("{}", String::from_utf8_lossy(&line));
/// }
/// let tail = file.read(file.remaining())?;
/// # Ok::<(), mmap_cursor::MmapCursorError>(())
/// ```
pub struct Records<'a> {
    file: &'a mut MappedFile,
    marker: Vec<u8>,
    mode: ScanMode,
    done: bool,
}

impl<'a> Records<'a> {
    pub(crate) fn new(file: &'a mut MappedFile, marker: &[u8], mode: ScanMode) -> Result<Self> {
        if marker.is_empty() {
            return Err(MmapCursorError::InvalidArgument("record marker must not be empty"));
        }
        Ok(Self {
            file,
            marker: marker.to_vec(),
            mode,
            done: false,
        })
    }
}

impl Iterator for Records<'_> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.file.read_until_with(&self.marker, self.mode) {
            Ok(record) => Some(Ok(record)),
            Err(MmapCursorError::OutOfBounds { .. }) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for Records<'_> {}

/// Iterator over fixed-size chunks from the cursor to the end of the file.
///
/// The final chunk is shorter when the remaining length is not a multiple of
/// the chunk size.
pub struct Chunks<'a> {
    file: &'a mut MappedFile,
    chunk_size: u64,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(file: &'a mut MappedFile, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(MmapCursorError::InvalidArgument("chunk size must be greater than zero"));
        }
        Ok(Self {
            file,
            chunk_size: chunk_size as u64,
        })
    }
}

impl Iterator for Chunks<'_> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.file.is_at_end() || self.file.is_closed() {
            return None;
        }
        let len = self.file.remaining().min(self.chunk_size);
        Some(self.file.read(len))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let chunks = if self.file.is_closed() {
            0
        } else {
            self.file.remaining().div_ceil(self.chunk_size) as usize
        };
        (chunks, Some(chunks))
    }
}

impl ExactSizeIterator for Chunks<'_> {}

impl MappedFile {
    /// Iterate over records terminated by `marker`, using the file's scan mode.
    ///
    /// # Errors
    ///
    /// Returns `MmapCursorError::InvalidArgument` if `marker` is empty.
    pub fn records(&mut self, marker: &[u8]) -> Result<Records<'_>> {
        let mode = self.scan_mode();
        Records::new(self, marker, mode)
    }

    /// Iterate over records terminated by `marker` with an explicit scan mode.
    ///
    /// # Errors
    ///
    /// Returns `MmapCursorError::InvalidArgument` if `marker` is empty.
    pub fn records_with(&mut self, marker: &[u8], mode: ScanMode) -> Result<Records<'_>> {
        Records::new(self, marker, mode)
    }

    /// Iterate over `chunk_size`-byte reads from the cursor to the end.
    ///
    /// # Errors
    ///
    /// Returns `MmapCursorError::InvalidArgument` if `chunk_size` is zero.
    pub fn chunks(&mut self, chunk_size: usize) -> Result<Chunks<'_>> {
        Chunks::new(self, chunk_size)
    }
}
