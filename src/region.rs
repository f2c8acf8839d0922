//! Ownership of the file → mapping → view resource chain.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use memmap2::{Mmap, MmapOptions};

use crate::errors::{MmapCursorError, Result};

/// Read-only mapped byte range together with the file it was created from.
///
/// Fields are declared view first so that plain drop order matches
/// `release()`: the view goes before the file handle.
#[derive(Debug)]
pub(crate) struct MappedRegion {
    // None for zero-length files; the OS refuses empty mappings on some platforms.
    view: Option<Mmap>,
    file: Option<File>,
    len: u64,
}

impl MappedRegion {
    /// Acquire the file handle, validate it can be mapped, then create the view.
    ///
    /// A failure at any stage drops everything acquired before it.
    pub(crate) fn acquire(path: &Path) -> Result<Self> {
        let file = open_read_shared(path).map_err(|source| MmapCursorError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let map_err = |source: io::Error| MmapCursorError::MapFailed {
            path: path.to_path_buf(),
            source,
        };
        let metadata = file.metadata().map_err(map_err)?;
        if !metadata.is_file() {
            return Err(map_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        let len = metadata.len();
        let map_len = usize::try_from(len).map_err(|_| {
            map_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "file is larger than the address space",
            ))
        })?;

        let view = if map_len == 0 {
            None
        } else {
            Some(map_view(&file, map_len, path)?)
        };

        Ok(Self {
            view,
            file: Some(file),
            len,
        })
    }

    /// Mapped length in bytes, fixed at acquisition.
    pub(crate) fn len(&self) -> u64 {
        self.len
    }

    /// Whether `release()` has run.
    pub(crate) fn is_released(&self) -> bool {
        self.file.is_none()
    }

    /// The mapped bytes; empty for zero-length files and after release.
    pub(crate) fn bytes(&self) -> &[u8] {
        self.view.as_deref().unwrap_or(&[])
    }

    /// Base pointer of the view, if one exists.
    #[cfg(feature = "advise")]
    pub(crate) fn as_ptr(&self) -> Option<*const u8> {
        self.view.as_ref().map(|m| m.as_ptr())
    }

    /// Release the view, then the file handle. Safe to call repeatedly.
    pub(crate) fn release(&mut self) {
        drop(self.view.take());
        drop(self.file.take());
    }
}

/// Open `path` for reading while denying writers for as long as the handle lives.
///
/// Unix has no mandatory share modes; there the handle is a plain read-only open.
fn open_read_shared(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true);

    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;

        const FILE_SHARE_READ: u32 = 0x0000_0001;
        const FILE_FLAG_RANDOM_ACCESS: u32 = 0x1000_0000;

        options.share_mode(FILE_SHARE_READ);
        options.custom_flags(FILE_FLAG_RANDOM_ACCESS);
    }

    options.open(path)
}

/// Create the read-only view over `map_len` bytes of `file`.
fn map_view(file: &File, map_len: usize, path: &Path) -> Result<Mmap> {
    // SAFETY: the file is opened read-only and kept alive next to the view.
    // Callers only ever receive shared slices or copies of the mapped bytes.
    unsafe { MmapOptions::new().len(map_len).map(file) }.map_err(|source| {
        MmapCursorError::ViewFailed {
            path: path.to_path_buf(),
            source,
        }
    })
}

impl Drop for MappedRegion {
    fn drop(&mut self) {
        self.release();
    }
}
