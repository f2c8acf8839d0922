//! Open-time configuration for [`MappedFile`].

use std::path::{Path, PathBuf};

#[cfg(feature = "advise")]
use crate::advise::MmapAdvice;
use crate::errors::Result;
use crate::mmap::MappedFile;
use crate::region::MappedRegion;
use crate::scan::ScanMode;

/// Builder for opening a [`MappedFile`] with non-default options.
///
/// # Examples
///
/// ```no_run
/// use mmap_cursor::{MappedFile, ScanMode};
///
/// let mut log = MappedFile::builder("app.log")
///     .scan_mode(ScanMode::Substring)
///     .open()?;
/// let first_line = log.read_until(b"\r\n")?;
/// # Ok::<(), mmap_cursor::MmapCursorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MappedFileBuilder {
    path: PathBuf,
    scan_mode: ScanMode,
    #[cfg(feature = "advise")]
    advice: Option<MmapAdvice>,
}

impl MappedFileBuilder {
    pub(crate) fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            scan_mode: ScanMode::default(),
            #[cfg(feature = "advise")]
            advice: Some(MmapAdvice::Random),
        }
    }

    /// Default scan mode for `read_until` (defaults to [`ScanMode::Block`]).
    #[must_use]
    pub fn scan_mode(mut self, mode: ScanMode) -> Self {
        self.scan_mode = mode;
        self
    }

    /// Access pattern hint applied to the whole mapping after open
    /// (defaults to [`MmapAdvice::Random`]).
    #[cfg(feature = "advise")]
    #[must_use]
    pub fn advice(mut self, advice: MmapAdvice) -> Self {
        self.advice = Some(advice);
        self
    }

    /// Leave the kernel's default readahead behavior untouched.
    #[cfg(feature = "advise")]
    #[must_use]
    pub fn no_advice(mut self) -> Self {
        self.advice = None;
        self
    }

    /// Open and map the file.
    ///
    /// A rejected access hint is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns `MmapCursorError::OpenFailed`, `MapFailed`, or `ViewFailed`
    /// depending on which acquisition step failed.
    pub fn open(self) -> Result<MappedFile> {
        let region = MappedRegion::acquire(&self.path)?;
        let file = MappedFile::from_region(self.path, region, self.scan_mode);

        #[cfg(feature = "advise")]
        if let Some(advice) = self.advice {
            if let Err(e) = file.advise(0, file.len(), advice) {
                log::warn!("ignoring {:?} hint for {}: {e}", advice, file.path().display());
            }
        }

        Ok(file)
    }
}
