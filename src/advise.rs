//! Memory advise operations for optimizing OS paging behavior.

use crate::errors::{MmapCursorError, Result};
use crate::mmap::MappedFile;
use crate::utils::{align_down, page_size, slice_range};

/// Memory access pattern advice for the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmapAdvice {
    /// Normal access pattern (default).
    Normal,
    /// Random access pattern.
    Random,
    /// Sequential access pattern.
    Sequential,
    /// Will need this range soon.
    WillNeed,
    /// Won't need this range soon.
    DontNeed,
}

impl MappedFile {
    /// Advise the OS about expected access patterns for `[offset, offset+len)`.
    ///
    /// The range is widened to page boundaries. The advice is a hint and may be
    /// ignored by the OS; it never changes the bytes a read returns.
    ///
    /// # Platform-specific behavior
    ///
    /// - **Unix**: Uses `madvise`
    /// - **Windows**: Uses `PrefetchVirtualMemory` for `WillNeed`, no-op for others
    ///
    /// # Errors
    ///
    /// Returns `MmapCursorError::OutOfBounds` if the range exceeds file bounds.
    /// Returns `MmapCursorError::Closed` after `close()`.
    /// Returns `MmapCursorError::AdviceFailed` if the system call fails.
    pub fn advise(&self, offset: u64, len: u64, advice: MmapAdvice) -> Result<()> {
        if self.is_closed() {
            return Err(MmapCursorError::Closed);
        }
        let (start, end) = slice_range(offset, len, self.len())?;
        let Some(base) = self.region().as_ptr() else {
            // Zero-length file: nothing is mapped.
            return Ok(());
        };
        if start == end {
            return Ok(());
        }

        #[allow(clippy::cast_possible_truncation)]
        let aligned = align_down(start as u64, page_size() as u64) as usize;
        let length = end - aligned;
        // SAFETY: aligned <= start < end <= mapped length, and the view base is page aligned.
        let addr = unsafe { base.add(aligned) };

        #[cfg(unix)]
        {
            use libc::{madvise, MADV_DONTNEED, MADV_NORMAL, MADV_RANDOM, MADV_SEQUENTIAL, MADV_WILLNEED};

            let advice_flag = match advice {
                MmapAdvice::Normal => MADV_NORMAL,
                MmapAdvice::Random => MADV_RANDOM,
                MmapAdvice::Sequential => MADV_SEQUENTIAL,
                MmapAdvice::WillNeed => MADV_WILLNEED,
                MmapAdvice::DontNeed => MADV_DONTNEED,
            };

            // SAFETY: the range lies inside a live read-only file mapping. On a
            // shared file mapping MADV_DONTNEED only drops pages that are
            // re-read from the file on next access.
            let result = unsafe { madvise(addr as *mut libc::c_void, length, advice_flag) };

            if result != 0 {
                let err = std::io::Error::last_os_error();
                return Err(MmapCursorError::AdviceFailed(format!("madvise failed: {err}")));
            }
        }

        #[cfg(windows)]
        {
            if matches!(advice, MmapAdvice::WillNeed) {
                #[allow(non_snake_case)]
                #[repr(C)]
                struct WIN32_MEMORY_RANGE_ENTRY {
                    VirtualAddress: *mut core::ffi::c_void,
                    NumberOfBytes: usize,
                }

                extern "system" {
                    fn PrefetchVirtualMemory(
                        hProcess: *mut core::ffi::c_void,
                        NumberOfEntries: usize,
                        VirtualAddresses: *const WIN32_MEMORY_RANGE_ENTRY,
                        Flags: u32,
                    ) -> i32;

                    fn GetCurrentProcess() -> *mut core::ffi::c_void;
                }

                let entry = WIN32_MEMORY_RANGE_ENTRY {
                    VirtualAddress: addr as *mut core::ffi::c_void,
                    NumberOfBytes: length,
                };

                // SAFETY: the entry describes a live mapped range.
                let result = unsafe { PrefetchVirtualMemory(GetCurrentProcess(), 1, &entry, 0) };

                if result == 0 {
                    let err = std::io::Error::last_os_error();
                    return Err(MmapCursorError::AdviceFailed(format!(
                        "PrefetchVirtualMemory failed: {err}"
                    )));
                }
            }
        }

        #[cfg(not(any(unix, windows)))]
        let _ = (addr, length, advice);

        Ok(())
    }
}
