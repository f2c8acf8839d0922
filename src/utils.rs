//! Utility helpers for page size, alignment, and safe range calculations.

use crate::errors::{MmapCursorError, Result};

/// Get the system page size in bytes.
#[must_use]
pub fn page_size() -> usize {
    cfg_if::cfg_if! {
        if #[cfg(target_os = "windows")] {
            windows_page_size()
        } else {
            unix_page_size()
        }
    }
}

#[cfg(target_os = "windows")]
fn windows_page_size() -> usize {
    use std::mem::MaybeUninit;
    #[allow(non_snake_case)]
    #[repr(C)]
    struct SYSTEM_INFO {
        wProcessorArchitecture: u16,
        wReserved: u16,
        dwPageSize: u32,
        lpMinimumApplicationAddress: *mut core::ffi::c_void,
        lpMaximumApplicationAddress: *mut core::ffi::c_void,
        dwActiveProcessorMask: usize,
        dwNumberOfProcessors: u32,
        dwProcessorType: u32,
        dwAllocationGranularity: u32,
        wProcessorLevel: u16,
        wProcessorRevision: u16,
    }
    extern "system" {
        fn GetSystemInfo(lpSystemInfo: *mut SYSTEM_INFO);
    }
    let mut sysinfo = MaybeUninit::<SYSTEM_INFO>::uninit();
    // SAFETY: GetSystemInfo fully initializes the struct it is handed.
    unsafe {
        GetSystemInfo(sysinfo.as_mut_ptr());
        sysinfo.assume_init().dwPageSize as usize
    }
}

#[cfg(not(target_os = "windows"))]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unix_page_size() -> usize {
    // SAFETY: sysconf with _SC_PAGESIZE is safe to call.
    let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    page_size.max(0) as usize
}

/// Align a value down to the nearest multiple of `alignment`.
#[must_use]
pub fn align_down(value: u64, alignment: u64) -> u64 {
    if alignment == 0 {
        return value;
    }
    if alignment.is_power_of_two() {
        value & !(alignment - 1)
    } else {
        value - value % alignment
    }
}

/// Ensure the requested [offset, offset+len) range is within [0, total].
/// Returns `Ok(())` if valid; otherwise an `OutOfBounds` error.
///
/// # Errors
///
/// Returns `MmapCursorError::OutOfBounds` if the range exceeds bounds.
pub fn ensure_in_bounds(offset: u64, len: u64, total: u64) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= total => Ok(()),
        _ => Err(MmapCursorError::OutOfBounds { offset, len, total }),
    }
}

/// Compute a safe byte slice range for a given total length, returning start..end as usize tuple.
///
/// `total` must describe a mapped range, so it already fits in `usize`.
///
/// # Errors
///
/// Returns `MmapCursorError::OutOfBounds` if the requested range exceeds the total length.
#[allow(clippy::cast_possible_truncation)]
pub fn slice_range(offset: u64, len: u64, total: u64) -> Result<(usize, usize)> {
    ensure_in_bounds(offset, len, total)?;
    Ok((offset as usize, (offset + len) as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_accept_full_and_empty_ranges() {
        assert!(ensure_in_bounds(0, 10, 10).is_ok());
        assert!(ensure_in_bounds(10, 0, 10).is_ok());
        assert!(ensure_in_bounds(0, 0, 0).is_ok());
    }

    #[test]
    fn bounds_reject_overrun_and_overflow() {
        assert!(ensure_in_bounds(11, 0, 10).is_err());
        assert!(ensure_in_bounds(5, 6, 10).is_err());
        match ensure_in_bounds(u64::MAX, 2, 10) {
            Err(MmapCursorError::OutOfBounds { offset, len, total }) => {
                assert_eq!((offset, len, total), (u64::MAX, 2, 10));
            }
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn slice_range_converts_bounds() {
        assert_eq!(slice_range(3, 4, 10).unwrap(), (3, 7));
        assert!(slice_range(8, 4, 10).is_err());
    }

    #[test]
    fn align_down_handles_pow2_and_other() {
        assert_eq!(align_down(4097, 4096), 4096);
        assert_eq!(align_down(4095, 4096), 0);
        assert_eq!(align_down(25, 10), 20);
        assert_eq!(align_down(7, 0), 7);
    }

    #[test]
    fn page_size_is_sane() {
        let ps = page_size();
        assert!(ps >= 512);
        assert!(ps.is_power_of_two());
    }
}
