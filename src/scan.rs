//! Marker scanning over raw bytes.

use memchr::memmem;

/// How `read_until` looks for its marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Compare consecutive, non-overlapping blocks of `marker.len()` bytes
    /// starting at the cursor. A marker that does not start on a multiple of
    /// its own length from the cursor is never found.
    ///
    /// Suited to formats whose terminators are aligned to the record width,
    /// such as NUL-padded UTF-16 strings.
    #[default]
    Block,
    /// Find the first occurrence of the marker at any offset.
    Substring,
}

/// Locate `marker` in `haystack` according to `mode`.
///
/// Returns the offset of the match relative to the start of `haystack`.
/// An empty marker never matches; callers reject it before scanning.
#[must_use]
pub fn find_marker(haystack: &[u8], marker: &[u8], mode: ScanMode) -> Option<usize> {
    if marker.is_empty() {
        return None;
    }
    match mode {
        // chunks_exact drops the short tail, so a block is only compared when
        // it lies entirely inside the haystack.
        ScanMode::Block => haystack
            .chunks_exact(marker.len())
            .position(|block| block == marker)
            .map(|index| index * marker.len()),
        ScanMode::Substring => memmem::find(haystack, marker),
    }
}
