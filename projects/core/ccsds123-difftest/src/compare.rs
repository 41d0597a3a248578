//! Bitstream comparison with bounded padding tolerance.
//!
//! The only divergence accepted between an implementation's output and the golden bitstream is
//! trailing zero padding introduced by word alignment. Any size difference of a full maximum
//! word or more, any nonzero byte in the extra tail, or any difference in the common prefix is a
//! mismatch.

use crate::config::OutputWordSize;
use std::fs;
use std::io;
use std::path::Path;

/// Size differences at or above this many bytes are never padding.
pub const WORD_TOLERANCE: usize = OutputWordSize::MAX_BYTES;

/// Compares two in-memory bitstreams under the padding tolerance.
pub fn compare_bytes(actual: &[u8], golden: &[u8]) -> bool {
    if actual.len().abs_diff(golden.len()) >= WORD_TOLERANCE {
        return false;
    }

    let (larger, smaller) = if actual.len() >= golden.len() {
        (actual, golden)
    } else {
        (golden, actual)
    };

    // Padding must be zero valued bytes, not merely "empty looking" data.
    let (prefix, tail) = larger.split_at(smaller.len());
    if tail.iter().any(|&byte| byte != 0) {
        return false;
    }

    prefix == smaller
}

/// Compares the bitstream at `actual_path` against the golden bitstream at `golden_path`.
///
/// File sizes are checked first, so bitstreams differing by a word or more are rejected
/// without reading them.
///
/// # Errors
///
/// Any I/O error opening or reading either file, including a missing file.
pub fn compare_files(actual_path: &Path, golden_path: &Path) -> io::Result<bool> {
    let actual_len = fs::metadata(actual_path)?.len();
    let golden_len = fs::metadata(golden_path)?.len();
    if actual_len.abs_diff(golden_len) >= WORD_TOLERANCE as u64 {
        return Ok(false);
    }

    let actual = fs::read(actual_path)?;
    let golden = fs::read(golden_path)?;
    Ok(compare_bytes(&actual, &golden))
}
