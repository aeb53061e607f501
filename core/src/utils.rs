use crate::types::{AeadError, Result};

/// Check that `offset..offset + length` lies inside a buffer of `capacity` bytes.
///
/// Runs before any mutation so a failing call leaves every buffer untouched.
/// Overflowing `offset + length` is reported as a range error, not a panic.
#[inline]
pub fn validate_range(capacity: usize, offset: usize, length: usize) -> Result<()> {
    match offset.checked_add(length) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(AeadError::InvalidRange { offset, length, capacity }),
    }
}

/// Number of zero bytes `pad16` appends after `len` bytes.
#[inline]
pub fn pad_len(len: usize, align: usize) -> usize {
    (align - len % align) % align
}
