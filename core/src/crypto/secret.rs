// ## 📂 File: `src/crypto/secret.rs`

//! Secret containers owned by the engine.
//!
//! - `SecretBytes<N>` holds fixed-size material (key, one-time MAC key).
//! - `SecretBuffer` holds the growing message buffer.
//!
//! Both overwrite their contents with zeros on drop. `SecretBuffer` also wipes
//! the old allocation whenever it grows, so a reallocation never leaves a
//! stale copy of the payload in freed heap memory.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fixed-size secret, zeroed on drop. Deliberately not `Clone`.
pub struct SecretBytes<const N: usize>([u8; N]);

impl<const N: usize> SecretBytes<N> {
    /// Take ownership of `bytes`; the caller's array is a copy the caller must wipe.
    pub fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// Copy from a slice of exactly `N` bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != N {
            return None;
        }
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Some(Self(out))
    }

    pub fn expose(&self) -> &[u8; N] {
        &self.0
    }

    /// True once every byte is zero (after `zeroize`).
    pub fn is_zeroed(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl<const N: usize> Zeroize for SecretBytes<N> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<const N: usize> Drop for SecretBytes<N> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<const N: usize> ZeroizeOnDrop for SecretBytes<N> {}

impl<const N: usize> fmt::Debug for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes<{}>([REDACTED])", N)
    }
}

/// Growable byte buffer that never leaks old allocations.
#[derive(Default)]
pub struct SecretBuffer {
    bytes: Vec<u8>,
}

impl SecretBuffer {
    const MIN_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn push(&mut self, byte: u8) {
        self.extend_from_slice(&[byte]);
    }

    pub fn extend_from_slice(&mut self, data: &[u8]) {
        let needed = self.bytes.len() + data.len();
        if needed > self.bytes.capacity() {
            self.grow(needed);
        }
        self.bytes.extend_from_slice(data);
    }

    /// Zero the contents and the spare capacity, keep the allocation.
    pub fn clear(&mut self) {
        self.bytes.zeroize();
    }

    // Move into a fresh allocation and wipe the old one before it is freed.
    fn grow(&mut self, min_capacity: usize) {
        let capacity = min_capacity
            .max(self.bytes.capacity().saturating_mul(2))
            .max(Self::MIN_CAPACITY);
        let mut next = Vec::with_capacity(capacity);
        next.extend_from_slice(&self.bytes);
        self.bytes.zeroize();
        self.bytes = next;
    }
}

impl Zeroize for SecretBuffer {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl Drop for SecretBuffer {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for SecretBuffer {}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBuffer(len={})", self.bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_bytes_rejects_wrong_length() {
        assert!(SecretBytes::<32>::from_slice(&[1u8; 31]).is_none());
        assert!(SecretBytes::<32>::from_slice(&[1u8; 33]).is_none());
        assert!(SecretBytes::<32>::from_slice(&[1u8; 32]).is_some());
    }

    #[test]
    fn secret_bytes_zeroize_wipes_contents() {
        let mut s = SecretBytes::<32>::new([0xAB; 32]);
        assert!(!s.is_zeroed());
        s.zeroize();
        assert!(s.is_zeroed());
    }

    #[test]
    fn secret_bytes_debug_is_redacted() {
        let s = SecretBytes::<4>::new([1, 2, 3, 4]);
        let shown = format!("{:?}", s);
        assert!(shown.contains("REDACTED"));
        assert!(!shown.contains("1, 2"));
    }

    #[test]
    fn buffer_keeps_bytes_across_growth() {
        let mut buf = SecretBuffer::new();
        let mut expected = Vec::new();
        for i in 0..1000u32 {
            let b = (i % 251) as u8;
            buf.push(b);
            expected.push(b);
        }
        buf.extend_from_slice(&[7u8; 300]);
        expected.extend_from_slice(&[7u8; 300]);
        assert_eq!(buf.as_slice(), &expected[..]);
    }

    #[test]
    fn buffer_clear_empties() {
        let mut buf = SecretBuffer::new();
        buf.extend_from_slice(b"secret payload");
        buf.clear();
        assert!(buf.is_empty());
        buf.extend_from_slice(b"next");
        assert_eq!(buf.as_slice(), b"next");
    }
}
