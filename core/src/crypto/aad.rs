// ## 📂 File: `src/crypto/aad.rs`

//! MAC input assembly (RFC 8439 §2.8).
//!
//! ```text
//! mac_input = pad16(AD) || pad16(ciphertext) || LE64(len(AD)) || LE64(len(ciphertext))
//! ```
//!
//! Lengths are always the unpadded byte counts. "ciphertext" is the wire form
//! on both ends: freshly produced output when sealing, buffered input when
//! opening.

use crate::constants::{LEN_FIELD_LEN, PAD_ALIGN};
use crate::utils::pad_len;

/// Zero bytes appended after `len` bytes to reach the next 16-byte boundary.
#[inline]
pub fn pad16_len(len: usize) -> usize {
    pad_len(len, PAD_ALIGN)
}

/// Total MAC input size for the given unpadded lengths.
#[inline]
pub fn mac_input_len(ad_len: usize, ct_len: usize) -> usize {
    ad_len + pad16_len(ad_len) + ct_len + pad16_len(ct_len) + 2 * LEN_FIELD_LEN
}

/// Associated data, zero-padded once at construction.
#[derive(Clone, Default)]
pub struct AadPadder {
    padded: Vec<u8>,
    len: usize,
}

impl AadPadder {
    pub fn new(associated_data: &[u8]) -> Self {
        let len = associated_data.len();
        let mut padded = Vec::with_capacity(len + pad16_len(len));
        padded.extend_from_slice(associated_data);
        padded.resize(len + pad16_len(len), 0);
        Self { padded, len }
    }

    /// Unpadded AD length; this is what the length field encodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The AD exactly as the caller supplied it.
    pub fn associated_data(&self) -> &[u8] {
        &self.padded[..self.len]
    }

    /// AD followed by its zero padding.
    pub fn padded(&self) -> &[u8] {
        &self.padded
    }

    /// Assemble the full authenticator input for `ciphertext`.
    pub fn mac_input(&self, ciphertext: &[u8]) -> Vec<u8> {
        build_mac_input(self, ciphertext)
    }
}

impl std::fmt::Debug for AadPadder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AadPadder")
            .field("len", &self.len)
            .field("padded_len", &self.padded.len())
            .finish()
    }
}

#[inline]
pub fn build_mac_input(aad: &AadPadder, ciphertext: &[u8]) -> Vec<u8> {
    let ct_len = ciphertext.len();
    let mut out = Vec::with_capacity(mac_input_len(aad.len(), ct_len));

    // 1️⃣ pad16(AD)
    out.extend_from_slice(aad.padded());

    // 2️⃣ pad16(ciphertext)
    out.extend_from_slice(ciphertext);
    out.resize(out.len() + pad16_len(ct_len), 0);

    // 3️⃣ LE64 lengths, unpadded
    out.extend_from_slice(&(aad.len() as u64).to_le_bytes());
    out.extend_from_slice(&(ct_len as u64).to_le_bytes());

    debug_assert_eq!(out.len(), mac_input_len(aad.len(), ct_len));
    out
}
