// ## 📂 File: `src/crypto/types.rs`

use std::fmt;

use subtle::{Choice, ConstantTimeEq};

use crate::types::{AeadError, Result};

pub use crate::constants::{KEY_LEN_32, MAC_KEY_LEN, NONCE_LEN_12, TAG_LEN};

/// 16-byte Poly1305 authenticator.
///
/// Equality is constant-time: all 16 byte pairs are folded into one
/// accumulator before a single branch. `Clone` only; duplicates are explicit.
#[derive(Clone)]
pub struct Tag([u8; TAG_LEN]);

impl Tag {
    pub const LEN: usize = TAG_LEN;

    pub fn new(bytes: [u8; TAG_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a caller-supplied tag; anything but 16 bytes is `InvalidTagSize`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; TAG_LEN] = bytes.try_into().map_err(|_| AeadError::InvalidTagSize {
            expected: TAG_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; TAG_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl ConstantTimeEq for Tag {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Tag {}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; TAG_LEN]> for Tag {
    fn from(bytes: [u8; TAG_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.to_hex())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Direction of one message cycle, fixed by whether a tag was supplied
/// before `finalize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// No tag supplied: encrypt the buffer and produce a tag.
    Encrypt,
    /// Tag supplied: verify the buffered ciphertext, then decrypt.
    Decrypt,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Encrypt => "encrypt",
            Mode::Decrypt => "decrypt",
        };
        f.write_str(name)
    }
}
