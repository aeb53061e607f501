// ## 📂 File: `src/crypto/seal.rs`

//! One-shot helpers over `AeadEngine` for callers holding the whole message.
//!
//! Transport layout when concatenated: `ciphertext || tag` (tag last).

use crate::crypto::aead::AeadEngine;
use crate::crypto::types::{Tag, TAG_LEN};
use crate::types::{AeadError, Result};

/// Ciphertext and its tag, kept apart as the engine exposes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub ciphertext: Vec<u8>,
    pub tag: Tag,
}

impl Sealed {
    /// `ciphertext || tag`
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.ciphertext.len() + TAG_LEN);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(self.tag.as_bytes());
        out
    }

    /// Split `ciphertext || tag`. Anything shorter than a tag is `InvalidTagSize`.
    pub fn from_wire(wire: &[u8]) -> Result<Self> {
        if wire.len() < TAG_LEN {
            return Err(AeadError::InvalidTagSize { expected: TAG_LEN, actual: wire.len() });
        }
        let (ciphertext, tag) = wire.split_at(wire.len() - TAG_LEN);
        Ok(Self { ciphertext: ciphertext.to_vec(), tag: Tag::from_slice(tag)? })
    }
}

/// Encrypt and authenticate `plaintext` under (key, nonce, ad).
pub fn seal(key: &[u8], nonce: &[u8], associated_data: &[u8], plaintext: &[u8]) -> Result<Sealed> {
    let mut engine = AeadEngine::new(key, nonce, Some(associated_data))?;
    engine.update_block(plaintext, 0, plaintext.len())?;

    let mut ciphertext = vec![0u8; plaintext.len()];
    let outcome = engine.finalize(&mut ciphertext, 0)?;
    Ok(Sealed { ciphertext, tag: outcome.tag })
}

/// Verify `tag` over (ad, ciphertext) and return the plaintext.
/// Fails with `TagMismatch` without producing any plaintext.
pub fn open(
    key: &[u8],
    nonce: &[u8],
    associated_data: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>> {
    let mut engine = AeadEngine::new(key, nonce, Some(associated_data))?;
    engine.set_tag(tag)?;
    engine.update_block(ciphertext, 0, ciphertext.len())?;

    let mut plaintext = vec![0u8; ciphertext.len()];
    engine.finalize(&mut plaintext, 0)?;
    Ok(plaintext)
}
