// ## 📂 File: `src/crypto/nonce.rs`

//! Nonce validation for the canonical RFC 8439 profile.
//!
//! Security notes:
//! - The nonce must be unique per (key, message). The engine cannot detect
//!   reuse; that includes reusing one (key, nonce) pair across `reset` cycles.
//! - Only the 96-bit nonce is accepted. The 64-bit/16-byte layouts of the
//!   RFC 7539 drafts are rejected with `InvalidNonceSize`.

use crate::constants::NONCE_LEN_12;
use crate::types::{AeadError, Result};

/// Validate a caller-supplied nonce length.
#[inline]
pub fn validate_nonce_len(nonce_len: usize) -> Result<()> {
    if nonce_len != NONCE_LEN_12 {
        return Err(AeadError::InvalidNonceSize { expected: NONCE_LEN_12, actual: nonce_len });
    }
    Ok(())
}

/// Copy a validated nonce into its fixed-size form.
#[inline]
pub fn nonce_from_slice(nonce: &[u8]) -> Result<[u8; NONCE_LEN_12]> {
    validate_nonce_len(nonce.len())?;
    let mut out = [0u8; NONCE_LEN_12];
    out.copy_from_slice(nonce);
    Ok(out)
}
