// ## src/crypto/kdf.rs

//! crypto/kdf.rs
//! One-time Poly1305 key generation (RFC 8439 §2.6).
//!
//! Design:
//! - Run the keystream at block counter 0 over a zero block and keep the first
//!   32 bytes: `r` (16 bytes, clamped later by Poly1305) then `s` (16 bytes).
//! - The payload starts at block counter 1, so no keystream byte is shared
//!   between the MAC key and the ciphertext.

use zeroize::Zeroize;

use crate::constants::{BLOCK_LEN, KEY_LEN_32, MAC_KEY_BLOCK_COUNTER, MAC_KEY_LEN, NONCE_LEN_12};
use crate::crypto::primitives::StreamCipher;
use crate::crypto::secret::SecretBytes;
use crate::types::Result;

/// Derive the one-time MAC key for `(key, nonce)`.
/// Depends only on its inputs; the scratch keystream block is wiped before return.
pub fn derive_mac_key<S: StreamCipher>(
    key: &[u8; KEY_LEN_32],
    nonce: &[u8; NONCE_LEN_12],
) -> Result<SecretBytes<MAC_KEY_LEN>> {
    let mut block = [0u8; BLOCK_LEN];
    let generated = S::keystream(key, nonce, MAC_KEY_BLOCK_COUNTER, &mut block);

    let mut mac_key = [0u8; MAC_KEY_LEN];
    mac_key.copy_from_slice(&block[..MAC_KEY_LEN]);
    block.zeroize();

    let secret = SecretBytes::new(mac_key);
    mac_key.zeroize();
    generated.map(|()| secret)
}
