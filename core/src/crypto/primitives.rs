// ## 📂 File: `src/crypto/primitives.rs`

//! The two primitives the AEAD composition consumes.
//!
//! Design notes:
//! - Both are stateless at the trait level: every call is a pure function of
//!   its inputs, so the engine can reposition the keystream to any block
//!   counter (0 for the MAC key, 1.. for the payload).
//! - Default implementations wrap RustCrypto's `chacha20` and `poly1305`.
//!   A platform implementation can be slotted into `AeadEngine<S, M>` instead.

use chacha20::cipher::{KeyIvInit, StreamCipher as _, StreamCipherSeek};
use chacha20::{ChaCha20, Key as ChaKey, Nonce as ChaNonce};
use poly1305::universal_hash::KeyInit;
use poly1305::{Key as PolyKey, Poly1305};

use crate::constants::{BLOCK_LEN, KEY_LEN_32, MAC_KEY_LEN, MAX_MESSAGE_LEN, NONCE_LEN_12, TAG_LEN};
use crate::types::{AeadError, Result};

/// Seekable keystream generator (ChaCha20, 20 rounds, 32-bit block counter).
pub trait StreamCipher {
    /// XOR the keystream starting at block `counter` into `data`.
    fn apply_keystream(
        key: &[u8; KEY_LEN_32],
        nonce: &[u8; NONCE_LEN_12],
        counter: u32,
        data: &mut [u8],
    ) -> Result<()>;

    /// Write raw keystream starting at block `counter` into `out`.
    fn keystream(
        key: &[u8; KEY_LEN_32],
        nonce: &[u8; NONCE_LEN_12],
        counter: u32,
        out: &mut [u8],
    ) -> Result<()> {
        out.fill(0);
        Self::apply_keystream(key, nonce, counter, out)
    }
}

/// One-time authenticator: one key, one message, 16-byte tag.
pub trait OneTimeMac {
    fn compute(mac_key: &[u8; MAC_KEY_LEN], message: &[u8]) -> [u8; TAG_LEN];
}

/// RFC 8439 §2.4 ChaCha20 via the `chacha20` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaCha20Keystream;

impl StreamCipher for ChaCha20Keystream {
    fn apply_keystream(
        key: &[u8; KEY_LEN_32],
        nonce: &[u8; NONCE_LEN_12],
        counter: u32,
        data: &mut [u8],
    ) -> Result<()> {
        let len = data.len() as u64;
        let too_long = || AeadError::MessageTooLong { max: MAX_MESSAGE_LEN, actual: len };

        let mut cipher = ChaCha20::new(ChaKey::from_slice(key), ChaNonce::from_slice(nonce));
        let start = u64::from(counter) * BLOCK_LEN as u64;
        cipher.try_seek(start).map_err(|_| too_long())?;
        cipher.try_apply_keystream(data).map_err(|_| too_long())
    }
}

/// RFC 8439 §2.5 Poly1305 via the `poly1305` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Poly1305Mac;

impl OneTimeMac for Poly1305Mac {
    fn compute(mac_key: &[u8; MAC_KEY_LEN], message: &[u8]) -> [u8; TAG_LEN] {
        let tag = Poly1305::new(PolyKey::from_slice(mac_key)).compute_unpadded(message);
        let mut out = [0u8; TAG_LEN];
        out.copy_from_slice(tag.as_slice());
        out
    }
}
