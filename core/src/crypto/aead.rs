// ## 📂 File: `src/crypto/aead.rs`

//! src/crypto/aead.rs
//! Streaming ChaCha20-Poly1305 engine (RFC 8439 §2.8).
//!
//! Design notes:
//! - The one-time MAC key comes from keystream block 0 and is derived once per
//!   (key, nonce); the payload uses blocks 1.. so the two never overlap.
//! - `update*` only buffers. All cryptographic work happens in `finalize`.
//! - Mode is fixed by `set_tag`: no tag means seal, a tag means open.
//! - Open is strictly two-phase: compute + compare the tag over the buffered
//!   ciphertext, then decrypt. Nothing reaches the output buffer on mismatch.
//! - Every range check runs before the first write, so an error leaves the
//!   caller's output untouched.
//! - Single-threaded by contract; use one engine per (key, nonce) per thread.
//! - Reusing one (key, nonce) across `reset` cycles is nonce reuse. The engine
//!   does not detect it; callers must change the nonce (`reset_with_nonce`).

use std::fmt;
use std::marker::PhantomData;

use subtle::ConstantTimeEq;
use tracing::{debug, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::constants::{CHACHA_ROUNDS, MAX_MESSAGE_LEN, PAYLOAD_BLOCK_COUNTER};
use crate::crypto::aad::AadPadder;
use crate::crypto::kdf::derive_mac_key;
use crate::crypto::nonce::nonce_from_slice;
use crate::crypto::primitives::{ChaCha20Keystream, OneTimeMac, Poly1305Mac, StreamCipher};
use crate::crypto::secret::{SecretBuffer, SecretBytes};
use crate::crypto::types::{Mode, Tag, KEY_LEN_32, MAC_KEY_LEN, NONCE_LEN_12, TAG_LEN};
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::{AeadError, Result};
use crate::utils::validate_range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    /// Accepting input for the current message.
    Open,
    /// Current message finalized successfully; only `reset` reopens it.
    Finalized,
    /// Secrets wiped; every operation fails.
    Disposed,
}

/// Result of a successful `finalize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeOutcome {
    pub mode: Mode,
    /// Bytes written to the output buffer (== buffered length).
    pub written: usize,
    /// Produced tag (seal) or the verified caller tag (open).
    pub tag: Tag,
}

/// ChaCha20-Poly1305 AEAD engine.
///
/// Generic over its primitives so a platform keystream/MAC can replace the
/// RustCrypto defaults without touching the composition.
pub struct AeadEngine<S: StreamCipher = ChaCha20Keystream, M: OneTimeMac = Poly1305Mac> {
    key: SecretBytes<KEY_LEN_32>,
    nonce: [u8; NONCE_LEN_12],
    mac_key: SecretBytes<MAC_KEY_LEN>,
    aad: AadPadder,
    buffer: SecretBuffer,
    tag: Option<Tag>,
    mode: Mode,
    state: EngineState,
    counters: TelemetryCounters,
    timer: TelemetryTimer,
    _primitives: PhantomData<fn() -> (S, M)>,
}

impl AeadEngine {
    /// Engine over the default primitives with the standard 20 rounds.
    ///
    /// Errors: `InvalidKeySize`, `InvalidNonceSize`.
    pub fn new(key: &[u8], nonce: &[u8], associated_data: Option<&[u8]>) -> Result<Self> {
        Self::with_primitives(key, nonce, associated_data, CHACHA_ROUNDS)
    }

    /// Same as `new` with an explicit round count; anything but 20 is
    /// `UnsupportedParameter`.
    pub fn with_rounds(
        key: &[u8],
        nonce: &[u8],
        associated_data: Option<&[u8]>,
        rounds: u32,
    ) -> Result<Self> {
        Self::with_primitives(key, nonce, associated_data, rounds)
    }
}

impl<S: StreamCipher, M: OneTimeMac> AeadEngine<S, M> {
    /// Validate inputs, copy the key, derive the one-time MAC key, pad the AD.
    /// Nothing is created when validation fails.
    pub fn with_primitives(
        key: &[u8],
        nonce: &[u8],
        associated_data: Option<&[u8]>,
        rounds: u32,
    ) -> Result<Self> {
        let key = SecretBytes::<KEY_LEN_32>::from_slice(key).ok_or(AeadError::InvalidKeySize {
            expected: KEY_LEN_32,
            actual: key.len(),
        })?;
        let nonce = nonce_from_slice(nonce)?;
        if rounds != CHACHA_ROUNDS {
            return Err(AeadError::UnsupportedParameter { name: "rounds", value: u64::from(rounds) });
        }

        let mut timer = TelemetryTimer::new();
        let mac_key = timer.time(Stage::Derive, || derive_mac_key::<S>(key.expose(), &nonce))?;
        let aad = AadPadder::new(associated_data.unwrap_or_default());

        debug!(ad_len = aad.len(), has_ad = !aad.is_empty(), "aead engine constructed");

        Ok(Self {
            key,
            nonce,
            mac_key,
            aad,
            buffer: SecretBuffer::new(),
            tag: None,
            mode: Mode::Encrypt,
            state: EngineState::Open,
            counters: TelemetryCounters::default(),
            timer,
            _primitives: PhantomData,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Number of bytes buffered for the current message.
    pub fn buffered_len(&self) -> Result<usize> {
        self.ensure_alive()?;
        Ok(self.buffer.len())
    }

    /// Borrow the buffered bytes (plaintext when sealing, ciphertext when opening).
    pub fn buffered(&self) -> Result<&[u8]> {
        self.ensure_alive()?;
        Ok(self.buffer.as_slice())
    }

    pub fn tag_len(&self) -> usize {
        TAG_LEN
    }

    /// Produced tag after a seal, or the tag supplied for an open.
    pub fn tag(&self) -> Result<Option<Tag>> {
        self.ensure_alive()?;
        Ok(self.tag.clone())
    }

    pub fn mode(&self) -> Result<Mode> {
        self.ensure_alive()?;
        Ok(self.mode)
    }

    pub fn associated_data(&self) -> Result<&[u8]> {
        self.ensure_alive()?;
        Ok(self.aad.associated_data())
    }

    pub fn is_disposed(&self) -> bool {
        self.state == EngineState::Disposed
    }

    /// Snapshot of this engine's counters and stage timings.
    /// Still available after `dispose`; it holds no secrets.
    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, &self.timer)
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Supply the expected tag; switches this cycle to decrypt-and-verify.
    pub fn set_tag(&mut self, tag: &[u8]) -> Result<()> {
        self.ensure_open()?;
        let tag = Tag::from_slice(tag)?;
        self.tag = Some(tag);
        self.mode = Mode::Decrypt;
        Ok(())
    }

    pub fn update(&mut self, byte: u8) -> Result<()> {
        self.ensure_open()?;
        self.ensure_room(1)?;
        self.buffer.push(byte);
        Ok(())
    }

    /// Append `data[offset..offset + length]`.
    ///
    /// The caller's buffer is left as is; use `update_block_scrub` to have the
    /// consumed range zeroed after the copy.
    pub fn update_block(&mut self, data: &[u8], offset: usize, length: usize) -> Result<()> {
        self.ensure_open()?;
        validate_range(data.len(), offset, length)?;
        self.ensure_room(length)?;

        let buffer = &mut self.buffer;
        self.timer
            .time(Stage::Buffer, || buffer.extend_from_slice(&data[offset..offset + length]));
        Ok(())
    }

    /// Append `data[offset..offset + length]`, then zero that range in the
    /// caller's buffer so no shadow copy of the payload survives there.
    pub fn update_block_scrub(&mut self, data: &mut [u8], offset: usize, length: usize) -> Result<()> {
        self.update_block(data, offset, length)?;
        data[offset..offset + length].zeroize();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Finalize
    // -------------------------------------------------------------------------

    /// Seal or open the buffered message into `output[offset..]`.
    ///
    /// Seal: encrypt from block 1, write the ciphertext, compute and store the tag.
    /// Open: verify the supplied tag over the buffered ciphertext first; only
    /// on a match decrypt and write the plaintext.
    ///
    /// Errors: `InvalidRange` if the output cannot hold the whole message,
    /// `TagMismatch` when opening fails. On any error `output` is untouched.
    pub fn finalize(&mut self, output: &mut [u8], offset: usize) -> Result<FinalizeOutcome> {
        self.ensure_open()?;
        let len = self.buffer.len();
        validate_range(output.len(), offset, len)?;
        let dst = &mut output[offset..offset + len];

        match (self.mode, self.tag.clone()) {
            (Mode::Decrypt, Some(expected)) => self.open_into(expected, dst),
            _ => self.seal_into(dst),
        }
    }

    fn seal_into(&mut self, dst: &mut [u8]) -> Result<FinalizeOutcome> {
        let key = self.key.expose();
        let nonce = &self.nonce;

        let mut ciphertext = Zeroizing::new(self.buffer.as_slice().to_vec());
        self.timer.time(Stage::Encrypt, || {
            S::apply_keystream(key, nonce, PAYLOAD_BLOCK_COUNTER, &mut ciphertext)
        })?;

        let mac_input = self.aad.mac_input(&ciphertext);
        let mac_key = self.mac_key.expose();
        let tag = self
            .timer
            .time(Stage::Authenticate, || Tag::new(M::compute(mac_key, &mac_input)));

        dst.copy_from_slice(&ciphertext);
        self.tag = Some(tag.clone());
        self.state = EngineState::Finalized;
        self.counters.add_seal(ciphertext.len(), self.aad.len(), mac_input.len());

        debug!(mode = %Mode::Encrypt, len = ciphertext.len(), ad_len = self.aad.len(), "message sealed");
        Ok(FinalizeOutcome { mode: Mode::Encrypt, written: ciphertext.len(), tag })
    }

    fn open_into(&mut self, expected: Tag, dst: &mut [u8]) -> Result<FinalizeOutcome> {
        let ciphertext = self.buffer.as_slice();
        let mac_key = self.mac_key.expose();

        // Phase 1: authenticate the wire ciphertext as buffered.
        let mac_input = self.aad.mac_input(ciphertext);
        let authentic: bool = self.timer.time(Stage::Verify, || {
            Tag::new(M::compute(mac_key, &mac_input)).ct_eq(&expected).into()
        });
        if !authentic {
            self.counters.add_tag_failure(mac_input.len());
            warn!(len = ciphertext.len(), ad_len = self.aad.len(), "tag mismatch; no plaintext released");
            return Err(AeadError::TagMismatch);
        }

        // Phase 2: decrypt into scratch, then release.
        let key = self.key.expose();
        let nonce = &self.nonce;
        let mut plaintext = Zeroizing::new(ciphertext.to_vec());
        self.timer.time(Stage::Decrypt, || {
            S::apply_keystream(key, nonce, PAYLOAD_BLOCK_COUNTER, &mut plaintext)
        })?;

        dst.copy_from_slice(&plaintext);
        self.state = EngineState::Finalized;
        self.counters.add_open(plaintext.len(), self.aad.len(), mac_input.len());

        debug!(mode = %Mode::Decrypt, len = plaintext.len(), ad_len = self.aad.len(), "message opened");
        Ok(FinalizeOutcome { mode: Mode::Decrypt, written: plaintext.len(), tag: expected })
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Drop the buffered message and any tag; back to seal mode with the same
    /// key, nonce, AD and MAC key.
    ///
    /// Sealing a second message after this reuses the (key, nonce) pair. That
    /// breaks confidentiality and authenticity; callers who reset to send more
    /// data must use `reset_with_nonce` instead.
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_alive()?;
        self.buffer.clear();
        self.tag = None;
        self.mode = Mode::Encrypt;
        self.state = EngineState::Open;
        self.counters.add_reset();
        debug!("aead engine reset");
        Ok(())
    }

    /// `reset` plus a new nonce; the MAC key is derived again, exactly once.
    /// An invalid nonce leaves the engine unchanged.
    pub fn reset_with_nonce(&mut self, nonce: &[u8]) -> Result<()> {
        self.ensure_alive()?;
        let nonce = nonce_from_slice(nonce)?;
        let key = self.key.expose();
        let mac_key = self.timer.time(Stage::Derive, || derive_mac_key::<S>(key, &nonce))?;

        self.nonce = nonce;
        self.mac_key = mac_key;
        self.reset()
    }

    /// Overwrite key, MAC key, nonce, buffered data and tag with zeros.
    /// Idempotent; afterwards every operation fails with `UseAfterDispose`.
    pub fn dispose(&mut self) {
        if self.state == EngineState::Disposed {
            return;
        }
        self.key.zeroize();
        self.mac_key.zeroize();
        self.nonce.zeroize();
        self.buffer.zeroize();
        self.tag = None;
        self.aad = AadPadder::default();
        self.state = EngineState::Disposed;
        self.timer.finish();
        debug!(messages = self.counters.messages_total(), "aead engine disposed");
    }

    /// Consume the engine: dispose it and hand back its final telemetry.
    pub fn close(mut self) -> TelemetrySnapshot {
        self.dispose();
        self.telemetry()
    }

    // -------------------------------------------------------------------------
    // Guards
    // -------------------------------------------------------------------------

    fn ensure_alive(&self) -> Result<()> {
        match self.state {
            EngineState::Disposed => Err(AeadError::UseAfterDispose),
            _ => Ok(()),
        }
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            EngineState::Open => Ok(()),
            EngineState::Finalized => Err(AeadError::AlreadyFinalized),
            EngineState::Disposed => Err(AeadError::UseAfterDispose),
        }
    }

    fn ensure_room(&self, additional: usize) -> Result<()> {
        let total = self.buffer.len() as u64 + additional as u64;
        if total > MAX_MESSAGE_LEN {
            return Err(AeadError::MessageTooLong { max: MAX_MESSAGE_LEN, actual: total });
        }
        Ok(())
    }
}

impl<S: StreamCipher, M: OneTimeMac> Drop for AeadEngine<S, M> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<S: StreamCipher, M: OneTimeMac> fmt::Debug for AeadEngine<S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AeadEngine")
            .field("state", &self.state)
            .field("mode", &self.mode)
            .field("buffered", &self.buffer.len())
            .field("ad_len", &self.aad.len())
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> AeadEngine {
        AeadEngine::new(&[0x5Au8; 32], &[0x0Bu8; 12], Some(&b"hdr"[..])).unwrap()
    }

    fn assert_wiped(e: &AeadEngine) {
        assert!(e.key.is_zeroed());
        assert!(e.mac_key.is_zeroed());
        assert!(e.nonce.iter().all(|&b| b == 0));
        assert!(e.buffer.is_empty());
        assert!(e.tag.is_none());
        assert!(e.aad.is_empty());
    }

    #[test]
    fn dispose_wipes_key_material_and_buffer() {
        let mut e = engine();
        assert!(!e.key.is_zeroed());
        assert!(!e.mac_key.is_zeroed());

        e.update_block(b"buffered secret", 0, 15).unwrap();
        e.dispose();
        assert_wiped(&e);

        e.dispose();
        assert_wiped(&e);
        assert!(e.is_disposed());
    }

    #[test]
    fn dispose_after_finalize_drops_tag() {
        let mut e = engine();
        e.update_block(b"payload", 0, 7).unwrap();
        let mut ct = [0u8; 7];
        e.finalize(&mut ct, 0).unwrap();
        assert!(e.tag.is_some());

        e.dispose();
        assert_wiped(&e);
    }

    #[test]
    fn dispose_after_renonce_wipes_new_mac_key() {
        let mut e = engine();
        e.reset_with_nonce(&[0x0Cu8; 12]).unwrap();
        assert!(!e.mac_key.is_zeroed());

        e.dispose();
        assert_wiped(&e);
    }

    #[test]
    fn tag_accessor_hands_out_clones() {
        let mut e = engine();
        e.update_block(b"abc", 0, 3).unwrap();
        let mut ct = [0u8; 3];
        let outcome = e.finalize(&mut ct, 0).unwrap();

        let stored = e.tag().unwrap();
        assert_eq!(stored.as_ref(), Some(&outcome.tag));
        assert_eq!(e.tag().unwrap(), stored);
    }
}
