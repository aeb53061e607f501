// ## 📂 File: `src/constants.rs`

//! Fixed sizes and limits of the canonical RFC 8439 profile
//! (32-byte key, 96-bit nonce, 16-byte tag, 20 rounds).

/// ChaCha20 / AEAD key length (bytes).
pub const KEY_LEN_32: usize = 32;

/// Canonical nonce length (bytes).
pub const NONCE_LEN_12: usize = 12;

/// Poly1305 tag length (bytes).
pub const TAG_LEN: usize = 16;

/// One-time Poly1305 key length: `r` (16 bytes) || `s` (16 bytes).
pub const MAC_KEY_LEN: usize = 32;

/// ChaCha20 block size (bytes).
pub const BLOCK_LEN: usize = 64;

/// Alignment of the padded AD and ciphertext in the MAC input.
pub const PAD_ALIGN: usize = 16;

/// Width of each little-endian length field at the end of the MAC input.
pub const LEN_FIELD_LEN: usize = 8;

/// The only round count the construction is defined for.
pub const CHACHA_ROUNDS: u32 = 20;

/// Block counter reserved for the one-time MAC key.
pub const MAC_KEY_BLOCK_COUNTER: u32 = 0;

/// First block counter used for the payload.
pub const PAYLOAD_BLOCK_COUNTER: u32 = 1;

/// Longest payload a single (key, nonce) pair can carry: the 32-bit block
/// counter covers blocks 1..=2^32-1.
pub const MAX_MESSAGE_LEN: u64 = (u32::MAX as u64) * BLOCK_LEN as u64;
