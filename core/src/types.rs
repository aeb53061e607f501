// ## 📂 File: `src/types.rs`

use thiserror::Error;

/// Unified engine error.
/// - Every kind is distinct so callers can tell a malformed call from an
///   authentication failure.
/// - No variant carries key, tag or payload bytes; messages only show sizes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AeadError {
    /// Key is not 32 bytes.
    #[error("invalid key size: expected={expected}, actual={actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    /// Nonce length does not match the canonical profile.
    #[error("invalid nonce size: expected={expected}, actual={actual}")]
    InvalidNonceSize { expected: usize, actual: usize },

    /// Supplied tag is not 16 bytes.
    #[error("invalid tag size: expected={expected}, actual={actual}")]
    InvalidTagSize { expected: usize, actual: usize },

    /// Construction parameter outside what RFC 8439 defines (e.g. rounds != 20).
    #[error("unsupported parameter: {name}={value}")]
    UnsupportedParameter { name: &'static str, value: u64 },

    /// Offset/length pair falls outside the buffer.
    #[error("invalid range: offset={offset}, length={length}, capacity={capacity}")]
    InvalidRange { offset: usize, length: usize, capacity: usize },

    /// Computed tag differs from the supplied one. No plaintext was released.
    #[error("AEAD tag mismatch")]
    TagMismatch,

    /// Engine was disposed.
    #[error("engine used after dispose")]
    UseAfterDispose,

    /// The message cycle already finalized successfully; `reset` first.
    #[error("message already finalized; reset before reuse")]
    AlreadyFinalized,

    /// Buffered data would exhaust the 32-bit block counter.
    #[error("message too long: max={max}, actual={actual}")]
    MessageTooLong { max: u64, actual: u64 },
}

impl AeadError {
    /// True only for a failed tag comparison.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, AeadError::TagMismatch)
    }

    /// True for caller mistakes (bad sizes, ranges, parameters or lifecycle misuse).
    pub fn is_usage_error(&self) -> bool {
        !self.is_authentication_failure()
    }
}

pub type Result<T> = std::result::Result<T, AeadError>;
