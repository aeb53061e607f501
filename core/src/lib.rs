//! aead-core
//!
//! Streaming ChaCha20-Poly1305 AEAD engine (RFC 8439 §2.8).
//! Pure Rust, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Crypto composition + observability
pub mod crypto;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::crypto::{open, seal, AeadEngine, Mode, Sealed, Tag};
    pub use crate::types::{AeadError, Result};
}
