pub mod types;
pub mod secret;
pub mod primitives;
pub mod nonce;
pub mod kdf;
pub mod aad;
pub mod aead;
pub mod seal;

pub use types::*;
pub use secret::*;
pub use primitives::*;
pub use nonce::*;
pub use kdf::*;
pub use aad::*;
pub use aead::*;
pub use seal::*;
