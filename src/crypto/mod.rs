//! Cryptographic primitives for keyseal
//!
//! Provides AES-256-GCM authenticated encryption over a persistent random
//! key, plus zero-on-drop buffers for intermediate data.

pub mod encryption;
pub mod key;
pub mod secure_memory;

pub use encryption::{open, seal, Nonce, NONCE_SIZE, TAG_SIZE};
pub use key::{Key, KEY_SIZE};
pub use secure_memory::SecureBytes;
