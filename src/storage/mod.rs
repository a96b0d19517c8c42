//! Storage layer for keyseal
//!
//! Provides atomic file writes and the persistent key store.

pub mod file_io;
pub mod key_store;

pub use file_io::write_bytes_atomic;
pub use key_store::{KeyReusePrompt, KeyStore};
