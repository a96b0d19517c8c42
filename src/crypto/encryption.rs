//! AES-256-GCM sealing and opening
//!
//! Provides authenticated encryption over the compressed payload. The tag
//! check in [`open`] is the only integrity check in the system; nothing
//! downstream runs when it fails.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce as GcmNonce};

use crate::error::{SealError, SealResult};

use super::Key;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the authentication tag appended to every ciphertext
pub const TAG_SIZE: usize = 16;

/// A 96-bit AES-GCM nonce
///
/// Must be drawn fresh with [`Nonce::generate`] for every encryption under a
/// given key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    /// Draw a new nonce from the operating system CSPRNG
    pub fn generate() -> SealResult<Self> {
        let mut bytes = [0u8; NONCE_SIZE];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| SealError::RandomSource(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Wrap nonce bytes read back from an envelope
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the nonce bytes
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

fn cipher_for(key: &Key) -> Aes256Gcm {
    Aes256Gcm::new(aes_gcm::Key::<Aes256Gcm>::from_slice(key.as_bytes()))
}

/// Encrypt `plaintext` under `key` and `nonce`, returning ciphertext with the tag appended
///
/// Output is exactly `plaintext.len() + TAG_SIZE` bytes and is fully
/// determined by its inputs.
pub fn seal(key: &Key, nonce: &Nonce, plaintext: &[u8]) -> SealResult<Vec<u8>> {
    cipher_for(key)
        .encrypt(GcmNonce::from_slice(nonce.as_bytes()), plaintext)
        .map_err(|_| SealError::Encryption("payload exceeds AES-GCM message limit".to_string()))
}

/// Verify and decrypt `ciphertext` (with trailing tag)
pub fn open(key: &Key, nonce: &Nonce, ciphertext: &[u8]) -> SealResult<Vec<u8>> {
    cipher_for(key)
        .decrypt(GcmNonce::from_slice(nonce.as_bytes()), ciphertext)
        .map_err(|_| SealError::Authentication)
}
