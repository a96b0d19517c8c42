//! The 256-bit symmetric key
//!
//! Keys are fixed-size by type so the cipher never sees a wrong-length key,
//! and are wiped from memory when dropped.

use std::fmt;

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{SealError, SealResult};

/// Size of an AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// A 32-byte AES-256 key that zeroes itself on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Key {
    bytes: [u8; KEY_SIZE],
}

impl Key {
    /// Wrap existing key bytes
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Build a key from stored material, rejecting anything that is not exactly 32 bytes
    pub fn from_slice(material: &[u8]) -> SealResult<Self> {
        if material.len() != KEY_SIZE {
            return Err(SealError::KeyIo(format!(
                "key material has {} bytes, expected {}",
                material.len(),
                KEY_SIZE
            )));
        }

        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(material);
        Ok(Self { bytes })
    }

    /// Generate a fresh key from the operating system CSPRNG
    pub fn generate() -> SealResult<Self> {
        let mut bytes = Zeroizing::new([0u8; KEY_SIZE]);
        OsRng
            .try_fill_bytes(&mut bytes[..])
            .map_err(|e| SealError::RandomSource(e.to_string()))?;
        Ok(Self { bytes: *bytes })
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

// Never print key material
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key([REDACTED])")
    }
}
