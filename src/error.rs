//! Custom error types for keyseal
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Messages name the failure category so an
//! operator can tell a wrong key from a mangled paste, and never carry key
//! material or plaintext.

use thiserror::Error;

/// The main error type for keyseal operations
#[derive(Error, Debug)]
pub enum SealError {
    /// Key file could not be read, written, or has the wrong size
    #[error("Key file error: {0}")]
    KeyIo(String),

    /// The operating system random source failed
    #[error("Secure random source unavailable: {0}")]
    RandomSource(String),

    /// Envelope is structurally invalid (too short to hold a nonce)
    #[error("Malformed envelope: {0}")]
    EnvelopeFormat(String),

    /// Text channel input is not valid hex/base64
    #[error("Malformed input encoding: {0}")]
    Decode(String),

    /// Tag verification failed
    #[error("Authentication failed: wrong key or corrupted data")]
    Authentication,

    /// Authenticated payload did not inflate
    #[error("Decompression failed: {0}")]
    Decompression(String),

    /// Internal cipher failure while sealing
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Input or output file I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Invalid flag combination
    #[error("Usage error: {0}")]
    Usage(String),

    /// Output path policy violations
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SealError {
    /// Check if this is a tag verification failure
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }

    /// Check if this error happened before any cipher work could start
    pub fn is_fatal_key_error(&self) -> bool {
        matches!(self, Self::KeyIo(_) | Self::RandomSource(_))
    }

    /// Check if this is a usage error
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// Process exit status for this error
    ///
    /// 2 for usage errors (the same status clap uses), 3 when an envelope
    /// fails authentication, 4 when no key could be loaded or created, 1 for
    /// everything else.
    pub fn exit_code(&self) -> u8 {
        if self.is_usage() {
            2
        } else if self.is_authentication() {
            3
        } else if self.is_fatal_key_error() {
            4
        } else {
            1
        }
    }
}

impl From<std::io::Error> for SealError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for keyseal operations
pub type SealResult<T> = Result<T, SealError>;
