//! Text armor for envelopes sent over text channels
//!
//! The armored form carries no tag naming its scheme, so the operator must
//! pick the same scheme on both ends.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::{SealError, SealResult};

/// Text encoding applied to a binary envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// Lowercase hexadecimal
    Hex,
    /// URL-safe base64 without padding
    #[default]
    Base64,
}

impl TextEncoding {
    /// Pick the scheme from the `--output-as-hex` flag
    pub fn from_hex_flag(hex: bool) -> Self {
        if hex {
            Self::Hex
        } else {
            Self::Base64
        }
    }

    /// Encode binary data as text
    pub fn encode(self, data: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(data),
            Self::Base64 => URL_SAFE_NO_PAD.encode(data),
        }
    }

    /// Decode text back to bytes, ignoring surrounding whitespace
    pub fn decode(self, text: &str) -> SealResult<Vec<u8>> {
        let text = text.trim();
        match self {
            Self::Hex => hex::decode(text)
                .map_err(|e| SealError::Decode(format!("invalid hex: {}", e))),
            Self::Base64 => URL_SAFE_NO_PAD
                .decode(text)
                .map_err(|e| SealError::Decode(format!("invalid base64: {}", e))),
        }
    }

    /// Decode text held in a byte buffer (file contents or a literal argument)
    pub fn decode_bytes(self, data: &[u8]) -> SealResult<Vec<u8>> {
        let text = std::str::from_utf8(data)
            .map_err(|_| SealError::Decode("input is not valid UTF-8 text".to_string()))?;
        self.decode(text)
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex => write!(f, "hex"),
            Self::Base64 => write!(f, "base64"),
        }
    }
}
