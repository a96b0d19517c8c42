//! Envelope pipeline
//!
//! Encoding compresses, draws a fresh nonce, seals, and frames the result as
//! `nonce || ciphertext`. Decoding runs the same steps in reverse. Any step
//! that fails aborts the rest; no partial output is produced.
//!
//! ```text
//! encode: plaintext -> deflate -> AES-256-GCM(key, fresh nonce) -> nonce || ciphertext+tag
//! decode: nonce || ciphertext+tag -> AES-256-GCM open -> inflate -> plaintext
//! ```

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::compression;
use crate::crypto::{self, Key, Nonce, SecureBytes, NONCE_SIZE};
use crate::encoding::TextEncoding;
use crate::error::{SealError, SealResult};
use crate::storage::{KeyReusePrompt, KeyStore};

/// Which way the pipeline runs for this invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

/// Everything the pipeline needs for one run
#[derive(Debug, Clone, Copy)]
pub struct PipelineRequest<'a> {
    pub direction: Direction,
    pub input: &'a [u8],
    /// Set when the envelope travels over a text channel
    pub text_encoding: Option<TextEncoding>,
}

/// Result of one run
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PipelineOutput {
    bytes: Vec<u8>,
    #[zeroize(skip)]
    is_text: bool,
}

impl PipelineOutput {
    /// Output bytes (armored text when [`is_text`](Self::is_text) is set)
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the bytes are a text-encoded envelope
    pub fn is_text(&self) -> bool {
        self.is_text
    }
}

impl std::fmt::Debug for PipelineOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineOutput")
            .field("len", &self.bytes.len())
            .field("is_text", &self.is_text)
            .finish()
    }
}

/// Compress-then-encrypt pipeline bound to a single key
#[derive(Debug)]
pub struct EnvelopePipeline {
    key: Key,
}

impl EnvelopePipeline {
    /// Create a pipeline around an already obtained key
    pub fn new(key: Key) -> Self {
        Self { key }
    }

    /// Obtain the run's key from `store` and build a pipeline around it
    pub fn from_store<P>(store: &KeyStore, prompt: &mut P) -> SealResult<Self>
    where
        P: KeyReusePrompt + ?Sized,
    {
        Ok(Self::new(store.obtain(prompt)?))
    }

    /// Seal `plaintext` into a binary envelope under a freshly drawn nonce
    pub fn encode(&self, plaintext: &[u8]) -> SealResult<Vec<u8>> {
        let nonce = Nonce::generate()?;
        self.encode_with_nonce(&nonce, plaintext)
    }

    /// Seal `plaintext` under a caller-chosen nonce
    ///
    /// Reusing a nonce with the same key breaks confidentiality. Only use this
    /// for fixed test vectors; [`encode`](Self::encode) is the normal path.
    pub fn encode_with_nonce(&self, nonce: &Nonce, plaintext: &[u8]) -> SealResult<Vec<u8>> {
        let compressed = SecureBytes::new(compression::compress(plaintext)?);
        let sealed = crypto::seal(&self.key, nonce, &compressed)?;

        let mut envelope = Vec::with_capacity(NONCE_SIZE + sealed.len());
        envelope.extend_from_slice(nonce.as_bytes());
        envelope.extend_from_slice(&sealed);

        tracing::debug!(
            plaintext_len = plaintext.len(),
            compressed_len = compressed.len(),
            envelope_len = envelope.len(),
            "sealed envelope"
        );
        Ok(envelope)
    }

    /// Open a binary envelope and return the original plaintext
    pub fn decode(&self, envelope: &[u8]) -> SealResult<Vec<u8>> {
        let (nonce, ciphertext) = split_envelope(envelope)?;

        let compressed = SecureBytes::new(crypto::open(&self.key, &nonce, ciphertext)?);
        let plaintext = compression::decompress(&compressed)?;

        tracing::debug!(
            envelope_len = envelope.len(),
            compressed_len = compressed.len(),
            plaintext_len = plaintext.len(),
            "opened envelope"
        );
        Ok(plaintext)
    }

    /// Run one request in its direction
    ///
    /// Encoding with a text encoding returns the armored envelope; decoding
    /// with one strips the armor first. Decoded plaintext is never armored.
    pub fn run(&self, request: PipelineRequest<'_>) -> SealResult<PipelineOutput> {
        match request.direction {
            Direction::Encode => {
                let envelope = self.encode(request.input)?;
                match request.text_encoding {
                    Some(encoding) => Ok(PipelineOutput {
                        bytes: encoding.encode(&envelope).into_bytes(),
                        is_text: true,
                    }),
                    None => Ok(PipelineOutput {
                        bytes: envelope,
                        is_text: false,
                    }),
                }
            }
            Direction::Decode => {
                let plaintext = match request.text_encoding {
                    Some(encoding) => {
                        let envelope = encoding.decode_bytes(request.input)?;
                        self.decode(&envelope)?
                    }
                    None => self.decode(request.input)?,
                };
                Ok(PipelineOutput {
                    bytes: plaintext,
                    is_text: false,
                })
            }
        }
    }
}

/// Split an envelope into its nonce and authenticated ciphertext
///
/// Fails before any cipher work when the envelope cannot hold a nonce.
pub fn split_envelope(envelope: &[u8]) -> SealResult<(Nonce, &[u8])> {
    if envelope.len() < NONCE_SIZE {
        return Err(SealError::EnvelopeFormat(format!(
            "envelope is {} bytes, shorter than the {}-byte nonce",
            envelope.len(),
            NONCE_SIZE
        )));
    }

    let (nonce_bytes, ciphertext) = envelope.split_at(NONCE_SIZE);
    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(nonce_bytes);
    Ok((Nonce::from_bytes(nonce), ciphertext))
}
