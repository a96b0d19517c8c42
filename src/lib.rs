//! keyseal - compress-then-encrypt envelopes under a local key
//!
//! This library provides the core functionality for the keyseal command-line
//! tool. Input bytes are compressed with raw DEFLATE, sealed with AES-256-GCM
//! under a persistent 32-byte key, and framed as `nonce || ciphertext`.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Run configuration and path resolution
//! - `error`: Custom error types
//! - `crypto`: Key, nonce, AES-256-GCM seal/open, secure buffers
//! - `compression`: Raw DEFLATE codec
//! - `encoding`: Hex/base64 armor for text channels
//! - `storage`: Atomic file writes and the key store
//! - `pipeline`: Envelope encode/decode orchestration
//! - `cli`: Argument parsing, key prompt, run driver
//!
//! # Example
//!
//! ```rust,no_run
//! use keyseal::pipeline::EnvelopePipeline;
//! use keyseal::storage::KeyStore;
//!
//! # fn main() -> keyseal::SealResult<()> {
//! let store = KeyStore::new("key.bin");
//! let pipeline = EnvelopePipeline::from_store(&store, &mut |_: &std::path::Path| true)?;
//!
//! let envelope = pipeline.encode(b"attack at dawn")?;
//! assert_eq!(pipeline.decode(&envelope)?, b"attack at dawn");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod compression;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod pipeline;
pub mod storage;

pub use error::{SealError, SealResult};
pub use pipeline::{Direction, EnvelopePipeline, PipelineOutput, PipelineRequest};
