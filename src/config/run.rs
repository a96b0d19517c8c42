//! Resolved, immutable configuration for one run
//!
//! Built once from the command line and passed down. Nothing downstream reads
//! flags or global state.

use std::fs;
use std::path::PathBuf;

use crate::encoding::TextEncoding;
use crate::error::{SealError, SealResult};
use crate::pipeline::{Direction, PipelineRequest};

/// Where the input bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Literal(String),
}

/// Where the result goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    File(PathBuf),
}

/// How to answer "reuse the existing key?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPolicy {
    /// Ask the operator on the terminal
    #[default]
    Ask,
    Reuse,
    Regenerate,
}

/// Configuration for a single encode or decode
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub direction: Direction,
    pub input: InputSource,
    pub output: OutputSink,
    /// Scheme for text channels (`--output-as-hex` picks hex)
    pub encoding: TextEncoding,
    /// Treat file channels as text too
    pub text_files: bool,
    pub key_file: PathBuf,
    pub key_policy: KeyPolicy,
    pub force: bool,
}

impl RunConfig {
    /// Whether the envelope side of this run travels as text
    ///
    /// Encode output to stdout and decode input from a literal string are
    /// always text. `text_files` extends this to files.
    pub fn uses_text_channel(&self) -> bool {
        match self.direction {
            Direction::Encode => self.output == OutputSink::Stdout || self.text_files,
            Direction::Decode => matches!(self.input, InputSource::Literal(_)) || self.text_files,
        }
    }

    /// Text encoding handed to the pipeline, if any
    pub fn text_encoding(&self) -> Option<TextEncoding> {
        self.uses_text_channel().then_some(self.encoding)
    }

    /// Read the input bytes
    pub fn read_input(&self) -> SealResult<Vec<u8>> {
        match &self.input {
            InputSource::File(path) => fs::read(path).map_err(|e| {
                SealError::Io(format!("Failed to read {}: {}", path.display(), e))
            }),
            InputSource::Literal(text) => Ok(text.as_bytes().to_vec()),
        }
    }

    /// Build the pipeline request for `input`
    pub fn request<'a>(&self, input: &'a [u8]) -> PipelineRequest<'a> {
        PipelineRequest {
            direction: self.direction,
            input,
            text_encoding: self.text_encoding(),
        }
    }
}

/// Resolve `-e`/`-d` into a direction; exactly one must be set
pub fn direction_from_flags(encrypt: bool, decrypt: bool) -> SealResult<Direction> {
    match (encrypt, decrypt) {
        (true, false) => Ok(Direction::Encode),
        (false, true) => Ok(Direction::Decode),
        _ => Err(SealError::Usage("use exactly one of -e or -d".to_string())),
    }
}

/// Resolve `-f`/`-s` into an input source; exactly one must be set
pub fn input_from_flags(file: Option<PathBuf>, string: Option<String>) -> SealResult<InputSource> {
    match (file, string) {
        (Some(path), None) => Ok(InputSource::File(path)),
        (None, Some(text)) => Ok(InputSource::Literal(text)),
        (Some(_), Some(_)) => Err(SealError::Usage(
            "provide input via -f <file> or -s <string>, not both".to_string(),
        )),
        (None, None) => Err(SealError::Usage(
            "provide input via -f <file> or -s <string>".to_string(),
        )),
    }
}

/// Resolve `--reuse-key`/`--new-key`
pub fn key_policy_from_flags(reuse: bool, regenerate: bool) -> SealResult<KeyPolicy> {
    match (reuse, regenerate) {
        (false, false) => Ok(KeyPolicy::Ask),
        (true, false) => Ok(KeyPolicy::Reuse),
        (false, true) => Ok(KeyPolicy::Regenerate),
        (true, true) => Err(SealError::Usage(
            "--reuse-key and --new-key are mutually exclusive".to_string(),
        )),
    }
}
