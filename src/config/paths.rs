//! Path management for keyseal
//!
//! Resolves where the key lives and where results are written.
//!
//! ## Key Path Resolution Order
//!
//! 1. `--key-file` argument
//! 2. `KEYSEAL_KEY_FILE` environment variable
//! 3. `key.bin` in the working directory
//!
//! ## Output Naming
//!
//! - encode: `<input>.bin` (`input.bin` for literal input)
//! - decode: `<input>` without a trailing `.bin`, plus `.dec`

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{SealError, SealResult};
use crate::pipeline::Direction;

use super::run::InputSource;

/// Environment variable overriding the key file location
pub const KEY_FILE_ENV: &str = "KEYSEAL_KEY_FILE";

/// Default key file name, relative to the working directory
pub const DEFAULT_KEY_FILE: &str = "key.bin";

/// Suffix appended to sealed files
pub const ENCODED_SUFFIX: &str = ".bin";

/// Suffix appended to opened files
pub const DECODED_SUFFIX: &str = ".dec";

/// File stem used when the input was a literal string
pub const LITERAL_STEM: &str = "input";

/// Derive the output file for `input` when none was given explicitly
pub fn default_output_path(direction: Direction, input: &InputSource) -> PathBuf {
    let base: PathBuf = match input {
        InputSource::File(path) => path.clone(),
        InputSource::Literal(_) => PathBuf::from(LITERAL_STEM),
    };

    match direction {
        Direction::Encode => with_suffix(&base, ENCODED_SUFFIX),
        Direction::Decode => with_suffix(&strip_suffix(&base, ENCODED_SUFFIX), DECODED_SUFFIX),
    }
}

/// Append `suffix` to the final path component
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(LITERAL_STEM));
    name.push(suffix);
    path.with_file_name(name)
}

/// Remove `suffix` from the final path component if present
fn strip_suffix(path: &Path, suffix: &str) -> PathBuf {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) if name.len() > suffix.len() && name.ends_with(suffix) => {
            path.with_file_name(&name[..name.len() - suffix.len()])
        }
        _ => path.to_path_buf(),
    }
}

/// Refuse to write over the input or an existing file without `force`
pub fn check_output_path(output: &Path, input: &InputSource, force: bool) -> SealResult<()> {
    if let InputSource::File(input_path) = input {
        if same_file(output, input_path) {
            return Err(SealError::Config(format!(
                "output {} would overwrite the input file",
                output.display()
            )));
        }
    }

    if output.exists() && !force {
        return Err(SealError::Config(format!(
            "{} already exists; pass --force to overwrite it",
            output.display()
        )));
    }

    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
