//! Command-line arguments
//!
//! Flags mirror the classic `-e`/`-d`, `-f`/`-s` surface. Parsing only
//! collects them; [`RunConfig::try_from`] validates combinations.

use std::path::PathBuf;

use clap::Parser;

use crate::config::paths::{default_output_path, DEFAULT_KEY_FILE, KEY_FILE_ENV};
use crate::config::run::{direction_from_flags, input_from_flags, key_policy_from_flags};
use crate::config::{OutputSink, RunConfig};
use crate::encoding::TextEncoding;
use crate::error::SealError;

#[derive(Parser, Debug)]
#[command(
    name = "keyseal",
    version,
    about = "Compress and encrypt files or strings with a local AES-256 key",
    long_about = "keyseal compresses its input with DEFLATE and seals it with AES-256-GCM \
                  under a key stored next to you on disk. The result is a nonce-prefixed \
                  envelope that only the same key can open."
)]
pub struct Cli {
    /// Encrypt mode
    #[arg(short = 'e', long = "encrypt")]
    pub encrypt: bool,

    /// Decrypt mode
    #[arg(short = 'd', long = "decrypt")]
    pub decrypt: bool,

    /// Input file path
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Input string (an armored envelope when decrypting)
    #[arg(short = 's', long = "string", value_name = "TEXT", allow_hyphen_values = true)]
    pub string: Option<String>,

    /// Use hex instead of base64 for text envelopes
    #[arg(long = "output-as-hex")]
    pub output_as_hex: bool,

    /// Write the result to stdout instead of a file
    #[arg(long = "to-stdout")]
    pub to_stdout: bool,

    /// Read and write armored text envelopes in files too
    #[arg(long)]
    pub text: bool,

    /// Output file (defaults to <input>.bin or <input>.dec)
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,

    /// Key file location
    #[arg(long, value_name = "PATH", env = KEY_FILE_ENV, default_value = DEFAULT_KEY_FILE)]
    pub key_file: PathBuf,

    /// Reuse an existing key without asking
    #[arg(long)]
    pub reuse_key: bool,

    /// Replace an existing key without asking (old envelopes become unreadable)
    #[arg(long)]
    pub new_key: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all logs
    #[arg(short, long)]
    pub quiet: bool,
}

impl TryFrom<&Cli> for RunConfig {
    type Error = SealError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let direction = direction_from_flags(cli.encrypt, cli.decrypt)?;
        let input = input_from_flags(cli.file.clone(), cli.string.clone())?;
        let key_policy = key_policy_from_flags(cli.reuse_key, cli.new_key)?;

        let output = match (cli.to_stdout, &cli.output) {
            (true, Some(_)) => {
                return Err(SealError::Usage(
                    "--to-stdout and --output are mutually exclusive".to_string(),
                ))
            }
            (true, None) => OutputSink::Stdout,
            (false, Some(path)) => OutputSink::File(path.clone()),
            (false, None) => OutputSink::File(default_output_path(direction, &input)),
        };

        Ok(RunConfig {
            direction,
            input,
            output,
            encoding: TextEncoding::from_hex_flag(cli.output_as_hex),
            text_files: cli.text,
            key_file: cli.key_file.clone(),
            key_policy,
            force: cli.force,
        })
    }
}
