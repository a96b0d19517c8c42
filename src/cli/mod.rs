//! CLI command handlers
//!
//! This module contains the argument surface, the terminal prompt, and the
//! driver that bridges clap parsing with the envelope pipeline.

pub mod args;
pub mod prompt;
pub mod run;

pub use args::Cli;
pub use prompt::{ask_reuse, prompt_for, TerminalPrompt};
pub use run::{handle_run, handle_run_with};
