//! Configuration module for keyseal
//!
//! This module provides configuration management including:
//! - Key file and output path resolution
//! - The immutable per-run configuration

pub mod paths;
pub mod run;

pub use paths::{check_output_path, default_output_path, DEFAULT_KEY_FILE, KEY_FILE_ENV};
pub use run::{InputSource, KeyPolicy, OutputSink, RunConfig};
