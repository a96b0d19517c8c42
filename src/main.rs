use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use keyseal::cli::{handle_run, Cli};
use keyseal::config::RunConfig;
use keyseal::SealError;

fn init_tracing(cli: &Cli) {
    // --quiet   → off
    // --verbose → RUST_LOG if set, otherwise info
    // default   → off, so logs never mix with envelopes on stdout
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = RunConfig::try_from(cli)?;
    tracing::debug!(
        direction = ?config.direction,
        encoding = %config.encoding,
        text = config.uses_text_channel(),
        "resolved configuration"
    );

    handle_run(&config)?;
    Ok(())
}

fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    let Some(err) = err.downcast_ref::<SealError>() else {
        return ExitCode::FAILURE;
    };

    if err.is_authentication() {
        tracing::warn!("envelope rejected; check that the key file matches the one used to encode");
    } else if err.is_fatal_key_error() {
        tracing::error!("no usable key; nothing was encoded or decoded");
    }

    ExitCode::from(err.exit_code())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code_for(&err)
        }
    }
}
