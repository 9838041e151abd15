//! Shipment lifecycle replay tool.
//!
//! Reads a JSON Lines script of operations (see [`script::Command`]), applies
//! them in order to one in-memory shipping service, and prints one JSON
//! outcome per operation on stdout. Logs go to stderr.

mod script;

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::script::{parse_script, Replay};

#[derive(Parser)]
#[command(
    name = "shipping-cli",
    about = "Replay shipment lifecycle operations and print their outcomes"
)]
struct Cli {
    /// JSON Lines script to replay (default: stdin).
    #[arg(long)]
    input: Option<PathBuf>,

    /// Pretty-print each outcome.
    #[arg(long)]
    pretty: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let source = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read script from stdin")?;
            buf
        }
    };

    let commands = parse_script(&source)?;
    info!("Replaying {} commands", commands.len());

    let mut replay = Replay::new();
    let mut out = io::stdout().lock();
    for command in commands {
        let outcome = replay.apply(command);
        let line = if cli.pretty {
            serde_json::to_string_pretty(&outcome)?
        } else {
            serde_json::to_string(&outcome)?
        };
        writeln!(out, "{line}")?;
    }
    Ok(())
}
