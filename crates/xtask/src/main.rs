//! Development tasks for the match prover
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{ConvertVk, ExportVk, HashLog, InspectProof, Setup};

/// Development tasks for the match prover
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for match outcome proofs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run circuit-specific setup and write the circuit artifact
    Setup(Setup),

    /// Export the verifier key of a circuit artifact
    ExportVk(ExportVk),

    /// Convert a snarkjs verification key to the verifier layout
    ConvertVk(ConvertVk),

    /// Decode a 256-byte proof and check its points
    InspectProof(InspectProof),

    /// Commit to a JSON match log
    HashLog(HashLog),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for MATCH_PROVER_* variables)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Setup(cmd) => cmd.execute(),
        Command::ExportVk(cmd) => cmd.execute(),
        Command::ConvertVk(cmd) => cmd.execute(),
        Command::InspectProof(cmd) => cmd.run(),
        Command::HashLog(cmd) => cmd.execute(),
    }
}
