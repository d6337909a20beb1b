//! Circuit-specific setup command
//!
//! Generates Groth16 keys for the match outcome circuit, writes the circuit
//! artifact the proof generator loads, and optionally the verifier key JSON.
//!
//! Keys produced here are only as trustworthy as the machine that ran the
//! setup; production keys come from a ceremony.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use rand::SeedableRng;
use rand::rngs::{OsRng, StdRng};
use zk::{CircuitKeys, VerificationKeyBytes};

use super::write_json;

#[derive(Debug, Parser)]
pub struct Setup {
    /// Artifact output path (defaults to MATCH_PROVER_ARTIFACT, then the platform data dir)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Also write the verifier key as hex JSON
    #[arg(long)]
    vk_out: Option<PathBuf>,

    /// Deterministic seed for reproducible development keys (insecure)
    #[arg(long)]
    seed: Option<u64>,

    /// Overwrite an existing artifact
    #[arg(short, long)]
    force: bool,
}

impl Setup {
    pub fn execute(self) -> Result<()> {
        let out = self
            .out
            .unwrap_or_else(|| runtime::ProverConfig::from_env().artifact_path);

        if out.exists() && !self.force {
            anyhow::bail!(
                "Artifact already exists: {}\nPass --force to overwrite it.",
                out.display()
            );
        }

        if self.seed.is_some() {
            eprintln!(
                "{} Seeded setup: anyone who knows the seed can forge proofs",
                style("⚠").yellow().bold()
            );
        }

        println!("{}", style("Running circuit-specific setup...").bold());
        let started = Instant::now();
        let keys = match self.seed {
            Some(seed) => CircuitKeys::setup(&mut StdRng::seed_from_u64(seed)),
            None => CircuitKeys::setup(&mut OsRng),
        }
        .context("Circuit setup failed")?;

        let bytes = keys.to_bytes().context("Failed to serialize circuit keys")?;
        if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&out, &bytes)
            .with_context(|| format!("Failed to write artifact: {}", out.display()))?;

        println!(
            "{} Artifact: {} ({} bytes, {:.1}s)",
            style("✓").green().bold(),
            style(out.display()).cyan(),
            bytes.len(),
            started.elapsed().as_secs_f64()
        );
        println!(
            "{} Public inputs: {}",
            style("•").dim(),
            keys.num_public_inputs()
        );

        if let Some(vk_out) = self.vk_out {
            let vk = VerificationKeyBytes::from_verifying_key(&keys.verifying_key);
            write_json(&vk.to_hex(), Some(&vk_out))?;
        }

        Ok(())
    }
}
