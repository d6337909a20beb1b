//! Verifier key export command
//!
//! Reads a circuit artifact and prints its verifying key in the verifier's
//! byte layout (G2 coordinates as c1 then c0), hex encoded.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use zk::{CircuitKeys, VerificationKeyBytes};

use super::write_json;

#[derive(Debug, Parser)]
pub struct ExportVk {
    /// Circuit artifact (defaults to MATCH_PROVER_ARTIFACT, then the platform data dir)
    #[arg(short, long)]
    artifact: Option<PathBuf>,

    /// Output JSON path (stdout when omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

impl ExportVk {
    pub fn execute(self) -> Result<()> {
        let artifact = self
            .artifact
            .unwrap_or_else(|| runtime::ProverConfig::from_env().artifact_path);

        let bytes = std::fs::read(&artifact)
            .with_context(|| format!("Failed to read artifact: {}", artifact.display()))?;
        let keys = CircuitKeys::from_bytes(&bytes)
            .with_context(|| format!("Invalid circuit artifact: {}", artifact.display()))?;
        keys.check_shape()
            .context("Artifact was not generated for the match outcome circuit")?;

        let vk = VerificationKeyBytes::from_verifying_key(&keys.verifying_key);
        write_json(&vk.to_hex(), self.out.as_deref())
    }
}
