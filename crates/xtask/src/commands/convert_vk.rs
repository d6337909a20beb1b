//! snarkjs verification key conversion command
//!
//! Converts a snarkjs `verification_key.json` (decimal coordinates, G2 as
//! `[c0, c1]`) into the verifier's hex layout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use zk::codec::SnarkjsVerifyingKey;

use super::write_json;

#[derive(Debug, Parser)]
pub struct ConvertVk {
    /// snarkjs verification key JSON
    input: PathBuf,

    /// Output JSON path (stdout when omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

impl ConvertVk {
    pub fn execute(self) -> Result<()> {
        let json = std::fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read {}", self.input.display()))?;
        let vk: SnarkjsVerifyingKey = serde_json::from_str(&json)
            .with_context(|| format!("Not a snarkjs verification key: {}", self.input.display()))?;

        let bytes = vk
            .to_key_bytes()
            .context("Verification key has an invalid point")?;

        if bytes.ic.len() != zk::NUM_PUBLIC_INPUTS + 1 {
            eprintln!(
                "{} Key has {} public inputs; the match outcome circuit has {}",
                style("⚠").yellow().bold(),
                bytes.ic.len().saturating_sub(1),
                zk::NUM_PUBLIC_INPUTS
            );
        }

        write_json(&bytes.to_hex(), self.out.as_deref())
    }
}
