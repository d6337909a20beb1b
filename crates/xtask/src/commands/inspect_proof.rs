//! Inspect and debug encoded proofs
//!
//! Decodes the 256-byte verifier layout back into curve points, checking each
//! point is on the curve and in the prime-order subgroup. A G2 point whose
//! c0/c1 halves were swapped fails here instead of silently failing on-chain.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use console::style;
use zk::PROOF_BYTES;
use zk::codec::{G1_BYTES, G2_BYTES, SnarkjsProof, decode_g1, decode_g2, decode_proof};

#[derive(Debug, Parser)]
pub struct InspectProof {
    /// Proof as hex (with or without 0x prefix)
    #[arg(conflicts_with_all = ["file", "snarkjs"])]
    hex: Option<String>,

    /// File holding the raw 256 bytes, or their hex encoding
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// snarkjs proof JSON to convert and inspect
    #[arg(long)]
    snarkjs: Option<PathBuf>,
}

impl InspectProof {
    pub fn run(&self) -> Result<()> {
        let bytes = self.load()?;

        println!("📏 Proof Bytes: {} bytes", bytes.len());
        if bytes.len() != PROOF_BYTES {
            anyhow::bail!(
                "Proof must be exactly {} bytes, got {}",
                PROOF_BYTES,
                bytes.len()
            );
        }
        println!("🔍 Hex: 0x{}", hex::encode(&bytes));
        println!();

        let (a, rest) = bytes.split_at(G1_BYTES);
        let (b, c) = rest.split_at(G2_BYTES);

        print_section("A (G1, bytes 0..64)");
        match decode_g1(a) {
            Ok(point) => {
                println!("  ├─ x: {}", point.x);
                println!("  └─ y: {}", point.y);
            }
            Err(e) => report_invalid(&e),
        }

        print_section("B (G2, bytes 64..192, c1 before c0)");
        match decode_g2(b) {
            Ok(point) => {
                println!("  ├─ x.c1: {}", point.x.c1);
                println!("  ├─ x.c0: {}", point.x.c0);
                println!("  ├─ y.c1: {}", point.y.c1);
                println!("  └─ y.c0: {}", point.y.c0);
            }
            Err(e) => report_invalid(&e),
        }

        print_section("C (G1, bytes 192..256)");
        match decode_g1(c) {
            Ok(point) => {
                println!("  ├─ x: {}", point.x);
                println!("  └─ y: {}", point.y);
            }
            Err(e) => report_invalid(&e),
        }

        println!();
        match decode_proof(&bytes) {
            Ok(_) => println!("{} All points valid", style("✓").green().bold()),
            Err(e) => {
                println!("{} Proof is malformed: {}", style("✗").red().bold(), e);
                anyhow::bail!("Proof failed validation");
            }
        }

        Ok(())
    }

    fn load(&self) -> Result<Vec<u8>> {
        if let Some(ref path) = self.snarkjs {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let proof: SnarkjsProof = serde_json::from_str(&json)
                .with_context(|| format!("Not a snarkjs proof: {}", path.display()))?;
            return Ok(proof
                .to_bytes()
                .context("snarkjs proof has an invalid coordinate")?
                .to_vec());
        }

        if let Some(ref path) = self.file {
            let raw = std::fs::read(path)
                .with_context(|| format!("Failed to read proof file: {}", path.display()))?;
            if raw.len() == PROOF_BYTES {
                return Ok(raw);
            }
            let text = String::from_utf8(raw).context("Proof file is neither raw bytes nor hex")?;
            return decode_hex(&text);
        }

        let hex = self
            .hex
            .as_deref()
            .ok_or_else(|| anyhow!("Provide a proof as hex, --file or --snarkjs"))?;
        decode_hex(hex)
    }
}

fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(digits).context("Invalid hex")
}

fn print_section(title: &str) {
    println!("{}", style(title).bold().cyan());
}

fn report_invalid(error: &zk::EncodingError) {
    println!("  └─ {} {}", style("invalid:").red().bold(), error);
}
