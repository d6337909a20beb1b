//! Match log commitment command
//!
//! Reads a JSON array of input entries and prints the Poseidon commitment the
//! proof generator would publish. With both final healths it also prints the
//! full claim and the submission payload.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use match_core::{GameInputEntry, padded_log};
use zk::codec::fr_to_bytes;
use zk::{compute_input_log_hash, finalize};

#[derive(Debug, Parser)]
pub struct HashLog {
    /// JSON file with the valid entries, in recording order
    log: PathBuf,

    /// Claimed final health of the local player
    #[arg(long, requires = "opponent_health")]
    my_health: Option<u32>,

    /// Claimed final health of the opponent
    #[arg(long, requires = "my_health")]
    opponent_health: Option<u32>,
}

impl HashLog {
    pub fn execute(self) -> Result<()> {
        let json = std::fs::read_to_string(&self.log)
            .with_context(|| format!("Failed to read {}", self.log.display()))?;
        let entries: Vec<GameInputEntry> = serde_json::from_str(&json)
            .with_context(|| format!("Invalid match log: {}", self.log.display()))?;

        let (log, valid_count) = padded_log(&entries).context("Match log does not fit")?;
        let hash = compute_input_log_hash(&log, valid_count).context("Failed to hash log")?;

        println!("{} {}", style("Entries:").bold().cyan(), valid_count);
        println!("{} {}", style("Commitment:").bold().cyan(), hash);
        println!(
            "{} 0x{}",
            style("Commitment (bytes32):").bold().cyan(),
            hex::encode(fr_to_bytes(&hash))
        );

        if let (Some(my), Some(opponent)) = (self.my_health, self.opponent_health) {
            let claim = finalize(&log, valid_count, my, opponent).context("Invalid claim")?;
            println!("{} {}", style("Outcome:").bold().cyan(), claim.i_won);
            println!(
                "{} {}",
                style("Damage dealt:").bold().cyan(),
                claim.total_damage_dealt
            );
            println!();
            println!(
                "{}",
                serde_json::to_string_pretty(&claim.submission())
                    .context("Failed to serialize submission")?
            );
        }

        Ok(())
    }
}
