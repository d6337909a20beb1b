//! Typed witness for the match outcome circuit.
//!
//! The witness is the full padded log plus the claimed public values. Padding
//! past `valid_count` is normalised to [`GameInputEntry::EMPTY`] so that slots
//! the commitment ignores can never trip the circuit's range checks.

use ark_bn254::Fr as Fp254;
use match_core::{
    GameInputEntry, InputLog, MAX_INPUTS, MatchError, WinnerFlag, combat, entry::validate_log,
};

use super::commitment::compute_input_log_hash;
use crate::ProofError;
use crate::claim::MatchOutcomeClaim;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchWitness {
    pub entries: InputLog,
    pub valid_count: usize,
    pub my_final_health: u32,
    pub opponent_final_health: u32,
    pub i_won: WinnerFlag,
    pub input_log_hash: Fp254,
}

impl MatchWitness {
    /// Pairs a log with the claim made about it.
    ///
    /// No consistency check happens here; an inconsistent claim produces a
    /// witness the circuit rejects.
    pub fn new(
        entries: &[GameInputEntry],
        valid_count: usize,
        claim: &MatchOutcomeClaim,
    ) -> Result<Self, ProofError> {
        if valid_count > MAX_INPUTS || valid_count > entries.len() {
            return Err(MatchError::ValidCountOutOfRange { valid_count }.into());
        }

        let mut padded = [GameInputEntry::EMPTY; MAX_INPUTS];
        padded[..valid_count].copy_from_slice(&entries[..valid_count]);

        Ok(Self {
            entries: padded,
            valid_count,
            my_final_health: claim.my_final_health,
            opponent_final_health: claim.opponent_final_health,
            i_won: claim.i_won,
            input_log_hash: claim.input_log_hash,
        })
    }

    /// Public inputs in verifier order.
    pub fn public_inputs(&self) -> [Fp254; 4] {
        [
            self.input_log_hash,
            Fp254::from(u64::from(self.my_final_health)),
            Fp254::from(u64::from(self.opponent_final_health)),
            Fp254::from(u64::from(self.i_won.as_u32())),
        ]
    }

    /// Explains, natively, why the circuit would reject this witness.
    ///
    /// Returns `None` when every relation holds.
    pub fn diagnose(&self) -> Option<String> {
        if let Err(err) = validate_log(&self.entries, self.valid_count) {
            return Some(err.to_string());
        }

        match compute_input_log_hash(&self.entries, self.valid_count) {
            Ok(hash) if hash != self.input_log_hash => {
                return Some("input log hash does not match the recorded inputs".to_string());
            }
            Err(err) => return Some(err.to_string()),
            Ok(_) => {}
        }

        let tally = combat::replay(&self.entries, self.valid_count);
        if tally.my_health() != self.my_final_health {
            return Some(format!(
                "claimed health {} but the log replays to {}",
                self.my_final_health,
                tally.my_health()
            ));
        }
        if tally.opponent_health() != self.opponent_final_health {
            return Some(format!(
                "claimed opponent health {} but the log replays to {}",
                self.opponent_final_health,
                tally.opponent_health()
            ));
        }

        let expected = WinnerFlag::from_healths(self.my_final_health, self.opponent_final_health);
        if expected != self.i_won {
            return Some(format!(
                "claimed outcome {} but healths imply {}",
                self.i_won, expected
            ));
        }

        None
    }
}
