//! Match outcome claims and the artifacts produced for submission.

use ark_bn254::Fr as Fp254;
use match_core::{GameInputEntry, WinnerFlag, summarize};
use serde::{Deserialize, Serialize};

use crate::ProofError;
use crate::circuit::commitment::compute_input_log_hash;
use crate::codec::{FIELD_BYTES, PROOF_BYTES, fr_to_bytes, u32_to_word};

/// Outcome a peer claims for a finished match, bound to its input log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchOutcomeClaim {
    pub input_log_hash: Fp254,
    pub my_final_health: u32,
    pub opponent_final_health: u32,
    pub i_won: WinnerFlag,
    /// Informational; the circuit does not prove it.
    pub total_damage_dealt: u32,
}

/// Reduces a finished match to a claim.
///
/// Validates the boundary (count, health range, timestamps), commits to the
/// log and derives the winner flag from the claimed healths.
pub fn finalize(
    entries: &[GameInputEntry],
    valid_count: usize,
    my_final_health: u32,
    opponent_final_health: u32,
) -> Result<MatchOutcomeClaim, ProofError> {
    let summary = summarize(entries, valid_count, my_final_health, opponent_final_health)?;
    let input_log_hash = compute_input_log_hash(entries, valid_count)?;

    Ok(MatchOutcomeClaim {
        input_log_hash,
        my_final_health: summary.my_final_health,
        opponent_final_health: summary.opponent_final_health,
        i_won: summary.i_won,
        total_damage_dealt: summary.total_damage_dealt,
    })
}

impl MatchOutcomeClaim {
    pub fn public_inputs(&self) -> PublicInputs {
        PublicInputs {
            input_log_hash: self.input_log_hash,
            my_final_health: self.my_final_health,
            opponent_final_health: self.opponent_final_health,
            i_won: self.i_won,
        }
    }

    pub fn submission(&self) -> ProofSubmission {
        ProofSubmission {
            input_hash: fr_to_bytes(&self.input_log_hash),
            my_final_health: self.my_final_health,
            opponent_final_health: self.opponent_final_health,
            total_damage_dealt: self.total_damage_dealt,
            i_won: self.i_won.as_u32(),
        }
    }
}

/// The four public signals, in verifier order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicInputs {
    pub input_log_hash: Fp254,
    pub my_final_health: u32,
    pub opponent_final_health: u32,
    pub i_won: WinnerFlag,
}

impl PublicInputs {
    pub fn to_field_elements(&self) -> [Fp254; 4] {
        [
            self.input_log_hash,
            Fp254::from(u64::from(self.my_final_health)),
            Fp254::from(u64::from(self.opponent_final_health)),
            Fp254::from(u64::from(self.i_won.as_u32())),
        ]
    }

    /// 32-byte big-endian words, as the verifier contract assembles them.
    pub fn to_words(&self) -> [[u8; FIELD_BYTES]; 4] {
        [
            fr_to_bytes(&self.input_log_hash),
            u32_to_word(self.my_final_health),
            u32_to_word(self.opponent_final_health),
            u32_to_word(self.i_won.as_u32()),
        ]
    }

    /// Commitment as a decimal string.
    pub fn input_log_hash_decimal(&self) -> String {
        self.input_log_hash.to_string()
    }
}

/// Fields the match contract receives next to the proof bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofSubmission {
    pub input_hash: [u8; FIELD_BYTES],
    pub my_final_health: u32,
    pub opponent_final_health: u32,
    pub total_damage_dealt: u32,
    /// 0 lost, 1 won, 2 draw.
    pub i_won: u32,
}

/// A proof ready for submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedProof {
    pub proof_bytes: [u8; PROOF_BYTES],
    pub public_inputs: PublicInputs,
    pub submission: ProofSubmission,
}

impl GeneratedProof {
    pub fn new(proof_bytes: [u8; PROOF_BYTES], claim: &MatchOutcomeClaim) -> Self {
        Self {
            proof_bytes,
            public_inputs: claim.public_inputs(),
            submission: claim.submission(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::test_helpers::sample_exchange;
    use match_core::{MAX_INPUTS, MatchError};

    #[test]
    fn finalize_derives_winner_and_damage() {
        let (log, count) = sample_exchange();

        let claim = finalize(&log, count, 80, 70).unwrap();

        assert_eq!(claim.i_won, WinnerFlag::Won);
        assert_eq!(claim.total_damage_dealt, 30);
        assert_eq!(claim.input_log_hash, compute_input_log_hash(&log, count).unwrap());
    }

    #[test]
    fn finalize_rejects_boundary_violations() {
        let (log, count) = sample_exchange();

        assert!(matches!(
            finalize(&log, count, 150, 70),
            Err(ProofError::InvalidInput(MatchError::HealthOutOfRange { health: 150 }))
        ));
        assert!(matches!(
            finalize(&log, MAX_INPUTS + 1, 80, 70),
            Err(ProofError::InvalidInput(MatchError::ValidCountOutOfRange { .. }))
        ));
    }

    #[test]
    fn submission_mirrors_public_inputs() {
        let (log, count) = sample_exchange();
        let claim = finalize(&log, count, 80, 70).unwrap();

        let submission = claim.submission();
        let words = claim.public_inputs().to_words();

        assert_eq!(submission.input_hash, words[0]);
        assert_eq!(words[1][31], 80);
        assert_eq!(words[2][31], 70);
        assert_eq!(words[3][31], 1);
        assert_eq!(submission.i_won, 1);
    }

    #[test]
    fn decimal_commitment_of_empty_log() {
        let log = [GameInputEntry::EMPTY; MAX_INPUTS];
        let claim = finalize(&log, 0, 100, 100).unwrap();

        assert_eq!(claim.public_inputs().input_log_hash_decimal(), "0");
        assert_eq!(claim.i_won, WinnerFlag::Draw);
    }
}
