//! Poseidon hash chain committing to a match input log.
//!
//! Each valid entry is packed into two field elements and folded into a
//! running accumulator:
//!
//! ```text
//! f1  = action * 10_000_000 + timestamp_ms
//! f2  = is_my_action * 100 + did_hit * 10 + opponent_blocking
//! acc = poseidon(acc + f1, f2)          (acc starts at 0)
//! ```
//!
//! The chain is order-sensitive and stops at `valid_count`, so padding never
//! influences the result. An empty log commits to zero.
//!
//! # Performance
//!
//! Uses a globally cached Poseidon config (OnceLock). The round constants and
//! MDS matrix are generated once on first use.
//!
//! # Security Parameters
//!
//! - Field: BN254 scalar field (254-bit prime)
//! - Rate 2, capacity 1, alpha 5
//! - Full rounds: 8
//! - Partial rounds: 57
//!
//! # Consistency with Circuit
//!
//! [`hash_two`] must match `poseidon_hash_two_gadget()` in
//! `circuit/gadgets.rs`. Validated by `tests/poseidon_consistency.rs`.

use std::sync::OnceLock;

use ark_bn254::Fr as Fp254;
use ark_crypto_primitives::sponge::{
    CryptographicSponge,
    poseidon::{PoseidonConfig, PoseidonSponge, find_poseidon_ark_and_mds},
};
use match_core::GameInputEntry;
use match_core::entry::validate_log;
use tracing::debug;

use crate::ProofError;

/// Radix separating the action code from the timestamp in `f1`.
pub const ACTION_RADIX: u64 = 10_000_000;

static POSEIDON_CONFIG: OnceLock<PoseidonConfig<Fp254>> = OnceLock::new();

/// Get cached Poseidon config (8/57 rounds, rate 2).
pub fn get_poseidon_config() -> &'static PoseidonConfig<Fp254> {
    POSEIDON_CONFIG.get_or_init(|| {
        let (ark, mds) = find_poseidon_ark_and_mds::<Fp254>(254, 2, 8, 57, 0);
        PoseidonConfig::new(8, 57, 5, mds, ark, 2, 1)
    })
}

/// Two-to-one Poseidon hash. Both inputs are absorbed in a single call, like
/// the gadget.
pub fn hash_two(left: Fp254, right: Fp254) -> Result<Fp254, ProofError> {
    let mut sponge = PoseidonSponge::<Fp254>::new(get_poseidon_config());
    sponge.absorb(&vec![left, right]);
    sponge
        .squeeze_field_elements::<Fp254>(1)
        .first()
        .copied()
        .ok_or_else(|| ProofError::CircuitProofError("Poseidon squeeze failed".to_string()))
}

/// Packs an entry into its `(f1, f2)` field pair.
pub fn pack_entry(entry: &GameInputEntry) -> (Fp254, Fp254) {
    let f1 = u64::from(entry.action.as_u8()) * ACTION_RADIX + u64::from(entry.timestamp_ms);
    let f2 = u64::from(entry.is_my_action) * 100
        + u64::from(entry.did_hit) * 10
        + u64::from(entry.opponent_blocking);

    (Fp254::from(f1), Fp254::from(f2))
}

/// One step of the chain.
pub fn chain_step(acc: Fp254, entry: &GameInputEntry) -> Result<Fp254, ProofError> {
    let (f1, f2) = pack_entry(entry);
    hash_two(acc + f1, f2)
}

/// Commits to the first `valid_count` entries of a log.
///
/// Deterministic: identical logs produce identical commitments on every peer.
/// Timestamps above `MAX_TIMESTAMP_MS` are rejected, since they would spill
/// into the action digit of `f1`.
pub fn compute_input_log_hash(
    entries: &[GameInputEntry],
    valid_count: usize,
) -> Result<Fp254, ProofError> {
    validate_log(entries, valid_count)?;

    let acc = entries[..valid_count]
        .iter()
        .try_fold(Fp254::from(0u64), |acc, entry| chain_step(acc, entry))?;

    debug!(valid_count, "computed input log commitment");
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use match_core::{ActionKind, MAX_INPUTS, MatchError};

    fn punch(timestamp_ms: u32) -> GameInputEntry {
        GameInputEntry::new(ActionKind::Punch, timestamp_ms, true, true, false)
    }

    #[test]
    fn empty_log_commits_to_zero() {
        let log = [GameInputEntry::EMPTY; MAX_INPUTS];
        assert_eq!(compute_input_log_hash(&log, 0).unwrap(), Fp254::from(0u64));
    }

    #[test]
    fn packing_matches_layout() {
        let entry = GameInputEntry::new(ActionKind::Block, 1_234, true, false, true);
        let (f1, f2) = pack_entry(&entry);

        assert_eq!(f1, Fp254::from(20_001_234u64));
        assert_eq!(f2, Fp254::from(101u64));
    }

    #[test]
    fn single_entry_is_one_chain_step() {
        let entry = punch(500);
        let (f1, f2) = pack_entry(&entry);

        let expected = hash_two(f1, f2).unwrap();

        assert_eq!(compute_input_log_hash(&[entry], 1).unwrap(), expected);
    }

    #[test]
    fn padding_is_ignored() {
        let mut a = [GameInputEntry::EMPTY; MAX_INPUTS];
        let mut b = [GameInputEntry::EMPTY; MAX_INPUTS];
        a[0] = punch(10);
        b[0] = punch(10);
        b[1] = punch(99);

        assert_eq!(
            compute_input_log_hash(&a, 1).unwrap(),
            compute_input_log_hash(&b, 1).unwrap()
        );
    }

    #[test]
    fn order_matters() {
        let log = [punch(10), punch(20)];
        let swapped = [punch(20), punch(10)];

        assert_ne!(
            compute_input_log_hash(&log, 2).unwrap(),
            compute_input_log_hash(&swapped, 2).unwrap()
        );
    }

    #[test]
    fn rejects_timestamp_that_aliases_action() {
        let late = GameInputEntry::new(ActionKind::None, 10_000_000, true, true, false);
        let early_punch = GameInputEntry::new(ActionKind::Punch, 0, true, true, false);

        // Both would pack to f1 = 10_000_000.
        assert_eq!(pack_entry(&late), pack_entry(&early_punch));
        assert!(matches!(
            compute_input_log_hash(&[late], 1),
            Err(ProofError::InvalidInput(MatchError::TimestampOutOfRange {
                index: 0,
                timestamp_ms: 10_000_000
            }))
        ));
        assert!(compute_input_log_hash(&[early_punch], 1).is_ok());
    }

    #[test]
    fn rejects_count_past_capacity() {
        let log = [GameInputEntry::EMPTY; MAX_INPUTS];
        assert!(matches!(
            compute_input_log_hash(&log, MAX_INPUTS + 1),
            Err(ProofError::InvalidInput(MatchError::ValidCountOutOfRange { .. }))
        ));
    }
}
