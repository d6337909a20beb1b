//! Match outcome circuit.
//!
//! Proves that the claimed final healths and winner flag are the honest
//! replay of an input log whose Poseidon hash chain equals the public
//! commitment.
//!
//! # Public Inputs (in order)
//!
//! 1. `input_log_hash` - hash chain over the valid entries
//! 2. `my_final_health`
//! 3. `opponent_final_health`
//! 4. `i_won` - 0 lost, 1 won, 2 draw
//!
//! # Private Witness
//!
//! - The padded log of [`MAX_INPUTS`] entries
//! - `num_valid` and one activity flag per slot (a prefix of ones)
//!
//! The shape is fixed: every slot is hashed and replayed, and inactive slots
//! are masked out with conditional selects.

use ark_bn254::Fr as Fp254;
use ark_r1cs_std::alloc::AllocVar;
use ark_r1cs_std::boolean::Boolean;
use ark_r1cs_std::eq::EqGadget;
use ark_r1cs_std::fields::{FieldVar, fp::FpVar};
use ark_r1cs_std::select::CondSelectGadget;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};
use match_core::{
    ActionKind, BLOCKED_DAMAGE, GameInputEntry, InputLog, MAX_INPUTS, MAX_TIMESTAMP_MS,
    PUNCH_DAMAGE, STARTING_HEALTH,
};

use super::commitment::ACTION_RADIX;
use super::gadgets::{
    enforce_at_most, enforce_clamped_health, one_of_gadget, poseidon_hash_two_gadget,
    winner_flag_gadget,
};
use super::witness::MatchWitness;

/// Number of public inputs the verifying key expects.
pub const NUM_PUBLIC_INPUTS: usize = 4;

/// Bits needed for timestamps up to `MAX_TIMESTAMP_MS`.
const TIMESTAMP_BITS: usize = 24;

/// Bits needed for the health slack: accumulated damage never exceeds
/// `MAX_INPUTS * PUNCH_DAMAGE = 2560`.
const DAMAGE_SLACK_BITS: usize = 12;

/// Bits needed for a health lead minus one (at most 99).
const LEAD_BITS: usize = 7;

#[derive(Clone, Debug)]
pub struct MatchOutcomeCircuit {
    // Public inputs
    pub input_log_hash: Option<Fp254>,
    pub my_final_health: Option<Fp254>,
    pub opponent_final_health: Option<Fp254>,
    pub i_won: Option<Fp254>,

    // Private witness
    pub entries: Option<InputLog>,
    pub valid_count: Option<usize>,
}

impl MatchOutcomeCircuit {
    pub fn new(witness: &MatchWitness) -> Self {
        let [input_log_hash, my_final_health, opponent_final_health, i_won] =
            witness.public_inputs();

        Self {
            input_log_hash: Some(input_log_hash),
            my_final_health: Some(my_final_health),
            opponent_final_health: Some(opponent_final_health),
            i_won: Some(i_won),
            entries: Some(witness.entries),
            valid_count: Some(witness.valid_count),
        }
    }

    /// Circuit instance used for key generation.
    ///
    /// Groth16 setup only needs the constraint shape, which does not depend on
    /// witness values, but we use a real empty match so that the instance is
    /// also satisfiable.
    pub fn dummy() -> Self {
        Self {
            input_log_hash: Some(Fp254::from(0u64)),
            my_final_health: Some(Fp254::from(u64::from(STARTING_HEALTH))),
            opponent_final_health: Some(Fp254::from(u64::from(STARTING_HEALTH))),
            i_won: Some(Fp254::from(2u64)),
            entries: Some([GameInputEntry::EMPTY; MAX_INPUTS]),
            valid_count: Some(0),
        }
    }

    fn entry(&self, index: usize) -> Result<GameInputEntry, SynthesisError> {
        self.entries
            .as_ref()
            .map(|entries| entries[index])
            .ok_or(SynthesisError::AssignmentMissing)
    }
}

/// Allocated variables for one log slot.
struct EntryVars {
    active: Boolean<Fp254>,
    action: FpVar<Fp254>,
    timestamp_ms: FpVar<Fp254>,
    is_my_action: Boolean<Fp254>,
    did_hit: Boolean<Fp254>,
    opponent_blocking: Boolean<Fp254>,
}

impl ConstraintSynthesizer<Fp254> for MatchOutcomeCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fp254>) -> Result<(), SynthesisError> {
        // Public inputs, in verifier order
        let input_log_hash = FpVar::new_input(cs.clone(), || {
            self.input_log_hash.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let my_final_health = FpVar::new_input(cs.clone(), || {
            self.my_final_health.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let opponent_final_health = FpVar::new_input(cs.clone(), || {
            self.opponent_final_health
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let i_won = FpVar::new_input(cs.clone(), || {
            self.i_won.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let num_valid = FpVar::new_witness(cs.clone(), || {
            self.valid_count
                .map(|count| Fp254::from(count as u64))
                .ok_or(SynthesisError::AssignmentMissing)
        })?;

        let action_codes = [ActionKind::None, ActionKind::Punch, ActionKind::Block]
            .map(|action| Fp254::from(u64::from(action.as_u8())));
        let punch_code = FpVar::constant(Fp254::from(u64::from(ActionKind::Punch.as_u8())));
        let punch_damage = FpVar::constant(Fp254::from(u64::from(PUNCH_DAMAGE)));
        let blocked_damage = FpVar::constant(Fp254::from(u64::from(BLOCKED_DAMAGE)));

        let mut accumulator = FpVar::zero();
        let mut active_count = FpVar::zero();
        let mut previous_active = Boolean::TRUE;
        let mut damage_dealt = FpVar::zero();
        let mut damage_taken = FpVar::zero();

        for index in 0..MAX_INPUTS {
            let slot = allocate_entry(&self, cs.clone(), index)?;

            // Activity flags form a prefix: active[i] implies active[i - 1].
            slot.active
                .enforce_equal(&(&slot.active & &previous_active))?;
            active_count += FpVar::from(slot.active.clone());
            previous_active = slot.active.clone();

            one_of_gadget(&slot.action, &action_codes)?;
            enforce_at_most(&slot.timestamp_ms, u64::from(MAX_TIMESTAMP_MS), TIMESTAMP_BITS)?;

            // Hash chain step, kept only for active slots
            let f1 = &slot.action * Fp254::from(ACTION_RADIX) + &slot.timestamp_ms;
            let f2 = FpVar::from(slot.is_my_action.clone()) * Fp254::from(100u64)
                + FpVar::from(slot.did_hit.clone()) * Fp254::from(10u64)
                + FpVar::from(slot.opponent_blocking.clone());
            let chained = poseidon_hash_two_gadget(&(&accumulator + &f1), &f2)?;
            accumulator = FpVar::conditionally_select(&slot.active, &chained, &accumulator)?;

            // Damage replay
            let is_punch = slot.action.is_eq(&punch_code)?;
            let landed = &(&slot.active & &is_punch) & &slot.did_hit;
            let mine_landed = &landed & &slot.is_my_action;
            let hit_damage = FpVar::conditionally_select(
                &slot.opponent_blocking,
                &blocked_damage,
                &punch_damage,
            )?;

            let landed_fp = FpVar::from(landed);
            let mine_fp = FpVar::from(mine_landed);
            damage_dealt += &mine_fp * &hit_damage;
            damage_taken += (landed_fp - &mine_fp) * &hit_damage;
        }

        active_count.enforce_equal(&num_valid)?;
        accumulator.enforce_equal(&input_log_hash)?;

        let starting = u64::from(STARTING_HEALTH);
        enforce_clamped_health(&my_final_health, &damage_taken, starting, DAMAGE_SLACK_BITS)?;
        enforce_clamped_health(
            &opponent_final_health,
            &damage_dealt,
            starting,
            DAMAGE_SLACK_BITS,
        )?;

        let outcome = winner_flag_gadget(&my_final_health, &opponent_final_health, LEAD_BITS)?;
        i_won.enforce_equal(&outcome)?;

        Ok(())
    }
}

fn allocate_entry(
    circuit: &MatchOutcomeCircuit,
    cs: ConstraintSystemRef<Fp254>,
    index: usize,
) -> Result<EntryVars, SynthesisError> {
    let active = Boolean::new_witness(cs.clone(), || {
        circuit
            .valid_count
            .map(|count| index < count)
            .ok_or(SynthesisError::AssignmentMissing)
    })?;
    let action = FpVar::new_witness(cs.clone(), || {
        circuit
            .entry(index)
            .map(|entry| Fp254::from(u64::from(entry.action.as_u8())))
    })?;
    let timestamp_ms = FpVar::new_witness(cs.clone(), || {
        circuit
            .entry(index)
            .map(|entry| Fp254::from(u64::from(entry.timestamp_ms)))
    })?;
    let is_my_action = Boolean::new_witness(cs.clone(), || {
        circuit.entry(index).map(|entry| entry.is_my_action)
    })?;
    let did_hit = Boolean::new_witness(cs.clone(), || {
        circuit.entry(index).map(|entry| entry.did_hit)
    })?;
    let opponent_blocking = Boolean::new_witness(cs, || {
        circuit.entry(index).map(|entry| entry.opponent_blocking)
    })?;

    Ok(EntryVars {
        active,
        action,
        timestamp_ms,
        is_my_action,
        did_hit,
        opponent_blocking,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_relations::r1cs::ConstraintSystem;

    #[test]
    fn dummy_circuit_is_satisfied() {
        let cs = ConstraintSystem::<Fp254>::new_ref();
        MatchOutcomeCircuit::dummy()
            .generate_constraints(cs.clone())
            .unwrap();

        assert!(cs.is_satisfied().unwrap());
        assert_eq!(cs.num_instance_variables(), NUM_PUBLIC_INPUTS + 1);
    }

    #[test]
    fn dummy_with_wrong_winner_is_rejected() {
        let mut circuit = MatchOutcomeCircuit::dummy();
        circuit.i_won = Some(Fp254::from(1u64));

        let cs = ConstraintSystem::<Fp254>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();

        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn empty_log_with_nonzero_commitment_is_rejected() {
        let mut circuit = MatchOutcomeCircuit::dummy();
        circuit.input_log_hash = Some(Fp254::from(7u64));

        let cs = ConstraintSystem::<Fp254>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();

        assert!(!cs.is_satisfied().unwrap());
    }
}
