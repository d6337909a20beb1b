//! R1CS gadgets for match outcome verification.
//!
//! This module provides reusable constraint gadgets for:
//! - Poseidon hashing (must agree with `commitment::hash_two`)
//! - Set membership and bit-width range checks
//! - Health clamping and tri-state winner derivation

use ark_bn254::Fr as Fp254;
use ark_crypto_primitives::sponge::constraints::CryptographicSpongeVar;
use ark_crypto_primitives::sponge::poseidon::constraints::PoseidonSpongeVar;
use ark_ff::{BigInteger, PrimeField};
use ark_r1cs_std::R1CSVar;
use ark_r1cs_std::alloc::AllocVar;
use ark_r1cs_std::boolean::Boolean;
use ark_r1cs_std::eq::EqGadget;
use ark_r1cs_std::fields::{FieldVar, fp::FpVar};
use ark_r1cs_std::select::CondSelectGadget;
use ark_relations::r1cs::SynthesisError;

use super::commitment::get_poseidon_config;

// ============================================================================
// Poseidon Hash Gadgets
// ============================================================================

/// Compute Poseidon hash of two field elements (circuit version).
///
/// This is the R1CS constraint version of `commitment::hash_two()`.
pub fn poseidon_hash_two_gadget(
    left: &FpVar<Fp254>,
    right: &FpVar<Fp254>,
) -> Result<FpVar<Fp254>, SynthesisError> {
    let cs = left.cs().or(right.cs());
    let mut sponge = PoseidonSpongeVar::new(cs, get_poseidon_config());
    sponge.absorb(&vec![left.clone(), right.clone()])?;

    let mut squeezed = sponge.squeeze_field_elements(1)?;
    squeezed.pop().ok_or(SynthesisError::Unsatisfiable)
}

// ============================================================================
// Range Gadgets
// ============================================================================

/// Enforce that `value` is one of `allowed`.
///
/// Uses the vanishing product `∏(value - a) = 0`, one constraint per element
/// after the first.
pub fn one_of_gadget(value: &FpVar<Fp254>, allowed: &[Fp254]) -> Result<(), SynthesisError> {
    let (first, rest) = allowed.split_first().ok_or(SynthesisError::Unsatisfiable)?;

    let mut product = value - *first;
    for &candidate in rest {
        product *= value - candidate;
    }

    product.enforce_equal(&FpVar::zero())
}

/// Enforce `0 <= value < 2^width` by boolean decomposition.
///
/// Field subtraction wraps, so checking `bound - x` with this gadget is how
/// upper bounds are expressed.
pub fn enforce_bit_width(value: &FpVar<Fp254>, width: usize) -> Result<(), SynthesisError> {
    let cs = value.cs();
    let mut recomposed = FpVar::zero();
    let mut coefficient = Fp254::from(1u64);

    for bit_index in 0..width {
        let bit = Boolean::new_witness(cs.clone(), || {
            value
                .value()
                .map(|v| v.into_bigint().get_bit(bit_index))
        })?;
        recomposed += FpVar::from(bit) * coefficient;
        coefficient += coefficient;
    }

    recomposed.enforce_equal(value)
}

/// Enforce `value <= max` for a value known to be small.
pub fn enforce_at_most(
    value: &FpVar<Fp254>,
    max: u64,
    width: usize,
) -> Result<(), SynthesisError> {
    enforce_bit_width(value, width)?;
    enforce_bit_width(&(FpVar::constant(Fp254::from(max)) - value), width)
}

// ============================================================================
// Match Rule Gadgets
// ============================================================================

/// Enforce `final_health == max(starting - damage, 0)`.
///
/// A knockout flag is witnessed; the slack on the chosen side must fit in
/// `width` bits, which rules out the wrong branch.
pub fn enforce_clamped_health(
    final_health: &FpVar<Fp254>,
    damage: &FpVar<Fp254>,
    starting: u64,
    width: usize,
) -> Result<(), SynthesisError> {
    let starting_fp = Fp254::from(starting);
    let knocked_out = Boolean::new_witness(damage.cs(), || {
        damage.value().map(|d| d >= starting_fp)
    })?;

    let remaining = FpVar::constant(starting_fp) - damage;
    let overflow = damage - starting_fp;

    let slack = FpVar::conditionally_select(&knocked_out, &overflow, &remaining)?;
    enforce_bit_width(&slack, width)?;

    let expected = FpVar::conditionally_select(&knocked_out, &FpVar::zero(), &remaining)?;
    final_health.enforce_equal(&expected)
}

/// Derive the tri-state winner flag (0 lost, 1 won, 2 draw) from two healths.
///
/// Both healths must already be bounded by `2^width`.
pub fn winner_flag_gadget(
    my_health: &FpVar<Fp254>,
    opponent_health: &FpVar<Fp254>,
    width: usize,
) -> Result<FpVar<Fp254>, SynthesisError> {
    let is_draw = my_health.is_eq(opponent_health)?;
    let ahead = Boolean::new_witness(my_health.cs().or(opponent_health.cs()), || {
        Ok(my_health.value()? > opponent_health.value()?)
    })?;

    // The lead is positive only on the correct branch; off-branch it wraps.
    let lead = FpVar::conditionally_select(
        &ahead,
        &(my_health - opponent_health),
        &(opponent_health - my_health),
    )?;
    let margin = FpVar::conditionally_select(
        &is_draw,
        &FpVar::zero(),
        &(lead - Fp254::from(1u64)),
    )?;
    enforce_bit_width(&margin, width)?;

    let decided = FpVar::conditionally_select(
        &ahead,
        &FpVar::constant(Fp254::from(1u64)),
        &FpVar::zero(),
    )?;
    FpVar::conditionally_select(
        &is_draw,
        &FpVar::constant(Fp254::from(2u64)),
        &decided,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_relations::r1cs::ConstraintSystem;

    fn witness(cs: &ark_relations::r1cs::ConstraintSystemRef<Fp254>, v: u64) -> FpVar<Fp254> {
        FpVar::new_witness(cs.clone(), || Ok(Fp254::from(v))).unwrap()
    }

    #[test]
    fn one_of_accepts_members_only() {
        for (value, ok) in [(0u64, true), (2, true), (3, false)] {
            let cs = ConstraintSystem::<Fp254>::new_ref();
            let var = witness(&cs, value);
            one_of_gadget(&var, &[0u64, 1, 2].map(Fp254::from)).unwrap();
            assert_eq!(cs.is_satisfied().unwrap(), ok, "value {value}");
        }
    }

    #[test]
    fn bit_width_rejects_wrapped_values() {
        let cs = ConstraintSystem::<Fp254>::new_ref();
        let var = witness(&cs, 255);
        enforce_bit_width(&var, 8).unwrap();
        assert!(cs.is_satisfied().unwrap());

        let cs = ConstraintSystem::<Fp254>::new_ref();
        let var = witness(&cs, 256);
        enforce_bit_width(&var, 8).unwrap();
        assert!(!cs.is_satisfied().unwrap());

        let cs = ConstraintSystem::<Fp254>::new_ref();
        let negative = FpVar::zero() - witness(&cs, 1);
        enforce_bit_width(&negative, 8).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn at_most_is_inclusive() {
        for (value, ok) in [(9_999_999u64, true), (10_000_000, false)] {
            let cs = ConstraintSystem::<Fp254>::new_ref();
            let var = witness(&cs, value);
            enforce_at_most(&var, 9_999_999, 24).unwrap();
            assert_eq!(cs.is_satisfied().unwrap(), ok, "value {value}");
        }
    }

    #[test]
    fn clamped_health_matches_native_rule() {
        for damage in [0u64, 40, 99, 100, 140, 2560] {
            let expected = 100u64.saturating_sub(damage);

            let cs = ConstraintSystem::<Fp254>::new_ref();
            let health = witness(&cs, expected);
            let damage_var = witness(&cs, damage);
            enforce_clamped_health(&health, &damage_var, 100, 12).unwrap();
            assert!(cs.is_satisfied().unwrap(), "damage {damage}");

            let cs = ConstraintSystem::<Fp254>::new_ref();
            let health = witness(&cs, expected + 1);
            let damage_var = witness(&cs, damage);
            enforce_clamped_health(&health, &damage_var, 100, 12).unwrap();
            assert!(!cs.is_satisfied().unwrap(), "damage {damage} off by one");
        }
    }

    #[test]
    fn winner_flag_matches_comparison() {
        for (my, opp, flag) in [(80u64, 60u64, 1u64), (0, 100, 0), (50, 50, 2), (1, 0, 1)] {
            let cs = ConstraintSystem::<Fp254>::new_ref();
            let my_var = witness(&cs, my);
            let opp_var = witness(&cs, opp);

            let result = winner_flag_gadget(&my_var, &opp_var, 7).unwrap();

            assert_eq!(result.value().unwrap(), Fp254::from(flag));
            assert!(cs.is_satisfied().unwrap());
        }
    }
}
