//! Prover interface and the Groth16 backend.
//!
//! Proof generation runs the same five steps for every backend:
//!
//! 1. Validate the claimed outcome at the boundary
//! 2. Commit to the input log natively
//! 3. Build the typed witness
//! 4. Prove (rejecting witnesses the circuit cannot satisfy)
//! 5. Encode the proof into the verifier's 256-byte layout

use std::sync::Arc;

use ark_bn254::{Bn254, Fr as Fp254};
use ark_groth16::PreparedVerifyingKey;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem};
use match_core::{GameInputEntry, MatchError};
use rand::rngs::OsRng;
use tracing::{debug, warn};

use crate::circuit::groth16::{self, CircuitKeys};
use crate::circuit::{MatchOutcomeCircuit, MatchWitness};
use crate::claim::{GeneratedProof, MatchOutcomeClaim, PublicInputs, finalize};
use crate::codec::{EncodingError, PROOF_BYTES, decode_proof, encode_proof};

/// Errors that can occur during proof generation or verification.
#[derive(Debug, thiserror::Error)]
pub enum ProofError {
    #[error("invalid match data: {0}")]
    InvalidInput(#[from] MatchError),

    /// The claim does not follow from the log. Not a transient failure.
    #[error("witness inconsistent with claimed outcome: {0}")]
    WitnessInconsistency(String),

    #[error("circuit setup failed: {0}")]
    Setup(String),

    #[error("circuit keys expose {found} public inputs, circuit has {expected}")]
    KeyMismatch { expected: usize, found: usize },

    #[error("Circuit proof generation failed: {0}")]
    CircuitProofError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("proof encoding failed: {0}")]
    Encoding(#[from] EncodingError),
}

/// Proving backend interface.
///
/// Implementations hold read-only key material and may be shared across
/// threads; each call is independent.
pub trait Prover: Send + Sync {
    /// Proves a witness, returning the encoded proof.
    fn prove(&self, witness: &MatchWitness) -> Result<[u8; PROOF_BYTES], ProofError>;

    /// Checks an encoded proof against its public inputs.
    ///
    /// Malformed bytes are an error; a well-formed proof that does not verify
    /// is `Ok(false)`.
    fn verify(&self, proof_bytes: &[u8], public_inputs: &PublicInputs)
    -> Result<bool, ProofError>;
}

/// Finalizes a match and proves the resulting claim.
pub fn generate_proof<P: Prover + ?Sized>(
    prover: &P,
    entries: &[GameInputEntry],
    valid_count: usize,
    my_final_health: u32,
    opponent_final_health: u32,
) -> Result<GeneratedProof, ProofError> {
    let claim = finalize(entries, valid_count, my_final_health, opponent_final_health)?;
    prove_claim(prover, entries, valid_count, &claim)
}

/// Proves an explicit claim about a log.
///
/// The claim is not re-derived, so a dishonest one surfaces as
/// [`ProofError::WitnessInconsistency`].
pub fn prove_claim<P: Prover + ?Sized>(
    prover: &P,
    entries: &[GameInputEntry],
    valid_count: usize,
    claim: &MatchOutcomeClaim,
) -> Result<GeneratedProof, ProofError> {
    let witness = MatchWitness::new(entries, valid_count, claim)?;
    let proof_bytes = prover.prove(&witness)?;
    Ok(GeneratedProof::new(proof_bytes, claim))
}

/// Synthesizes the circuit over a witness and checks every constraint.
///
/// Groth16 proving does not check satisfiability itself, so this runs first.
pub fn check_witness(witness: &MatchWitness) -> Result<(), ProofError> {
    let cs = ConstraintSystem::<Fp254>::new_ref();
    MatchOutcomeCircuit::new(witness)
        .generate_constraints(cs.clone())
        .map_err(|e| ProofError::CircuitProofError(format!("constraint synthesis failed: {e:?}")))?;

    let satisfied = cs
        .is_satisfied()
        .map_err(|e| ProofError::CircuitProofError(format!("satisfiability check failed: {e:?}")))?;

    if !satisfied {
        let reason = witness
            .diagnose()
            .unwrap_or_else(|| "constraint system unsatisfied".to_string());
        warn!(%reason, valid_count = witness.valid_count, "rejecting inconsistent witness");
        return Err(ProofError::WitnessInconsistency(reason));
    }

    debug!(constraints = cs.num_constraints(), "witness satisfies circuit");
    Ok(())
}

/// Groth16 prover over BN254.
pub struct Groth16Prover {
    keys: Arc<CircuitKeys>,
    pvk: PreparedVerifyingKey<Bn254>,
}

impl Groth16Prover {
    /// Wraps circuit keys, rejecting keys made for another circuit.
    pub fn new(keys: Arc<CircuitKeys>) -> Result<Self, ProofError> {
        keys.check_shape()?;
        let pvk = keys.prepared_verifying_key();
        Ok(Self { keys, pvk })
    }

    pub fn keys(&self) -> &Arc<CircuitKeys> {
        &self.keys
    }
}

impl Prover for Groth16Prover {
    fn prove(&self, witness: &MatchWitness) -> Result<[u8; PROOF_BYTES], ProofError> {
        check_witness(witness)?;

        let proof = groth16::prove(MatchOutcomeCircuit::new(witness), &self.keys, &mut OsRng)?;
        Ok(encode_proof(&proof))
    }

    fn verify(
        &self,
        proof_bytes: &[u8],
        public_inputs: &PublicInputs,
    ) -> Result<bool, ProofError> {
        let proof = decode_proof(proof_bytes)?;
        groth16::verify(&proof, &public_inputs.to_field_elements(), &self.pvk)
    }
}
