//! Zero-knowledge proofs of fighting-match outcomes.
//!
//! A peer that finishes a match proves, without revealing its input log, that
//! the final healths and winner it claims are the honest replay of a log
//! whose Poseidon hash chain equals a public commitment. Both peers record
//! the same inputs, so an honest opponent reproduces the same commitment.
//!
//! - [`circuit`]: commitment, gadgets, the match outcome circuit and Groth16 keys
//! - [`claim`]: claims, public inputs and submission artifacts
//! - [`codec`]: byte layouts shared with the on-chain verifier
//! - [`prover`]: the [`Prover`] seam and the Groth16 backend
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use zk::{CircuitKeys, Groth16Prover, generate_proof};
//! use match_core::{GameInputEntry, MAX_INPUTS};
//!
//! let keys = Arc::new(CircuitKeys::setup(&mut rand::rngs::OsRng)?);
//! let prover = Groth16Prover::new(keys)?;
//! let log = [GameInputEntry::EMPTY; MAX_INPUTS];
//! let proof = generate_proof(&prover, &log, 0, 100, 100)?;
//! assert_eq!(proof.proof_bytes.len(), 256);
//! # Ok::<(), zk::ProofError>(())
//! ```

pub mod circuit;
pub mod claim;
pub mod codec;
pub mod prover;

pub use circuit::{
    CircuitKeys, MatchOutcomeCircuit, MatchWitness, NUM_PUBLIC_INPUTS, compute_input_log_hash,
};
pub use claim::{GeneratedProof, MatchOutcomeClaim, ProofSubmission, PublicInputs, finalize};
pub use codec::{EncodingError, PROOF_BYTES, VerificationKeyBytes};
pub use prover::{Groth16Prover, ProofError, Prover, check_witness, generate_proof, prove_claim};

/// BN254 scalar field, the field every public input lives in.
pub use ark_bn254::Fr as Fp254;
