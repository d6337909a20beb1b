//! Arkworks circuit proving backend.
//!
//! Proves that a claimed match outcome is the honest replay of a committed
//! input log. Uses a Poseidon hash chain as the log commitment and Groth16 on
//! BN254 for proof generation.
//!
//! # Architecture
//!
//! ```text
//! (input log, claimed healths)
//!   ↓
//! MatchOutcomeClaim (native commitment, winner flag)
//!   ↓
//! MatchWitness (padded log + public values)
//!   ↓
//! MatchOutcomeCircuit (constraint system)
//!   ↓
//! Groth16 proof (256 bytes once encoded)
//! ```

pub mod commitment;
pub mod gadgets;
pub mod groth16;
pub mod match_outcome;
pub mod test_helpers;
pub mod witness;

pub use commitment::{compute_input_log_hash, get_poseidon_config, hash_two, pack_entry};
pub use groth16::CircuitKeys;
pub use match_outcome::{MatchOutcomeCircuit, NUM_PUBLIC_INPUTS};
pub use witness::MatchWitness;
