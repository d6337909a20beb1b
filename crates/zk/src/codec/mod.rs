//! Byte layouts shared with the on-chain verifier.
//!
//! The prover works with arkworks types; the verifier contract takes fixed
//! big-endian byte strings. Everything crossing that boundary goes through
//! this module:
//!
//! - [`field`]: 32-byte words for scalars, coordinates and decimal strings
//! - [`point`]: G1 / G2 points and the 256-byte proof
//! - [`verifying_key`]: verifying key export (alpha, beta, gamma, delta, ic)
//! - [`snarkjs`]: conversion from snarkjs JSON proofs and keys

pub mod field;
pub mod point;
pub mod snarkjs;
pub mod verifying_key;

#[cfg(test)]
mod test_logs;

pub use field::{
    bytes_to_field, bytes_to_fr, decimal_to_bytes, decimal_to_fr, field_to_bytes, fr_to_bytes,
    parse_decimal, u32_to_word,
};
pub use point::{decode_g1, decode_g2, decode_proof, encode_g1, encode_g2, encode_proof};
pub use snarkjs::{SnarkjsProof, SnarkjsVerifyingKey};
pub use verifying_key::{VerificationKeyBytes, VerificationKeyHex};

/// Bytes per base- or scalar-field element.
pub const FIELD_BYTES: usize = 32;
/// Bytes per encoded G1 point.
pub const G1_BYTES: usize = 2 * FIELD_BYTES;
/// Bytes per encoded G2 point.
pub const G2_BYTES: usize = 4 * FIELD_BYTES;
/// Bytes per encoded Groth16 proof.
pub const PROOF_BYTES: usize = 2 * G1_BYTES + G2_BYTES;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("{what} coordinate is not a canonical base-field element")]
    NonCanonicalCoordinate { what: &'static str },

    #[error("{what} is not on the curve")]
    NotOnCurve { what: &'static str },

    #[error("{what} is not in the prime-order subgroup")]
    NotInSubgroup { what: &'static str },

    #[error("value is not below the scalar field modulus")]
    NonCanonicalScalar,

    #[error("invalid decimal string {0:?}")]
    InvalidDecimal(String),

    #[error("decimal value does not fit in 256 bits")]
    DecimalOverflow,

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("malformed {0}")]
    Malformed(&'static str),
}
