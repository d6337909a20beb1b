//! snarkjs JSON proofs and verifying keys.
//!
//! snarkjs prints projective coordinates as decimal strings and orders G2
//! components real-first (`[c0, c1]`). Conversion swaps them into the
//! verifier's `c1 || c0` order and drops the `z` coordinate, treating `z = 0`
//! as the point at infinity.

use serde::{Deserialize, Serialize};

use super::field::decimal_to_bytes;
use super::verifying_key::VerificationKeyBytes;
use super::{EncodingError, FIELD_BYTES, G1_BYTES, G2_BYTES, PROOF_BYTES};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnarkjsProof {
    pub pi_a: Vec<String>,
    pub pi_b: Vec<Vec<String>>,
    pub pi_c: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
}

impl SnarkjsProof {
    /// `A || B || C` in the 256-byte verifier layout.
    ///
    /// Only the byte layout is produced; use `decode_proof` to validate points.
    pub fn to_bytes(&self) -> Result<[u8; PROOF_BYTES], EncodingError> {
        let mut bytes = [0u8; PROOF_BYTES];
        bytes[..G1_BYTES].copy_from_slice(&g1_bytes(&self.pi_a, "pi_a")?);
        bytes[G1_BYTES..G1_BYTES + G2_BYTES].copy_from_slice(&g2_bytes(&self.pi_b, "pi_b")?);
        bytes[G1_BYTES + G2_BYTES..].copy_from_slice(&g1_bytes(&self.pi_c, "pi_c")?);
        Ok(bytes)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnarkjsVerifyingKey {
    pub vk_alpha_1: Vec<String>,
    pub vk_beta_2: Vec<Vec<String>>,
    pub vk_gamma_2: Vec<Vec<String>>,
    pub vk_delta_2: Vec<Vec<String>>,
    #[serde(rename = "IC")]
    pub ic: Vec<Vec<String>>,
    #[serde(rename = "nPublic", default, skip_serializing_if = "Option::is_none")]
    pub n_public: Option<usize>,
}

impl SnarkjsVerifyingKey {
    pub fn to_key_bytes(&self) -> Result<VerificationKeyBytes, EncodingError> {
        if let Some(n_public) = self.n_public {
            if self.ic.len() != n_public + 1 {
                return Err(EncodingError::Malformed("IC length for nPublic"));
            }
        }

        Ok(VerificationKeyBytes {
            alpha: g1_bytes(&self.vk_alpha_1, "vk_alpha_1")?,
            beta: g2_bytes(&self.vk_beta_2, "vk_beta_2")?,
            gamma: g2_bytes(&self.vk_gamma_2, "vk_gamma_2")?,
            delta: g2_bytes(&self.vk_delta_2, "vk_delta_2")?,
            ic: self
                .ic
                .iter()
                .map(|point| g1_bytes(point, "IC"))
                .collect::<Result<_, _>>()?,
        })
    }
}

fn g1_bytes(point: &[String], what: &'static str) -> Result<[u8; G1_BYTES], EncodingError> {
    let mut bytes = [0u8; G1_BYTES];
    let [x, y, rest @ ..] = point else {
        return Err(EncodingError::Malformed(what));
    };
    if rest.first().is_some_and(|z| is_zero(z)) {
        return Ok(bytes);
    }

    bytes[..FIELD_BYTES].copy_from_slice(&decimal_to_bytes(x)?);
    bytes[FIELD_BYTES..].copy_from_slice(&decimal_to_bytes(y)?);
    Ok(bytes)
}

fn g2_bytes(point: &[Vec<String>], what: &'static str) -> Result<[u8; G2_BYTES], EncodingError> {
    let mut bytes = [0u8; G2_BYTES];
    let [x, y, rest @ ..] = point else {
        return Err(EncodingError::Malformed(what));
    };
    if rest.first().is_some_and(|z| z.iter().all(|c| is_zero(c))) {
        return Ok(bytes);
    }

    let ([x_c0, x_c1, ..], [y_c0, y_c1, ..]) = (x.as_slice(), y.as_slice()) else {
        return Err(EncodingError::Malformed(what));
    };

    for (chunk, word) in bytes
        .chunks_exact_mut(FIELD_BYTES)
        .zip([x_c1, x_c0, y_c1, y_c0])
    {
        chunk.copy_from_slice(&decimal_to_bytes(word)?);
    }
    Ok(bytes)
}

fn is_zero(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.bytes().all(|b| b == b'0')
}
