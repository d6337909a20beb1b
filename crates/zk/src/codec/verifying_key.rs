//! Verifying key export in the verifier contract's layout.

use ark_bn254::Bn254;
use ark_groth16::VerifyingKey;
use serde::{Deserialize, Serialize};

use super::point::{decode_g1, decode_g2, encode_g1, encode_g2};
use super::{EncodingError, G1_BYTES, G2_BYTES};

/// Verifying key as the verifier consumes it.
///
/// `ic` holds one G1 point per public input plus the constant term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationKeyBytes {
    pub alpha: [u8; G1_BYTES],
    pub beta: [u8; G2_BYTES],
    pub gamma: [u8; G2_BYTES],
    pub delta: [u8; G2_BYTES],
    pub ic: Vec<[u8; G1_BYTES]>,
}

impl VerificationKeyBytes {
    pub fn from_verifying_key(vk: &VerifyingKey<Bn254>) -> Self {
        Self {
            alpha: encode_g1(&vk.alpha_g1),
            beta: encode_g2(&vk.beta_g2),
            gamma: encode_g2(&vk.gamma_g2),
            delta: encode_g2(&vk.delta_g2),
            ic: vk.gamma_abc_g1.iter().map(encode_g1).collect(),
        }
    }

    /// Decodes back into an arkworks key, validating every point.
    pub fn to_verifying_key(&self) -> Result<VerifyingKey<Bn254>, EncodingError> {
        Ok(VerifyingKey {
            alpha_g1: decode_g1(&self.alpha)?,
            beta_g2: decode_g2(&self.beta)?,
            gamma_g2: decode_g2(&self.gamma)?,
            delta_g2: decode_g2(&self.delta)?,
            gamma_abc_g1: self
                .ic
                .iter()
                .map(|point| decode_g1(point))
                .collect::<Result<_, _>>()?,
        })
    }

    pub fn to_hex(&self) -> VerificationKeyHex {
        VerificationKeyHex {
            alpha: hex::encode(self.alpha),
            beta: hex::encode(self.beta),
            gamma: hex::encode(self.gamma),
            delta: hex::encode(self.delta),
            ic: self.ic.iter().map(hex::encode).collect(),
        }
    }
}

/// Hex form of [`VerificationKeyBytes`], the JSON shape used for deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationKeyHex {
    pub alpha: String,
    pub beta: String,
    pub gamma: String,
    pub delta: String,
    pub ic: Vec<String>,
}

impl VerificationKeyHex {
    pub fn to_bytes(&self) -> Result<VerificationKeyBytes, EncodingError> {
        Ok(VerificationKeyBytes {
            alpha: decode_hex(&self.alpha)?,
            beta: decode_hex(&self.beta)?,
            gamma: decode_hex(&self.gamma)?,
            delta: decode_hex(&self.delta)?,
            ic: self
                .ic
                .iter()
                .map(|point| decode_hex(point))
                .collect::<Result<_, _>>()?,
        })
    }
}

fn decode_hex<const N: usize>(input: &str) -> Result<[u8; N], EncodingError> {
    let bytes = hex::decode(input.trim_start_matches("0x"))
        .map_err(|e| EncodingError::InvalidHex(e.to_string()))?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| EncodingError::InvalidLength {
            expected: N,
            actual,
        })
}
