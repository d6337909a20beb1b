//! 256-bit big-endian words for field elements and integers.

use ark_bn254::{Fq, Fr as Fp254};
use ark_ff::{BigInteger256, PrimeField};
use tracing::error;

use super::{EncodingError, FIELD_BYTES};

const LIMBS: usize = 4;

/// Encodes a 256-bit value as 32 big-endian bytes.
pub fn field_to_bytes(value: &BigInteger256) -> [u8; FIELD_BYTES] {
    let mut bytes = [0u8; FIELD_BYTES];
    for (i, limb) in value.0.iter().enumerate() {
        let start = (LIMBS - 1 - i) * 8;
        bytes[start..start + 8].copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}

/// Decodes 32 big-endian bytes. Total over `[0, 2^256)`.
pub fn bytes_to_field(bytes: &[u8; FIELD_BYTES]) -> BigInteger256 {
    let mut limbs = [0u64; LIMBS];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let start = (LIMBS - 1 - i) * 8;
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[start..start + 8]);
        *limb = u64::from_be_bytes(word);
    }
    BigInteger256::new(limbs)
}

pub fn fr_to_bytes(value: &Fp254) -> [u8; FIELD_BYTES] {
    field_to_bytes(&value.into_bigint())
}

/// Decodes a scalar, rejecting values at or above the scalar field modulus.
pub fn bytes_to_fr(bytes: &[u8; FIELD_BYTES]) -> Result<Fp254, EncodingError> {
    canonical_fr(bytes_to_field(bytes))
}

fn canonical_fr(value: BigInteger256) -> Result<Fp254, EncodingError> {
    Fp254::from_bigint(value).ok_or_else(|| {
        error!(?value, "scalar is not below the field modulus");
        EncodingError::NonCanonicalScalar
    })
}

pub(crate) fn fq_to_bytes(value: &Fq) -> [u8; FIELD_BYTES] {
    field_to_bytes(&value.into_bigint())
}

pub(crate) fn bytes_to_fq(bytes: &[u8], what: &'static str) -> Result<Fq, EncodingError> {
    let word: &[u8; FIELD_BYTES] = bytes.try_into().map_err(|_| {
        error!(
            expected = FIELD_BYTES,
            actual = bytes.len(),
            what,
            "coordinate has wrong length"
        );
        EncodingError::InvalidLength {
            expected: FIELD_BYTES,
            actual: bytes.len(),
        }
    })?;
    Fq::from_bigint(bytes_to_field(word)).ok_or_else(|| {
        error!(what, "coordinate is not below the base field modulus");
        EncodingError::NonCanonicalCoordinate { what }
    })
}

/// Parses an unsigned decimal string into a 256-bit value.
pub fn parse_decimal(input: &str) -> Result<BigInteger256, EncodingError> {
    let digits = input.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        error!(input, "not an unsigned decimal string");
        return Err(EncodingError::InvalidDecimal(input.to_string()));
    }

    let mut limbs = [0u64; LIMBS];
    for digit in digits.bytes().map(|b| u128::from(b - b'0')) {
        let mut carry = digit;
        for limb in limbs.iter_mut() {
            let wide = u128::from(*limb) * 10 + carry;
            *limb = wide as u64;
            carry = wide >> 64;
        }
        if carry != 0 {
            error!(digits = digits.len(), "decimal value exceeds 256 bits");
            return Err(EncodingError::DecimalOverflow);
        }
    }

    Ok(BigInteger256::new(limbs))
}

/// Decimal string to a 32-byte big-endian word.
pub fn decimal_to_bytes(input: &str) -> Result<[u8; FIELD_BYTES], EncodingError> {
    parse_decimal(input).map(|value| field_to_bytes(&value))
}

/// Decimal string to a scalar field element.
pub fn decimal_to_fr(input: &str) -> Result<Fp254, EncodingError> {
    canonical_fr(parse_decimal(input)?)
}

/// Small integer as a 32-byte big-endian field word.
pub fn u32_to_word(value: u32) -> [u8; FIELD_BYTES] {
    let mut bytes = [0u8; FIELD_BYTES];
    bytes[FIELD_BYTES - 4..].copy_from_slice(&value.to_be_bytes());
    bytes
}
