//! Curve point and proof layouts.
//!
//! ```text
//! G1 (64 bytes):   x || y
//! G2 (128 bytes):  x.c1 || x.c0 || y.c1 || y.c0
//! Proof (256):     A (G1) || B (G2) || C (G1)
//! ```
//!
//! Every coordinate is a 32-byte big-endian base-field element. The point at
//! infinity is all zeros. G2 puts the imaginary component first, which is the
//! order the on-chain pairing check expects.

use ark_bn254::{Bn254, Fq2, G1Affine, G2Affine};
use ark_groth16::Proof;
use tracing::error;

use super::field::{bytes_to_fq, fq_to_bytes};
use super::{EncodingError, FIELD_BYTES, G1_BYTES, G2_BYTES, PROOF_BYTES};

pub fn encode_g1(point: &G1Affine) -> [u8; G1_BYTES] {
    let mut bytes = [0u8; G1_BYTES];
    if point.infinity {
        return bytes;
    }

    bytes[..FIELD_BYTES].copy_from_slice(&fq_to_bytes(&point.x));
    bytes[FIELD_BYTES..].copy_from_slice(&fq_to_bytes(&point.y));
    bytes
}

pub fn encode_g2(point: &G2Affine) -> [u8; G2_BYTES] {
    let mut bytes = [0u8; G2_BYTES];
    if point.infinity {
        return bytes;
    }

    let words = [point.x.c1, point.x.c0, point.y.c1, point.y.c0];
    for (chunk, coordinate) in bytes.chunks_exact_mut(FIELD_BYTES).zip(words.iter()) {
        chunk.copy_from_slice(&fq_to_bytes(coordinate));
    }
    bytes
}

/// Decodes a G1 point, checking that it lies on the curve.
pub fn decode_g1(bytes: &[u8]) -> Result<G1Affine, EncodingError> {
    check_length(bytes, G1_BYTES)?;
    if bytes.iter().all(|b| *b == 0) {
        return Ok(G1Affine::identity());
    }

    let x = bytes_to_fq(&bytes[..FIELD_BYTES], "G1 x")?;
    let y = bytes_to_fq(&bytes[FIELD_BYTES..], "G1 y")?;
    let point = G1Affine::new_unchecked(x, y);

    if !point.is_on_curve() {
        error!("G1 point is not on the curve");
        return Err(EncodingError::NotOnCurve { what: "G1 point" });
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        error!("G1 point is not in the prime-order subgroup");
        return Err(EncodingError::NotInSubgroup { what: "G1 point" });
    }
    Ok(point)
}

/// Decodes a G2 point, checking curve and subgroup membership.
pub fn decode_g2(bytes: &[u8]) -> Result<G2Affine, EncodingError> {
    check_length(bytes, G2_BYTES)?;
    if bytes.iter().all(|b| *b == 0) {
        return Ok(G2Affine::identity());
    }

    let word = |index: usize, what| {
        bytes_to_fq(&bytes[index * FIELD_BYTES..(index + 1) * FIELD_BYTES], what)
    };
    let x = Fq2::new(word(1, "G2 x.c0")?, word(0, "G2 x.c1")?);
    let y = Fq2::new(word(3, "G2 y.c0")?, word(2, "G2 y.c1")?);
    let point = G2Affine::new_unchecked(x, y);

    if !point.is_on_curve() {
        error!("G2 point is not on the curve");
        return Err(EncodingError::NotOnCurve { what: "G2 point" });
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        error!("G2 point is not in the prime-order subgroup");
        return Err(EncodingError::NotInSubgroup { what: "G2 point" });
    }
    Ok(point)
}

/// Serializes a proof into the 256-byte verifier layout.
pub fn encode_proof(proof: &Proof<Bn254>) -> [u8; PROOF_BYTES] {
    let mut bytes = [0u8; PROOF_BYTES];
    bytes[..G1_BYTES].copy_from_slice(&encode_g1(&proof.a));
    bytes[G1_BYTES..G1_BYTES + G2_BYTES].copy_from_slice(&encode_g2(&proof.b));
    bytes[G1_BYTES + G2_BYTES..].copy_from_slice(&encode_g1(&proof.c));
    bytes
}

/// Parses a 256-byte proof, validating every point.
pub fn decode_proof(bytes: &[u8]) -> Result<Proof<Bn254>, EncodingError> {
    check_length(bytes, PROOF_BYTES)?;

    Ok(Proof {
        a: decode_g1(&bytes[..G1_BYTES])?,
        b: decode_g2(&bytes[G1_BYTES..G1_BYTES + G2_BYTES])?,
        c: decode_g1(&bytes[G1_BYTES + G2_BYTES..])?,
    })
}

fn check_length(bytes: &[u8], expected: usize) -> Result<(), EncodingError> {
    if bytes.len() != expected {
        error!(expected, actual = bytes.len(), "encoded point has wrong length");
        return Err(EncodingError::InvalidLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::test_logs::capture_logs;
    use ark_bn254::Fq;
    use ark_ec::AffineRepr;

    fn word_hex(value: u8) -> String {
        format!("{}{:02x}", "00".repeat(31), value)
    }

    #[test]
    fn g2_puts_imaginary_component_first() {
        let point = G2Affine::new_unchecked(
            Fq2::new(Fq::from(1u64), Fq::from(2u64)),
            Fq2::new(Fq::from(3u64), Fq::from(4u64)),
        );

        let expected = [2, 1, 4, 3].map(word_hex).concat();

        assert_eq!(hex::encode(encode_g2(&point)), expected);
    }

    #[test]
    fn generators_survive_decoding() {
        let g1 = G1Affine::generator();
        let g2 = G2Affine::generator();

        assert_eq!(decode_g1(&encode_g1(&g1)).unwrap(), g1);
        assert_eq!(decode_g2(&encode_g2(&g2)).unwrap(), g2);
    }

    #[test]
    fn generator_g1_layout() {
        // BN254 G1 generator is (1, 2).
        let expected = [1, 2].map(word_hex).concat();
        assert_eq!(hex::encode(encode_g1(&G1Affine::generator())), expected);
    }

    #[test]
    fn infinity_is_all_zero() {
        assert_eq!(encode_g1(&G1Affine::identity()), [0u8; G1_BYTES]);
        assert_eq!(encode_g2(&G2Affine::identity()), [0u8; G2_BYTES]);
        assert!(decode_g1(&[0u8; G1_BYTES]).unwrap().infinity);
        assert!(decode_g2(&[0u8; G2_BYTES]).unwrap().infinity);
    }

    #[test]
    fn off_curve_points_are_rejected() {
        let mut bytes = encode_g1(&G1Affine::generator());
        bytes[63] ^= 1;
        assert_eq!(
            decode_g1(&bytes),
            Err(EncodingError::NotOnCurve { what: "G1 point" })
        );

        let mut bytes = encode_g2(&G2Affine::generator());
        bytes[G2_BYTES - 1] ^= 1;
        assert!(decode_g2(&bytes).is_err());
    }

    #[test]
    fn invalid_points_are_logged() {
        let mut off_curve = encode_g1(&G1Affine::generator());
        off_curve[63] ^= 1;
        let mut bad_g2 = encode_g2(&G2Affine::generator());
        bad_g2[G2_BYTES - 1] ^= 1;

        let logs = capture_logs(|| {
            assert!(decode_g1(&off_curve).is_err());
            assert!(decode_g2(&bad_g2).is_err());
        });

        assert!(logs.contains("G1 point is not on the curve"));
        assert!(logs.contains("G2 point is not on the curve"));
    }

    #[test]
    fn swapped_g2_components_fail_decoding() {
        // Reading c0 || c1 instead of c1 || c0 yields a different, invalid point.
        let g2 = G2Affine::generator();
        let mut swapped = [0u8; G2_BYTES];
        let words = [g2.x.c0, g2.x.c1, g2.y.c0, g2.y.c1];
        for (chunk, coordinate) in swapped.chunks_exact_mut(FIELD_BYTES).zip(words.iter()) {
            chunk.copy_from_slice(&fq_to_bytes(coordinate));
        }

        assert!(decode_g2(&swapped).is_err());
    }

    #[test]
    fn proof_length_is_enforced() {
        assert_eq!(
            decode_proof(&[0u8; 255]).map(|_| ()),
            Err(EncodingError::InvalidLength {
                expected: PROOF_BYTES,
                actual: 255
            })
        );
    }

    #[test]
    fn proof_layout_slices() {
        let proof = Proof::<Bn254> {
            a: G1Affine::generator(),
            b: G2Affine::generator(),
            c: G1Affine::identity(),
        };

        let bytes = encode_proof(&proof);

        assert_eq!(bytes[..64], encode_g1(&proof.a));
        assert_eq!(bytes[64..192], encode_g2(&proof.b));
        assert_eq!(bytes[192..], [0u8; 64]);
        let decoded = decode_proof(&bytes).unwrap();
        assert_eq!(decoded.a, proof.a);
        assert_eq!(decoded.b, proof.b);
        assert!(decoded.c.infinity);
    }
}
