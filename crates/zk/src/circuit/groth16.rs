//! Groth16 proving and verification on BN254 curve.

use ark_bn254::{Bn254, Fr as Fp254};
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, ProvingKey, VerifyingKey};
use ark_relations::r1cs::ConstraintSynthesizer;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::{CryptoRng, RngCore};
use tracing::info;

use super::match_outcome::{MatchOutcomeCircuit, NUM_PUBLIC_INPUTS};
use crate::ProofError;

/// Length of the little-endian proving-key length prefix in an artifact.
const PK_LEN_PREFIX: usize = 8;

/// Groth16 proving and verifying keys for the match outcome circuit.
///
/// Serialized as the circuit artifact: `[pk_len (8 bytes LE)][pk][vk]`.
#[derive(Clone)]
pub struct CircuitKeys {
    /// Proving key (used by the prover)
    pub proving_key: ProvingKey<Bn254>,
    /// Verifying key (published to the verifier)
    pub verifying_key: VerifyingKey<Bn254>,
}

impl CircuitKeys {
    /// Circuit-specific setup for the match outcome circuit.
    ///
    /// # Security Warning
    /// Whoever knows the setup randomness can forge proofs. Keys generated
    /// this way are for development; production keys come from a ceremony.
    pub fn setup<R>(rng: &mut R) -> Result<Self, ProofError>
    where
        R: RngCore + CryptoRng,
    {
        Self::generate(MatchOutcomeCircuit::dummy(), rng)
    }

    /// Generate keys from an arbitrary circuit template.
    pub fn generate<C, R>(circuit: C, rng: &mut R) -> Result<Self, ProofError>
    where
        C: ConstraintSynthesizer<Fp254>,
        R: RngCore + CryptoRng,
    {
        let started = std::time::Instant::now();
        let params = Groth16::<Bn254>::generate_random_parameters_with_reduction(circuit, rng)
            .map_err(|e| ProofError::Setup(format!("Groth16 key generation failed: {e:?}")))?;

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generated Groth16 circuit keys"
        );

        Ok(Self {
            verifying_key: params.vk.clone(),
            proving_key: params,
        })
    }

    /// Number of public inputs the verifying key accepts.
    pub fn num_public_inputs(&self) -> usize {
        self.verifying_key.gamma_abc_g1.len().saturating_sub(1)
    }

    /// Fails if these keys were not generated for the match outcome circuit.
    pub fn check_shape(&self) -> Result<(), ProofError> {
        let found = self.num_public_inputs();
        if found != NUM_PUBLIC_INPUTS {
            return Err(ProofError::KeyMismatch {
                expected: NUM_PUBLIC_INPUTS,
                found,
            });
        }
        Ok(())
    }

    pub fn prepared_verifying_key(&self) -> PreparedVerifyingKey<Bn254> {
        prepare_verifying_key(&self.verifying_key)
    }

    /// Serialize verifying key to bytes (compressed)
    pub fn serialize_verifying_key(&self) -> Result<Vec<u8>, ProofError> {
        let mut bytes = Vec::new();
        self.verifying_key
            .serialize_compressed(&mut bytes)
            .map_err(|e| ProofError::SerializationError(e.to_string()))?;
        Ok(bytes)
    }

    /// Deserialize verifying key from bytes
    pub fn deserialize_verifying_key(bytes: &[u8]) -> Result<VerifyingKey<Bn254>, ProofError> {
        VerifyingKey::<Bn254>::deserialize_compressed(bytes)
            .map_err(|e| ProofError::SerializationError(e.to_string()))
    }

    /// Serialize both keys to bytes
    ///
    /// Format: [pk_len (8 bytes)][pk_bytes][vk_bytes]
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProofError> {
        let mut pk_bytes = Vec::new();
        self.proving_key
            .serialize_compressed(&mut pk_bytes)
            .map_err(|e| ProofError::SerializationError(e.to_string()))?;
        let vk_bytes = self.serialize_verifying_key()?;

        let mut bytes = Vec::with_capacity(PK_LEN_PREFIX + pk_bytes.len() + vk_bytes.len());
        bytes.extend_from_slice(&(pk_bytes.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&pk_bytes);
        bytes.extend_from_slice(&vk_bytes);

        Ok(bytes)
    }

    /// Deserialize both keys from bytes
    ///
    /// Proving key points are not subgroup-checked; a damaged proving key can
    /// only yield proofs that fail verification. The verifying key is checked.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProofError> {
        let (prefix, rest) = bytes.split_at_checked(PK_LEN_PREFIX).ok_or_else(|| {
            ProofError::SerializationError("Invalid key bytes: too short".to_string())
        })?;

        let mut len_bytes = [0u8; PK_LEN_PREFIX];
        len_bytes.copy_from_slice(prefix);
        let pk_len = usize::try_from(u64::from_le_bytes(len_bytes)).map_err(|_| {
            ProofError::SerializationError("Invalid key bytes: pk length overflow".to_string())
        })?;

        let (pk_bytes, vk_bytes) = rest.split_at_checked(pk_len).ok_or_else(|| {
            ProofError::SerializationError("Invalid key bytes: pk too short".to_string())
        })?;

        let proving_key = ProvingKey::<Bn254>::deserialize_compressed_unchecked(pk_bytes)
            .map_err(|e| ProofError::SerializationError(e.to_string()))?;
        let verifying_key = Self::deserialize_verifying_key(vk_bytes)?;

        Ok(Self {
            proving_key,
            verifying_key,
        })
    }
}

/// Generate a Groth16 proof
///
/// The circuit is not checked for satisfiability here; an unsatisfied
/// circuit yields a proof that fails verification.
pub fn prove<C, R>(circuit: C, keys: &CircuitKeys, rng: &mut R) -> Result<Proof<Bn254>, ProofError>
where
    C: ConstraintSynthesizer<Fp254>,
    R: RngCore + CryptoRng,
{
    Groth16::<Bn254>::create_random_proof_with_reduction(circuit, &keys.proving_key, rng)
        .map_err(|e| ProofError::CircuitProofError(format!("Groth16 proving failed: {e:?}")))
}

/// Verify a Groth16 proof against a prepared verifying key.
pub fn verify(
    proof: &Proof<Bn254>,
    public_inputs: &[Fp254],
    pvk: &PreparedVerifyingKey<Bn254>,
) -> Result<bool, ProofError> {
    Groth16::<Bn254>::verify_proof(pvk, proof, public_inputs)
        .map_err(|e| ProofError::CircuitProofError(format!("Groth16 verification failed: {e:?}")))
}

/// Prepare verifying key for repeated verification
pub fn prepare_verifying_key(vk: &VerifyingKey<Bn254>) -> PreparedVerifyingKey<Bn254> {
    ark_groth16::prepare_verifying_key(vk)
}
