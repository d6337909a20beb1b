//! Error types surfaced by the proof generator.
//!
//! Rejections (the claim does not follow from the log) are kept apart from
//! infrastructure failures so callers can show "proof rejected" instead of
//! "try again".
use std::path::PathBuf;

use match_core::MatchError;
use thiserror::Error;
use tokio::task::JoinError;
use zk::{EncodingError, ProofError};

pub type Result<T> = std::result::Result<T, GeneratorError>;

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("circuit artifact not found at {}", path.display())]
    ArtifactMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read circuit artifact {}", path.display())]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("circuit artifact {} is corrupt", path.display())]
    ArtifactCorrupt {
        path: PathBuf,
        #[source]
        source: ProofError,
    },

    #[error("failed to write circuit artifact {}", path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("proving backend setup failed")]
    Backend(#[source] ProofError),

    #[error("initialization task join failed")]
    TaskJoin(#[source] JoinError),
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("proof generator not initialized")]
    NotInitialized,

    #[error(transparent)]
    Initialization(#[from] InitializationError),

    /// The claimed outcome does not follow from the recorded inputs.
    #[error("proof rejected: {0}")]
    ProofRejected(String),

    #[error("invalid match data: {0}")]
    InvalidInput(#[from] MatchError),

    #[error("proof encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    #[error("proof generation failed")]
    ProofGeneration(#[source] ProofError),

    #[error("proof task join failed")]
    TaskJoin(#[source] JoinError),
}

impl GeneratorError {
    /// True when the failure means the claim is false, not that proving broke.
    pub fn is_rejection(&self) -> bool {
        matches!(self, GeneratorError::ProofRejected(_))
    }
}

impl From<ProofError> for GeneratorError {
    fn from(error: ProofError) -> Self {
        match error {
            ProofError::WitnessInconsistency(reason) => GeneratorError::ProofRejected(reason),
            ProofError::InvalidInput(err) => GeneratorError::InvalidInput(err),
            ProofError::Encoding(err) => GeneratorError::Encoding(err),
            other => GeneratorError::ProofGeneration(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inconsistent_witness_becomes_rejection() {
        let err = GeneratorError::from(ProofError::WitnessInconsistency("lied".into()));

        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "proof rejected: lied");
    }

    #[test]
    fn backend_failures_are_not_rejections() {
        let err = GeneratorError::from(ProofError::CircuitProofError("oom".into()));
        assert!(matches!(err, GeneratorError::ProofGeneration(_)));
        assert!(!err.is_rejection());

        let err = GeneratorError::from(ProofError::InvalidInput(MatchError::HealthOutOfRange {
            health: 101,
        }));
        assert!(matches!(err, GeneratorError::InvalidInput(_)));
    }
}
