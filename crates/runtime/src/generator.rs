//! Asynchronous proof generator.
//!
//! Owns the circuit keys for one process and proves match outcomes on tokio's
//! blocking pool, so a match loop or UI can keep running while a proof is
//! produced. Progress is published on a `watch` channel.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use match_core::{GameInputEntry, MAX_INPUTS};
use rand::rngs::OsRng;
use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info, warn};
use zk::{CircuitKeys, GeneratedProof, Groth16Prover, ProofError, Prover, PublicInputs};

use crate::config::ProverConfig;
use crate::error::{GeneratorError, InitializationError, Result};
use crate::metrics::ProofMetrics;

/// Latest proof attempt as seen by observers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofStatus {
    #[default]
    Idle,
    Generating,
    Generated,
    /// The claim was refused; retrying the same claim cannot succeed.
    Rejected,
    Failed,
}

/// Proves match outcomes against a loaded circuit artifact.
///
/// Create one per process and share it; every call after [`Self::init`] reads
/// the same keys.
pub struct ProofGenerator {
    config: ProverConfig,
    prover: RwLock<Option<Arc<Groth16Prover>>>,
    /// Serializes `init` so concurrent callers load the artifact once.
    init_lock: Mutex<()>,
    status: watch::Sender<ProofStatus>,
    metrics: Arc<ProofMetrics>,
}

impl ProofGenerator {
    pub fn new(config: ProverConfig) -> Self {
        let (status, _) = watch::channel(ProofStatus::Idle);
        Self {
            config,
            prover: RwLock::new(None),
            init_lock: Mutex::new(()),
            status,
            metrics: Arc::new(ProofMetrics::new()),
        }
    }

    /// A generator that is ready immediately, bypassing the artifact.
    pub fn with_keys(keys: CircuitKeys) -> std::result::Result<Self, InitializationError> {
        let prover = Groth16Prover::new(Arc::new(keys)).map_err(InitializationError::Backend)?;
        let generator = Self::new(ProverConfig::default());
        generator.install(Some(Arc::new(prover)));
        Ok(generator)
    }

    pub fn config(&self) -> &ProverConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.current().is_some()
    }

    /// Loads the circuit artifact and readies the prover.
    ///
    /// Calling it again after success does nothing. A missing artifact is
    /// fatal unless dev setup is enabled in the config.
    pub async fn init(&self) -> std::result::Result<(), InitializationError> {
        let _guard = self.init_lock.lock().await;
        if self.is_initialized() {
            debug!("proof generator already initialized");
            return Ok(());
        }

        let started = Instant::now();
        let keys = self.load_keys().await?;
        let prover = Groth16Prover::new(Arc::new(keys)).map_err(InitializationError::Backend)?;
        self.install(Some(Arc::new(prover)));

        info!(
            artifact = %self.config.artifact_path.display(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "proof generator initialized"
        );
        Ok(())
    }

    async fn load_keys(&self) -> std::result::Result<CircuitKeys, InitializationError> {
        let path = self.config.artifact_path.clone();

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                debug!(bytes = bytes.len(), artifact = %path.display(), "parsing circuit artifact");
                let parse_path = path.clone();
                tokio::task::spawn_blocking(move || CircuitKeys::from_bytes(&bytes))
                    .await
                    .map_err(InitializationError::TaskJoin)?
                    .map_err(|source| InitializationError::ArtifactCorrupt {
                        path: parse_path,
                        source,
                    })
            }
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                if !self.config.allow_dev_setup {
                    return Err(InitializationError::ArtifactMissing { path, source });
                }
                self.dev_setup(&path).await
            }
            Err(source) => Err(InitializationError::ArtifactRead { path, source }),
        }
    }

    async fn dev_setup(&self, path: &Path) -> std::result::Result<CircuitKeys, InitializationError> {
        warn!(
            artifact = %path.display(),
            "circuit artifact missing; running insecure development setup"
        );

        let keys = tokio::task::spawn_blocking(|| CircuitKeys::setup(&mut OsRng))
            .await
            .map_err(InitializationError::TaskJoin)?
            .map_err(InitializationError::Backend)?;

        if self.config.persist_dev_setup {
            persist_artifact(&keys, path).await?;
        }
        Ok(keys)
    }

    /// Releases the loaded keys. Safe to call repeatedly; a later
    /// [`Self::init`] loads them again.
    pub fn destroy(&self) {
        if self.install(None).is_some() {
            self.status.send_replace(ProofStatus::Idle);
            info!("proof generator released circuit keys");
        }
    }

    /// Finalizes a match and proves its outcome.
    ///
    /// The winner flag and damage total are derived here; only the two final
    /// healths are claimed by the caller.
    pub async fn generate_proof(
        &self,
        entries: &[GameInputEntry],
        valid_count: usize,
        my_final_health: u32,
        opponent_final_health: u32,
    ) -> Result<GeneratedProof> {
        let prover = self.current().ok_or(GeneratorError::NotInitialized)?;

        if valid_count == MAX_INPUTS {
            warn!(
                valid_count,
                "input log is full; inputs past capacity were not recorded"
            );
        }

        let attempt = Attempt::begin(self);

        let entries = entries.to_vec();
        let outcome = tokio::task::spawn_blocking(move || {
            let started = Instant::now();
            zk::generate_proof(
                prover.as_ref(),
                &entries,
                valid_count,
                my_final_health,
                opponent_final_health,
            )
            .map(|proof| (proof, started.elapsed()))
        })
        .await;

        let result = self.finish(outcome);
        attempt.settle();
        result
    }

    fn finish(
        &self,
        outcome: std::result::Result<
            std::result::Result<(GeneratedProof, Duration), ProofError>,
            tokio::task::JoinError,
        >,
    ) -> Result<GeneratedProof> {
        let result = match outcome {
            Ok(Ok((proof, proving_time))) => {
                info!(
                    proving_ms = proving_time.as_millis() as u64,
                    i_won = %proof.public_inputs.i_won,
                    "match outcome proof generated"
                );
                self.metrics.record_success(proving_time);
                self.status.send_replace(ProofStatus::Generated);
                return Ok(proof);
            }
            Ok(Err(err)) => GeneratorError::from(err),
            Err(join) => GeneratorError::TaskJoin(join),
        };

        if result.is_rejection() {
            warn!(error = %result, "match outcome claim rejected");
            self.metrics.record_rejection();
            self.status.send_replace(ProofStatus::Rejected);
        } else {
            error!(error = %result, "match outcome proof generation failed");
            self.metrics.record_failure();
            self.status.send_replace(ProofStatus::Failed);
        }
        Err(result)
    }

    /// Checks a proof locally. The on-chain verifier remains authoritative.
    pub async fn verify_proof(
        &self,
        proof_bytes: &[u8],
        public_inputs: &PublicInputs,
    ) -> Result<bool> {
        let prover = self.current().ok_or(GeneratorError::NotInitialized)?;
        let proof_bytes = proof_bytes.to_vec();
        let public_inputs = *public_inputs;

        let valid = tokio::task::spawn_blocking(move || prover.verify(&proof_bytes, &public_inputs))
            .await
            .map_err(GeneratorError::TaskJoin)??;

        debug!(valid, "verified match outcome proof");
        Ok(valid)
    }

    /// Watches the status of the most recent proof attempt.
    pub fn subscribe_status(&self) -> watch::Receiver<ProofStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> ProofStatus {
        *self.status.borrow()
    }

    /// Returns a clone of the metrics Arc for external querying.
    pub fn metrics(&self) -> Arc<ProofMetrics> {
        Arc::clone(&self.metrics)
    }

    fn current(&self) -> Option<Arc<Groth16Prover>> {
        self.prover
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn install(&self, prover: Option<Arc<Groth16Prover>>) -> Option<Arc<Groth16Prover>> {
        let mut slot = self.prover.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *slot, prover)
    }
}

/// One in-flight proof attempt.
///
/// Dropping `generate_proof` before the blocking task reports back (a caller
/// timeout, a cancelled task) leaves nobody to call `finish`, so the drop
/// records the attempt as failed.
struct Attempt<'a> {
    generator: &'a ProofGenerator,
    settled: bool,
}

impl<'a> Attempt<'a> {
    fn begin(generator: &'a ProofGenerator) -> Self {
        generator.status.send_replace(ProofStatus::Generating);
        generator.metrics.record_start();
        Self {
            generator,
            settled: false,
        }
    }

    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!("proof generation abandoned before completion");
        self.generator.metrics.record_failure();
        self.generator.status.send_replace(ProofStatus::Failed);
    }
}

async fn persist_artifact(
    keys: &CircuitKeys,
    path: &Path,
) -> std::result::Result<(), InitializationError> {
    let bytes = keys.to_bytes().map_err(InitializationError::Backend)?;
    let write_err = |source| InitializationError::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }
    tokio::fs::write(path, &bytes).await.map_err(write_err)?;

    info!(artifact = %path.display(), bytes = bytes.len(), "saved development circuit artifact");
    Ok(())
}
