//! Integration tests for the asynchronous proof generator.
//!
//! Keys come from one seeded setup per test binary; artifact tests write them
//! to temporary files.

use std::sync::OnceLock;
use std::time::Duration;

use match_core::{ActionKind, InputRecorder, ManualClock, WinnerFlag};
use rand::SeedableRng;
use rand::rngs::StdRng;
use runtime::{GeneratorError, InitializationError, ProofGenerator, ProofStatus, ProverConfig};
use tempfile::TempDir;
use zk::{CircuitKeys, PROOF_BYTES};

fn shared_keys() -> &'static CircuitKeys {
    static KEYS: OnceLock<CircuitKeys> = OnceLock::new();
    KEYS.get_or_init(|| CircuitKeys::setup(&mut StdRng::seed_from_u64(42)).expect("setup"))
}

fn write_artifact(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("match_outcome.keys");
    std::fs::write(&path, shared_keys().to_bytes().unwrap()).unwrap();
    path
}

/// Records a short match: two clean hits for the local player, one blocked
/// hit for the opponent. Replays to healths (90, 60).
fn recorded_match() -> (match_core::InputLog, usize) {
    let mut recorder = InputRecorder::with_clock(ManualClock::new(5_000));
    recorder.start();

    for (advance, action, mine, hit, blocking) in [
        (120, ActionKind::Punch, true, true, false),
        (80, ActionKind::Block, false, false, false),
        (200, ActionKind::Punch, false, true, true),
        (150, ActionKind::Punch, true, true, false),
    ] {
        recorder.clock().advance(advance);
        recorder.record(action, mine, hit, blocking);
    }
    recorder.stop();

    (recorder.inputs(), recorder.valid_count())
}

#[tokio::test]
async fn init_from_artifact_then_prove_and_verify() {
    let dir = TempDir::new().unwrap();
    let generator = ProofGenerator::new(ProverConfig::new(write_artifact(&dir)));

    generator.init().await.expect("artifact loads");
    generator.init().await.expect("second init is a no-op");
    assert!(generator.is_initialized());

    let (log, count) = recorded_match();
    let mut status = generator.subscribe_status();
    let proof = generator.generate_proof(&log, count, 90, 60).await.unwrap();

    assert_eq!(proof.proof_bytes.len(), PROOF_BYTES);
    assert_eq!(proof.public_inputs.i_won, WinnerFlag::Won);
    assert_eq!(proof.submission.total_damage_dealt, 40);
    assert!(status.has_changed().unwrap());
    assert_eq!(*status.borrow_and_update(), ProofStatus::Generated);

    assert!(
        generator
            .verify_proof(&proof.proof_bytes, &proof.public_inputs)
            .await
            .unwrap()
    );

    let metrics = generator.metrics().snapshot();
    assert_eq!(metrics.generated, 1);
    assert_eq!(metrics.in_flight, 0);
    assert_eq!(
        serde_json::to_value(generator.status()).unwrap(),
        serde_json::json!("generated")
    );
}

#[tokio::test]
async fn missing_artifact_is_fatal_without_dev_setup() {
    let dir = TempDir::new().unwrap();
    let generator = ProofGenerator::new(ProverConfig::new(dir.path().join("absent.keys")));

    let err = generator.init().await.unwrap_err();
    assert!(matches!(err, InitializationError::ArtifactMissing { .. }));
    assert!(!generator.is_initialized());

    let (log, count) = recorded_match();
    assert!(matches!(
        generator.generate_proof(&log, count, 90, 60).await,
        Err(GeneratorError::NotInitialized)
    ));
}

#[tokio::test]
async fn corrupt_artifact_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("match_outcome.keys");
    std::fs::write(&path, b"not a circuit artifact").unwrap();

    let err = ProofGenerator::new(ProverConfig::new(&path))
        .init()
        .await
        .unwrap_err();

    assert!(matches!(err, InitializationError::ArtifactCorrupt { .. }));
}

#[tokio::test]
async fn fabricated_outcome_is_rejected_not_failed() {
    let generator = ProofGenerator::with_keys(shared_keys().clone()).unwrap();
    let (log, count) = recorded_match();

    // Pretend the opponent's blocked hit never landed.
    let err = generator
        .generate_proof(&log, count, 100, 60)
        .await
        .unwrap_err();

    assert!(err.is_rejection(), "{err}");
    assert_eq!(generator.status(), ProofStatus::Rejected);

    let metrics = generator.metrics();
    assert_eq!(metrics.rejected(), 1);
    assert_eq!(metrics.failed(), 0);
}

#[tokio::test]
async fn abandoned_generation_is_recorded_as_failed() {
    let generator = ProofGenerator::with_keys(shared_keys().clone()).unwrap();
    let (log, count) = recorded_match();

    // The proof is started on the first poll and abandoned by the timeout.
    let abandoned =
        tokio::time::timeout(Duration::ZERO, generator.generate_proof(&log, count, 90, 60)).await;
    assert!(abandoned.is_err());

    let metrics = generator.metrics();
    assert_eq!(metrics.in_flight(), 0);
    assert_eq!(metrics.failed(), 1);
    assert_eq!(generator.status(), ProofStatus::Failed);

    // The generator stays usable for the next attempt.
    generator.generate_proof(&log, count, 90, 60).await.unwrap();
    assert_eq!(generator.status(), ProofStatus::Generated);
    assert_eq!(generator.metrics().in_flight(), 0);
}

#[tokio::test]
async fn out_of_range_health_is_invalid_input() {
    let generator = ProofGenerator::with_keys(shared_keys().clone()).unwrap();
    let (log, count) = recorded_match();

    let err = generator
        .generate_proof(&log, count, 90, 250)
        .await
        .unwrap_err();

    assert!(matches!(err, GeneratorError::InvalidInput(_)));
    assert!(!err.is_rejection());
    assert_eq!(generator.status(), ProofStatus::Failed);
}

#[tokio::test]
async fn destroy_is_idempotent_and_reinit_works() {
    let dir = TempDir::new().unwrap();
    let generator = ProofGenerator::new(ProverConfig::new(write_artifact(&dir)));
    generator.init().await.unwrap();

    generator.destroy();
    generator.destroy();
    assert!(!generator.is_initialized());
    assert_eq!(generator.status(), ProofStatus::Idle);

    let (log, count) = recorded_match();
    assert!(matches!(
        generator.generate_proof(&log, count, 90, 60).await,
        Err(GeneratorError::NotInitialized)
    ));

    generator.init().await.unwrap();
    generator.generate_proof(&log, count, 90, 60).await.unwrap();
}

#[tokio::test]
async fn dev_setup_persists_a_loadable_artifact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keys").join("match_outcome.keys");

    let generator = ProofGenerator::new(ProverConfig::development(&path));
    generator.init().await.unwrap();
    assert!(path.exists());

    let (log, count) = recorded_match();
    let proof = generator.generate_proof(&log, count, 90, 60).await.unwrap();

    let reloaded = ProofGenerator::new(ProverConfig::new(&path));
    reloaded.init().await.unwrap();
    assert!(
        reloaded
            .verify_proof(&proof.proof_bytes, &proof.public_inputs)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn proofs_from_other_keys_do_not_verify() {
    let dir = TempDir::new().unwrap();
    let dev = ProofGenerator::new(ProverConfig::development(dir.path().join("dev.keys")));
    dev.init().await.unwrap();

    let (log, count) = recorded_match();
    let proof = dev.generate_proof(&log, count, 90, 60).await.unwrap();

    let shared = ProofGenerator::with_keys(shared_keys().clone()).unwrap();
    assert!(
        !shared
            .verify_proof(&proof.proof_bytes, &proof.public_inputs)
            .await
            .unwrap()
    );
}
