//! Runtime wiring for match outcome proofs.
//!
//! This crate owns the long-running side of the pipeline: loading the circuit
//! artifact once per process and proving finished matches off the async
//! executor. Consumers hold a [`ProofGenerator`], call [`ProofGenerator::init`]
//! during startup, and await [`ProofGenerator::generate_proof`] when a match
//! ends while watching [`ProofStatus`] for UI feedback.
//!
//! Modules are organized by responsibility:
//! - [`generator`] hosts the proof generator and its status channel
//! - [`config`] reads artifact location and dev-setup switches
//! - [`error`] separates rejected claims from infrastructure failures
//! - [`metrics`] keeps lock-free proving counters
pub mod config;
pub mod error;
pub mod generator;
pub mod metrics;

pub use config::ProverConfig;
pub use error::{GeneratorError, InitializationError, Result};
pub use generator::{ProofGenerator, ProofStatus};
pub use metrics::{MetricsSnapshot, ProofMetrics};
