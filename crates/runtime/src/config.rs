//! Proof generator configuration.

use std::env;
use std::path::PathBuf;

/// File name of the circuit artifact inside the data directory.
pub const ARTIFACT_FILE_NAME: &str = "match_outcome.keys";

pub const ARTIFACT_ENV: &str = "MATCH_PROVER_ARTIFACT";
pub const DEV_SETUP_ENV: &str = "MATCH_PROVER_DEV_SETUP";
pub const PERSIST_DEV_SETUP_ENV: &str = "MATCH_PROVER_PERSIST_DEV_SETUP";

/// Where the circuit artifact lives and what to do when it is missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProverConfig {
    /// Serialized circuit keys (`[pk_len][pk][vk]`).
    pub artifact_path: PathBuf,
    /// Run an insecure in-process setup when the artifact is missing.
    pub allow_dev_setup: bool,
    /// Write keys from a dev setup back to `artifact_path`.
    pub persist_dev_setup: bool,
}

impl Default for ProverConfig {
    fn default() -> Self {
        Self {
            artifact_path: default_artifact_path(),
            allow_dev_setup: false,
            persist_dev_setup: false,
        }
    }
}

impl ProverConfig {
    pub fn new(artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            artifact_path: artifact_path.into(),
            ..Self::default()
        }
    }

    /// Development configuration: keys are generated when missing and kept.
    pub fn development(artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            artifact_path: artifact_path.into(),
            allow_dev_setup: true,
            persist_dev_setup: true,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MATCH_PROVER_ARTIFACT` - Circuit artifact path (default: platform data dir)
    /// - `MATCH_PROVER_DEV_SETUP` - Generate insecure keys when the artifact is missing (default: false)
    /// - `MATCH_PROVER_PERSIST_DEV_SETUP` - Save generated keys to the artifact path (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ARTIFACT_ENV).filter(|p| !p.trim().is_empty()) {
            config.artifact_path = PathBuf::from(path);
        }
        if let Some(enabled) = lookup(DEV_SETUP_ENV).as_deref().and_then(parse_bool) {
            config.allow_dev_setup = enabled;
        }
        if let Some(enabled) = lookup(PERSIST_DEV_SETUP_ENV).as_deref().and_then(parse_bool) {
            config.persist_dev_setup = enabled;
        }

        config
    }
}

/// Platform data directory for the artifact.
///
/// - macOS: `~/Library/Application Support/match-prover`
/// - Linux: `~/.local/share/match-prover` (or `$XDG_DATA_HOME/match-prover`)
/// - Windows: `%APPDATA%\match-prover`
/// - Fallback: `./match_prover_data`
pub fn default_artifact_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "match-prover")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./match_prover_data"))
        .join(ARTIFACT_FILE_NAME)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
