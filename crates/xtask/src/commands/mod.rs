//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod convert_vk;
mod export_vk;
mod hash_log;
mod inspect_proof;
mod setup;

pub use convert_vk::ConvertVk;
pub use export_vk::ExportVk;
pub use hash_log::HashLog;
pub use inspect_proof::InspectProof;
pub use setup::Setup;

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

/// Writes pretty JSON to `out`, or to stdout when no path is given.
pub(crate) fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;

    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Wrote {}",
                style("✓").green().bold(),
                style(path.display()).cyan()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
