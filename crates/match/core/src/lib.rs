//! Deterministic match model shared by the recorder and the prover.
//!
//! `match-core` defines what a fighting match looks like once it is reduced
//! to evidence: a fixed-capacity, timestamped input log, the damage rules that
//! replay it, and the outcome a peer claims from it. It contains no
//! cryptography; the `zk` crate commits to and proves statements about these
//! types.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod combat;
pub mod entry;
pub mod error;
pub mod outcome;
pub mod recorder;

pub use combat::{BLOCKED_DAMAGE, CombatTally, PUNCH_DAMAGE, STARTING_HEALTH};
pub use entry::{ActionKind, GameInputEntry, InputLog, MAX_INPUTS, MAX_TIMESTAMP_MS, padded_log};
pub use error::MatchError;
pub use outcome::{MatchSummary, WinnerFlag, summarize};
#[cfg(feature = "std")]
pub use recorder::SystemClock;
pub use recorder::{InputRecorder, ManualClock, MatchClock};
