//! Boundary errors for match data.
//!
//! These are raised before any cryptographic work starts: a claim that fails
//! here is malformed input, not a dishonest one.

use crate::combat::STARTING_HEALTH;
use crate::entry::{MAX_INPUTS, MAX_TIMESTAMP_MS};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("valid count {valid_count} exceeds log capacity {}", MAX_INPUTS)]
    ValidCountOutOfRange { valid_count: usize },

    #[error("health {health} is outside 0..={}", STARTING_HEALTH)]
    HealthOutOfRange { health: u32 },

    #[error("entry {index} timestamp {timestamp_ms}ms exceeds {}ms", MAX_TIMESTAMP_MS)]
    TimestampOutOfRange { index: usize, timestamp_ms: u32 },

    #[error("unknown action code {code}")]
    UnknownAction { code: u8 },

    #[error("unknown winner flag {value}")]
    UnknownWinnerFlag { value: u32 },
}
