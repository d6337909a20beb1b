//! Input log entries and the fixed-capacity log shape.
//!
//! Every local input and every remote input received over the peer channel is
//! stored as a [`GameInputEntry`]. A finished match is described by a padded
//! [`InputLog`] plus a count of valid entries; the padding keeps the circuit
//! input shape constant.

use crate::error::MatchError;

/// Capacity of a match log. Inputs past this ceiling are dropped.
pub const MAX_INPUTS: usize = 128;

/// Largest timestamp (ms since match start) the commitment can encode.
///
/// The commitment packs `action * 10_000_000 + timestamp_ms` into one field
/// element, so timestamps must stay below the packing radix.
pub const MAX_TIMESTAMP_MS: u32 = 9_999_999;

/// A padded match log. Only the first `valid_count` entries are meaningful.
pub type InputLog = [GameInputEntry; MAX_INPUTS];

/// Action taken by either fighter.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum ActionKind {
    /// No action (padding entries use this)
    #[default]
    None = 0,
    /// Punch attempt
    Punch = 1,
    /// Block stance
    Block = 2,
}

impl ActionKind {
    /// Numeric code committed to by the hash chain.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn is_punch(self) -> bool {
        matches!(self, Self::Punch)
    }
}

impl TryFrom<u8> for ActionKind {
    type Error = MatchError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Punch),
            2 => Ok(Self::Block),
            other => Err(MatchError::UnknownAction { code: other }),
        }
    }
}

/// One recorded input.
///
/// `did_hit` and `opponent_blocking` only influence damage on punches, but they
/// are committed to for every entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameInputEntry {
    pub action: ActionKind,
    /// Milliseconds since match start.
    pub timestamp_ms: u32,
    /// True when the local player performed the action.
    pub is_my_action: bool,
    /// True when a punch landed.
    pub did_hit: bool,
    /// True when the punch target was blocking at the time.
    pub opponent_blocking: bool,
}

impl GameInputEntry {
    /// Sentinel used to pad a log to [`MAX_INPUTS`].
    pub const EMPTY: Self = Self {
        action: ActionKind::None,
        timestamp_ms: 0,
        is_my_action: false,
        did_hit: false,
        opponent_blocking: false,
    };

    pub const fn new(
        action: ActionKind,
        timestamp_ms: u32,
        is_my_action: bool,
        did_hit: bool,
        opponent_blocking: bool,
    ) -> Self {
        Self {
            action,
            timestamp_ms,
            is_my_action,
            did_hit,
            opponent_blocking,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

/// Builds a padded log from a slice of valid entries.
///
/// Returns the log together with its valid count.
pub fn padded_log(entries: &[GameInputEntry]) -> Result<(InputLog, usize), MatchError> {
    if entries.len() > MAX_INPUTS {
        return Err(MatchError::ValidCountOutOfRange {
            valid_count: entries.len(),
        });
    }

    let mut log = [GameInputEntry::EMPTY; MAX_INPUTS];
    log[..entries.len()].copy_from_slice(entries);
    Ok((log, entries.len()))
}

/// Checks a `(log, valid_count)` pair at the API boundary.
///
/// Valid entries must carry timestamps the commitment can encode.
pub fn validate_log(entries: &[GameInputEntry], valid_count: usize) -> Result<(), MatchError> {
    if valid_count > MAX_INPUTS || valid_count > entries.len() {
        return Err(MatchError::ValidCountOutOfRange { valid_count });
    }

    for (index, entry) in entries[..valid_count].iter().enumerate() {
        if entry.timestamp_ms > MAX_TIMESTAMP_MS {
            return Err(MatchError::TimestampOutOfRange {
                index,
                timestamp_ms: entry.timestamp_ms,
            });
        }
    }

    Ok(())
}
