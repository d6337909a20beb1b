//! Match outcome as claimed by one peer.

use crate::combat::{self, STARTING_HEALTH};
use crate::entry::{self, GameInputEntry};
use crate::error::MatchError;

/// Tri-state result from the local player's point of view.
#[derive(
    Clone,
    Copy,
    Debug,
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
#[repr(u32)]
pub enum WinnerFlag {
    Lost = 0,
    Won = 1,
    Draw = 2,
}

impl WinnerFlag {
    /// Strict comparison of the two final healths.
    pub fn from_healths(my_health: u32, opponent_health: u32) -> Self {
        match my_health.cmp(&opponent_health) {
            core::cmp::Ordering::Greater => Self::Won,
            core::cmp::Ordering::Less => Self::Lost,
            core::cmp::Ordering::Equal => Self::Draw,
        }
    }

    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for WinnerFlag {
    type Error = MatchError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Lost),
            1 => Ok(Self::Won),
            2 => Ok(Self::Draw),
            other => Err(MatchError::UnknownWinnerFlag { value: other }),
        }
    }
}

/// Everything about a finished match except its commitment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSummary {
    pub my_final_health: u32,
    pub opponent_final_health: u32,
    pub i_won: WinnerFlag,
    /// Damage the local player dealt; informational, not proven.
    pub total_damage_dealt: u32,
}

/// Validates a finished match and derives its summary.
///
/// The claimed healths are taken as given. Whether they agree with the log is
/// decided by the proof, not here.
pub fn summarize(
    entries: &[GameInputEntry],
    valid_count: usize,
    my_final_health: u32,
    opponent_final_health: u32,
) -> Result<MatchSummary, MatchError> {
    entry::validate_log(entries, valid_count)?;

    for health in [my_final_health, opponent_final_health] {
        if health > STARTING_HEALTH {
            return Err(MatchError::HealthOutOfRange { health });
        }
    }

    Ok(MatchSummary {
        my_final_health,
        opponent_final_health,
        i_won: WinnerFlag::from_healths(my_final_health, opponent_final_health),
        total_damage_dealt: combat::replay(entries, valid_count).damage_dealt,
    })
}
