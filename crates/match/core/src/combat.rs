//! Damage rules replayed from an input log.
//!
//! Only landed punches deal damage. A punch into a block deals
//! [`BLOCKED_DAMAGE`], otherwise [`PUNCH_DAMAGE`]. Health never drops below 0.

use crate::entry::GameInputEntry;

pub const STARTING_HEALTH: u32 = 100;
pub const PUNCH_DAMAGE: u32 = 20;
pub const BLOCKED_DAMAGE: u32 = 10;

/// Damage accumulated by each side over a log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatTally {
    /// Damage the local player dealt to the opponent.
    pub damage_dealt: u32,
    /// Damage the opponent dealt to the local player.
    pub damage_taken: u32,
}

impl CombatTally {
    pub fn my_health(&self) -> u32 {
        remaining_health(self.damage_taken)
    }

    pub fn opponent_health(&self) -> u32 {
        remaining_health(self.damage_dealt)
    }
}

/// Damage a single entry deals, or 0 if it is not a landed punch.
pub fn entry_damage(entry: &GameInputEntry) -> u32 {
    if !entry.action.is_punch() || !entry.did_hit {
        return 0;
    }

    if entry.opponent_blocking {
        BLOCKED_DAMAGE
    } else {
        PUNCH_DAMAGE
    }
}

/// Replays the first `valid_count` entries.
///
/// Callers validate `valid_count` first; anything past the slice is ignored.
pub fn replay(entries: &[GameInputEntry], valid_count: usize) -> CombatTally {
    let valid = &entries[..valid_count.min(entries.len())];

    valid.iter().fold(CombatTally::default(), |mut tally, entry| {
        let damage = entry_damage(entry);
        if entry.is_my_action {
            tally.damage_dealt = tally.damage_dealt.saturating_add(damage);
        } else {
            tally.damage_taken = tally.damage_taken.saturating_add(damage);
        }
        tally
    })
}

pub fn remaining_health(damage: u32) -> u32 {
    STARTING_HEALTH.saturating_sub(damage)
}
