//! Shared match-log builders for circuit tests and benchmarks.

use match_core::{ActionKind, GameInputEntry, InputLog, MAX_INPUTS, padded_log};

/// Punch entry.
pub fn punch(timestamp_ms: u32, is_my_action: bool, did_hit: bool, blocking: bool) -> GameInputEntry {
    GameInputEntry::new(ActionKind::Punch, timestamp_ms, is_my_action, did_hit, blocking)
}

/// Block entry.
pub fn block(timestamp_ms: u32, is_my_action: bool) -> GameInputEntry {
    GameInputEntry::new(ActionKind::Block, timestamp_ms, is_my_action, false, false)
}

/// A short exchange: the local player lands one clean and one blocked punch,
/// the opponent lands one clean punch. Replays to healths (80, 70).
pub fn sample_exchange() -> (InputLog, usize) {
    let entries = [
        punch(100, true, true, false),
        block(180, false),
        punch(250, true, true, true),
        punch(600, false, true, false),
        punch(900, false, false, false),
    ];

    padded_log(&entries).expect("sample exchange fits in a log")
}

/// Alternating punches, `my_hits` landed by the local player and
/// `opponent_hits` by the opponent, none blocked.
pub fn scripted_match(my_hits: usize, opponent_hits: usize) -> (InputLog, usize) {
    let mut log = [GameInputEntry::EMPTY; MAX_INPUTS];
    let mut count = 0;
    let mut timestamp = 0u32;

    for i in 0..my_hits.max(opponent_hits) {
        for (mine, hits) in [(true, my_hits), (false, opponent_hits)] {
            if i < hits && count < MAX_INPUTS {
                timestamp += 150;
                log[count] = punch(timestamp, mine, true, false);
                count += 1;
            }
        }
    }

    (log, count)
}

/// A log filled to capacity with mixed actions and a late timestamp.
pub fn full_log() -> (InputLog, usize) {
    let mut log = [GameInputEntry::EMPTY; MAX_INPUTS];

    for (i, slot) in log.iter_mut().enumerate() {
        let timestamp = 1_000 + (i as u32) * 70_000;
        *slot = match i % 4 {
            0 => punch(timestamp, true, i % 8 == 0, i % 3 == 0),
            1 => block(timestamp, false),
            2 => punch(timestamp, false, i % 5 == 0, false),
            _ => GameInputEntry::new(ActionKind::None, timestamp, true, false, false),
        };
    }

    (log, MAX_INPUTS)
}
