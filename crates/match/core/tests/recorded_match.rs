//! Recorder output fed straight into outcome summarisation.

use match_core::{
    ActionKind, CombatTally, InputRecorder, MAX_INPUTS, ManualClock, STARTING_HEALTH, WinnerFlag,
    combat, summarize,
};

#[test]
fn recorded_exchange_summarises_to_replayed_health() {
    let clock = ManualClock::new(1_000);
    let mut recorder = InputRecorder::with_clock(&clock);
    recorder.start();

    // Local punch lands, opponent blocks the next one, opponent lands one back.
    clock.advance(100);
    recorder.record(ActionKind::Punch, true, true, false);
    clock.advance(100);
    recorder.record(ActionKind::Block, false, false, false);
    clock.advance(50);
    recorder.record(ActionKind::Punch, true, true, true);
    clock.advance(400);
    recorder.record(ActionKind::Punch, false, true, false);
    recorder.stop();

    let log = recorder.inputs();
    let tally = combat::replay(&log, recorder.valid_count());
    assert_eq!(
        tally,
        CombatTally {
            damage_dealt: 30,
            damage_taken: 20
        }
    );

    let summary = summarize(
        &log,
        recorder.valid_count(),
        tally.my_health(),
        tally.opponent_health(),
    )
    .unwrap();

    assert_eq!(summary.my_final_health, 80);
    assert_eq!(summary.opponent_final_health, 70);
    assert_eq!(summary.i_won, WinnerFlag::Won);
    assert_eq!(summary.total_damage_dealt, 30);
}

#[test]
fn full_log_of_misses_is_a_draw() {
    let clock = ManualClock::new(0);
    let mut recorder = InputRecorder::with_clock(&clock);
    recorder.start();

    for i in 0..MAX_INPUTS * 2 {
        clock.advance(16);
        recorder.record(ActionKind::Punch, i % 2 == 0, false, false);
    }

    assert_eq!(recorder.valid_count(), MAX_INPUTS);
    assert_eq!(recorder.dropped_count() as usize, MAX_INPUTS);

    let summary = summarize(
        &recorder.inputs(),
        recorder.valid_count(),
        STARTING_HEALTH,
        STARTING_HEALTH,
    )
    .unwrap();
    assert_eq!(summary.i_won, WinnerFlag::Draw);
    assert_eq!(summary.total_damage_dealt, 0);
}
