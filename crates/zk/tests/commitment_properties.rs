//! Properties of the input log commitment.

use match_core::{ActionKind, GameInputEntry, InputRecorder, MAX_INPUTS, ManualClock};
use zk::Fp254;
use zk::circuit::commitment::{chain_step, compute_input_log_hash};
use zk::circuit::test_helpers::{full_log, punch, sample_exchange};

#[test]
fn peers_recording_the_same_match_agree() {
    // Each peer records from its own perspective clock origin, but the relative
    // timing and the facts of every input are shared over the peer channel.
    let record = |origin: u64| {
        let clock = ManualClock::new(origin);
        let mut recorder = InputRecorder::with_clock(&clock);
        recorder.start();
        for (delay, action, mine, hit) in [
            (120, ActionKind::Punch, true, true),
            (60, ActionKind::Block, false, false),
            (300, ActionKind::Punch, false, true),
        ] {
            clock.advance(delay);
            recorder.record(action, mine, hit, false);
        }
        (recorder.inputs(), recorder.valid_count())
    };

    let (log_a, count_a) = record(0);
    let (log_b, count_b) = record(987_654);

    assert_eq!(
        compute_input_log_hash(&log_a, count_a).unwrap(),
        compute_input_log_hash(&log_b, count_b).unwrap()
    );
}

#[test]
fn every_field_is_committed() {
    let base = GameInputEntry::new(ActionKind::Punch, 400, true, true, false);
    let base_hash = compute_input_log_hash(&[base], 1).unwrap();

    let variants = [
        GameInputEntry { action: ActionKind::Block, ..base },
        GameInputEntry { timestamp_ms: 401, ..base },
        GameInputEntry { is_my_action: false, ..base },
        GameInputEntry { did_hit: false, ..base },
        GameInputEntry { opponent_blocking: true, ..base },
    ];

    for variant in variants {
        assert_ne!(
            compute_input_log_hash(&[variant], 1).unwrap(),
            base_hash,
            "changing {variant:?} must change the commitment"
        );
    }
}

#[test]
fn chain_extends_prefix() {
    let (log, count) = sample_exchange();

    let prefix = compute_input_log_hash(&log, count - 1).unwrap();
    let extended = chain_step(prefix, &log[count - 1]).unwrap();

    assert_eq!(extended, compute_input_log_hash(&log, count).unwrap());
}

#[test]
fn garbage_padding_is_ignored() {
    let (mut log, count) = sample_exchange();
    let clean = compute_input_log_hash(&log, count).unwrap();

    for slot in log[count..].iter_mut() {
        *slot = punch(u32::MAX, true, true, true);
    }

    assert_eq!(compute_input_log_hash(&log, count).unwrap(), clean);
}

#[test]
fn reordering_changes_commitment() {
    let (log, count) = sample_exchange();
    let original = compute_input_log_hash(&log, count).unwrap();

    for i in 0..count {
        for j in (i + 1)..count {
            assert_ne!(log[i], log[j], "sample entries {i} and {j} must differ");
            let mut swapped = log;
            swapped.swap(i, j);
            assert_ne!(
                compute_input_log_hash(&swapped, count).unwrap(),
                original,
                "swapping entries {i} and {j} left the commitment unchanged"
            );
        }
    }
}

#[test]
fn full_log_commits_without_error() {
    let (log, count) = full_log();
    assert_eq!(count, MAX_INPUTS);

    let hash = compute_input_log_hash(&log, count).unwrap();
    assert_ne!(hash, Fp254::from(0u64));
}
