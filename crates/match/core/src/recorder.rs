//! Timestamped, append-only capture of match inputs.
//!
//! The recorder sits on the real-time input path of both fighters, so
//! [`InputRecorder::record`] never allocates, never logs and never fails.
//! Once the log holds [`MAX_INPUTS`] entries further inputs are dropped
//! silently; [`InputRecorder::dropped_count`] tells the caller how many.

use arrayvec::ArrayVec;

use crate::entry::{ActionKind, GameInputEntry, InputLog, MAX_INPUTS};

/// Monotonic millisecond clock used to timestamp inputs.
pub trait MatchClock {
    /// Milliseconds since an arbitrary, fixed origin.
    fn now_ms(&self) -> u64;
}

impl<C: MatchClock + ?Sized> MatchClock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Wall clock backed by [`std::time::Instant`].
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl MatchClock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Hand-driven clock for deterministic replays and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: core::cell::Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: core::cell::Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(ms));
    }

    pub fn set(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }
}

impl MatchClock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

/// Records both fighters' inputs for a single match.
///
/// Entries are kept in arrival order; timestamps are relative to the last
/// [`start`](Self::start) call.
#[derive(Debug)]
pub struct InputRecorder<C> {
    clock: C,
    entries: ArrayVec<GameInputEntry, MAX_INPUTS>,
    start_ms: u64,
    active: bool,
    dropped: u32,
}

#[cfg(feature = "std")]
impl InputRecorder<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

#[cfg(feature = "std")]
impl Default for InputRecorder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: MatchClock> InputRecorder<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            entries: ArrayVec::new(),
            start_ms: 0,
            active: false,
            dropped: 0,
        }
    }

    /// Clears all entries and begins recording from the current instant.
    pub fn start(&mut self) {
        self.entries.clear();
        self.dropped = 0;
        self.start_ms = self.clock.now_ms();
        self.active = true;
    }

    /// Appends an input if recording is active and capacity remains.
    pub fn record(
        &mut self,
        action: ActionKind,
        is_my_action: bool,
        did_hit: bool,
        opponent_blocking: bool,
    ) {
        if !self.active {
            return;
        }

        if self.entries.is_full() {
            self.dropped = self.dropped.saturating_add(1);
            return;
        }

        let elapsed = self.clock.now_ms().saturating_sub(self.start_ms);
        let timestamp_ms = u32::try_from(elapsed).unwrap_or(u32::MAX);

        self.entries.push(GameInputEntry {
            action,
            timestamp_ms,
            is_my_action,
            did_hit,
            opponent_blocking,
        });
    }

    /// Stops recording. Entries stay readable until the next `start`.
    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the log padded with [`GameInputEntry::EMPTY`].
    pub fn inputs(&self) -> InputLog {
        let mut log = [GameInputEntry::EMPTY; MAX_INPUTS];
        log[..self.entries.len()].copy_from_slice(&self.entries);
        log
    }

    /// Recorded entries without padding.
    pub fn entries(&self) -> &[GameInputEntry] {
        &self.entries
    }

    pub fn valid_count(&self) -> usize {
        self.entries.len()
    }

    /// Inputs swallowed by the capacity ceiling since the last `start`.
    pub fn dropped_count(&self) -> u32 {
        self.dropped
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
