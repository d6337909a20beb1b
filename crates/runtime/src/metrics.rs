//! Proof generation metrics and statistics.
//!
//! Tracks proving performance, outcomes, and how many proofs are in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Proof generation metrics tracked by the proof generator.
///
/// Uses atomics for lock-free access across threads.
#[derive(Debug, Default)]
pub struct ProofMetrics {
    /// Proofs successfully generated
    generated: AtomicU64,

    /// Claims refused because the log does not support them
    rejected: AtomicU64,

    /// Proof attempts that failed for any other reason
    failed: AtomicU64,

    /// Proofs currently being generated
    in_flight: AtomicU64,

    /// Peak number of proofs generated concurrently
    peak_in_flight: AtomicU64,

    /// Sum of successful proving durations, in nanoseconds
    total_proving_time_nanos: AtomicU64,
}

impl ProofMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a proof attempt as started.
    pub fn record_start(&self) {
        let depth = self.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
        self.peak_in_flight.fetch_max(depth, Ordering::Relaxed);
    }

    pub fn record_success(&self, proving_time: Duration) {
        self.finish();
        self.generated.fetch_add(1, Ordering::Relaxed);
        self.total_proving_time_nanos
            .fetch_add(proving_time.as_nanos() as u64, Ordering::Relaxed);
    }

    pub fn record_rejection(&self) {
        self.finish();
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.finish();
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    fn finish(&self) {
        let _ = self
            .in_flight
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                Some(n.saturating_sub(1))
            });
    }

    pub fn generated(&self) -> u64 {
        self.generated.load(Ordering::Relaxed)
    }

    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn in_flight(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    pub fn peak_in_flight(&self) -> u64 {
        self.peak_in_flight.load(Ordering::Relaxed)
    }

    /// Average duration of successful proofs.
    pub fn avg_proving_time(&self) -> Duration {
        let generated = self.generated();
        if generated == 0 {
            Duration::ZERO
        } else {
            let total_nanos = self.total_proving_time_nanos.load(Ordering::Relaxed);
            Duration::from_nanos(total_nanos / generated)
        }
    }

    /// Total number of finished attempts.
    pub fn total_requests(&self) -> u64 {
        self.generated() + self.rejected() + self.failed()
    }

    /// Reads every counter.
    ///
    /// Fields are read individually, so a snapshot taken while proofs finish
    /// may mix before and after values.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            generated: self.generated(),
            rejected: self.rejected(),
            failed: self.failed(),
            in_flight: self.in_flight(),
            peak_in_flight: self.peak_in_flight(),
            avg_proving_time: self.avg_proving_time(),
        }
    }
}

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub generated: u64,
    pub rejected: u64,
    pub failed: u64,
    pub in_flight: u64,
    pub peak_in_flight: u64,
    pub avg_proving_time: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_outcomes_and_peak() {
        let metrics = ProofMetrics::new();

        metrics.record_start();
        metrics.record_start();
        metrics.record_success(Duration::from_millis(300));
        metrics.record_rejection();
        metrics.record_start();
        metrics.record_success(Duration::from_millis(100));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.generated, 2);
        assert_eq!(snapshot.rejected, 1);
        assert_eq!(snapshot.in_flight, 0);
        assert_eq!(snapshot.peak_in_flight, 2);
        assert_eq!(snapshot.avg_proving_time, Duration::from_millis(200));
        assert_eq!(metrics.total_requests(), 3);
    }

    #[test]
    fn in_flight_never_underflows() {
        let metrics = ProofMetrics::new();
        metrics.record_failure();

        assert_eq!(metrics.in_flight(), 0);
        assert_eq!(metrics.failed(), 1);
        assert_eq!(metrics.avg_proving_time(), Duration::ZERO);
    }
}
