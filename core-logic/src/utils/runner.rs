//! Sequential scheduling primitives.
//!
//! Work is drained one item at a time and the caller awaits `pace()` after
//! each item, so there is never more than one unit of work in flight.

use crate::traits::BatchStats;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::info;

/// Default delay between two consecutive items.
pub const DEFAULT_PACING: Duration = Duration::from_millis(5_000);

#[derive(Debug)]
pub struct PacedQueue<T> {
    pending: VecDeque<T>,
    pacing: Duration,
    drained: usize,
}

impl<T> PacedQueue<T> {
    pub fn new(items: impl IntoIterator<Item = T>, pacing: Duration) -> Self {
        Self {
            pending: items.into_iter().collect(),
            pacing,
            drained: 0,
        }
    }

    /// Takes the next item in insertion order.
    pub fn pop(&mut self) -> Option<T> {
        let item = self.pending.pop_front()?;
        self.drained += 1;
        Some(item)
    }

    /// Suspends for the pacing interval.
    pub async fn pace(&self) {
        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn drained(&self) -> usize {
        self.drained
    }

    pub fn pacing(&self) -> Duration {
        self.pacing
    }
}

/// Wall-clock timer for a whole batch, logging the final tally.
pub struct RunTimer {
    start: Instant,
}

impl RunTimer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self, stats: &BatchStats) {
        info!(
            target: crate::utils::logger::REPORT_TARGET,
            "Total Time: {:.1}s | Total Success: {} | Total Fail: {} | Success Rate: {:.2}%",
            self.elapsed().as_secs_f64(),
            stats.success,
            stats.failed,
            stats.success_rate()
        );
    }
}
