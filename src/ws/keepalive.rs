//! Fixed-interval keepalive timer.
//!
//! The timer fires regardless of connection state; whether a ping is
//! actually written is up to [`super::ConnectionManager::send_keepalive`].

use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior};

/// Repeating keepalive timer. The first tick completes immediately.
#[derive(Debug)]
pub struct Keepalive {
    interval: Interval,
    ticks: u64,
}

impl Keepalive {
    /// Creates a timer firing every `period`.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval, ticks: 0 }
    }

    /// Waits for the next tick and returns the total number of ticks.
    pub async fn tick(&mut self) -> u64 {
        self.interval.tick().await;
        self.ticks = self.ticks.saturating_add(1);
        self.ticks
    }

    /// Ticks observed so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Timer period.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_tick_is_immediate() {
        let mut keepalive = Keepalive::new(Duration::from_millis(500));
        let start = tokio::time::Instant::now();
        assert_eq!(keepalive.tick().await, 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_every_half_second() {
        let mut keepalive = Keepalive::new(Duration::from_millis(500));
        let start = tokio::time::Instant::now();
        for _ in 0..21 {
            keepalive.tick().await;
        }
        assert_eq!(keepalive.ticks(), 21);
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn zero_period_is_clamped() {
        let keepalive = Keepalive::new(Duration::ZERO);
        assert_eq!(keepalive.period(), Duration::from_millis(1));
    }
}
