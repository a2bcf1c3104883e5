//! Simulated progress shown while a generation call is pending.
//!
//! The provider gives no progress signal, so the bar advances on a timer
//! and jumps to 100% once the call settles.

use std::future::Future;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

pub const LOADING_STATES: [&str; 4] = [
    "Analyzing the topic...",
    "Researching trends...",
    "Writing reels ideas...",
    "Adding the final touches...",
];

pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
pub const TICK_STEP: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressTracker {
    percent: f64,
    step: usize,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self { percent: 0.0, step: 0 }
    }

    /// Advances one tick. Returns true when the loading message changed.
    pub fn tick(&mut self) -> bool {
        self.percent = (self.percent + TICK_STEP).min(100.0);
        let step = step_for(self.percent);
        let changed = step != self.step;
        self.step = step;
        changed
    }

    pub fn finish(&mut self) {
        self.percent = 100.0;
        self.step = step_for(self.percent);
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn message(&self) -> &'static str {
        LOADING_STATES[self.step]
    }

    pub fn is_done(&self) -> bool {
        self.percent >= 100.0
    }
}

/// Loading message index for a percentage, clamped to the last message.
pub fn step_for(percent: f64) -> usize {
    let per_state = 100.0 / LOADING_STATES.len() as f64;
    ((percent / per_state).floor() as usize).min(LOADING_STATES.len() - 1)
}

/// Awaits `fut` while ticking a [`ProgressTracker`], reporting each update.
///
/// Ticking stops at 100% even if the future is still pending; the final
/// update is always the finished state.
pub async fn with_progress<F, T>(fut: F, mut on_update: impl FnMut(&ProgressTracker)) -> T
where
    F: Future<Output = T>,
{
    let mut tracker = ProgressTracker::new();
    let mut ticker = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(fut);

    let output = loop {
        tokio::select! {
            output = &mut fut => break output,
            _ = ticker.tick(), if !tracker.is_done() => {
                if tracker.tick() {
                    debug!("Progress {:.0}%: {}", tracker.percent(), tracker.message());
                }
                on_update(&tracker);
            }
        }
    };

    tracker.finish();
    on_update(&tracker);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_follow_quarters() {
        assert_eq!(step_for(0.0), 0);
        assert_eq!(step_for(24.5), 0);
        assert_eq!(step_for(25.0), 1);
        assert_eq!(step_for(99.5), 3);
        assert_eq!(step_for(100.0), 3);
    }

    #[test]
    fn tick_caps_at_hundred() {
        let mut tracker = ProgressTracker::new();
        for _ in 0..500 {
            tracker.tick();
        }
        assert_eq!(tracker.percent(), 100.0);
        assert_eq!(tracker.message(), LOADING_STATES[3]);
    }

    #[test]
    fn tick_reports_message_change() {
        let mut tracker = ProgressTracker::new();
        let changes = (0..60).filter(|_| tracker.tick()).count();
        assert_eq!(tracker.percent(), 30.0);
        assert_eq!(changes, 1);
        assert_eq!(tracker.message(), LOADING_STATES[1]);
    }

    #[tokio::test]
    async fn finishes_at_hundred_when_future_resolves() {
        let mut last = None;
        let value = with_progress(async { 42 }, |tracker| last = Some(tracker.percent())).await;

        assert_eq!(value, 42);
        assert_eq!(last, Some(100.0));
    }

    #[tokio::test]
    async fn first_tick_waits_one_interval() {
        let mut updates = Vec::new();
        with_progress(tokio::time::sleep(Duration::from_millis(30)), |tracker| {
            updates.push(tracker.percent())
        })
        .await;

        assert_eq!(updates, vec![100.0]);
    }
}
