//! Deferred feedback clearing

use std::time::{Duration, Instant};

/// Default time a rejection stays on screen
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(1500);

/// A pending clear for one rejection episode
///
/// Replaced when a newer rejection is scheduled and dropped when the
/// reducer cancels it. Firing a timer whose episode is no longer on
/// display has no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTimer {
    episode: u64,
    due: Instant,
}

impl FeedbackTimer {
    #[must_use]
    pub fn schedule(episode: u64, now: Instant, delay: Duration) -> Self {
        Self {
            episode,
            due: now + delay,
        }
    }

    #[must_use]
    pub const fn episode(&self) -> u64 {
        self.episode
    }

    #[must_use]
    pub const fn due(&self) -> Instant {
        self.due
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    /// Time left before firing, zero once due
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }
}
