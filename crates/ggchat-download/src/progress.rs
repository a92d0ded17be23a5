//! Fractional progress computation with rate-limited emission.
//!
//! UIs should not be flooded with one event per network chunk, so
//! intermediate fractions are throttled; the terminal `1.0` is always
//! emitted.

use std::time::{Duration, Instant};

/// Tracks received bytes against an optional total and decides when a
/// progress fraction is worth emitting.
///
/// When the server omits the content length, no intermediate fractions
/// are produced and the caller's last reported value stands until
/// [`ProgressTracker::finish`].
#[derive(Debug)]
pub struct ProgressTracker {
    total: Option<u64>,
    received: u64,
    last_fraction: f32,
    last_emit: Option<Instant>,
    min_interval: Duration,
}

impl ProgressTracker {
    /// Default minimum interval between emitted fractions.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

    /// Create a tracker for a transfer of `total` bytes, if known.
    #[must_use]
    pub const fn new(total: Option<u64>) -> Self {
        Self {
            total,
            received: 0,
            last_fraction: 0.0,
            last_emit: None,
            min_interval: Self::DEFAULT_INTERVAL,
        }
    }

    /// Override the emission interval (tests use `Duration::ZERO`).
    #[must_use]
    pub const fn with_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Record `bytes` more received bytes.
    ///
    /// Returns a fraction to emit, or `None` when the total is unknown or
    /// the previous emission was too recent. Returned fractions are
    /// monotonically non-decreasing and clamped to `1.0`.
    pub fn advance(&mut self, bytes: u64) -> Option<f32> {
        self.received = self.received.saturating_add(bytes);
        let total = self.total?;
        if total == 0 {
            return None;
        }

        #[allow(clippy::cast_possible_truncation)]
        let fraction = ((self.received as f64 / total as f64).min(1.0)) as f32;

        let now = Instant::now();
        match self.last_emit {
            Some(last) if now.duration_since(last) < self.min_interval => None,
            _ => {
                self.last_emit = Some(now);
                self.last_fraction = fraction;
                Some(fraction)
            }
        }
    }

    /// Terminal fraction for a successful transfer: exactly `1.0`.
    pub const fn finish(&mut self) -> f32 {
        self.last_fraction = 1.0;
        1.0
    }

    /// Total bytes recorded so far.
    #[must_use]
    pub const fn received(&self) -> u64 {
        self.received
    }
}
