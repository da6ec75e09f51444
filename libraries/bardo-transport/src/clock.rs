//! Display position clock
//!
//! The source component mirrored playback position for display with a
//! one-second interval that was cancelled and recreated on every transition,
//! leaking stale timers when a path forgot the cancel. Here the clock is a
//! plain value owned by the transport: transitions restart or cancel it in
//! one place, and the platform drives it by calling `tick`.

use std::time::Duration;

/// Advisory position clock for display purposes.
///
/// Authoritative position lives in the media element; this clock only feeds
/// the progress display between position syncs.
#[derive(Debug, Clone, Default)]
pub struct PositionClock {
    running: bool,
    position: Duration,
}

impl PositionClock {
    /// Create a stopped clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the clock from the given position.
    pub fn start_from(&mut self, position: Duration) {
        self.position = position;
        self.running = true;
    }

    /// Move the displayed position without changing the run state.
    pub fn sync_to(&mut self, position: Duration) {
        self.position = position;
    }

    /// Stop the clock, keeping the displayed position.
    pub fn cancel(&mut self) {
        self.running = false;
    }

    /// Stop the clock and reset the displayed position to zero.
    pub fn reset(&mut self) {
        self.running = false;
        self.position = Duration::ZERO;
    }

    /// Advance by one tick interval.
    ///
    /// Returns true when the clock was running and the position moved.
    pub fn tick(&mut self, step: Duration) -> bool {
        if self.running {
            self.position += step;
            true
        } else {
            false
        }
    }

    /// Displayed position.
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Whether the clock is running.
    pub fn is_running(&self) -> bool {
        self.running
    }
}
