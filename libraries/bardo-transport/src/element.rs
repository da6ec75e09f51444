//! Platform-agnostic media element trait
//!
//! Abstracts the underlying audio element/sink so the transport works with
//! any backend (rodio on desktop, an HTML media element on the web).

use crate::error::Result;
use std::time::Duration;

/// Platform-agnostic media element
///
/// The element is authoritative for playback position; the transport's
/// displayed position is advisory and mirrors it once per tick.
pub trait MediaElement: Send {
    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Move the playback position
    ///
    /// # Arguments
    /// * `position` - Target position from start of track
    fn set_position(&mut self, position: Duration) -> Result<()>;

    /// Total track duration, when known
    ///
    /// Streaming backends may not know the duration until decoding finishes;
    /// callers must tolerate `None`.
    fn duration(&self) -> Option<Duration>;

    /// Set output volume (0.0 to 1.0)
    fn set_volume(&mut self, volume: f32);

    /// Whether the element is currently paused
    fn is_paused(&self) -> bool;

    /// Whether playback ran past the end of the stream
    fn is_ended(&self) -> bool;
}

/// Fixed-duration silent element for testing
#[cfg(test)]
pub struct FakeElement {
    duration: Option<Duration>,
    position: Duration,
    volume: f32,
    paused: bool,
}

#[cfg(test)]
impl FakeElement {
    /// Create a new fake element
    pub fn new(duration: Duration) -> Self {
        Self {
            duration: Some(duration),
            position: Duration::ZERO,
            volume: 1.0,
            paused: true,
        }
    }

    /// Fake element with unknown duration
    pub fn without_duration() -> Self {
        Self {
            duration: None,
            position: Duration::ZERO,
            volume: 1.0,
            paused: true,
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

#[cfg(test)]
impl MediaElement for FakeElement {
    fn play(&mut self) -> Result<()> {
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.paused = true;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn set_position(&mut self, position: Duration) -> Result<()> {
        self.position = match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        };
        Ok(())
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_ended(&self) -> bool {
        matches!(self.duration, Some(d) if self.position >= d)
    }
}
