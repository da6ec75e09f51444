//! Core types for the playback transport.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Transport state
///
/// One explicit machine instead of independent boolean flags:
///
/// `Idle → Loading → Ready → Playing ⇄ Paused → (ended) → Idle`
///
/// "Can play" in the source component maps to `Ready` and above;
/// "is playing" maps to `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// No track loaded
    Idle,

    /// Track selected, stream not yet playable
    Loading,

    /// Stream playable, not started
    Ready,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

impl TransportState {
    /// True once the underlying stream can be played.
    pub fn can_play(self) -> bool {
        matches!(
            self,
            TransportState::Ready | TransportState::Playing | TransportState::Paused
        )
    }

    /// True while audio is audibly progressing.
    pub fn is_playing(self) -> bool {
        self == TransportState::Playing
    }
}

/// Configuration for the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Volume applied when a stream becomes playable (default: 0.5)
    pub initial_volume: f32,

    /// Seek step for skip/rewind (default: 5 s)
    pub seek_step: Duration,

    /// Display clock tick interval (default: 1 s)
    pub tick: Duration,

    /// Volume change per wheel event (default: 0.03)
    pub wheel_step: f32,

    /// Swipe distance divisor; higher is less sensitive (default: 600.0)
    pub swipe_sensitivity: f32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            initial_volume: 0.5,
            seek_step: Duration::from_secs(5),
            tick: Duration::from_secs(1),
            wheel_step: 0.03,
            swipe_sensitivity: 600.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TransportConfig::default();
        assert_eq!(config.initial_volume, 0.5);
        assert_eq!(config.seek_step, Duration::from_secs(5));
        assert_eq!(config.tick, Duration::from_secs(1));
        assert_eq!(config.wheel_step, 0.03);
        assert_eq!(config.swipe_sensitivity, 600.0);
    }

    #[test]
    fn can_play_states() {
        assert!(!TransportState::Idle.can_play());
        assert!(!TransportState::Loading.can_play());
        assert!(TransportState::Ready.can_play());
        assert!(TransportState::Playing.can_play());
        assert!(TransportState::Paused.can_play());
    }

    #[test]
    fn only_playing_is_playing() {
        assert!(TransportState::Playing.is_playing());
        assert!(!TransportState::Paused.is_playing());
        assert!(!TransportState::Ready.is_playing());
    }
}
