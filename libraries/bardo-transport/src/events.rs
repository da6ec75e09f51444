//! Transport Events
//!
//! Event-based communication for UI synchronization. Events are queued by
//! the transport and drained by the platform layer at its own cadence.

use crate::types::TransportState;
use serde::{Deserialize, Serialize};

/// Events emitted by the transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TransportEvent {
    /// Transport state changed
    StateChanged {
        /// The new transport state
        state: TransportState,
    },

    /// Current track was replaced
    TrackChanged {
        /// ID of the new (current) track
        track_id: String,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Displayed position advanced (once per display-clock tick)
    PositionUpdate {
        /// Displayed playback position in seconds
        position_secs: u64,
        /// Track duration in seconds, when the element reports one
        duration_secs: Option<u64>,
    },

    /// Volume changed (gesture, wheel, or programmatic)
    VolumeChanged {
        /// New volume level in [0, 1]; doubles as the display intensity value
        level: f32,
    },

    /// Track reached its end (naturally, or via skip past the end)
    TrackFinished {
        /// ID of the finished track
        track_id: String,
        /// True when the host should fetch and start the next track
        auto_advance: bool,
    },

    /// Error surfaced from the media element
    Error {
        /// Error message
        message: String,
    },
}
