//! Playback transport - core orchestration
//!
//! Coordinates the media element, display clock, and volume behind one
//! explicit state machine. The source component tracked the same lifecycle
//! with independent flags (`canPlay`, `isPlaying`, an interval handle); here
//! every transition goes through one place, so the clock can never leak and
//! the flags can never disagree.

use crate::{
    clock::PositionClock,
    element::MediaElement,
    error::{Result, TransportError},
    events::TransportEvent,
    gesture,
    types::{TransportConfig, TransportState},
    volume::Volume,
};
use std::time::Duration;
use tracing::debug;

/// Central playback transport
///
/// Owns the state machine, the advisory display clock, the volume, and the
/// attached media element. Platform code drives it with element lifecycle
/// calls (`attach_element`, `handle_can_play`), user intents (`toggle_play`,
/// `skip_forward`, `rewind`, gestures), and a periodic `tick`; it reads back
/// state through queries and the drained event queue.
pub struct Transport {
    // State
    state: TransportState,
    current_track_id: Option<String>,

    // Platform seam
    element: Option<Box<dyn MediaElement>>,

    // Display and volume
    clock: PositionClock,
    volume: Volume,

    // Latched once the user starts playback; gates auto-advance and
    // resume-after-track-change
    playback_authorized: bool,

    // Settings
    config: TransportConfig,

    // Event queue for UI synchronization
    pending_events: Vec<TransportEvent>,
}

impl Transport {
    /// Create a new transport
    pub fn new(config: TransportConfig) -> Self {
        Self {
            state: TransportState::Idle,
            current_track_id: None,
            element: None,
            clock: PositionClock::new(),
            volume: Volume::new(config.initial_volume),
            playback_authorized: false,
            config,
            pending_events: Vec::new(),
        }
    }

    // ===== Track Lifecycle =====

    /// Begin replacing the current track
    ///
    /// Pauses any current playback, drops the old element, resets the clock,
    /// and enters `Loading`. Called for manual change-song and auto-advance
    /// alike; both map to the same action.
    pub fn begin_track_change(&mut self, track_id: &str) {
        if self.state == TransportState::Playing {
            let pause_err = self.element.as_mut().and_then(|e| e.pause().err());
            if let Some(err) = pause_err {
                self.emit_error(err.to_string());
            }
        }

        let previous_track_id = self.current_track_id.replace(track_id.to_string());
        self.element = None;
        self.clock.reset();
        self.set_state(TransportState::Loading);

        debug!(track_id = %track_id, previous = ?previous_track_id, "Track change started");
        self.pending_events.push(TransportEvent::TrackChanged {
            track_id: track_id.to_string(),
            previous_track_id,
        });
    }

    /// Attach the media element for the track being loaded
    ///
    /// The transport stays in `Loading` until `handle_can_play`.
    pub fn attach_element(&mut self, element: Box<dyn MediaElement>) {
        self.element = Some(element);
    }

    /// Signal that the attached element became playable
    ///
    /// Enters `Ready` and initializes the volume to the configured level,
    /// mirroring it into the display value.
    pub fn handle_can_play(&mut self) -> Result<()> {
        let initial = self.config.initial_volume;
        let element = self
            .element
            .as_mut()
            .ok_or(TransportError::NoTrackLoaded)?;

        element.set_volume(initial);
        self.volume.set(initial);
        self.set_state(TransportState::Ready);
        self.emit_volume_changed();
        Ok(())
    }

    // ===== Playback Control =====

    /// Toggle between playing and paused
    ///
    /// No-op error while the stream is not yet playable, matching the source
    /// component's guard on the play button.
    pub fn toggle_play(&mut self) -> Result<()> {
        match self.state {
            TransportState::Ready | TransportState::Paused => self.start_playing(),
            TransportState::Playing => self.pause(),
            state => Err(TransportError::NotReady(state)),
        }
    }

    /// Pause playback
    ///
    /// Cancels the display clock. Does nothing unless playing.
    pub fn pause(&mut self) -> Result<()> {
        if self.state != TransportState::Playing {
            return Ok(());
        }

        if let Some(element) = self.element.as_mut() {
            element.pause()?;
        }
        self.clock.cancel();
        self.set_state(TransportState::Paused);
        Ok(())
    }

    fn start_playing(&mut self) -> Result<()> {
        let element = self
            .element
            .as_mut()
            .ok_or(TransportError::NoTrackLoaded)?;

        element.play()?;
        let position = element.position();

        self.clock.start_from(position);
        self.playback_authorized = true;
        self.set_state(TransportState::Playing);
        Ok(())
    }

    // ===== Seek =====

    /// Skip forward by one seek step
    ///
    /// Skipping past the end clamps to the duration and takes the same path
    /// as a natural end of track.
    pub fn skip_forward(&mut self) -> Result<()> {
        let step = self.config.seek_step;
        let (position, duration) = {
            let element = self
                .element
                .as_ref()
                .ok_or(TransportError::NoTrackLoaded)?;
            (element.position(), element.duration())
        };

        match duration {
            Some(duration) if position + step >= duration => {
                if let Some(element) = self.element.as_mut() {
                    element.set_position(duration)?;
                }
                self.handle_ended();
                Ok(())
            }
            _ => self.seek_to(position + step),
        }
    }

    /// Rewind by one seek step, clamping at the start of the track
    pub fn rewind(&mut self) -> Result<()> {
        let step = self.config.seek_step;
        let position = self
            .element
            .as_ref()
            .ok_or(TransportError::NoTrackLoaded)?
            .position();

        self.seek_to(position.saturating_sub(step))
    }

    fn seek_to(&mut self, target: Duration) -> Result<()> {
        let element = self
            .element
            .as_mut()
            .ok_or(TransportError::NoTrackLoaded)?;

        element.set_position(target)?;
        let position = element.position();

        // The clock keeps running only while actually playing; a paused seek
        // just moves the displayed position.
        if self.state == TransportState::Playing {
            self.clock.start_from(position);
        } else {
            self.clock.sync_to(position);
        }
        Ok(())
    }

    // ===== End of Track =====

    /// Handle end of track (natural, or skip past the end)
    ///
    /// Resets the transport to its initial state and emits `TrackFinished`.
    /// Auto-advance is requested when the user previously authorized
    /// playback.
    pub fn handle_ended(&mut self) {
        if self.state == TransportState::Idle {
            return;
        }

        self.element = None;
        self.clock.reset();
        self.set_state(TransportState::Idle);

        let track_id = self.current_track_id.clone().unwrap_or_default();
        let auto_advance = self.playback_authorized;
        debug!(track_id = %track_id, auto_advance, "Track finished");
        self.pending_events.push(TransportEvent::TrackFinished {
            track_id,
            auto_advance,
        });
    }

    // ===== Display Clock =====

    /// Advance the transport by one tick interval
    ///
    /// Platform code calls this once per configured tick (1 s). Detects end
    /// of track while playing, otherwise advances the display clock and
    /// emits a position update.
    pub fn tick(&mut self) {
        if self.state == TransportState::Playing {
            let ended = self.element.as_ref().map(|e| e.is_ended()).unwrap_or(false);
            if ended {
                self.handle_ended();
                return;
            }
        }

        if self.clock.tick(self.config.tick) {
            let position_secs = self.clock.position().as_secs();
            let duration_secs = self.duration().map(|d| d.as_secs());
            self.pending_events.push(TransportEvent::PositionUpdate {
                position_secs,
                duration_secs,
            });
        }
    }

    // ===== Volume =====

    /// Set volume, clamped to [0, 1]
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set(level);
        self.push_volume_to_element();
        self.emit_volume_changed();
    }

    /// Add a signed delta to the volume, clamped to [0, 1]
    ///
    /// Returns the resulting level.
    pub fn nudge_volume(&mut self, delta: f32) -> f32 {
        if delta == 0.0 {
            return self.volume.level();
        }

        let level = self.volume.nudge(delta);
        self.push_volume_to_element();
        self.emit_volume_changed();
        level
    }

    /// Apply a vertical swipe gesture to the volume
    pub fn apply_swipe(&mut self, delta_y: f32) -> f32 {
        let delta = gesture::swipe_volume_delta(delta_y, self.config.swipe_sensitivity);
        self.nudge_volume(delta)
    }

    /// Apply a wheel event to the volume
    pub fn apply_wheel(&mut self, delta_y: f32) -> f32 {
        let delta = gesture::wheel_volume_delta(delta_y, self.config.wheel_step);
        self.nudge_volume(delta)
    }

    fn push_volume_to_element(&mut self) {
        let level = self.volume.level();
        if let Some(element) = self.element.as_mut() {
            element.set_volume(level);
        }
    }

    // ===== State Queries =====

    /// Current transport state
    pub fn state(&self) -> TransportState {
        self.state
    }

    /// ID of the current track, if one was loaded
    pub fn current_track_id(&self) -> Option<&str> {
        self.current_track_id.as_deref()
    }

    /// Whether the user has ever started playback
    pub fn playback_authorized(&self) -> bool {
        self.playback_authorized
    }

    /// Displayed (advisory) playback position
    pub fn display_position(&self) -> Duration {
        self.clock.position()
    }

    /// Current volume level; doubles as the display intensity value
    pub fn display_volume(&self) -> f32 {
        self.volume.level()
    }

    /// Track duration as reported by the media element
    pub fn duration(&self) -> Option<Duration> {
        self.element.as_ref().and_then(|e| e.duration())
    }

    /// Progress through the current track as a percentage
    ///
    /// `None` when no element is attached or the duration is unknown; the
    /// progress display is simply omitted in that case.
    pub fn progress_percent(&self) -> Option<f32> {
        let duration = self.duration()?;
        if duration.is_zero() {
            return None;
        }

        let percent =
            self.clock.position().as_secs_f32() / duration.as_secs_f32() * 100.0;
        Some(percent.min(100.0))
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain. The platform should
    /// call this periodically (e.g., after each tick or user action) to
    /// synchronize with transport state.
    pub fn drain_events(&mut self) -> Vec<TransportEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn set_state(&mut self, state: TransportState) {
        if self.state == state {
            return;
        }
        self.state = state;
        self.pending_events
            .push(TransportEvent::StateChanged { state });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(TransportEvent::VolumeChanged {
            level: self.volume.level(),
        });
    }

    fn emit_error(&mut self, message: String) {
        self.pending_events.push(TransportEvent::Error { message });
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}
