//! Integration tests for the playback transport
//!
//! These tests drive full playback scenarios through the state machine
//! using a scripted media element.

use bardo_transport::{
    MediaElement, Transport, TransportConfig, TransportError, TransportEvent, TransportState,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ===== Test Helpers =====

#[derive(Debug)]
struct ElementState {
    duration: Option<Duration>,
    position: Duration,
    volume: f32,
    paused: bool,
}

/// Mock media element whose state stays visible to the test through a
/// shared handle after the transport takes ownership of the element.
#[derive(Clone)]
struct MockElement(Arc<Mutex<ElementState>>);

impl MockElement {
    fn new(duration_secs: u64) -> Self {
        Self(Arc::new(Mutex::new(ElementState {
            duration: Some(Duration::from_secs(duration_secs)),
            position: Duration::ZERO,
            volume: 1.0,
            paused: true,
        })))
    }

    fn handle(&self) -> Self {
        self.clone()
    }

    /// Simulate playback progressing inside the element.
    fn advance(&self, by: Duration) {
        let mut state = self.0.lock().unwrap();
        let target = state.position + by;
        state.position = match state.duration {
            Some(duration) => target.min(duration),
            None => target,
        };
    }

    fn position(&self) -> Duration {
        self.0.lock().unwrap().position
    }

    fn volume(&self) -> f32 {
        self.0.lock().unwrap().volume
    }

    fn is_paused(&self) -> bool {
        self.0.lock().unwrap().paused
    }
}

impl MediaElement for MockElement {
    fn play(&mut self) -> bardo_transport::Result<()> {
        self.0.lock().unwrap().paused = false;
        Ok(())
    }

    fn pause(&mut self) -> bardo_transport::Result<()> {
        self.0.lock().unwrap().paused = true;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.0.lock().unwrap().position
    }

    fn set_position(&mut self, position: Duration) -> bardo_transport::Result<()> {
        let mut state = self.0.lock().unwrap();
        state.position = match state.duration {
            Some(duration) => position.min(duration),
            None => position,
        };
        Ok(())
    }

    fn duration(&self) -> Option<Duration> {
        self.0.lock().unwrap().duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.0.lock().unwrap().volume = volume;
    }

    fn is_paused(&self) -> bool {
        self.0.lock().unwrap().paused
    }

    fn is_ended(&self) -> bool {
        let state = self.0.lock().unwrap();
        matches!(state.duration, Some(d) if state.position >= d)
    }
}

/// Load a track into the transport and bring it to Ready.
fn load_track(transport: &mut Transport, track_id: &str, duration_secs: u64) -> MockElement {
    let element = MockElement::new(duration_secs);
    let handle = element.handle();

    transport.begin_track_change(track_id);
    transport.attach_element(Box::new(element));
    transport.handle_can_play().unwrap();

    handle
}

fn finished_events(events: &[TransportEvent]) -> Vec<(String, bool)> {
    events
        .iter()
        .filter_map(|e| match e {
            TransportEvent::TrackFinished {
                track_id,
                auto_advance,
            } => Some((track_id.clone(), *auto_advance)),
            _ => None,
        })
        .collect()
}

// ===== Lifecycle =====

#[test]
fn full_playback_lifecycle() {
    let mut transport = Transport::new(TransportConfig::default());
    let element = load_track(&mut transport, "track1", 180);

    // Ready: volume initialized to 0.5 and pushed to the element
    assert_eq!(transport.state(), TransportState::Ready);
    assert_eq!(element.volume(), 0.5);
    assert!(element.is_paused());

    // Play
    transport.toggle_play().unwrap();
    assert_eq!(transport.state(), TransportState::Playing);
    assert!(!element.is_paused());
    assert!(transport.playback_authorized());

    // Two seconds of display clock
    transport.tick();
    transport.tick();
    assert_eq!(transport.display_position(), Duration::from_secs(2));

    // Pause freezes the display clock
    transport.toggle_play().unwrap();
    assert_eq!(transport.state(), TransportState::Paused);
    assert!(element.is_paused());
    transport.tick();
    assert_eq!(transport.display_position(), Duration::from_secs(2));

    // Resume
    transport.toggle_play().unwrap();
    assert_eq!(transport.state(), TransportState::Playing);

    let events = transport.drain_events();
    let states: Vec<TransportState> = events
        .iter()
        .filter_map(|e| match e {
            TransportEvent::StateChanged { state } => Some(*state),
            _ => None,
        })
        .collect();

    assert_eq!(
        states,
        vec![
            TransportState::Loading,
            TransportState::Ready,
            TransportState::Playing,
            TransportState::Paused,
            TransportState::Playing,
        ]
    );
}

#[test]
fn toggle_is_rejected_until_ready() {
    let mut transport = Transport::new(TransportConfig::default());

    assert!(matches!(
        transport.toggle_play(),
        Err(TransportError::NotReady(TransportState::Idle))
    ));

    transport.begin_track_change("track1");
    transport.attach_element(Box::new(MockElement::new(180)));

    // Element attached but can-play not signalled yet
    assert!(matches!(
        transport.toggle_play(),
        Err(TransportError::NotReady(TransportState::Loading))
    ));
}

// ===== End of Track =====

#[test]
fn natural_end_resets_and_requests_auto_advance() {
    let mut transport = Transport::new(TransportConfig::default());
    let element = load_track(&mut transport, "track1", 30);

    transport.toggle_play().unwrap();
    transport.drain_events();

    // The element reaches its end; the next tick observes it
    element.advance(Duration::from_secs(30));
    transport.tick();

    assert_eq!(transport.state(), TransportState::Idle);
    assert_eq!(transport.display_position(), Duration::ZERO);
    assert!(transport.progress_percent().is_none());

    let events = transport.drain_events();
    assert_eq!(
        finished_events(&events),
        vec![("track1".to_string(), true)]
    );

    // Session-style continuation: next track resumes automatically because
    // playback stays authorized across track changes.
    assert!(transport.playback_authorized());
    load_track(&mut transport, "track2", 60);
    transport.toggle_play().unwrap();
    assert_eq!(transport.state(), TransportState::Playing);
}

#[test]
fn end_without_user_playback_does_not_auto_advance() {
    let mut transport = Transport::new(TransportConfig::default());
    load_track(&mut transport, "track1", 30);

    // Never played; host signals an ended stream anyway
    transport.handle_ended();

    let events = transport.drain_events();
    assert_eq!(
        finished_events(&events),
        vec![("track1".to_string(), false)]
    );
}

// ===== Track Change =====

#[test]
fn change_song_pauses_current_and_resets() {
    let mut transport = Transport::new(TransportConfig::default());
    let first = load_track(&mut transport, "track1", 180);

    transport.toggle_play().unwrap();
    transport.tick();
    assert_eq!(transport.display_position(), Duration::from_secs(1));

    // Change song: current element paused, transport reset to Loading
    transport.begin_track_change("track2");
    assert!(first.is_paused());
    assert_eq!(transport.state(), TransportState::Loading);
    assert_eq!(transport.display_position(), Duration::ZERO);
    assert_eq!(transport.current_track_id(), Some("track2"));

    // Authorization survives the change so the session can resume playback
    assert!(transport.playback_authorized());

    let events = transport.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        TransportEvent::TrackChanged {
            track_id,
            previous_track_id: Some(prev),
        } if track_id == "track2" && prev == "track1"
    )));
}

// ===== Seek =====

#[test]
fn seek_operations_follow_element_position() {
    let mut transport = Transport::new(TransportConfig::default());
    let element = load_track(&mut transport, "track1", 180);

    transport.toggle_play().unwrap();

    transport.skip_forward().unwrap();
    assert_eq!(element.position(), Duration::from_secs(5));
    assert_eq!(transport.display_position(), Duration::from_secs(5));

    transport.skip_forward().unwrap();
    assert_eq!(element.position(), Duration::from_secs(10));

    // Rewind under one step clamps at zero rather than going negative
    transport.rewind().unwrap();
    transport.rewind().unwrap();
    transport.rewind().unwrap();
    assert_eq!(element.position(), Duration::ZERO);
    assert_eq!(transport.display_position(), Duration::ZERO);
    assert_eq!(transport.state(), TransportState::Playing);
}

#[test]
fn skip_past_end_takes_natural_end_path() {
    let mut transport = Transport::new(TransportConfig::default());
    let element = load_track(&mut transport, "track1", 8);

    transport.toggle_play().unwrap();
    transport.drain_events();

    transport.skip_forward().unwrap();
    assert_eq!(element.position(), Duration::from_secs(5));

    // Within one step of the end: clamps to duration and finishes
    transport.skip_forward().unwrap();
    assert_eq!(element.position(), Duration::from_secs(8));
    assert_eq!(transport.state(), TransportState::Idle);
    assert_eq!(transport.display_position(), Duration::ZERO);

    let events = transport.drain_events();
    assert_eq!(finished_events(&events), vec![("track1".to_string(), true)]);
}

#[test]
fn seek_while_paused_moves_display_without_running_clock() {
    let mut transport = Transport::new(TransportConfig::default());
    load_track(&mut transport, "track1", 180);

    transport.toggle_play().unwrap();
    transport.toggle_play().unwrap();
    assert_eq!(transport.state(), TransportState::Paused);

    transport.skip_forward().unwrap();
    assert_eq!(transport.display_position(), Duration::from_secs(5));

    // Still paused: the display clock must not advance
    transport.tick();
    transport.tick();
    assert_eq!(transport.display_position(), Duration::from_secs(5));
}

// ===== Volume =====

#[test]
fn gesture_volume_reaches_element_and_display() {
    let mut transport = Transport::new(TransportConfig::default());
    let element = load_track(&mut transport, "track1", 180);

    // Upward swipe of 150px at sensitivity 600 adds 0.25
    let level = transport.apply_swipe(-150.0);
    assert!((level - 0.75).abs() < 1e-6);
    assert!((element.volume() - 0.75).abs() < 1e-6);
    assert!((transport.display_volume() - 0.75).abs() < 1e-6);

    // Wheel down twice
    transport.apply_wheel(120.0);
    let level = transport.apply_wheel(120.0);
    assert!((level - 0.69).abs() < 1e-6);
    assert!((element.volume() - 0.69).abs() < 1e-6);
}

#[test]
fn progress_percent_tracks_display_clock() {
    let mut transport = Transport::new(TransportConfig::default());
    load_track(&mut transport, "track1", 100);

    transport.toggle_play().unwrap();
    for _ in 0..25 {
        transport.tick();
    }

    let percent = transport.progress_percent().unwrap();
    assert!((percent - 25.0).abs() < 0.01);
}
