//! Bardo Player - Playback Transport
//!
//! Platform-agnostic playback transport for Bardo Player.
//!
//! This crate provides:
//! - One explicit transport state machine
//!   (`Idle → Loading → Ready → Playing ⇄ Paused → Idle`)
//! - An advisory display position clock (1-second tick)
//! - Seek steps (skip +5 s / rewind -5 s) with end-of-track clamping
//! - Volume in [0, 1] with swipe and wheel gesture adapters
//! - Auto-advance signalling once the user has authorized playback
//!
//! # Architecture
//!
//! `bardo-transport` is completely platform-agnostic: no dependency on any
//! audio backend or HTTP stack. The underlying player is provided through
//! the [`MediaElement`] trait, and the platform drives time by calling
//! [`Transport::tick`] once per second.
//!
//! # Example: Volume Gestures
//!
//! ```rust
//! use bardo_transport::{Transport, TransportConfig, TransportState};
//!
//! let mut transport = Transport::new(TransportConfig::default());
//! assert_eq!(transport.state(), TransportState::Idle);
//!
//! // Scroll up one notch: fixed 0.03 step, clamped to [0, 1]
//! let level = transport.apply_wheel(-120.0);
//! assert!((level - 0.53).abs() < 1e-6);
//!
//! // A huge downward swipe saturates at silence
//! assert_eq!(transport.apply_swipe(1_000_000.0), 0.0);
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use bardo_transport::{MediaElement, Result, Transport, TransportConfig};
//! use std::time::Duration;
//!
//! // Implement MediaElement for your platform's player
//! struct MyElement {
//!     // ... platform-specific sink
//! }
//!
//! impl MediaElement for MyElement {
//!     fn play(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn pause(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn position(&self) -> Duration {
//!         Duration::from_secs(0)
//!     }
//!
//!     fn set_position(&mut self, _position: Duration) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn duration(&self) -> Option<Duration> {
//!         Some(Duration::from_secs(180))
//!     }
//!
//!     fn set_volume(&mut self, _volume: f32) {}
//!
//!     fn is_paused(&self) -> bool {
//!         true
//!     }
//!
//!     fn is_ended(&self) -> bool {
//!         false
//!     }
//! }
//!
//! // Wire it into the transport for one track
//! let mut transport = Transport::new(TransportConfig::default());
//! transport.begin_track_change("track1");
//! transport.attach_element(Box::new(MyElement {}));
//! transport.handle_can_play().unwrap();
//! transport.toggle_play().unwrap();
//!
//! // Platform timer, once per second:
//! transport.tick();
//! for event in transport.drain_events() {
//!     println!("{:?}", event);
//! }
//! ```

mod clock;
mod element;
mod error;
mod events;
pub mod gesture;
mod transport;
pub mod types;
mod volume;

// Public exports
pub use clock::PositionClock;
pub use element::MediaElement;
pub use error::{Result, TransportError};
pub use events::TransportEvent;
pub use transport::Transport;
pub use types::{TransportConfig, TransportState};
pub use volume::Volume;
