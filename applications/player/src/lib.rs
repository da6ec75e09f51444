//! Bardo Player application library
//!
//! Session wiring, configuration, and the rodio-backed media element used by
//! the `bardo-player` binary.

pub mod config;
pub mod media;
pub mod session;

pub use config::PlayerConfig;
pub use media::{RodioElement, RodioLoader};
pub use session::{NowPlaying, PlayerSession, StreamLoader};
