//! Player session
//!
//! Wires the track fetcher to the transport: initial load, change-song,
//! auto-advance after a finished track, and the stale-fetch discard. Skip
//! and previous both map to change-song; the backend hands out a random
//! track either way.

use anyhow::Result;
use async_trait::async_trait;
use bardo_catalog::{LoadedTrack, StreamMeta, TrackFetcher};
use bardo_transport::{MediaElement, Transport, TransportConfig, TransportEvent};
use tracing::{info, warn};

/// Builds a playable media element for a resolved stream.
///
/// The concrete loader downloads and decodes audio; tests substitute a
/// scripted element.
#[async_trait(?Send)]
pub trait StreamLoader {
    async fn load(&self, stream: &StreamMeta) -> Result<Box<dyn MediaElement>>;
}

/// Metadata of the track currently on display.
#[derive(Debug, Clone)]
pub struct NowPlaying {
    pub title: String,
    pub artist: Option<String>,
    pub thumbnail_url: String,
}

impl NowPlaying {
    fn from_loaded(loaded: &LoadedTrack) -> Self {
        Self {
            title: loaded.track.title.clone(),
            artist: loaded.track.primary_artist().map(str::to_string),
            thumbnail_url: loaded.stream.thumbnail_url.clone(),
        }
    }
}

/// Session controller owning fetcher, transport, and element loader.
pub struct PlayerSession<L: StreamLoader> {
    fetcher: TrackFetcher,
    loader: L,
    transport: Transport,
    now_playing: Option<NowPlaying>,
}

impl<L: StreamLoader> PlayerSession<L> {
    /// Create a session; no track is loaded until [`start`](Self::start).
    pub fn new(fetcher: TrackFetcher, loader: L, config: TransportConfig) -> Self {
        Self {
            fetcher,
            loader,
            transport: Transport::new(config),
            now_playing: None,
        }
    }

    /// Load the first random track without starting playback.
    ///
    /// Playback stays gated on the user's first play action.
    pub async fn start(&mut self) -> Result<()> {
        let loaded = self.fetcher.fetch_random().await?;
        self.apply_loaded(loaded, false).await
    }

    /// Replace the current track with a fresh random one.
    ///
    /// Pauses current playback first; playback resumes automatically only
    /// when the user had already authorized it.
    pub async fn change_song(&mut self) -> Result<()> {
        let resume = self.transport.playback_authorized();
        if let Err(err) = self.transport.pause() {
            warn!(error = %err, "Failed to pause before track change");
        }

        let loaded = self.fetcher.fetch_random().await?;
        self.apply_loaded(loaded, resume).await
    }

    async fn apply_loaded(&mut self, loaded: LoadedTrack, resume: bool) -> Result<()> {
        // A newer fetch was issued while this one was in flight; its result
        // will arrive on its own, ours must not overwrite it.
        if !self.fetcher.sequence().is_current(loaded.ticket) {
            warn!(
                video_id = %loaded.track.video_id,
                "Discarding stale fetch result"
            );
            return Ok(());
        }

        info!(
            title = %loaded.track.title,
            artist = loaded.track.primary_artist().unwrap_or("unknown"),
            "Loading track"
        );

        self.transport.begin_track_change(&loaded.track.video_id);
        let element = self.loader.load(&loaded.stream).await?;
        self.transport.attach_element(element);
        self.transport.handle_can_play()?;

        if resume {
            self.transport.toggle_play()?;
        }

        self.now_playing = Some(NowPlaying::from_loaded(&loaded));
        Ok(())
    }

    /// One display-clock tick: advance the transport and react to events.
    pub async fn tick(&mut self) -> Result<()> {
        self.transport.tick();
        self.pump_events().await
    }

    /// Drain transport events and run the reactions they call for.
    ///
    /// A finished track with auto-advance requested triggers a change-song.
    pub async fn pump_events(&mut self) -> Result<()> {
        for event in self.transport.drain_events() {
            match event {
                TransportEvent::TrackFinished {
                    track_id,
                    auto_advance: true,
                } => {
                    info!(track_id = %track_id, "Track finished, auto-advancing");
                    self.change_song().await?;
                }
                TransportEvent::TrackFinished {
                    track_id,
                    auto_advance: false,
                } => {
                    info!(track_id = %track_id, "Track finished");
                }
                TransportEvent::Error { message } => {
                    warn!(message = %message, "Transport error");
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// The transport, for direct control (play/pause, seek, gestures).
    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    /// Read-only transport access.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Metadata of the track on display, once one is loaded.
    pub fn now_playing(&self) -> Option<&NowPlaying> {
        self.now_playing.as_ref()
    }
}
