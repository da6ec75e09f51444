//! Rodio-backed media element
//!
//! Downloads the resolved stream URL into memory, decodes it with rodio, and
//! exposes the sink through the transport's `MediaElement` seam.

use crate::session::StreamLoader;
use anyhow::{Context, Result};
use async_trait::async_trait;
use bardo_catalog::StreamMeta;
use bardo_transport::{MediaElement, TransportError};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::io::Cursor;
use std::time::Duration;
use tracing::debug;

/// Audio output shared by every element created during the session.
///
/// The output stream must stay alive for as long as any sink plays through
/// it, and it is not `Send`, so the loader keeps it on the main task.
pub struct RodioLoader {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    http: reqwest::Client,
}

impl RodioLoader {
    /// Open the default audio output device.
    pub fn new() -> Result<Self> {
        let (_stream, handle) =
            OutputStream::try_default().context("opening default audio output")?;

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("BardoPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building download client")?;

        Ok(Self {
            _stream,
            handle,
            http,
        })
    }
}

#[async_trait(?Send)]
impl StreamLoader for RodioLoader {
    async fn load(&self, stream: &StreamMeta) -> Result<Box<dyn MediaElement>> {
        debug!(url = %stream.stream_url, "Downloading stream");

        let response = self
            .http
            .get(&stream.stream_url)
            .send()
            .await
            .context("fetching audio stream")?
            .error_for_status()
            .context("audio stream request rejected")?;

        let bytes = response.bytes().await.context("reading audio stream")?;
        debug!(bytes = bytes.len(), "Stream downloaded");

        let decoder =
            Decoder::new(Cursor::new(bytes.to_vec())).context("decoding audio stream")?;
        let duration = decoder.total_duration();

        let sink = Sink::try_new(&self.handle).context("creating audio sink")?;
        sink.pause();
        sink.append(decoder);

        Ok(Box::new(RodioElement { sink, duration }))
    }
}

/// One decoded track on the shared audio output.
pub struct RodioElement {
    sink: Sink,
    duration: Option<Duration>,
}

impl MediaElement for RodioElement {
    fn play(&mut self) -> bardo_transport::Result<()> {
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) -> bardo_transport::Result<()> {
        self.sink.pause();
        Ok(())
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn set_position(&mut self, position: Duration) -> bardo_transport::Result<()> {
        self.sink
            .try_seek(position)
            .map_err(|e| TransportError::Element(e.to_string()))
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    fn is_ended(&self) -> bool {
        self.sink.empty()
    }
}
