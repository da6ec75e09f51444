//! Types for Bardo backend requests and responses.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for connecting to a Bardo backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    pub base_url: String,
}

impl ClientConfig {
    /// Create a new client config with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

// =============================================================================
// Catalog Types
// =============================================================================

/// Response from the catalog endpoint (`GET /get`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogResponse {
    pub tracks: Vec<Track>,
}

/// A single playable track from the catalog.
///
/// Immutable once selected; replaced wholesale on change-song.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Track {
    /// Provider identifier used to resolve a stream
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
}

impl Track {
    /// Name of the primary artist, if the catalog supplied one.
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }
}

/// Artist credit on a track.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Artist {
    pub name: String,
}

/// Artwork variant; providers order these ascending by size.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl Thumbnail {
    /// Pixel area, zero when the provider omitted dimensions.
    pub fn area(&self) -> u64 {
        u64::from(self.width.unwrap_or(0)) * u64::from(self.height.unwrap_or(0))
    }
}

// =============================================================================
// Playback Resolution Types
// =============================================================================

/// Response from the stream-resolution endpoint (`GET /play/{video_id}`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderPlayback {
    #[serde(rename = "_ydl_info")]
    pub ydl_info: YdlInfo,
}

/// Provider-specific extraction payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YdlInfo {
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
    #[serde(default)]
    pub requested_formats: Vec<PlaybackFormat>,
}

/// One downloadable format entry.
///
/// Audio-only entries carry no frame rate; video entries do.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackFormat {
    #[serde(default)]
    pub fps: Option<f64>,
    pub url: String,
}

impl PlaybackFormat {
    /// True for entries without a frame rate, i.e. audio-only streams.
    pub fn is_audio_only(&self) -> bool {
        self.fps.is_none()
    }
}

// =============================================================================
// Resolved Stream Metadata
// =============================================================================

/// Playable stream URL and display artwork resolved for a track.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StreamMeta {
    pub thumbnail_url: String,
    pub stream_url: String,
}

impl StreamMeta {
    /// Resolve stream metadata from a provider playback payload.
    ///
    /// Picks the largest thumbnail (by area when dimensions are present,
    /// otherwise the last entry, which providers order ascending) and the
    /// first format entry without a frame rate field (the audio-only stream).
    pub fn resolve(playback: &ProviderPlayback) -> Result<Self> {
        let thumbnail = playback
            .ydl_info
            .thumbnails
            .iter()
            .max_by_key(|t| t.area())
            .ok_or_else(|| {
                CatalogError::ParseError("playback info contained no thumbnails".into())
            })?;

        let format = playback
            .ydl_info
            .requested_formats
            .iter()
            .find(|f| f.is_audio_only())
            .ok_or(CatalogError::NoAudioStream)?;

        Ok(Self {
            thumbnail_url: thumbnail.url.clone(),
            stream_url: format.url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thumb(url: &str, width: Option<u32>, height: Option<u32>) -> Thumbnail {
        Thumbnail {
            url: url.to_string(),
            width,
            height,
        }
    }

    fn playback(thumbnails: Vec<Thumbnail>, formats: Vec<PlaybackFormat>) -> ProviderPlayback {
        ProviderPlayback {
            ydl_info: YdlInfo {
                thumbnails,
                requested_formats: formats,
            },
        }
    }

    #[test]
    fn resolve_picks_largest_thumbnail() {
        let pb = playback(
            vec![
                thumb("small", Some(120), Some(90)),
                thumb("large", Some(1280), Some(720)),
                thumb("medium", Some(640), Some(480)),
            ],
            vec![PlaybackFormat {
                fps: None,
                url: "audio".into(),
            }],
        );

        let meta = StreamMeta::resolve(&pb).unwrap();
        assert_eq!(meta.thumbnail_url, "large");
    }

    #[test]
    fn resolve_falls_back_to_last_thumbnail_without_dimensions() {
        let pb = playback(
            vec![
                thumb("first", None, None),
                thumb("last", None, None),
            ],
            vec![PlaybackFormat {
                fps: None,
                url: "audio".into(),
            }],
        );

        let meta = StreamMeta::resolve(&pb).unwrap();
        assert_eq!(meta.thumbnail_url, "last");
    }

    #[test]
    fn resolve_picks_first_audio_only_format() {
        let pb = playback(
            vec![thumb("art", Some(64), Some(64))],
            vec![
                PlaybackFormat {
                    fps: Some(30.0),
                    url: "video".into(),
                },
                PlaybackFormat {
                    fps: None,
                    url: "audio-a".into(),
                },
                PlaybackFormat {
                    fps: None,
                    url: "audio-b".into(),
                },
            ],
        );

        let meta = StreamMeta::resolve(&pb).unwrap();
        assert_eq!(meta.stream_url, "audio-a");
    }

    #[test]
    fn resolve_fails_without_audio_only_format() {
        let pb = playback(
            vec![thumb("art", Some(64), Some(64))],
            vec![PlaybackFormat {
                fps: Some(60.0),
                url: "video".into(),
            }],
        );

        match StreamMeta::resolve(&pb) {
            Err(CatalogError::NoAudioStream) => {}
            other => panic!("Expected NoAudioStream, got: {:?}", other),
        }
    }

    #[test]
    fn resolve_fails_without_thumbnails() {
        let pb = playback(
            vec![],
            vec![PlaybackFormat {
                fps: None,
                url: "audio".into(),
            }],
        );

        assert!(matches!(
            StreamMeta::resolve(&pb),
            Err(CatalogError::ParseError(_))
        ));
    }

    #[test]
    fn track_deserializes_provider_field_names() {
        let json = serde_json::json!({
            "videoId": "abc123",
            "title": "Test Song",
            "artists": [{ "name": "Test Artist" }],
            "thumbnails": [{ "url": "http://art", "width": 120, "height": 90 }]
        });

        let track: Track = serde_json::from_value(json).unwrap();
        assert_eq!(track.video_id, "abc123");
        assert_eq!(track.primary_artist(), Some("Test Artist"));
    }
}
