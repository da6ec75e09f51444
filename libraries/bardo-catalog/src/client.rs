//! HTTP client for the Bardo backend.

use crate::error::{CatalogError, Result};
use crate::types::{CatalogResponse, ClientConfig, ProviderPlayback};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Client for the two Bardo backend endpoints.
///
/// # Example
///
/// ```ignore
/// use bardo_catalog::{CatalogClient, ClientConfig};
///
/// let client = CatalogClient::new(ClientConfig::new("http://localhost:8000"))?;
/// let catalog = client.get_catalog().await?;
/// println!("Found {} tracks", catalog.tracks.len());
/// ```
#[derive(Debug)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("BardoPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogError::Request)?;

        Ok(Self { http, base_url })
    }

    /// Get the backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the track catalog (`GET /get`).
    ///
    /// An empty `tracks` array is treated as an error since nothing can be
    /// selected from it.
    pub async fn get_catalog(&self) -> Result<CatalogResponse> {
        let url = format!("{}/get", self.base_url);
        debug!(url = %url, "Fetching catalog");

        let response = self.http.get(&url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                CatalogError::ServerUnreachable(e.to_string())
            } else {
                CatalogError::Request(e)
            }
        })?;

        let status = response.status();

        if status.is_success() {
            let catalog: CatalogResponse = response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse catalog response: {}", e))
            })?;

            debug!(tracks = catalog.tracks.len(), "Fetched catalog");

            if catalog.tracks.is_empty() {
                return Err(CatalogError::EmptyCatalog);
            }

            Ok(catalog)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Resolve playback info for a track (`GET /play/{video_id}`).
    pub async fn get_playback(&self, video_id: &str) -> Result<ProviderPlayback> {
        let url = format!("{}/play/{}", self.base_url, video_id);
        debug!(url = %url, video_id = %video_id, "Resolving playback info");

        let response = self.http.get(&url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                CatalogError::ServerUnreachable(e.to_string())
            } else {
                CatalogError::Request(e)
            }
        })?;

        let status = response.status();

        if status.is_success() {
            let playback: ProviderPlayback = response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse playback response: {}", e))
            })?;

            debug!(
                formats = playback.ydl_info.requested_formats.len(),
                thumbnails = playback.ydl_info.thumbnails.len(),
                "Resolved playback info"
            );

            Ok(playback)
        } else if status.as_u16() == 404 {
            Err(CatalogError::ServerError {
                status: 404,
                message: format!("Track not found: {}", video_id),
            })
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}
