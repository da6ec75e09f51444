//! Bardo Catalog Client
//!
//! HTTP client library for the Bardo backend API.
//!
//! # Features
//!
//! - **Catalog fetch**: typed access to the track catalog endpoint
//! - **Stream resolution**: resolve a playable audio-only URL and artwork
//!   for a track
//! - **Random selection**: uniform track selection with injectable RNG
//! - **Bounded retry**: exponential backoff with a terminal error, instead
//!   of retrying forever
//! - **Request sequencing**: monotonic fetch tickets so stale responses can
//!   never overwrite fresher state
//!
//! # Example
//!
//! ```ignore
//! use bardo_catalog::{CatalogClient, ClientConfig, FetchPolicy, TrackFetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(ClientConfig::new("http://localhost:8000"))?;
//!     let fetcher = TrackFetcher::new(client, FetchPolicy::default());
//!
//!     let loaded = fetcher.fetch_random().await?;
//!     println!("Now loading: {}", loaded.track.title);
//!     println!("Stream URL: {}", loaded.stream.stream_url);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod fetcher;
mod types;

// Re-export main types
pub use client::CatalogClient;
pub use error::{CatalogError, Result};
pub use fetcher::{
    select_random_track, FetchPolicy, FetchSequence, FetchTicket, LoadedTrack, TrackFetcher,
};
pub use types::{
    Artist, CatalogResponse, ClientConfig, PlaybackFormat, ProviderPlayback, StreamMeta,
    Thumbnail, Track, YdlInfo,
};
