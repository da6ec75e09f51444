//! Error types for the catalog client.

use thiserror::Error;

/// Errors that can occur when talking to the Bardo backend.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Catalog response contained no tracks
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// Playback info contained no audio-only format
    #[error("No audio-only stream in playback info")]
    NoAudioStream,

    /// Bounded retry gave up
    #[error("Giving up after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<CatalogError>,
    },
}

impl CatalogError {
    /// True when this error is the terminal retry-exhaustion variant.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CatalogError::RetriesExhausted { .. })
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
