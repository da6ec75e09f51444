//! Error types for the playback transport.

use crate::types::TransportState;
use thiserror::Error;

/// Transport errors
#[derive(Debug, Error)]
pub enum TransportError {
    /// No media element is attached
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Operation requires a ready transport
    #[error("Transport not ready (state: {0:?})")]
    NotReady(TransportState),

    /// Underlying media element failed
    #[error("Media element error: {0}")]
    Element(String),
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;
