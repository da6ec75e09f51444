//! Random-track fetch orchestration.
//!
//! Runs the full sequence the player needs for a track change: fetch the
//! catalog, pick one track uniformly at random, resolve its stream metadata.
//! The whole sequence is retried with exponential backoff up to a bounded
//! number of attempts; exhaustion surfaces a terminal error instead of
//! looping forever. Every fetch draws a monotonically increasing ticket so
//! callers can discard results that were superseded by a newer fetch.

use crate::client::CatalogClient;
use crate::error::{CatalogError, Result};
use crate::types::{StreamMeta, Track};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Retry policy for the fetch sequence.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    /// Maximum attempts before giving up (default: 5)
    pub max_attempts: u32,

    /// Delay before the first retry (default: 250 ms)
    pub initial_backoff: Duration,

    /// Cap on the backoff delay (default: 8 s)
    pub max_backoff: Duration,

    /// Backoff growth factor per attempt (default: 2)
    pub multiplier: u32,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(8),
            multiplier: 2,
        }
    }
}

/// Token identifying one fetch in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Issues monotonically increasing fetch tickets.
///
/// A completed fetch should only be applied while its ticket is still the
/// most recently issued one; anything older lost the race to a newer fetch.
#[derive(Debug, Default)]
pub struct FetchSequence {
    next: AtomicU64,
}

impl FetchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the next ticket.
    pub fn issue(&self) -> FetchTicket {
        FetchTicket(self.next.fetch_add(1, Ordering::SeqCst))
    }

    /// True while `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 + 1 == self.next.load(Ordering::SeqCst)
    }
}

/// A fully resolved track ready for playback.
#[derive(Debug, Clone)]
pub struct LoadedTrack {
    pub track: Track,
    pub stream: StreamMeta,
    pub ticket: FetchTicket,
}

/// Select one track uniformly at random.
///
/// Returns `None` for an empty slice. Every index has nonzero probability.
pub fn select_random_track<'a, R: Rng + ?Sized>(
    tracks: &'a [Track],
    rng: &mut R,
) -> Option<&'a Track> {
    tracks.choose(rng)
}

/// Fetches random tracks with bounded retry and request sequencing.
pub struct TrackFetcher {
    client: CatalogClient,
    policy: FetchPolicy,
    sequence: FetchSequence,
}

impl TrackFetcher {
    /// Create a fetcher over an existing client.
    pub fn new(client: CatalogClient, policy: FetchPolicy) -> Self {
        Self {
            client,
            policy,
            sequence: FetchSequence::new(),
        }
    }

    /// The ticket sequence shared by all fetches from this fetcher.
    pub fn sequence(&self) -> &FetchSequence {
        &self.sequence
    }

    /// The underlying catalog client.
    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// Fetch a random track using entropy-seeded randomness.
    pub async fn fetch_random(&self) -> Result<LoadedTrack> {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::from_entropy();
        self.fetch_random_with(&mut rng).await
    }

    /// Fetch a random track with a caller-supplied RNG.
    ///
    /// Any failure in the sequence (network, server error, parse failure,
    /// empty catalog, missing audio format) retries the WHOLE sequence from
    /// the catalog call — a fresh random pick each attempt — with exponential
    /// backoff, up to `policy.max_attempts`.
    pub async fn fetch_random_with<R: Rng + Send>(&self, rng: &mut R) -> Result<LoadedTrack> {
        let ticket = self.sequence.issue();
        let max_attempts = self.policy.max_attempts.max(1);
        let mut backoff = self.policy.initial_backoff;
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.fetch_once(rng).await {
                Ok((track, stream)) => {
                    debug!(
                        video_id = %track.video_id,
                        title = %track.title,
                        attempt,
                        "Fetched random track"
                    );
                    return Ok(LoadedTrack {
                        track,
                        stream,
                        ticket,
                    });
                }
                Err(err) if attempt < max_attempts => {
                    warn!(
                        attempt,
                        max_attempts,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "Fetch failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * self.policy.multiplier).min(self.policy.max_backoff);
                }
                Err(err) => {
                    return Err(CatalogError::RetriesExhausted {
                        attempts: attempt,
                        source: Box::new(err),
                    });
                }
            }
        }
    }

    /// One pass of the sequence: catalog, random pick, stream resolve.
    async fn fetch_once<R: Rng + Send>(&self, rng: &mut R) -> Result<(Track, StreamMeta)> {
        let catalog = self.client.get_catalog().await?;

        let track = select_random_track(&catalog.tracks, rng)
            .ok_or(CatalogError::EmptyCatalog)?
            .clone();

        let playback = self.client.get_playback(&track.video_id).await?;
        let stream = StreamMeta::resolve(&playback)?;

        Ok((track, stream))
    }
}
