/// Player configuration
use anyhow::{bail, Context, Result};
use bardo_catalog::FetchPolicy;
use bardo_transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub playback: PlaybackSettings,

    #[serde(default)]
    pub fetch: FetchSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_server_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchSettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_initial_volume() -> f32 {
    0.5
}

fn default_max_attempts() -> u32 {
    5
}

fn default_initial_backoff_ms() -> u64 {
    250
}

fn default_max_backoff_ms() -> u64 {
    8000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_server_url(),
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            initial_volume: default_initial_volume(),
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

impl PlayerConfig {
    /// Load configuration from a TOML file, or defaults when no path given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                let config: Self = toml::from_str(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.server.url.is_empty() {
            bail!("server.url must not be empty");
        }
        if !(0.0..=1.0).contains(&self.playback.initial_volume) {
            bail!(
                "playback.initial_volume must be within [0.0, 1.0], got {}",
                self.playback.initial_volume
            );
        }
        if self.fetch.max_attempts == 0 {
            bail!("fetch.max_attempts must be at least 1");
        }
        Ok(())
    }

    /// Retry policy derived from the fetch settings.
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            max_attempts: self.fetch.max_attempts,
            initial_backoff: Duration::from_millis(self.fetch.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.fetch.max_backoff_ms),
            ..FetchPolicy::default()
        }
    }

    /// Transport configuration derived from the playback settings.
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            initial_volume: self.playback.initial_volume,
            ..TransportConfig::default()
        }
    }
}
