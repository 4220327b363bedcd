// Player data sources: the prospect HTTP service and on-disk JSON fixtures.
//
// Both implement `PlayerSource`, which hands back loosely typed JSON plus a few
// decoded conveniences. Shape repair happens in fieldglass-core.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use fieldglass_core::columns::StatKind;
use fieldglass_core::comps::{comps_from_json, MlbComp};
use fieldglass_core::directory::{players_from_json, PlayerSummary};
use fieldglass_core::prediction::Prediction;
use fieldglass_core::season::{records_from_json, SeasonRecord};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid JSON from {origin}: {source}")]
    Decode {
        origin: String,
        source: serde_json::Error,
    },

    #[error("failed to read fixture {path}: {source}")]
    Fixture {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Per-player endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Bio,
    Stats(StatKind),
    Ratings,
    Prediction,
    Comps,
}

impl Section {
    /// Trailing path segment, e.g. `standard_batting`.
    pub fn path(&self) -> &'static str {
        match self {
            Section::Bio => "bio",
            Section::Stats(kind) => kind.section(),
            Section::Ratings => "ratings",
            Section::Prediction => "prediction",
            Section::Comps => "mlb_comps",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Players,
    Player(i64, Section),
}

impl Resource {
    /// Path relative to the service root.
    pub fn path(&self) -> String {
        match self {
            Resource::Players => "/players".to_string(),
            Resource::Player(id, section) => format!("/player/{id}/{}", section.path()),
        }
    }

    /// Fixture file name for this resource.
    pub fn fixture_name(&self) -> String {
        match self {
            Resource::Players => "players.json".to_string(),
            Resource::Player(id, section) => format!("player_{id}_{}.json", section.path()),
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerSource
// ---------------------------------------------------------------------------

#[async_trait]
pub trait PlayerSource: Send + Sync {
    /// Raw JSON for one resource.
    async fn fetch(&self, resource: Resource) -> Result<Value, SourceError>;

    async fn players(&self) -> Result<Vec<PlayerSummary>, SourceError> {
        Ok(players_from_json(self.fetch(Resource::Players).await?))
    }

    async fn bio(&self, player_id: i64) -> Result<PlayerSummary, SourceError> {
        let resource = Resource::Player(player_id, Section::Bio);
        let value = self.fetch(resource).await?;
        serde_json::from_value(value).map_err(|e| SourceError::Decode {
            origin: resource.path(),
            source: e,
        })
    }

    /// Non-array responses become an empty collection.
    async fn stats(&self, player_id: i64, kind: StatKind) -> Result<Vec<SeasonRecord>, SourceError> {
        let value = self
            .fetch(Resource::Player(player_id, Section::Stats(kind)))
            .await?;
        Ok(records_from_json(value))
    }

    /// The ratings response as delivered; reconcile with
    /// `fieldglass_core::reconcile_response`.
    async fn ratings(&self, player_id: i64) -> Result<Value, SourceError> {
        self.fetch(Resource::Player(player_id, Section::Ratings)).await
    }

    async fn prediction(&self, player_id: i64) -> Result<Prediction, SourceError> {
        let value = self
            .fetch(Resource::Player(player_id, Section::Prediction))
            .await?;
        Ok(Prediction::from(value))
    }

    async fn comps(&self, player_id: i64) -> Result<Vec<MlbComp>, SourceError> {
        let value = self.fetch(Resource::Player(player_id, Section::Comps)).await?;
        Ok(comps_from_json(value))
    }
}

// ---------------------------------------------------------------------------
// HttpSource
// ---------------------------------------------------------------------------

/// Reads from the prospect data service.
pub struct HttpSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SourceError::Client)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, resource: Resource) -> String {
        format!("{}{}", self.base_url, resource.path())
    }
}

#[async_trait]
impl PlayerSource for HttpSource {
    async fn fetch(&self, resource: Resource) -> Result<Value, SourceError> {
        let url = self.url(resource);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| SourceError::Transport {
            url: url.clone(),
            source: e,
        })?;
        serde_json::from_slice(&body).map_err(|e| SourceError::Decode {
            origin: url,
            source: e,
        })
    }
}

// ---------------------------------------------------------------------------
// FixtureSource
// ---------------------------------------------------------------------------

/// Reads `players.json` and `player_<id>_<section>.json` from a directory.
/// A missing file behaves like a failed request.
pub struct FixtureSource {
    dir: PathBuf,
}

impl FixtureSource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, resource: Resource) -> PathBuf {
        self.dir.join(resource.fixture_name())
    }
}

#[async_trait]
impl PlayerSource for FixtureSource {
    async fn fetch(&self, resource: Resource) -> Result<Value, SourceError> {
        let path = self.path_for(resource);
        debug!(path = %path.display(), "reading fixture");
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| SourceError::Fixture {
                path: path.clone(),
                source: e,
            })?;
        serde_json::from_slice(&bytes).map_err(|e| SourceError::Decode {
            origin: path.display().to_string(),
            source: e,
        })
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
