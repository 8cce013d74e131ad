//! Seed data used when no snapshot has been persisted yet.
//!
//! Two JSON documents ship inside the binary: the sheep records and the
//! category/stock pairs shown on the dashboard. Either can be swapped for a
//! local file or an HTTP URL. Each source is read once at startup; a failure is
//! reported to the caller and never retried.

use std::fmt;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{FeedStockLevel, Sheep};

const BUNDLED_SHEEP: &str = include_str!("../fixtures/sheep-data.json");
const BUNDLED_FEED: &str = include_str!("../fixtures/feed-data.json");

/// Fixture loading errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read fixture '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse fixture: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where a fixture document comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FixtureSource {
    /// The copy compiled into the binary.
    #[default]
    Bundled,
    Path(PathBuf),
    Url(String),
}

impl FixtureSource {
    /// Interpret a config or CLI value: `http(s)://` URLs are fetched, the
    /// literal `bundled` selects the built-in copy, anything else is a path.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else if value.is_empty() || value.eq_ignore_ascii_case("bundled") {
            Self::Bundled
        } else {
            Self::Path(PathBuf::from(value))
        }
    }

    async fn fetch_text(&self, bundled: &'static str) -> Result<String, FixtureError> {
        match self {
            Self::Bundled => Ok(bundled.to_string()),
            Self::Path(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| FixtureError::Read {
                        path: path.display().to_string(),
                        source,
                    })
            }
            Self::Url(url) => {
                let text = reqwest::get(url)
                    .await?
                    .error_for_status()?
                    .text()
                    .await?;
                Ok(text)
            }
        }
    }

    async fn load<T: DeserializeOwned>(&self, bundled: &'static str) -> Result<T, FixtureError> {
        let text = self.fetch_text(bundled).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl fmt::Display for FixtureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled => write!(f, "bundled"),
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// The pair of fixture sources the service starts from.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub sheep: FixtureSource,
    pub feed: FixtureSource,
}

impl Fixtures {
    pub fn bundled() -> Self {
        Self::default()
    }

    pub async fn load_sheep(&self) -> Result<Vec<Sheep>, FixtureError> {
        tracing::debug!("Loading sheep fixture from {}", self.sheep);
        self.sheep.load(BUNDLED_SHEEP).await
    }

    pub async fn load_feed_stock(&self) -> Result<Vec<FeedStockLevel>, FixtureError> {
        tracing::debug!("Loading feed fixture from {}", self.feed);
        self.feed.load(BUNDLED_FEED).await
    }
}
