//! Service configuration.
//!
//! Values are layered: built-in defaults, then `<config_dir>/flockbook/config.json`,
//! then `FLOCKBOOK_*` environment variables, then command-line flags (applied
//! by `main`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::fixtures::{FixtureSource, Fixtures};

const APP_NAME: &str = "flockbook";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind: String,
    pub port: u16,
    /// Directory holding `flockbook.db`. Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,
    /// Path, URL or `bundled`.
    pub sheep_fixture: Option<String>,
    /// Path, URL or `bundled`.
    pub feed_fixture: Option<String>,
    /// Allowed CORS origins. Any origin is allowed when unset.
    pub cors_origins: Option<Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
            data_dir: None,
            sheep_fixture: None,
            feed_fixture: None,
            cors_origins: None,
        }
    }
}

impl AppConfig {
    /// Load the config file and apply environment overrides.
    /// Falls back to defaults if the file is missing or fails to parse.
    pub fn load() -> Self {
        let config = match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    fn try_load() -> Result<Self> {
        let config_path = get_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Apply `FLOCKBOOK_*` overrides read through `lookup`.
    ///
    /// Unparsable values are ignored with a warning.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = lookup("FLOCKBOOK_BIND") {
            self.bind = bind;
        }
        if let Some(port) = lookup("FLOCKBOOK_PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Ignoring invalid FLOCKBOOK_PORT: {}", port),
            }
        }
        if let Some(dir) = lookup("FLOCKBOOK_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(source) = lookup("FLOCKBOOK_SHEEP_FIXTURE") {
            self.sheep_fixture = Some(source);
        }
        if let Some(source) = lookup("FLOCKBOOK_FEED_FIXTURE") {
            self.feed_fixture = Some(source);
        }
        if let Some(origins) = lookup("FLOCKBOOK_CORS_ORIGINS") {
            self.cors_origins = Some(origins.split(',').map(|s| s.trim().to_string()).collect());
        }
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    pub fn fixtures(&self) -> Fixtures {
        let source = |value: &Option<String>| {
            value
                .as_deref()
                .map(FixtureSource::parse)
                .unwrap_or_default()
        };
        Fixtures {
            sheep: source(&self.sheep_fixture),
            feed: source(&self.feed_fixture),
        }
    }

    pub fn cors_layer(&self) -> CorsLayer {
        match &self.cors_origins {
            Some(origins) => {
                let origins: Vec<HeaderValue> = origins
                    .iter()
                    .filter_map(|o| match o.parse() {
                        Ok(value) => Some(value),
                        Err(_) => {
                            tracing::warn!("Ignoring invalid CORS origin: {}", o);
                            None
                        }
                    })
                    .collect();
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
            None => CorsLayer::permissive(),
        }
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
