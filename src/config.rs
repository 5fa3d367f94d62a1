// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Engine configuration.
//!
//! Selects which star system, transit series and reference body a
//! [`TrackContext`](crate::TrackContext) resolves from a catalog, and how long
//! a loaded track stays fresh.  With the `serde` feature the configuration can
//! be read from TOML:
//!
//! ```toml
//! system = "Kepler-47"
//! transit_series = "Maar_World"
//! reference_body = "b"
//! cache_ttl_secs = 86400
//! ```
//!
//! Every key is optional and falls back to [`EngineConfig::default`].

use chrono::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use std::path::Path;

#[cfg(feature = "serde")]
use super::error::{EngineError, Result};

pub const DEFAULT_SYSTEM: &str = "Kepler-47";
pub const DEFAULT_TRANSIT_SERIES: &str = "Maar_World";
pub const DEFAULT_REFERENCE_BODY: &str = "b";
/// One day.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    #[cfg_attr(feature = "serde", serde(default = "default_system"))]
    pub system: String,
    #[cfg_attr(feature = "serde", serde(default = "default_transit_series"))]
    pub transit_series: String,
    #[cfg_attr(feature = "serde", serde(default = "default_reference_body"))]
    pub reference_body: String,
    #[cfg_attr(feature = "serde", serde(default = "default_cache_ttl_secs"))]
    pub cache_ttl_secs: u64,
}

fn default_system() -> String {
    DEFAULT_SYSTEM.to_string()
}

fn default_transit_series() -> String {
    DEFAULT_TRANSIT_SERIES.to_string()
}

fn default_reference_body() -> String {
    DEFAULT_REFERENCE_BODY.to_string()
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            system: default_system(),
            transit_series: default_transit_series(),
            reference_body: default_reference_body(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl EngineConfig {
    /// How long a loaded track stays valid.
    pub fn cache_ttl(&self) -> Duration {
        let secs = i64::try_from(self.cache_ttl_secs).unwrap_or(i64::MAX);
        Duration::try_seconds(secs).unwrap_or(Duration::MAX)
    }
}

#[cfg(feature = "serde")]
impl EngineConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        toml::from_str(toml)
            .map_err(|e| EngineError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            EngineError::Config(format!("Failed to read config file: {}", e))
        })?;
        Self::from_toml_str(&content)
    }
}
