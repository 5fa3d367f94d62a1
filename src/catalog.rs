// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Exoplanet catalog documents.
//!
//! The catalog is a JSON object keyed by star-system name.  Each system
//! carries a `Planets` map and one or more transit series:
//!
//! ```json
//! {
//!   "Kepler-47": {
//!     "Planets": { "Kepler-47 b": { "orbital_period_days": 49.514 } },
//!     "Maar_World": { "transits": [ { "BJD": 0.0, "Normalized_b": 0.1, ... } ] }
//!   }
//! }
//! ```
//!
//! A `transits` array placed directly on the system object is exposed as a
//! series named after the system.  Nested data is decoded on access, so a
//! malformed series only fails the query that touches it.

use std::collections::BTreeMap;
use std::io::Read;

use log::info;
use serde_json::{Map, Value};

use super::error::{EngineError, Result};
use super::orbit::{OrbitalBody, OrbitalSystem};
use super::transit::TransitTable;

const PLANETS_KEY: &str = "Planets";
const TRANSITS_KEY: &str = "transits";
const PERIOD_KEY: &str = "orbital_period_days";

/// One star system as found in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct StarSystem {
    name: String,
    planets: Map<String, Value>,
    series: BTreeMap<String, Value>,
}

impl StarSystem {
    fn from_object(name: &str, object: Map<String, Value>) -> Self {
        let mut planets = Map::new();
        let mut series = BTreeMap::new();

        for (key, value) in object {
            if key == PLANETS_KEY {
                if let Value::Object(map) = value {
                    planets = map;
                }
            } else if key == TRANSITS_KEY {
                series.insert(name.to_string(), value);
            } else if let Some(transits) = value.get(TRANSITS_KEY) {
                series.insert(key, transits.clone());
            }
        }

        Self {
            name: name.to_string(),
            planets,
            series,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn series_names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Catalog planet keys with the `"<system> "` prefix removed.
    pub fn planet_names(&self) -> impl Iterator<Item = &str> {
        self.planets.keys().map(|key| self.short_name(key))
    }

    fn short_name<'a>(&self, key: &'a str) -> &'a str {
        key.strip_prefix(self.name.as_str())
            .and_then(|rest| rest.strip_prefix(' '))
            .filter(|rest| !rest.is_empty())
            .unwrap_or(key)
    }

    /// Decode and validate one transit series.
    pub fn transit_table(&self, series: &str) -> Result<TransitTable> {
        let raw = self
            .series
            .get(series)
            .ok_or_else(|| EngineError::missing(format!("{}/{series}/transits", self.name)))?;
        serde_json::from_value(raw.clone()).map_err(|e| {
            EngineError::missing(format!("{}/{series}/transits: {e}", self.name))
        })
    }

    /// Every planet with its orbital period, in catalog key order.
    pub fn bodies(&self) -> Result<Vec<OrbitalBody>> {
        self.planets
            .iter()
            .map(|(key, planet)| {
                let period = planet.get(PERIOD_KEY).and_then(Value::as_f64).ok_or_else(|| {
                    EngineError::missing(format!(
                        "{}/{PLANETS_KEY}/{key}/{PERIOD_KEY}",
                        self.name
                    ))
                })?;
                Ok(OrbitalBody::new(self.short_name(key), period))
            })
            .collect()
    }

    /// The planets as an [`OrbitalSystem`] following `reference`, or the
    /// first planet if `reference` is not present.
    pub fn orbital_system(&self, reference: &str) -> Result<OrbitalSystem> {
        if self.planets.is_empty() {
            return Err(EngineError::missing(format!(
                "{}/{PLANETS_KEY}",
                self.name
            )));
        }
        OrbitalSystem::with_preferred_reference(self.bodies()?, reference)
    }
}

/// A parsed catalog document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExoCatalog {
    systems: BTreeMap<String, StarSystem>,
}

impl ExoCatalog {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_value(serde_json::from_reader(reader)?)
    }

    /// Build from an already decoded document.  Non-object entries at the
    /// top level are ignored.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(root) = value else {
            return Err(EngineError::missing("catalog root is not an object"));
        };

        let systems: BTreeMap<String, StarSystem> = root
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::Object(object) => {
                    let system = StarSystem::from_object(&name, object);
                    Some((name, system))
                }
                _ => None,
            })
            .collect();

        info!("Loaded exoplanet catalog with {} systems", systems.len());
        Ok(Self { systems })
    }

    pub fn system_names(&self) -> impl Iterator<Item = &str> {
        self.systems.keys().map(String::as_str)
    }

    pub fn system(&self, name: &str) -> Result<&StarSystem> {
        self.systems
            .get(name)
            .ok_or_else(|| EngineError::missing(format!("star system '{name}'")))
    }

    pub fn transit_table(&self, system: &str, series: &str) -> Result<TransitTable> {
        self.system(system)?.transit_table(series)
    }

    pub fn orbital_system(&self, system: &str, reference: &str) -> Result<OrbitalSystem> {
        self.system(system)?.orbital_system(reference)
    }
}
