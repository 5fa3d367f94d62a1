// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Exoplanet playback clock.
//!
//! This crate turns a single *normalized index* in `[0, 1]` (the playhead)
//! into everything an audiovisual exoplanet player draws: a transit sampled
//! from an observed transit table, and the orbital phase of every body in the
//! system.  It also maps calendar days onto that playhead so a player can
//! start "today".
//!
//! # Core types
//!
//! - [`Time<S>`]: instant parameterised by a [`TimeScale`] marker.
//! - [`JulianDate`]: alias for `Time<JD>`.
//! - [`TransitBJD`]: alias for `Time<TBJD>`, the table-relative BJD axis.
//! - [`CalendarDate`]: day/month/year produced from a Julian Date.
//! - [`TransitTable`]: validated, ordered transit records.
//! - [`OrbitalSystem`]: bodies with orbital periods and a reference body.
//! - [`TrackContext`]: caller-owned loaded track with an expiry window.
//!
//! # Quick example
//!
//! ```
//! use exoclock::{OrbitalBody, OrbitalSystem, TransitBJD, TransitRecord, TransitTable};
//!
//! let record = |bjd: f64| TransitRecord {
//!     bjd: TransitBJD::new(bjd),
//!     normalized_b: 0.0,
//!     normalized_duration_hrs: 0.0,
//!     b: 0.3,
//!     duration_hrs: 4.5,
//!     normalized_bjd: 0.0,
//! };
//! let table = TransitTable::new(vec![record(0.0), record(10.0), record(20.0)]).unwrap();
//!
//! let transit = table.interpolate_transit(0.25).unwrap();
//! assert_eq!(transit.exact_transit_date, "22-06-2009");
//!
//! let orbits = OrbitalSystem::new(
//!     vec![OrbitalBody::new("b", 49.5), OrbitalBody::new("c", 303.2)],
//!     "b",
//! )
//! .unwrap();
//! let phases = orbits.generate_orbit_data(0.25);
//! assert!((phases["b"].orbit_position - 1.0).abs() < 1e-12);
//! ```
//!
//! # Features
//!
//! - `serde` *(default)*: serde impls, JSON catalog parsing
//!   ([`ExoCatalog`]) and TOML configuration.

mod calendar;
#[cfg(feature = "serde")]
mod catalog;
mod config;
mod context;
mod error;
pub(crate) mod instant;
mod interp;
mod orbit;
pub(crate) mod scales;
mod transit;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{gregorian_to_julian, julian_to_date, CalendarDate};
#[cfg(feature = "serde")]
pub use catalog::{ExoCatalog, StarSystem};
pub use config::EngineConfig;
pub use context::{Frame, Playhead, TrackContext};
pub use error::{EngineError, Result, TableBound};
pub use instant::{Time, TimeScale};
pub use interp::{interpolate, normalize_index};
pub use orbit::{OrbitPhase, OrbitalBody, OrbitalSystem};
pub use scales::{JD, TBJD, TBJD_EPOCH};
pub use transit::{InterpolatedTransit, TransitRecord, TransitTable};

// ── Type aliases ──────────────────────────────────────────────────────────

/// Julian Date: continuous count of days since the Julian Period.
pub type JulianDate = Time<JD>;

/// Barycentric Julian Date relative to JD 2 455 000, as stored in transit
/// tables.
pub type TransitBJD = Time<TBJD>;
