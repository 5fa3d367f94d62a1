// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Caller-owned track state.
//!
//! A [`TrackContext`] bundles everything the playback clock needs for one
//! track: the resolved transit table, the orbital system, and the time
//! window during which that data is considered fresh.  Callers keep it
//! wherever their frame loop lives and pass it down; nothing in this crate
//! holds track data globally.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use log::debug;

use super::config::EngineConfig;
use super::error::Result;
use super::interp::normalize_index;
use super::orbit::{OrbitPhase, OrbitalSystem};
use super::transit::{InterpolatedTransit, TransitTable};

#[cfg(feature = "serde")]
use super::catalog::ExoCatalog;

/// Loaded data for one track plus its freshness window.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackContext {
    game: String,
    transits: TransitTable,
    orbits: OrbitalSystem,
    ttl: chrono::Duration,
    loaded_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl TrackContext {
    pub fn new(
        game: impl Into<String>,
        transits: TransitTable,
        orbits: OrbitalSystem,
        ttl: chrono::Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            game: game.into(),
            transits,
            orbits,
            ttl,
            loaded_at: now,
            expires_at: expiry(now, ttl),
        }
    }

    /// Resolve the configured system, series and reference body from a
    /// catalog.
    #[cfg(feature = "serde")]
    pub fn from_catalog(
        config: &EngineConfig,
        game: impl Into<String>,
        catalog: &ExoCatalog,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let game = game.into();
        let system = catalog.system(&config.system)?;
        let transits = system.transit_table(&config.transit_series)?;
        let orbits = system.orbital_system(&config.reference_body)?;
        log::info!(
            "Track '{game}' loaded: {} transits, {} bodies",
            transits.len(),
            orbits.bodies().len()
        );
        Ok(Self::new(game, transits, orbits, config.cache_ttl(), now))
    }

    /// Build from explicit data using the configured TTL.
    pub fn with_config(
        config: &EngineConfig,
        game: impl Into<String>,
        transits: TransitTable,
        orbits: OrbitalSystem,
        now: DateTime<Utc>,
    ) -> Self {
        Self::new(game, transits, orbits, config.cache_ttl(), now)
    }

    pub fn game(&self) -> &str {
        &self.game
    }

    pub fn transits(&self) -> &TransitTable {
        &self.transits
    }

    pub fn orbits(&self) -> &OrbitalSystem {
        &self.orbits
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Reload the track through `load` once it has expired.
    ///
    /// Returns `Ok(true)` when a reload happened.  If `load` fails the
    /// current data is kept untouched and the error is returned, so the
    /// caller can keep rendering the last known state.
    pub fn refresh_if_expired<F>(&mut self, now: DateTime<Utc>, load: F) -> Result<bool>
    where
        F: FnOnce(&str) -> Result<(TransitTable, OrbitalSystem)>,
    {
        if !self.is_expired(now) {
            return Ok(false);
        }
        debug!("Track '{}' expired at {}, reloading", self.game, self.expires_at);
        let (transits, orbits) = load(&self.game)?;
        self.transits = transits;
        self.orbits = orbits;
        self.loaded_at = now;
        self.expires_at = expiry(now, self.ttl);
        Ok(true)
    }

    /// Playhead for the calendar day of `now` in its own time zone.
    pub fn today_index<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> f64 {
        self.transits.today_index(now.date_naive())
    }

    /// A playhead positioned at `index` (clamped into `[0, 1]`).
    pub fn playhead(&self, index: f64) -> Playhead<'_> {
        Playhead {
            context: self,
            index: normalize_index(index, 1.0),
        }
    }
}

fn expiry(now: DateTime<Utc>, ttl: chrono::Duration) -> DateTime<Utc> {
    now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Everything a renderer needs for one update tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: f64,
    pub transit: InterpolatedTransit,
    pub orbits: BTreeMap<String, OrbitPhase>,
}

/// A normalized position over a [`TrackContext`].
#[derive(Debug, Clone, Copy)]
pub struct Playhead<'a> {
    context: &'a TrackContext,
    index: f64,
}

impl Playhead<'_> {
    pub fn index(&self) -> f64 {
        self.index
    }

    /// Move to `index`, clamped into `[0, 1]`.
    pub fn seek(&mut self, index: f64) {
        self.index = normalize_index(index, 1.0);
    }

    /// Sample transit and orbit data at the current index.
    pub fn frame(&self) -> Result<Frame> {
        Ok(Frame {
            index: self.index,
            transit: self.context.transits.interpolate_transit(self.index)?,
            orbits: self.context.orbits.generate_orbit_data(self.index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::orbit::OrbitalBody;
    use crate::transit::TransitRecord;
    use crate::TransitBJD;
    use chrono::{Duration, FixedOffset, NaiveDate};

    fn record(bjd: f64) -> TransitRecord {
        TransitRecord {
            bjd: TransitBJD::new(bjd),
            normalized_b: 0.0,
            normalized_duration_hrs: 0.0,
            b: 0.0,
            duration_hrs: 0.0,
            normalized_bjd: bjd / 20.0,
        }
    }

    fn context(now: DateTime<Utc>) -> TrackContext {
        let transits = TransitTable::new(vec![record(0.5), record(10.5), record(20.5)]).unwrap();
        let orbits = OrbitalSystem::with_first_as_reference(vec![
            OrbitalBody::new("b", 10.0),
            OrbitalBody::new("c", 20.0),
        ])
        .unwrap();
        TrackContext::new("maar", transits, orbits, Duration::hours(1), now)
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2009, 6, 23, 12, 0, 0).unwrap()
    }

    #[test]
    fn expires_after_ttl() {
        let ctx = context(t0());
        assert_eq!(ctx.expires_at(), t0() + Duration::hours(1));
        assert!(!ctx.is_expired(t0() + Duration::minutes(59)));
        assert!(ctx.is_expired(t0() + Duration::hours(1)));
    }

    #[test]
    fn config_sets_expiry_window() {
        let config = EngineConfig {
            cache_ttl_secs: 600,
            ..EngineConfig::default()
        };
        let fresh = context(t0());
        let ctx = TrackContext::with_config(
            &config,
            "maar",
            fresh.transits().clone(),
            fresh.orbits().clone(),
            t0(),
        );
        assert_eq!(ctx.game(), "maar");
        assert_eq!(ctx.expires_at(), t0() + Duration::minutes(10));
    }

    #[test]
    fn refresh_only_when_expired() {
        let mut ctx = context(t0());
        let reloaded = ctx
            .refresh_if_expired(t0(), |_| panic!("must not reload a fresh track"))
            .unwrap();
        assert!(!reloaded);

        let later = t0() + Duration::hours(2);
        let reloaded = ctx
            .refresh_if_expired(later, |game| {
                assert_eq!(game, "maar");
                let transits = TransitTable::new(vec![record(1.0), record(2.0)])?;
                let orbits =
                    OrbitalSystem::with_first_as_reference(vec![OrbitalBody::new("b", 3.0)])?;
                Ok((transits, orbits))
            })
            .unwrap();
        assert!(reloaded);
        assert_eq!(ctx.transits().len(), 2);
        assert_eq!(ctx.loaded_at(), later);
        assert!(!ctx.is_expired(later));
    }

    #[test]
    fn failed_refresh_keeps_last_known_data() {
        let mut ctx = context(t0());
        let later = t0() + Duration::hours(2);
        let err = ctx
            .refresh_if_expired(later, |_| Err(EngineError::missing("offline")))
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingData(_)));
        assert_eq!(ctx.transits().len(), 3);
        assert!(ctx.is_expired(later));
    }

    #[test]
    fn today_index_uses_local_calendar_day() {
        let ctx = context(t0());
        assert!((ctx.today_index(&t0()) - 0.25).abs() < 1e-12);

        // 2009-06-22T23:00Z is already the 23rd at UTC+2.
        let utc = Utc.with_ymd_and_hms(2009, 6, 22, 23, 0, 0).unwrap();
        let east = utc.with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(east.date_naive(), NaiveDate::from_ymd_opt(2009, 6, 23).unwrap());
        assert!((ctx.today_index(&east) - 0.25).abs() < 1e-12);
        assert!((ctx.today_index(&utc) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn playhead_frame_shares_one_index() {
        let ctx = context(t0());
        let mut head = ctx.playhead(2.0);
        assert_eq!(head.index(), 1.0);

        head.seek(0.25);
        let frame = head.frame().unwrap();
        assert_eq!(frame.index, 0.25);
        assert_eq!(frame.transit.record.bjd.value(), 5.5);
        assert!((frame.orbits["b"].day_in_orbit.value() - 2.5).abs() < 1e-12);
        assert_eq!(frame.orbits.len(), 2);
    }
}
