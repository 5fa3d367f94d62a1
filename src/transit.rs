// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Transit tables and playhead interpolation.
//!
//! A [`TransitTable`] is an ordered run of observed transits.  The playback
//! clock addresses it with a *normalized index* in `[0, 1]`: `0` is the first
//! transit, `1` the last, and anything in between is a linear blend of the
//! two neighbouring records.
//!
//! # Epoch handling
//!
//! Stored `BJD` values live on the [`TBJD`] axis (`JD − 2 455 000`).  The
//! calendar date attached to an interpolated result is computed from the
//! epoch-shifted Julian Date, but the date attached to an exact grid hit
//! (index landing on a record, or clamped to either end) is computed from
//! the stored number read directly as a Julian Date.  Downstream consumers
//! key on both behaviours, so [`InterpolatedTransit::interpolated_bjd`]
//! always reports the Julian Date that was actually formatted.

use log::debug;
use qtty::Hours;

use super::calendar::julian_to_date;
use super::error::{EngineError, Result, TableBound};
use super::instant::Time;
use super::interp::{interpolate, normalize_index};
use super::scales::{JD, TBJD};
use super::{JulianDate, TransitBJD};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One observed transit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransitRecord {
    /// Mid-transit time on the table-relative BJD axis.
    #[cfg_attr(feature = "serde", serde(rename = "BJD"))]
    pub bjd: TransitBJD,
    #[cfg_attr(feature = "serde", serde(rename = "Normalized_b"))]
    pub normalized_b: f64,
    #[cfg_attr(feature = "serde", serde(rename = "Normalized_Duration_hrs"))]
    pub normalized_duration_hrs: f64,
    /// Impact parameter.
    pub b: f64,
    #[cfg_attr(feature = "serde", serde(rename = "Duration_hrs"))]
    pub duration_hrs: f64,
    #[cfg_attr(feature = "serde", serde(rename = "Normalized_BJD"))]
    pub normalized_bjd: f64,
}

impl TransitRecord {
    /// Transit duration as a typed quantity.
    #[inline]
    pub fn duration(&self) -> Hours {
        Hours::new(self.duration_hrs)
    }

    /// Field-wise linear blend; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            bjd: self.bjd.lerp(other.bjd, t),
            normalized_b: interpolate(self.normalized_b, other.normalized_b, t),
            normalized_duration_hrs: interpolate(
                self.normalized_duration_hrs,
                other.normalized_duration_hrs,
                t,
            ),
            b: interpolate(self.b, other.b, t),
            duration_hrs: interpolate(self.duration_hrs, other.duration_hrs, t),
            normalized_bjd: interpolate(self.normalized_bjd, other.normalized_bjd, t),
        }
    }
}

/// Result of sampling a [`TransitTable`] at a normalized index.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedTransit {
    /// Blended record, or a verbatim copy when `exact` is set.
    pub record: TransitRecord,
    /// The Julian Date that `exact_transit_date` was formatted from.
    pub interpolated_bjd: JulianDate,
    /// `DD-MM-YYYY`.
    pub exact_transit_date: String,
    /// `true` when the index landed on a record (or was clamped onto one)
    /// and no blending took place.
    pub exact: bool,
}

/// Ordered, validated sequence of transits (at least two, non-decreasing BJD).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<TransitRecord>", into = "Vec<TransitRecord>")
)]
pub struct TransitTable {
    records: Vec<TransitRecord>,
}

impl TransitTable {
    /// Validate and wrap a transit sequence.
    ///
    /// # Errors
    ///
    /// * [`EngineError::MissingData`] for fewer than two records.
    /// * [`EngineError::NonFiniteDate`] if any `BJD` is NaN or infinite.
    /// * [`EngineError::UnorderedTable`] if `BJD` ever decreases.
    pub fn new(records: Vec<TransitRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(EngineError::missing("transit table is empty"));
        }
        if records.len() < 2 {
            return Err(EngineError::missing(
                "transit table needs at least two records",
            ));
        }
        if let Some(bad) = records.iter().find(|r| !r.bjd.is_finite()) {
            return Err(EngineError::NonFiniteDate(bad.bjd.value()));
        }
        if let Some(i) = records.windows(2).position(|w| w[1].bjd < w[0].bjd) {
            return Err(EngineError::UnorderedTable { index: i + 1 });
        }
        Ok(Self { records })
    }

    #[inline]
    pub fn records(&self) -> &[TransitRecord] {
        &self.records
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; construction rejects empty tables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<&TransitRecord> {
        self.records.get(i)
    }

    #[inline]
    fn last_index(&self) -> usize {
        self.records.len() - 1
    }

    /// Sample the table at a normalized index.
    ///
    /// `index` is clamped into `[0, 1]` (NaN reads as `0`), then mapped onto
    /// `pos = index · (N − 1)`.  Integral positions return the record
    /// verbatim; anything else blends the two neighbours.  See the module
    /// docs for how the calendar date is derived in each case.
    pub fn interpolate_transit(&self, index: f64) -> Result<InterpolatedTransit> {
        let last = self.last_index();
        let pos = normalize_index(index * last as f64, last as f64);
        let lower = pos.floor() as usize;
        let upper = pos.ceil() as usize;

        if lower == upper || upper > last {
            let record = self.records[lower.min(last)];
            // Stored value read as an absolute JD, no epoch shift.
            let jd = JulianDate::new(record.bjd.value());
            return Self::dated(record, jd, true);
        }

        let t = pos - lower as f64;
        let record = self.records[lower].lerp(&self.records[upper], t);
        let jd = record.bjd.to::<JD>();
        Self::dated(record, jd, false)
    }

    fn dated(record: TransitRecord, jd: JulianDate, exact: bool) -> Result<InterpolatedTransit> {
        let exact_transit_date =
            julian_to_date(jd.value()).ok_or(EngineError::NonFiniteDate(jd.value()))?;
        Ok(InterpolatedTransit {
            record,
            interpolated_bjd: jd,
            exact_transit_date,
            exact,
        })
    }

    /// Fractional table position of `bjd`.
    ///
    /// Scans for the last transit strictly before `bjd` and the first at or
    /// after it, then interpolates between the two.  The result is an
    /// un-normalized position in `[0, N − 1]`.
    ///
    /// # Errors
    ///
    /// [`EngineError::DegenerateRange`] when both neighbours are the same
    /// record, i.e. `bjd` is at or before the first transit
    /// ([`TableBound::Start`]) or after the last one ([`TableBound::End`]).
    pub fn locate(&self, bjd: TransitBJD) -> Result<f64> {
        self.bracket(bjd)
            .map_err(|bound| EngineError::DegenerateRange { bound })
    }

    fn bracket(&self, bjd: TransitBJD) -> std::result::Result<f64, TableBound> {
        let last = self.last_index();
        let mut past = 0;
        let mut future = last;
        for (i, record) in self.records.iter().enumerate() {
            if record.bjd < bjd {
                past = i;
            } else {
                future = i;
                break;
            }
        }

        if past == future {
            return Err(if future == 0 {
                TableBound::Start
            } else {
                TableBound::End
            });
        }

        let past_bjd = self.records[past].bjd;
        let future_bjd = self.records[future].bjd;
        let t = (bjd - past_bjd).value() / (future_bjd - past_bjd).value();
        Ok(past as f64 + t)
    }

    /// Normalized index of an instant, clamped into `[0, 1]`.
    ///
    /// Instants at or before the first transit map to `0`, instants after
    /// the last one map to `1`.
    pub fn index_at(&self, bjd: TransitBJD) -> f64 {
        match self.bracket(bjd) {
            Ok(raw) => normalize_index(raw / self.last_index() as f64, 1.0),
            Err(bound) => {
                debug!("{bjd} is outside the transit table, clamping to its {bound}");
                match bound {
                    TableBound::Start => 0.0,
                    TableBound::End => 1.0,
                }
            }
        }
    }

    /// Normalized index for a calendar day (taken at 0h).
    pub fn today_index(&self, today: chrono::NaiveDate) -> f64 {
        let today_bjd: Time<TBJD> = JulianDate::from_date(today).to::<TBJD>();
        self.index_at(today_bjd)
    }
}

impl TryFrom<Vec<TransitRecord>> for TransitTable {
    type Error = EngineError;

    fn try_from(records: Vec<TransitRecord>) -> Result<Self> {
        Self::new(records)
    }
}

impl From<TransitTable> for Vec<TransitRecord> {
    fn from(table: TransitTable) -> Self {
        table.records
    }
}
