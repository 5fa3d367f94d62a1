// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Orbital phase of several bodies driven by one playhead.
//!
//! The playhead index is read as the fractional phase of a *reference* body.
//! Every other body is placed on the same time base by scaling the index with
//! its period ratio against the reference.
//!
//! **This is not orbital mechanics.**  [`OrbitPhase::orbit_position`] is a
//! sinusoidal easing of the phase into `[0, 1]` meant to drive visuals
//! (0.5 at phase 0 and ½, 1 at ¼, 0 at ¾).  No Keplerian anomaly, eccentricity
//! or inclination enters the computation.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use log::warn;
use qtty::Days;

use super::error::{EngineError, Result};

/// A named body with its orbital period.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalBody {
    pub name: String,
    pub period: Days,
}

impl OrbitalBody {
    pub fn new(name: impl Into<String>, period_days: f64) -> Self {
        Self {
            name: name.into(),
            period: Days::new(period_days),
        }
    }
}

/// Where one body sits for a given playhead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPhase {
    /// The body's orbital period.
    pub period: Days,
    /// Elapsed days into the current orbit, in `[0, period)`.
    pub day_in_orbit: Days,
    /// `(sin(2π · day_in_orbit / period) + 1) / 2`, in `[0, 1]`.
    pub orbit_position: f64,
}

impl OrbitPhase {
    fn at(elapsed: Days, period: Days) -> Self {
        let p = period.value();
        let elapsed = elapsed.value();
        // Overflowed elapsed times carry no phase; park them at the orbit start.
        let mut day = if elapsed.is_finite() {
            elapsed.rem_euclid(p)
        } else {
            0.0
        };
        // rem_euclid may round up to exactly `p`.
        if day >= p {
            day = 0.0;
        }
        let orbit_position = ((TAU * day / p).sin() + 1.0) / 2.0;
        Self {
            period,
            day_in_orbit: Days::new(day),
            orbit_position,
        }
    }

    /// Linear phase in `[0, 1)`.
    #[inline]
    pub fn phase_fraction(&self) -> f64 {
        self.day_in_orbit.value() / self.period.value()
    }
}

/// A fixed set of bodies sharing one reference body.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalSystem {
    bodies: Vec<OrbitalBody>,
    reference: usize,
}

impl OrbitalSystem {
    /// Build a system whose playhead follows the body called `reference`.
    ///
    /// # Errors
    ///
    /// [`EngineError::MissingData`] if there are no bodies, a name repeats,
    /// a period is not a positive finite number, or `reference` is not
    /// among the bodies.
    pub fn new(bodies: Vec<OrbitalBody>, reference: &str) -> Result<Self> {
        Self::validate(&bodies)?;
        let reference = bodies
            .iter()
            .position(|b| b.name == reference)
            .ok_or_else(|| EngineError::missing(format!("reference body '{reference}'")))?;
        Ok(Self { bodies, reference })
    }

    /// Build a system whose playhead follows its first body.
    pub fn with_first_as_reference(bodies: Vec<OrbitalBody>) -> Result<Self> {
        Self::validate(&bodies)?;
        Ok(Self {
            bodies,
            reference: 0,
        })
    }

    /// Like [`new`](Self::new), but falls back to the first body when
    /// `reference` is absent.
    pub fn with_preferred_reference(bodies: Vec<OrbitalBody>, reference: &str) -> Result<Self> {
        Self::validate(&bodies)?;
        let index = match bodies.iter().position(|b| b.name == reference) {
            Some(i) => i,
            None => {
                warn!(
                    "reference body '{reference}' not found, using '{}'",
                    bodies[0].name
                );
                0
            }
        };
        Ok(Self {
            bodies,
            reference: index,
        })
    }

    fn validate(bodies: &[OrbitalBody]) -> Result<()> {
        if bodies.is_empty() {
            return Err(EngineError::missing("no orbital bodies"));
        }
        for (i, body) in bodies.iter().enumerate() {
            let p = body.period.value();
            if !p.is_finite() || p <= 0.0 {
                return Err(EngineError::missing(format!(
                    "orbital period of '{}' must be positive, got {p}",
                    body.name
                )));
            }
            if bodies[..i].iter().any(|other| other.name == body.name) {
                return Err(EngineError::missing(format!(
                    "duplicate orbital body '{}'",
                    body.name
                )));
            }
        }
        Ok(())
    }

    pub fn bodies(&self) -> &[OrbitalBody] {
        &self.bodies
    }

    pub fn reference(&self) -> &OrbitalBody {
        &self.bodies[self.reference]
    }

    pub fn body(&self, name: &str) -> Option<&OrbitalBody> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Phase of every body for a playhead `index`.
    ///
    /// Each body gets `index_i = index · P_i / P_ref` and elapsed time
    /// `index_i · P_i`, folded into one orbit.  For the reference body this
    /// reduces to `index · P_ref`.
    pub fn generate_orbit_data(&self, index: f64) -> BTreeMap<String, OrbitPhase> {
        let p_ref = self.reference().period.value();
        self.bodies
            .iter()
            .map(|body| {
                let p = body.period.value();
                let body_index = index * (p / p_ref);
                let phase = OrbitPhase::at(Days::new(body_index * p), body.period);
                (body.name.clone(), phase)
            })
            .collect()
    }
}
