// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! | Marker | Description | Epoch (JD) |
//! |--------|-------------|------------|
//! | [`JD`] | Julian Date | 0.0 |
//! | [`TBJD`] | Transit-table Barycentric Julian Date | 2 455 000.0 |

use super::instant::{Time, TimeScale};
use qtty::Days;

/// Julian Date, the identity scale.
///
/// `to_jd(v) = v`, i.e. the quantity *is* a Julian Day number.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JD;

impl TimeScale for JD {
    const LABEL: &'static str = "Julian Day:";

    #[inline(always)]
    fn to_jd(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd(jd: Days) -> Days {
        jd
    }
}

/// Transit-table BJD: Barycentric Julian Date minus 2 455 000.
///
/// Transit catalogues store their `BJD` column relative to this epoch to
/// keep the numbers short; `Time<TBJD>::new(0.0)` is JD 2 455 000.0
/// (2009-06-17T12:00).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct TBJD;

/// The constant offset between JD and TBJD: `JD = TBJD + TBJD_EPOCH`.
pub const TBJD_EPOCH: Days = Days::new(2_455_000.0);

impl TimeScale for TBJD {
    const LABEL: &'static str = "BJD-2455000";

    #[inline(always)]
    fn to_jd(value: Days) -> Days {
        value + TBJD_EPOCH
    }

    #[inline(always)]
    fn from_jd(jd: Days) -> Days {
        jd - TBJD_EPOCH
    }
}

impl From<Time<JD>> for Time<TBJD> {
    #[inline]
    fn from(value: Time<JD>) -> Self {
        value.to::<TBJD>()
    }
}

impl From<Time<TBJD>> for Time<JD> {
    #[inline]
    fn from(value: Time<TBJD>) -> Self {
        value.to::<JD>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tbjd_epoch_is_offset_from_jd() {
        let origin = Time::<TBJD>::new(0.0);
        let jd: Time<JD> = origin.into();
        assert_eq!(jd.value(), 2_455_000.0);
    }

    #[test]
    fn jd_into_tbjd_subtracts_epoch() {
        let jd = Time::<JD>::new(2_460_000.25);
        let bjd: Time<TBJD> = jd.into();
        assert!((bjd.value() - 5_000.25).abs() < 1e-9);
    }

    #[test]
    fn jd_is_identity() {
        assert_eq!(JD::to_jd(Days::new(42.0)), Days::new(42.0));
        assert_eq!(JD::from_jd(Days::new(42.0)), Days::new(42.0));
    }
}
