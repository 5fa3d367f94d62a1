// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar ↔ Julian Date conversion.
//!
//! Both directions follow Meeus, *Astronomical Algorithms* (2nd ed.), ch. 7.
//! The forward direction is the proleptic Gregorian formula for every input;
//! the inverse switches to the Julian calendar for Julian Days before the
//! 1582-10-15 reform, so the pair only round-trips for reformed dates.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use super::instant::Time;
use super::scales::JD;
use super::JulianDate;

/// First Julian Day number (`Z`) handled with the Gregorian correction.
const GREGORIAN_CUTOVER: f64 = 2_299_161.0;

/// Julian Date at 0h of a proleptic Gregorian calendar day.
///
/// Any integer triple is accepted; months outside `1..=12` and days outside
/// the month simply run on into neighbouring dates.
///
/// ```
/// use exoclock::gregorian_to_julian;
///
/// assert_eq!(gregorian_to_julian(2000, 1, 1).value(), 2_451_544.5);
/// ```
pub fn gregorian_to_julian(year: i32, month: i32, day: i32) -> JulianDate {
    let (y, m) = if month <= 2 {
        (f64::from(year) - 1.0, f64::from(month) + 12.0)
    } else {
        (f64::from(year), f64::from(month))
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    JulianDate::new(
        (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + f64::from(day) + b
            - 1524.5,
    )
}

/// Format a Julian Date as `DD-MM-YYYY`.
///
/// Returns `None` for NaN or infinite input.
///
/// ```
/// use exoclock::julian_to_date;
///
/// assert_eq!(julian_to_date(2_460_374.5).as_deref(), Some("05-03-2024"));
/// ```
pub fn julian_to_date(julian: f64) -> Option<String> {
    CalendarDate::from_julian_day(JulianDate::new(julian)).map(|date| date.to_string())
}

/// A calendar day as produced by the inverse Julian Date conversion.
///
/// The fractional part of the day is dropped; `Display` renders
/// `DD-MM-YYYY` with zero-padded day and month and an unpadded year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Calendar day containing `jd`.
    ///
    /// Julian Days before the Gregorian reform are read on the Julian
    /// calendar.
    pub fn from_julian_day(jd: JulianDate) -> Option<Self> {
        if !jd.is_finite() {
            return None;
        }

        let shifted = jd.value() + 0.5;
        let z = shifted.floor();
        let f = shifted - z;

        let mut a = z;
        if z >= GREGORIAN_CUTOVER {
            let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
            a += 1.0 + alpha - (alpha / 4.0).floor();
        }

        let b = a + 1524.0;
        let c = ((b - 122.1) / 365.25).floor();
        let d = (365.25 * c).floor();
        let e = ((b - d) / 30.6001).floor();

        let day = b - d - (30.6001 * e).floor() + f;
        let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
        let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

        Some(Self {
            year: year as i32,
            month: month as u32,
            day: day.floor() as u32,
        })
    }

    /// Julian Date at 0h of this day.
    pub fn to_julian_day(&self) -> JulianDate {
        gregorian_to_julian(self.year, self.month as i32, self.day as i32)
    }

    /// The same day as a chrono date, if chrono can represent it.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{}", self.day, self.month, self.year)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl Time<JD> {
    /// Julian Date at 0h of a chrono calendar date.
    #[inline]
    pub fn from_date(date: NaiveDate) -> Self {
        gregorian_to_julian(date.year(), date.month() as i32, date.day() as i32)
    }

    /// Calendar day containing this instant.
    #[inline]
    pub fn calendar_date(&self) -> Option<CalendarDate> {
        CalendarDate::from_julian_day(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn j2000_midnight() {
        assert_eq!(gregorian_to_julian(2000, 1, 1).value(), 2_451_544.5);
        assert_eq!(julian_to_date(2_451_545.0).as_deref(), Some("01-01-2000"));
    }

    #[test]
    fn january_and_february_roll_into_previous_year() {
        assert_eq!(gregorian_to_julian(1999, 12, 31).value(), 2_451_543.5);
        assert_eq!(gregorian_to_julian(2000, 2, 29).value(), 2_451_603.5);
        assert_eq!(gregorian_to_julian(1900, 3, 1).value(), 2_415_079.5);
    }

    #[test]
    fn reform_day_switches_calendar() {
        assert_eq!(gregorian_to_julian(1582, 10, 15).value(), 2_299_160.5);
        assert_eq!(julian_to_date(2_299_160.5).as_deref(), Some("15-10-1582"));
    }

    #[test]
    fn table_epoch_dates() {
        assert_eq!(julian_to_date(2_455_000.0).as_deref(), Some("17-06-2009"));
        assert_eq!(julian_to_date(2_455_000.5).as_deref(), Some("18-06-2009"));
        assert_eq!(julian_to_date(2_455_005.0).as_deref(), Some("22-06-2009"));
    }

    #[test]
    fn small_julian_days_land_in_4713_bc() {
        assert_eq!(julian_to_date(0.0).as_deref(), Some("01-01--4712"));
        assert_eq!(julian_to_date(10.0).as_deref(), Some("11-01--4712"));
    }

    #[test]
    fn non_finite_input_has_no_date() {
        assert_eq!(julian_to_date(f64::NAN), None);
        assert_eq!(julian_to_date(f64::INFINITY), None);
    }

    #[test]
    fn chrono_bridge() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let jd = JulianDate::from_date(date);
        assert_eq!(jd.value(), 2_460_374.5);

        let back = jd.calendar_date().unwrap();
        assert_eq!(back, CalendarDate::new(2024, 3, 5));
        assert_eq!(back.to_naive_date(), Some(date));
        assert_eq!(CalendarDate::from(date).to_julian_day(), jd);
    }

    #[test]
    fn display_pads_day_and_month_only() {
        assert_eq!(CalendarDate::new(812, 4, 9).to_string(), "09-04-812");
    }

    proptest! {
        #[test]
        fn gregorian_roundtrip(year in 1583i32..4000, month in 1u32..=12, day in 1u32..=28) {
            let jd = gregorian_to_julian(year, month as i32, day as i32);
            let back = CalendarDate::from_julian_day(jd).unwrap();
            prop_assert_eq!(back, CalendarDate::new(year, month, day));
        }
    }
}
