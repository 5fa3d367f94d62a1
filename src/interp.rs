// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Scalar blending and clamping helpers shared by the table and orbit code.

/// Linear interpolation: `(1 − t)·start + t·end`.
///
/// `t` is not clamped, so values outside `[0, 1]` extrapolate along the
/// same line.
///
/// ```
/// use exoclock::interpolate;
///
/// assert_eq!(interpolate(2.0, 6.0, 0.25), 3.0);
/// assert_eq!(interpolate(2.0, 6.0, 1.5), 8.0);
/// ```
#[inline]
pub fn interpolate(start: f64, end: f64, t: f64) -> f64 {
    (1.0 - t) * start + t * end
}

/// Clamp `index` into `[0, max]`.
///
/// NaN collapses to `0.0` so a broken upstream value can never leak into a
/// playhead.
///
/// ```
/// use exoclock::normalize_index;
///
/// assert_eq!(normalize_index(1.7, 1.0), 1.0);
/// assert_eq!(normalize_index(-0.2, 1.0), 0.0);
/// assert_eq!(normalize_index(0.4, 1.0), 0.4);
/// ```
#[inline]
pub fn normalize_index(index: f64, max: f64) -> f64 {
    if index.is_nan() {
        return 0.0;
    }
    index.min(max).max(0.0)
}
