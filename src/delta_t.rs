// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T), the UT↔TT correction
//!
//! **ΔT = TT − UT** links civil timestamps (which follow the Earth's
//! rotation) to the uniform axis the solar and lunar theories expect.
//! This module interpolates Meeus's biennial table for 1620–1992 and the
//! yearly IERS values for 1992–2024, then extrapolates with the
//! Espenak & Meeus (2006) polynomials of the NASA *Five Millennium Canon of
//! Solar Eclipses*. The Morrison & Stephenson (2004) long-term parabola
//! covers everything outside 1620–2150.
//!
//! The correction is applied automatically by the [`UT`](super::UT) marker,
//! so callers normally never touch this module directly:
//!
//! ```rust
//! use skywindow::{Time, JD, UT};
//!
//! let ut = Time::<UT>::new(2_456_776.5);
//! let tt = ut.to::<JD>();
//! println!("JD(TT) = {tt}, ΔT = {}", ut.delta_t());
//! ```
//!
//! ## Accuracy
//! Within ±0.5 s over 1900–2024. Past the last yearly value the curve is an
//! extrapolation that drifts by a few seconds per decade, which moves a
//! fixed star by well under an arcsecond.

use super::instant::Time;
use super::scales::UT;
use super::JulianDate;
use qtty::Seconds;

/// Julian Day (UT) of 2000-01-01T00:00.
const JD_YEAR_2000: f64 = 2_451_544.5;
const DAYS_PER_YEAR: f64 = 365.25;

/// Decimal calendar year of a Julian Day.
#[inline]
fn decimal_year(jd: JulianDate) -> f64 {
    2000.0 + (jd.value() - JD_YEAR_2000) / DAYS_PER_YEAR
}

/// Horner evaluation, lowest-order coefficient first.
#[inline]
fn poly(t: f64, coefficients: &[f64]) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * t + c)
}

/// Morrison & Stephenson (2004) parabola, used outside 1620–2150.
#[inline]
fn long_term(year: f64) -> f64 {
    let u = (year - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

const BIENNIAL_START: f64 = 1620.0;

/// Biennial ΔT from 1620 to 1992 (seconds), compiled by J. Meeus.
#[rustfmt::skip]
const BIENNIAL: [f64; 187] = [
    124.0,115.0,106.0, 98.0, 91.0, 85.0, 79.0, 74.0, 70.0, 65.0,
     62.0, 58.0, 55.0, 53.0, 50.0, 48.0, 46.0, 44.0, 42.0, 40.0,
     37.0, 35.0, 33.0, 31.0, 28.0, 26.0, 24.0, 22.0, 20.0, 18.0,
     16.0, 14.0, 13.0, 12.0, 11.0, 10.0,  9.0,  9.0,  9.0,  9.0,
      9.0,  9.0,  9.0,  9.0, 10.0, 10.0, 10.0, 10.0, 10.0, 11.0,
     11.0, 11.0, 11.0, 11.0, 11.0, 11.0, 12.0, 12.0, 12.0, 12.0,
     12.0, 12.0, 13.0, 13.0, 13.0, 13.0, 14.0, 14.0, 14.0, 15.0,
     15.0, 15.0, 15.0, 16.0, 16.0, 16.0, 16.0, 16.0, 17.0, 17.0,
     17.0, 17.0, 17.0, 17.0, 17.0, 17.0, 16.0, 16.0, 15.0, 14.0,
     13.7, 13.1, 12.7, 12.5, 12.5, 12.5, 12.5, 12.5, 12.5, 12.3,
     12.0, 11.4, 10.6,  9.6,  8.6,  7.5,  6.6,  6.0,  5.7,  5.6,
      5.7,  5.9,  6.2,  6.5,  6.8,  7.1,  7.3,  7.5,  7.7,  7.8,
      7.9,  7.5,  6.4,  5.4,  2.9,  1.6, -1.0, -2.7, -3.6, -4.7,
     -5.4, -5.2, -5.5, -5.6, -5.8, -5.9, -6.2, -6.4, -6.1, -4.7,
     -2.7,  0.0,  2.6,  5.4,  7.7, 10.5, 13.4, 16.0, 18.2, 20.2,
     21.2, 22.4, 23.5, 23.9, 24.3, 24.0, 23.9, 23.9, 23.7, 24.0,
     24.3, 25.3, 26.2, 27.3, 28.2, 29.1, 30.0, 30.7, 31.4, 32.2,
     33.1, 34.0, 35.0, 36.5, 38.3, 40.2, 42.2, 44.5, 46.5, 48.5,
     50.5, 52.2, 53.8, 54.9, 55.8, 56.9, 58.3,
];

const YEARLY_START: f64 = 1992.0;

/// ΔT on January 1st of each year from 1992 to 2024 (seconds), IERS.
#[rustfmt::skip]
const YEARLY: [f64; 33] = [
    58.31, 59.12, 59.98, 60.78, 61.63, 62.29, 62.97, 63.47, 63.83, 64.09,
    64.30, 64.47, 64.57, 64.69, 64.85, 65.15, 65.46, 65.78, 66.07, 66.32,
    66.60, 66.91, 67.28, 67.64, 68.10, 68.59, 68.97, 69.22, 69.36, 69.36,
    69.29, 69.20, 69.18,
];

const YEARLY_END: f64 = 2024.0;

/// **1620–1992**: three-point interpolation around the nearest entry.
fn biennial(year: f64) -> f64 {
    let x = (year - BIENNIAL_START) / 2.0;
    let k = (x.round().max(1.0) as usize).min(BIENNIAL.len() - 2);
    let n = x - k as f64;
    let a = BIENNIAL[k] - BIENNIAL[k - 1];
    let b = BIENNIAL[k + 1] - BIENNIAL[k];
    let c = b - a;
    BIENNIAL[k] + n / 2.0 * (a + b + n * c)
}

/// **1992–2024**: linear between yearly values.
fn yearly(year: f64) -> f64 {
    let x = year - YEARLY_START;
    let i = (x.max(0.0) as usize).min(YEARLY.len() - 2);
    let f = x - i as f64;
    YEARLY[i] + f * (YEARLY[i + 1] - YEARLY[i])
}

/// Espenak & Meeus 2005–2050 polynomial.
#[inline]
fn espenak_2005(year: f64) -> f64 {
    poly(year - 2000.0, &[62.92, 0.322_17, 0.005_589])
}

/// **2024–2150**: Espenak & Meeus, offset to meet the last yearly value and
/// relaxed back onto the published curve by 2050.
fn extrapolated(year: f64) -> f64 {
    if year < 2050.0 {
        let offset = YEARLY[YEARLY.len() - 1] - espenak_2005(YEARLY_END);
        espenak_2005(year) + offset * (2050.0 - year) / (2050.0 - YEARLY_END)
    } else {
        long_term(year) - 0.5628 * (2150.0 - year)
    }
}

/// Returns **ΔT** in seconds for a Julian Day on the **UT** axis.
pub(crate) fn delta_t_seconds(jd_ut: JulianDate) -> Seconds {
    let year = decimal_year(jd_ut);
    let dt = match year {
        y if y < BIENNIAL_START => long_term(y),
        y if y < YEARLY_START => biennial(y),
        y if y < YEARLY_END => yearly(y),
        y if y < 2150.0 => extrapolated(y),
        y => long_term(y),
    };
    Seconds::new(dt)
}

impl Time<UT> {
    /// Returns **ΔT = TT − UT** in seconds for this UT epoch.
    #[inline]
    pub fn delta_t(&self) -> Seconds {
        delta_t_seconds(JulianDate::from_days(self.quantity()))
    }
}
