// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Epoch constants and mean sidereal time.

use qtty::*;

use super::instant::Time;
use super::scales::{JD, UT};

impl Time<JD> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 TT  (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Julian centuries since J2000.0 (used by nutation, precession and the
    /// solar and lunar theories).
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new((*self - Self::J2000).value() / Self::JULIAN_CENTURY.value())
    }
}

impl Time<UT> {
    /// J2000.0 on the UT axis, the origin of the sidereal-time polynomial.
    pub const J2000_UT: Self = Self::new(2_451_545.0);

    /// Greenwich mean sidereal time, IAU 1982, wrapped to `[0°, 360°)`.
    ///
    /// ```text
    /// θ = 280.46061837° + 360.98564736629°·d + 0.000387933°·T² − T³/38710000
    /// d = JD(UT) − 2451545.0,  T = d / 36525
    /// ```
    pub fn gmst(&self) -> Degrees {
        let d = (*self - Self::J2000_UT).value();
        let t = d / Time::<JD>::JULIAN_CENTURY.value();
        Degrees::new(
            280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
                - t * t * t / 38_710_000.0,
        )
        .wrap_pos()
    }

    /// Local mean sidereal time for an east-positive `longitude`, wrapped to
    /// `[0°, 360°)`.
    #[inline]
    pub fn lmst(&self, longitude: Degrees) -> Degrees {
        (self.gmst() + longitude).wrap_pos()
    }
}
