// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Low-precision solar coordinates (Meeus ch. 25), good to about 0.01°.

use super::astrometry::{ecliptic_to_equatorial, mean_obliquity};
use crate::JulianDate;
use qtty::*;

/// Angular semi-diameter of the Sun at 1 au.
const SEMI_DIAMETER_1AU: Degrees = Degrees::new(0.266_6);

/// Geometric orbital quantities of the Sun as seen from the Earth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarElements {
    /// True geometric longitude, mean equinox of date.
    pub true_longitude: Degrees,
    pub mean_anomaly: Degrees,
    /// Eccentricity of the Earth's orbit.
    pub eccentricity: f64,
    /// Longitude of the perihelion of the Earth's orbit.
    pub perihelion: Degrees,
    /// Sun–Earth distance in astronomical units.
    pub radius_au: f64,
}

pub fn elements(jd: JulianDate) -> SolarElements {
    let t = jd.julian_centuries().value();
    let mean_longitude = Degrees::new(280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t);
    let mean_anomaly = Degrees::new(357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t);
    let eccentricity = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let center = Degrees::new(
        (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * mean_anomaly.sin()
            + (0.019_993 - 0.000_101 * t) * (mean_anomaly * 2.0).sin()
            + 0.000_289 * (mean_anomaly * 3.0).sin(),
    );
    let true_anomaly = mean_anomaly + center;
    let radius_au = 1.000_001_018 * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * true_anomaly.cos());

    SolarElements {
        true_longitude: (mean_longitude + center).wrap_pos(),
        mean_anomaly: mean_anomaly.wrap_pos(),
        eccentricity,
        perihelion: Degrees::new(102.937_35 + 1.719_46 * t + 0.000_46 * t * t),
        radius_au,
    }
}

/// Geocentric apparent place of the Sun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Apparent ecliptic longitude (nutation and aberration included).
    pub longitude: Degrees,
    pub ra: Degrees,
    pub dec: Degrees,
    pub radius_au: f64,
}

/// Apparent geocentric right ascension and declination, true equinox of date.
pub fn position(jd: JulianDate) -> SolarPosition {
    let solar = elements(jd);
    let t = jd.julian_centuries().value();
    let node = Degrees::new(125.04 - 1_934.136 * t);
    let longitude =
        (solar.true_longitude - Degrees::new(0.005_69 + 0.004_78 * node.sin())).wrap_pos();
    let obliquity = mean_obliquity(jd) + Degrees::new(0.002_56 * node.cos());
    let (ra, dec) = ecliptic_to_equatorial(longitude, Degrees::new(0.0), obliquity);
    SolarPosition {
        longitude,
        ra,
        dec,
        radius_au: solar.radius_au,
    }
}

/// Apparent semi-diameter at `radius_au`.
#[inline]
pub fn semi_diameter(radius_au: f64) -> Degrees {
    SEMI_DIAMETER_1AU / radius_au
}
