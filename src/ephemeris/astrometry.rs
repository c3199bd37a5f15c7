// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Reductions from a catalogue place to a topocentric apparent place.
//!
//! All series follow Meeus, *Astronomical Algorithms* (2nd ed.):
//!
//! | Step | Model | Chapter |
//! |------|-------|---------|
//! | precession | IAU 1976 (ζ, z, θ) | 21 |
//! | nutation | four largest terms in Δψ and Δε | 22 |
//! | obliquity | IAU 1976 cubic in T | 22 |
//! | annual aberration | classical form with e-terms, κ = 20.49552″ | 23 |
//! | refraction | Saemundsson, scaled by pressure and temperature | 16 |
//!
//! Together they reproduce apparent places to a few arcseconds, which is
//! far below anything a visibility window can resolve.

use super::sun;
use crate::{JulianDate, Time, UT};
use qtty::*;

/// Constant of aberration.
const ABERRATION: Degrees = Degrees::new(20.495_52 / 3600.0);

/// Below this apparent altitude the refraction model is not evaluated.
const REFRACTION_CUTOFF: Degrees = Degrees::new(-2.0);

#[inline]
fn atan2_deg(y: f64, x: f64) -> Degrees {
    Radians::new(y.atan2(x)).to::<Degree>()
}

#[inline]
fn asin_deg(x: f64) -> Degrees {
    Radians::new(x.clamp(-1.0, 1.0).asin()).to::<Degree>()
}

#[inline]
fn arcsec(value: f64) -> Degrees {
    Degrees::new(value / 3600.0)
}

/// Nutation in longitude (Δψ) and in obliquity (Δε).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    pub longitude: Degrees,
    pub obliquity: Degrees,
}

/// Nutation from the four largest terms of the IAU 1980 series
/// (accuracy 0.5″ in Δψ, 0.1″ in Δε).
pub fn nutation(jd: JulianDate) -> Nutation {
    let t = jd.julian_centuries().value();
    let node = Degrees::new(125.044_52 - 1_934.136_261 * t);
    let sun_lon = Degrees::new(280.466_5 + 36_000.769_8 * t);
    let moon_lon = Degrees::new(218.316_5 + 481_267.881_3 * t);

    let longitude = arcsec(
        -17.20 * node.sin() - 1.32 * (sun_lon * 2.0).sin() - 0.23 * (moon_lon * 2.0).sin()
            + 0.21 * (node * 2.0).sin(),
    );
    let obliquity = arcsec(
        9.20 * node.cos() + 0.57 * (sun_lon * 2.0).cos() + 0.10 * (moon_lon * 2.0).cos()
            - 0.09 * (node * 2.0).cos(),
    );
    Nutation {
        longitude,
        obliquity,
    }
}

/// Mean obliquity of the ecliptic.
pub fn mean_obliquity(jd: JulianDate) -> Degrees {
    let t = jd.julian_centuries().value();
    Degrees::new(23.439_291_111 - 0.013_004_167 * t - 1.6389e-7 * t * t + 5.036e-7 * t * t * t)
}

/// True obliquity: mean obliquity plus nutation in obliquity.
#[inline]
pub fn true_obliquity(jd: JulianDate, nutation: &Nutation) -> Degrees {
    mean_obliquity(jd) + nutation.obliquity
}

/// Julian Day of the mean equinox of a Julian year.
#[inline]
pub fn equinox_epoch(year: f64) -> JulianDate {
    JulianDate::J2000 + Days::new((year - 2000.0) * 365.25)
}

/// Rigorous IAU 1976 precession of `(ra, dec)` from `from` to `to`.
pub fn precess(ra: Degrees, dec: Degrees, from: JulianDate, to: JulianDate) -> (Degrees, Degrees) {
    let big_t = from.julian_centuries().value();
    let t = (to - from).value() / JulianDate::JULIAN_CENTURY.value();

    let common = 2_306.218_1 + 1.396_56 * big_t - 0.000_139 * big_t * big_t;
    let zeta = arcsec(common * t + (0.301_88 - 0.000_344 * big_t) * t * t + 0.017_998 * t * t * t);
    let z = arcsec(common * t + (1.094_68 + 0.000_066 * big_t) * t * t + 0.018_203 * t * t * t);
    let theta = arcsec(
        (2_004.310_9 - 0.853_30 * big_t - 0.000_217 * big_t * big_t) * t
            - (0.426_65 + 0.000_217 * big_t) * t * t
            - 0.041_833 * t * t * t,
    );

    let (sin_dec, cos_dec) = dec.sin_cos();
    let (sin_th, cos_th) = theta.sin_cos();
    let (sin_a, cos_a) = (ra + zeta).sin_cos();

    let a = cos_dec * sin_a;
    let b = cos_th * cos_dec * cos_a - sin_th * sin_dec;
    let c = sin_th * cos_dec * cos_a + cos_th * sin_dec;

    ((atan2_deg(a, b) + z).wrap_pos(), asin_deg(c))
}

/// Adds nutation and annual aberration to a mean place of date.
pub fn apparent_place(
    ra: Degrees,
    dec: Degrees,
    jd: JulianDate,
    nutation: &Nutation,
    obliquity: Degrees,
) -> (Degrees, Degrees) {
    let (sin_ra, cos_ra) = ra.sin_cos();
    let (sin_dec, cos_dec) = dec.sin_cos();
    let tan_dec = dec.tan();
    let (sin_eps, cos_eps) = obliquity.sin_cos();
    let dpsi = nutation.longitude.value();
    let deps = nutation.obliquity.value();

    // Meeus 23.1
    let nut_ra = (cos_eps + sin_eps * sin_ra * tan_dec) * dpsi - cos_ra * tan_dec * deps;
    let nut_dec = sin_eps * cos_ra * dpsi + sin_ra * deps;

    // Meeus 23.3, including the e-terms
    let solar = sun::elements(jd);
    let k = ABERRATION.value();
    let e = solar.eccentricity;
    let (sin_l, cos_l) = solar.true_longitude.sin_cos();
    let (sin_p, cos_p) = solar.perihelion.sin_cos();
    let tan_eps = obliquity.tan();

    let ab_ra = (-k * (cos_ra * cos_l * cos_eps + sin_ra * sin_l)
        + e * k * (cos_ra * cos_p * cos_eps + sin_ra * sin_p))
        / cos_dec;
    let ab_dec = -k
        * (cos_l * cos_eps * (tan_eps * cos_dec - sin_ra * sin_dec) + cos_ra * sin_dec * sin_l)
        + e * k * (cos_p * cos_eps * (tan_eps * cos_dec - sin_ra * sin_dec) + cos_ra * sin_dec * sin_p);

    (
        (ra + Degrees::new(nut_ra + ab_ra)).wrap_pos(),
        dec + Degrees::new(nut_dec + ab_dec),
    )
}

/// Ecliptic `(λ, β)` to equatorial `(α, δ)` for obliquity `eps`.
pub fn ecliptic_to_equatorial(
    longitude: Degrees,
    latitude: Degrees,
    obliquity: Degrees,
) -> (Degrees, Degrees) {
    let (sin_l, cos_l) = longitude.sin_cos();
    let (sin_b, cos_b) = latitude.sin_cos();
    let (sin_e, cos_e) = obliquity.sin_cos();
    let ra = atan2_deg(sin_l * cos_e - latitude.tan() * sin_e, cos_l);
    let dec = asin_deg(sin_b * cos_e + cos_b * sin_e * sin_l);
    (ra.wrap_pos(), dec)
}

/// Greenwich apparent sidereal time: GMST plus the equation of the equinoxes.
#[inline]
pub fn apparent_sidereal_time(ut: Time<UT>, nutation: &Nutation, obliquity: Degrees) -> Degrees {
    (ut.gmst() + nutation.longitude * obliquity.cos()).wrap_pos()
}

/// Geometric `(altitude, azimuth)` for an hour angle and declination seen
/// from `latitude`. Azimuth is measured from north through east.
pub fn horizontal(hour_angle: Degrees, dec: Degrees, latitude: Degrees) -> (Degrees, Degrees) {
    let (sin_h, cos_h) = hour_angle.sin_cos();
    let (sin_d, cos_d) = dec.sin_cos();
    let (sin_p, cos_p) = latitude.sin_cos();
    let alt = asin_deg(sin_p * sin_d + cos_p * cos_d * cos_h);
    let az = atan2_deg(-cos_d * sin_h, sin_d * cos_p - cos_d * cos_h * sin_p);
    (alt, az.wrap_pos())
}

/// Refraction to add to a geometric altitude (Saemundsson), scaled from
/// 1010 mbar / 10 °C to the given conditions. Zero below −2°.
pub fn refraction(altitude: Degrees, pressure_mbar: f64, temperature_c: f64) -> Degrees {
    if altitude < REFRACTION_CUTOFF {
        return Degrees::new(0.0);
    }
    let h = altitude.value().max(-1.9);
    let arcmin = 1.02 / Degrees::new(h + 10.3 / (h + 5.11)).tan();
    let scale = (pressure_mbar / 1010.0) * (283.0 / (273.0 + temperature_c));
    Degrees::new(arcmin / 60.0 * scale)
}

/// Great-circle distance between two equatorial positions, in `[0°, 180°]`.
pub fn angular_separation(ra1: Degrees, dec1: Degrees, ra2: Degrees, dec2: Degrees) -> Degrees {
    let half_dd = ((dec2 - dec1) * 0.5).sin();
    let half_da = ((ra2 - ra1) * 0.5).sin();
    let h = half_dd * half_dd + dec1.cos() * dec2.cos() * half_da * half_da;
    Radians::new(2.0 * h.clamp(0.0, 1.0).sqrt().asin()).to::<Degree>()
}
