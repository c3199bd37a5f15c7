// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Truncated ELP-2000/82 lunar theory (Meeus ch. 47).
//!
//! Only the largest periodic terms are kept: 25 in longitude and distance,
//! 14 in latitude, plus the Venus, Jupiter and flattening corrections
//! (`A1`, `A2`, `A3`). The result is good to about 10″ in longitude, 4″ in
//! latitude and a few tens of kilometres in distance, which is ample for
//! moonrise times and lunar separation.

use super::astrometry::{self, Nutation};
use super::sun;
use crate::JulianDate;
use qtty::*;

/// Equatorial radius of the Earth used for lunar parallax, km.
const EARTH_RADIUS_KM: f64 = 6_378.14;
/// Mean radius of the Moon, km.
const MOON_RADIUS_KM: f64 = 1_737.4;
const AU_KM: f64 = 149_597_870.7;
/// Polar-to-equatorial axis ratio of the reference ellipsoid.
const EARTH_AXIS_RATIO: f64 = 0.996_647_19;

/// Multiples of (D, M, M′, F) with coefficients for Σl (1e-6 °) and Σr (1e-3 km).
#[rustfmt::skip]
const LONGITUDE_DISTANCE: [(i8, i8, i8, i8, f64, f64); 25] = [
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
    (2, 0, 2, 0, 3_994.0, -10_445.0),
];

/// Multiples of (D, M, M′, F) with coefficients for Σb (1e-6 °).
#[rustfmt::skip]
const LATITUDE: [(i8, i8, i8, i8, f64); 14] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
    (2, 1, 0, -1, -3_359.0),
];

/// Geocentric ecliptic coordinates of the Moon, mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarCoordinates {
    pub longitude: Degrees,
    pub latitude: Degrees,
    pub distance_km: f64,
}

/// Fundamental arguments `(L′, D, M, M′, F)` in degrees.
fn arguments(t: f64) -> (f64, f64, f64, f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let mean_longitude =
        218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0 - t4 / 65_194_000.0;
    let elongation =
        297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0 - t4 / 113_065_000.0;
    let sun_anomaly = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let moon_anomaly =
        134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0 - t4 / 14_712_000.0;
    let latitude_argument =
        93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0 + t4 / 863_310_000.0;
    (mean_longitude, elongation, sun_anomaly, moon_anomaly, latitude_argument)
}

/// Geometric geocentric position of the Moon.
pub fn coordinates(jd: JulianDate) -> LunarCoordinates {
    let t = jd.julian_centuries().value();
    let (lp, d, m, mp, f) = arguments(t);
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t * t;
    let eccentricity_factor = |multiple: i8| e.powi(i32::from(multiple.unsigned_abs()));
    let angle = |cd: i8, cm: i8, cmp: i8, cf: i8| {
        Degrees::new(
            f64::from(cd) * d + f64::from(cm) * m + f64::from(cmp) * mp + f64::from(cf) * f,
        )
    };

    let (mut sum_l, mut sum_r) = (0.0, 0.0);
    for &(cd, cm, cmp, cf, l, r) in &LONGITUDE_DISTANCE {
        let arg = angle(cd, cm, cmp, cf);
        let scale = eccentricity_factor(cm);
        sum_l += l * scale * arg.sin();
        sum_r += r * scale * arg.cos();
    }
    let mut sum_b = 0.0;
    for &(cd, cm, cmp, cf, b) in &LATITUDE {
        sum_b += b * eccentricity_factor(cm) * angle(cd, cm, cmp, cf).sin();
    }

    let a1 = Degrees::new(119.75 + 131.849 * t);
    let a2 = Degrees::new(53.09 + 479_264.290 * t);
    let a3 = Degrees::new(313.45 + 481_266.484 * t);
    let lp_deg = Degrees::new(lp);
    let f_deg = Degrees::new(f);
    let mp_deg = Degrees::new(mp);

    sum_l += 3_958.0 * a1.sin() + 1_962.0 * (lp_deg - f_deg).sin() + 318.0 * a2.sin();
    sum_b += -2_235.0 * lp_deg.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f_deg).sin()
        + 175.0 * (a1 + f_deg).sin()
        + 127.0 * (lp_deg - mp_deg).sin()
        - 115.0 * (lp_deg + mp_deg).sin();

    LunarCoordinates {
        longitude: Degrees::new(lp + sum_l / 1e6).wrap_pos(),
        latitude: Degrees::new(sum_b / 1e6),
        distance_km: 385_000.56 + sum_r / 1_000.0,
    }
}

/// Geocentric apparent right ascension and declination, true equinox of date.
pub fn apparent_equatorial(
    coords: &LunarCoordinates,
    nutation: &Nutation,
    obliquity: Degrees,
) -> (Degrees, Degrees) {
    astrometry::ecliptic_to_equatorial(
        coords.longitude + nutation.longitude,
        coords.latitude,
        obliquity,
    )
}

/// Shifts a geocentric `(hour angle, dec)` to the topocentric place seen
/// from `latitude` at `elevation_m` (Meeus ch. 40).
///
/// Returns the topocentric hour angle and declination.
pub fn topocentric(
    hour_angle: Degrees,
    dec: Degrees,
    distance_km: f64,
    latitude: Degrees,
    elevation_m: f64,
) -> (Degrees, Degrees) {
    let u = Radians::new((EARTH_AXIS_RATIO * latitude.tan()).atan());
    let height = elevation_m / (EARTH_RADIUS_KM * 1_000.0);
    let rho_sin = EARTH_AXIS_RATIO * u.sin() + height * latitude.sin();
    let rho_cos = u.cos() + height * latitude.cos();

    let sin_parallax = EARTH_RADIUS_KM / distance_km;
    let (sin_h, cos_h) = hour_angle.sin_cos();
    let (sin_d, cos_d) = dec.sin_cos();

    let denominator = cos_d - rho_cos * sin_parallax * cos_h;
    let shift = Radians::new((-rho_cos * sin_parallax * sin_h).atan2(denominator));
    let topo_dec = Radians::new(
        ((sin_d - rho_sin * sin_parallax) * shift.cos()).atan2(denominator),
    );
    (hour_angle - shift.to::<Degree>(), topo_dec.to::<Degree>())
}

/// Apparent angular semi-diameter at `distance_km`.
#[inline]
pub fn semi_diameter(distance_km: f64) -> Degrees {
    Radians::new((MOON_RADIUS_KM / distance_km).clamp(-1.0, 1.0).asin()).to::<Degree>()
}

/// Illuminated fraction of the lunar disk, from the geocentric elongation
/// of the Moon from the Sun (Meeus 48.2–48.3).
pub fn illuminated_fraction(jd: JulianDate) -> f64 {
    let moon = coordinates(jd);
    let solar = sun::elements(jd);
    let cos_elongation = moon.latitude.cos() * (moon.longitude - solar.true_longitude).cos();
    let elongation = cos_elongation.clamp(-1.0, 1.0).acos();
    let sun_km = solar.radius_au * AU_KM;
    let phase_angle = (sun_km * elongation.sin()).atan2(moon.distance_km - sun_km * elongation.cos());
    ((1.0 + phase_angle.cos()) / 2.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Time, JD};
    use chrono::{TimeZone, Utc};

    #[test]
    fn matches_meeus_example_47a() {
        // 1992-04-12 0h TD: λ = 133.162655°, β = −3.229126°, Δ = 368409.7 km
        let c = coordinates(JulianDate::new(2_448_724.5));
        assert!((c.longitude - Degrees::new(133.162_655)).abs() < Degrees::new(0.01));
        assert!((c.latitude - Degrees::new(-3.229_126)).abs() < Degrees::new(0.01));
        assert!((c.distance_km - 368_409.7).abs() < 100.0);
    }

    #[test]
    fn full_and_new_moon_of_april_2014() {
        let full = Time::<JD>::from_utc(Utc.with_ymd_and_hms(2014, 4, 15, 7, 46, 0).unwrap());
        let new = Time::<JD>::from_utc(Utc.with_ymd_and_hms(2014, 4, 29, 6, 3, 0).unwrap());
        assert!(illuminated_fraction(full) > 0.99);
        assert!(illuminated_fraction(new) < 0.01);
    }

    #[test]
    fn parallax_pushes_the_moon_down() {
        let (_, topo_dec) = topocentric(
            Degrees::new(0.0),
            Degrees::new(0.0),
            384_400.0,
            Degrees::new(19.8),
            4_163.0,
        );
        // on the meridian, a northern observer sees the Moon shifted south
        assert!(topo_dec < Degrees::new(0.0));
        assert!(topo_dec > Degrees::new(-1.0));
    }

    #[test]
    fn semi_diameter_is_about_a_quarter_degree() {
        let sd = semi_diameter(384_400.0);
        assert!((sd - Degrees::new(0.259)).abs() < Degrees::new(0.001));
    }
}
