// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Target position at one instant, with derived quantities.
//!
//! The apparent place is computed when the snapshot is taken. Everything
//! else (sidereal time, hour angle, parallactic angle, airmass and the lunar
//! quantities) is computed on first access and cached for the lifetime of
//! the snapshot.

use crate::airmass;
use crate::ephemeris::{astrometry, ApparentPosition, Body, EphemerisProvider, SiteGeometry};
use crate::site::Site;
use crate::target::Target;
use crate::{Time, UT};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use qtty::*;
use std::cell::OnceCell;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
struct MoonView {
    altitude: Degrees,
    illumination: f64,
    separation: Degrees,
}

/// Position of a [`Target`] seen from a [`Site`] at a fixed instant.
#[derive(Debug, Clone)]
pub struct Snapshot {
    target: Target,
    geometry: SiteGeometry,
    timezone: Tz,
    provider: Arc<dyn EphemerisProvider>,
    position: ApparentPosition,
    gmst: OnceCell<Degrees>,
    lmst: OnceCell<Degrees>,
    hour_angle: OnceCell<Degrees>,
    parallactic_angle: OnceCell<Degrees>,
    airmass: OnceCell<f64>,
    moon: OnceCell<MoonView>,
}

impl Snapshot {
    pub fn new<Z: TimeZone>(target: &Target, site: &Site, instant: &DateTime<Z>) -> Self {
        let geometry = site.geometry(instant.with_timezone(&Utc), None);
        let provider = site.shared_provider();
        let position = provider.position(&target.body(), &geometry);
        Self {
            target: target.clone(),
            geometry,
            timezone: site.timezone(),
            provider,
            position,
            gmst: OnceCell::new(),
            lmst: OnceCell::new(),
            hour_angle: OnceCell::new(),
            parallactic_angle: OnceCell::new(),
            airmass: OnceCell::new(),
            moon: OnceCell::new(),
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn geometry(&self) -> &SiteGeometry {
        &self.geometry
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.geometry.instant
    }

    /// The instant in the site time zone.
    pub fn local_time(&self) -> DateTime<Tz> {
        self.geometry.instant.with_timezone(&self.timezone)
    }

    /// The instant on the UT1 axis.
    pub fn ut(&self) -> Time<UT> {
        Time::<UT>::from_utc(self.geometry.instant)
    }

    /// Apparent right ascension, true equinox of date.
    pub fn ra(&self) -> Degrees {
        self.position.ra
    }

    /// Apparent declination, true equinox of date.
    pub fn dec(&self) -> Degrees {
        self.position.dec
    }

    /// Refracted altitude.
    pub fn alt(&self) -> Degrees {
        self.position.alt
    }

    /// Azimuth, north through east.
    pub fn az(&self) -> Degrees {
        self.position.az
    }

    /// Greenwich mean sidereal time, `[0°, 360°)`.
    pub fn gmst(&self) -> Degrees {
        *self.gmst.get_or_init(|| self.ut().gmst())
    }

    /// Local mean sidereal time, `[0°, 360°)`.
    pub fn lmst(&self) -> Degrees {
        *self
            .lmst
            .get_or_init(|| (self.gmst() + self.geometry.longitude).wrap_pos())
    }

    /// Local hour angle, `(-180°, 180°]`.
    pub fn hour_angle(&self) -> Degrees {
        *self
            .hour_angle
            .get_or_init(|| (self.lmst() - self.position.ra).wrap_signed())
    }

    /// Parallactic angle, `(-180°, 180°]`.
    ///
    /// Evaluated in the hour-angle form `atan2(sin H, tan φ cos δ − sin δ cos H)`,
    /// which is equivalent to the form in terms of altitude and azimuth.
    pub fn parallactic_angle(&self) -> Degrees {
        *self.parallactic_angle.get_or_init(|| {
            let latitude = self.geometry.latitude;
            let dec = self.position.dec;
            if dec.cos() == 0.0 {
                return if latitude > Degrees::new(0.0) {
                    Degrees::new(180.0)
                } else {
                    Degrees::new(0.0)
                };
            }
            let ha = self.hour_angle();
            let y = ha.sin();
            let x = latitude.tan() * dec.cos() - dec.sin() * ha.cos();
            Radians::new(y.atan2(x)).to::<Degree>()
        })
    }

    /// Hardie airmass at the refracted altitude; never below 1.
    pub fn airmass(&self) -> f64 {
        *self
            .airmass
            .get_or_init(|| airmass::hardie(self.position.alt))
    }

    fn moon(&self) -> &MoonView {
        self.moon.get_or_init(|| {
            let moon = self.provider.position(&Body::Moon, &self.geometry);
            MoonView {
                altitude: moon.alt,
                illumination: self
                    .provider
                    .moon_illumination(self.geometry.instant)
                    .clamp(0.0, 1.0),
                separation: astrometry::angular_separation(
                    moon.ra,
                    moon.dec,
                    self.position.ra,
                    self.position.dec,
                ),
            }
        })
    }

    pub fn moon_altitude(&self) -> Degrees {
        self.moon().altitude
    }

    /// Illuminated fraction of the Moon, `[0, 1]`.
    pub fn moon_illumination(&self) -> f64 {
        self.moon().illumination
    }

    /// Great-circle distance between the Moon and the target, `[0°, 180°]`.
    pub fn moon_separation(&self) -> Degrees {
        self.moon().separation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::tests::subaru;

    fn vega() -> Target {
        Target::parse("vega", "18:36:56.3", "+38:47:01", "2000").unwrap()
    }

    #[test]
    fn derived_quantities_are_consistent() {
        let site = subaru();
        let t = Utc.with_ymd_and_hms(2014, 4, 29, 14, 0, 0).unwrap();
        let s = site.calc(&vega(), &t);

        assert_eq!(s.gmst(), s.ut().gmst());
        assert!(((s.lmst() - s.gmst() - site.longitude()).wrap_signed()).abs() < Degrees::new(1e-9));
        let ha = s.hour_angle();
        assert!(ha > Degrees::new(-180.0) && ha <= Degrees::new(180.0));
        assert!(((s.lmst() - s.ra() - ha).wrap_signed()).abs() < Degrees::new(1e-9));
    }

    #[test]
    fn airmass_tracks_altitude() {
        let site = subaru();
        let t = Utc.with_ymd_and_hms(2014, 4, 29, 14, 0, 0).unwrap();
        let s = site.calc(&vega(), &t);
        assert!(s.airmass() >= 1.0);
        assert_eq!(s.airmass(), airmass::hardie(s.alt()));
    }

    #[test]
    fn parallactic_angle_sign_follows_hour_angle() {
        let site = subaru();
        let target = vega();
        // east of the meridian before transit, west after
        let east = site.calc(&target, &Utc.with_ymd_and_hms(2014, 4, 29, 12, 0, 0).unwrap());
        let west = site.calc(&target, &Utc.with_ymd_and_hms(2014, 4, 29, 17, 0, 0).unwrap());
        assert!(east.hour_angle() < Degrees::new(0.0));
        assert!(east.parallactic_angle() < Degrees::new(0.0));
        assert!(west.hour_angle() > Degrees::new(0.0));
        assert!(west.parallactic_angle() > Degrees::new(0.0));
    }

    #[test]
    fn parallactic_angle_matches_the_azimuth_form() {
        let site = subaru();
        let lat = site.latitude();
        for hour in [6, 9, 12, 14, 17, 20] {
            let s = site.calc(&vega(), &Utc.with_ymd_and_hms(2014, 4, 29, hour, 0, 0).unwrap());
            let dec = s.dec();
            let (alt, az) = astrometry::horizontal(s.hour_angle(), dec, lat);
            let y = -az.sin() * lat.cos();
            let x = (lat.sin() - dec.sin() * alt.sin()) / alt.cos();
            let q = Radians::new(y.atan2(x)).to::<Degree>();
            assert!(
                (s.parallactic_angle() - q).wrap_signed().abs() < Degrees::new(1e-6),
                "{hour}h: {} vs {q}",
                s.parallactic_angle()
            );
        }
    }

    #[test]
    fn moon_quantities_are_in_range() {
        let site = subaru();
        let s = site.calc(&vega(), &Utc.with_ymd_and_hms(2014, 4, 15, 10, 0, 0).unwrap());
        assert!((0.0..=1.0).contains(&s.moon_illumination()));
        let sep = s.moon_separation();
        assert!(sep >= Degrees::new(0.0) && sep <= Degrees::new(180.0));
        assert!(s.moon_altitude().abs() <= Degrees::new(90.0));
    }

    #[test]
    fn local_time_is_in_the_site_zone() {
        let site = subaru();
        let t = Utc.with_ymd_and_hms(2014, 4, 30, 6, 0, 0).unwrap();
        let s = site.calc(&vega(), &t);
        assert_eq!(s.local_time().format("%Y-%m-%d %H:%M").to_string(), "2014-04-29 20:00");
        assert_eq!(s.instant(), t);
    }
}
