// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Built-in closed-form ephemeris.
//!
//! Positions are reduced from the catalogue (or from the solar and lunar
//! series) to the topocentric apparent place with the models in
//! [`astrometry`](super::astrometry). Rise and set instants are found by
//! stepping forward from the geometry instant in fixed increments until the
//! altitude changes sign with respect to the horizon, then bisecting the
//! bracketing step.
//!
//! Rise/set refer to the upper limb of the Sun and Moon and to the point
//! itself for fixed positions, always after refraction.

use super::astrometry::{self, Nutation};
use super::{moon, sun, ApparentPosition, Body, Crossing, EphemerisProvider, SiteGeometry};
use crate::error::EphemerisError;
use crate::{Time, JD, UT};
use chrono::{DateTime, TimeDelta, Utc};
use qtty::*;

/// Closed-form ephemeris for the Sun, the Moon and fixed positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowPrecisionEphemeris {
    /// Coarse scan step of the rise/set search.
    pub step: Minutes,
    /// How far ahead of the geometry instant a crossing is searched for.
    pub span: Hours,
    /// Bisection rounds applied to a bracketing step.
    pub refinements: u32,
}

impl Default for LowPrecisionEphemeris {
    fn default() -> Self {
        Self {
            step: Minutes::new(10.0),
            span: Hours::new(36.0),
            refinements: 32,
        }
    }
}

/// Apparent place plus the angular radius used for rise/set.
struct Sighting {
    position: ApparentPosition,
    limb: Degrees,
}

/// Per-instant quantities shared by every body.
struct Epoch {
    jd: Time<JD>,
    nutation: Nutation,
    obliquity: Degrees,
    local_sidereal: Degrees,
}

impl Epoch {
    fn new(instant: DateTime<Utc>, longitude: Degrees) -> Self {
        let ut = Time::<UT>::from_utc(instant);
        let jd = ut.to::<JD>();
        let nutation = astrometry::nutation(jd);
        let obliquity = astrometry::true_obliquity(jd, &nutation);
        let local_sidereal =
            (astrometry::apparent_sidereal_time(ut, &nutation, obliquity) + longitude).wrap_pos();
        Self {
            jd,
            nutation,
            obliquity,
            local_sidereal,
        }
    }
}

fn duration_of(minutes: f64) -> TimeDelta {
    TimeDelta::microseconds((minutes * 60.0e6).round() as i64)
}

impl LowPrecisionEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that the search parameters describe a scan that terminates.
    pub fn validate(&self) -> Result<(), EphemerisError> {
        if !(self.step.value().is_finite() && self.step.value() > 0.0) {
            return Err(EphemerisError::InvalidSearch(format!(
                "step {} must be finite and positive",
                self.step
            )));
        }
        if !(self.span.value().is_finite() && self.span.value() > 0.0) {
            return Err(EphemerisError::InvalidSearch(format!(
                "span {} must be finite and positive",
                self.span
            )));
        }
        if duration_of(self.step.value()) <= TimeDelta::zero() {
            return Err(EphemerisError::InvalidSearch(format!(
                "step {} is below one microsecond",
                self.step
            )));
        }
        Ok(())
    }

    fn sight(&self, body: &Body, geometry: &SiteGeometry, instant: DateTime<Utc>) -> Sighting {
        let epoch = Epoch::new(instant, geometry.longitude);

        let (ra, dec, hour_angle, limb) = match *body {
            Body::Fixed { ra, dec, equinox } => {
                let (mean_ra, mean_dec) =
                    astrometry::precess(ra, dec, astrometry::equinox_epoch(equinox), epoch.jd);
                let (ra, dec) = astrometry::apparent_place(
                    mean_ra,
                    mean_dec,
                    epoch.jd,
                    &epoch.nutation,
                    epoch.obliquity,
                );
                (ra, dec, epoch.local_sidereal - ra, Degrees::new(0.0))
            }
            Body::Sun => {
                let p = sun::position(epoch.jd);
                (
                    p.ra,
                    p.dec,
                    epoch.local_sidereal - p.ra,
                    sun::semi_diameter(p.radius_au),
                )
            }
            Body::Moon => {
                let coords = moon::coordinates(epoch.jd);
                let (geo_ra, geo_dec) =
                    moon::apparent_equatorial(&coords, &epoch.nutation, epoch.obliquity);
                let (hour_angle, dec) = moon::topocentric(
                    epoch.local_sidereal - geo_ra,
                    geo_dec,
                    coords.distance_km,
                    geometry.latitude,
                    geometry.elevation_m,
                );
                (
                    (epoch.local_sidereal - hour_angle).wrap_pos(),
                    dec,
                    hour_angle,
                    moon::semi_diameter(coords.distance_km),
                )
            }
        };

        let (geometric_alt, az) = astrometry::horizontal(hour_angle, dec, geometry.latitude);
        let alt = geometric_alt
            + astrometry::refraction(geometric_alt, geometry.pressure_mbar, geometry.temperature_c);
        Sighting {
            position: ApparentPosition { ra, dec, alt, az },
            limb,
        }
    }

    /// Height of the relevant limb above the geometry horizon.
    fn clearance(&self, body: &Body, geometry: &SiteGeometry, instant: DateTime<Utc>) -> f64 {
        let s = self.sight(body, geometry, instant);
        (s.position.alt + s.limb - geometry.horizon).value()
    }

    fn next_crossing(&self, body: &Body, geometry: &SiteGeometry, rising: bool) -> Crossing {
        self.validate()?;
        let step = duration_of(self.step.value());
        let end = geometry
            .instant
            .checked_add_signed(duration_of(self.span.to::<Minute>().value()))
            .ok_or(EphemerisError::UnrepresentableInstant)?;

        let mut t = geometry.instant;
        let mut a = self.clearance(body, geometry, t);
        let (mut seen_above, mut seen_below) = (a >= 0.0, a < 0.0);

        while t < end {
            let t2 = t
                .checked_add_signed(step)
                .ok_or(EphemerisError::UnrepresentableInstant)?;
            let b = self.clearance(body, geometry, t2);
            seen_above |= b >= 0.0;
            seen_below |= b < 0.0;

            let bracketed = if rising {
                a < 0.0 && b >= 0.0
            } else {
                a >= 0.0 && b < 0.0
            };
            if bracketed {
                return Ok(self.refine(body, geometry, t, t2, rising));
            }
            t = t2;
            a = b;
        }

        match (seen_above, seen_below) {
            (false, _) => Err(EphemerisError::NeverUp),
            (true, false) => Err(EphemerisError::AlwaysUp),
            // Only the opposite crossing fell inside the span.
            (true, true) if rising => Err(EphemerisError::NeverUp),
            (true, true) => Err(EphemerisError::AlwaysUp),
        }
    }

    /// Bisects `[lo, hi)` and returns the first instant past the crossing.
    fn refine(
        &self,
        body: &Body,
        geometry: &SiteGeometry,
        mut lo: DateTime<Utc>,
        mut hi: DateTime<Utc>,
        rising: bool,
    ) -> DateTime<Utc> {
        log::trace!("refining {} of {:?} in [{lo}, {hi})", if rising { "rise" } else { "set" }, body);
        for _ in 0..self.refinements {
            let mid = lo + (hi - lo) / 2;
            if mid == lo {
                break;
            }
            let above = self.clearance(body, geometry, mid) >= 0.0;
            if above == rising {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        hi
    }
}

impl EphemerisProvider for LowPrecisionEphemeris {
    fn position(&self, body: &Body, geometry: &SiteGeometry) -> ApparentPosition {
        self.sight(body, geometry, geometry.instant).position
    }

    fn next_rising(&self, body: &Body, geometry: &SiteGeometry) -> Crossing {
        self.next_crossing(body, geometry, true)
    }

    fn next_setting(&self, body: &Body, geometry: &SiteGeometry) -> Crossing {
        self.next_crossing(body, geometry, false)
    }

    fn moon_illumination(&self, instant: DateTime<Utc>) -> f64 {
        moon::illuminated_fraction(Time::<JD>::from_utc(instant))
    }
}
