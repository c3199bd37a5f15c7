// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Fixed celestial targets.
//!
//! A [`Target`] is a named catalogue position: right ascension, declination
//! and the equinox year of their frame. It is validated once, when it is
//! built, and never mutated afterwards; the `with_*` methods return a new
//! target. The ephemeris handle ([`Target::body`]) is derived from the
//! current coordinates every time it is requested, so it cannot go stale.

use crate::angle;
use crate::ephemeris::Body;
use crate::error::TargetError;
use qtty::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Equinox assumed when a catalogue omits one.
pub const DEFAULT_EQUINOX: f64 = 2000.0;

/// An immutable fixed celestial position.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    name: String,
    ra: Degrees,
    dec: Degrees,
    equinox: f64,
}

impl Target {
    /// Builds a target from angles in degrees.
    ///
    /// The right ascension is wrapped to `[0°, 360°)`; the declination must
    /// lie within `[-90°, 90°]`.
    pub fn new(
        name: impl Into<String>,
        ra: Degrees,
        dec: Degrees,
        equinox: f64,
    ) -> Result<Self, TargetError> {
        if !ra.value().is_finite() {
            return Err(TargetError::NonFiniteRightAscension(ra.value()));
        }
        if !dec.value().is_finite() || dec.abs() > Degrees::new(90.0) {
            return Err(TargetError::DeclinationOutOfRange(dec.value()));
        }
        if !equinox.is_finite() {
            return Err(TargetError::Equinox(equinox.to_string()));
        }
        Ok(Self {
            name: name.into(),
            ra: ra.wrap_pos(),
            dec,
            equinox,
        })
    }

    /// Builds a target from angles in radians.
    pub fn from_radians(
        name: impl Into<String>,
        ra: Radians,
        dec: Radians,
        equinox: f64,
    ) -> Result<Self, TargetError> {
        Self::new(name, ra.to::<Degree>(), dec.to::<Degree>(), equinox)
    }

    /// Builds a target from sexagesimal text: right ascension in hours
    /// (`"18:36:56.3"`), declination in degrees (`"+38:47:01"`) and an equinox
    /// such as `"2000"` or `"J2000"`.
    ///
    /// ```
    /// use skywindow::Target;
    ///
    /// let vega = Target::parse("vega", "18:36:56.3", "+38:47:01", "J2000").unwrap();
    /// assert_eq!(vega.equinox(), 2000.0);
    /// ```
    pub fn parse(name: &str, ra: &str, dec: &str, equinox: &str) -> Result<Self, TargetError> {
        let ra = angle::parse_hours(ra).map_err(TargetError::RightAscension)?;
        let dec = angle::parse_degrees(dec).map_err(TargetError::Declination)?;
        Self::new(name, ra, dec, parse_equinox(equinox)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ra(&self) -> Degrees {
        self.ra
    }

    pub fn dec(&self) -> Degrees {
        self.dec
    }

    pub fn equinox(&self) -> f64 {
        self.equinox
    }

    /// Same target at new coordinates.
    pub fn with_coordinates(&self, ra: Degrees, dec: Degrees) -> Result<Self, TargetError> {
        Self::new(self.name.clone(), ra, dec, self.equinox)
    }

    /// Same coordinates referred to another equinox.
    pub fn with_equinox(&self, equinox: f64) -> Result<Self, TargetError> {
        Self::new(self.name.clone(), self.ra, self.dec, equinox)
    }

    /// Ephemeris handle for the current coordinates.
    #[inline]
    pub fn body(&self) -> Body {
        Body::Fixed {
            ra: self.ra,
            dec: self.dec,
            equinox: self.equinox,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} {} J{})",
            self.name,
            angle::format_hms(self.ra),
            angle::format_dms(self.dec),
            self.equinox
        )
    }
}

/// Parses an equinox written as a bare year or with a `B`/`J` prefix in
/// either case. Fractional years are truncated to the whole year.
pub fn parse_equinox(text: &str) -> Result<f64, TargetError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix(['B', 'J', 'b', 'j'])
        .unwrap_or(trimmed);
    digits
        .parse::<f64>()
        .ok()
        .filter(|year| year.is_finite())
        .map(f64::trunc)
        .ok_or_else(|| TargetError::Equinox(text.to_owned()))
}

/// One catalogue line, as read by an external importer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CatalogRecord {
    pub code: String,
    pub name: String,
    pub ra: String,
    pub dec: String,
    pub eq: String,
}

impl CatalogRecord {
    /// Converts the record into its trimmed code and a validated target.
    pub fn to_target(&self) -> Result<(String, Target), TargetError> {
        let code = self.code.trim().to_owned();
        Target::parse(&self.name, &self.ra, &self.dec, &self.eq)
            .map(|target| (code.clone(), target))
            .map_err(|source| TargetError::Record {
                code,
                source: Box::new(source),
            })
    }
}
