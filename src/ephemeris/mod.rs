// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Ephemeris boundary.
//!
//! The visibility engine never computes orbits itself. It asks an
//! [`EphemerisProvider`] three questions about a [`Body`] seen from a
//! [`SiteGeometry`]:
//!
//! | Question | Method |
//! |----------|--------|
//! | where is it now? | [`EphemerisProvider::position`] |
//! | when does it next climb through the horizon? | [`EphemerisProvider::next_rising`] |
//! | when does it next drop through the horizon? | [`EphemerisProvider::next_setting`] |
//!
//! plus the Moon's illuminated fraction. A geometry is a plain value built
//! for each query, so a provider is a pure function of its arguments and
//! one provider may serve any number of sites and threads.
//!
//! [`LowPrecisionEphemeris`] is the built-in provider.

pub mod astrometry;
mod low_precision;
pub mod moon;
pub mod sun;

pub use low_precision::LowPrecisionEphemeris;

use crate::error::EphemerisError;
use chrono::{DateTime, Utc};
use qtty::Degrees;
use std::fmt;

/// Something a provider can locate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Body {
    Sun,
    Moon,
    /// A fixed catalogue position referred to the mean equinox of `equinox`
    /// (a Julian year).
    Fixed {
        ra: Degrees,
        dec: Degrees,
        equinox: f64,
    },
}

/// Where and when a query is asked from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteGeometry {
    /// East-positive geodetic longitude.
    pub longitude: Degrees,
    pub latitude: Degrees,
    pub elevation_m: f64,
    pub pressure_mbar: f64,
    pub temperature_c: f64,
    /// Altitude a rising or setting body must cross.
    pub horizon: Degrees,
    /// Evaluation instant, and start of any rise/set search.
    pub instant: DateTime<Utc>,
}

impl SiteGeometry {
    /// Same geometry at another instant.
    #[inline]
    pub fn at(self, instant: DateTime<Utc>) -> Self {
        Self { instant, ..self }
    }

    /// Same geometry with another horizon.
    #[inline]
    pub fn with_horizon(self, horizon: Degrees) -> Self {
        Self { horizon, ..self }
    }
}

/// Topocentric apparent place of a body.
///
/// `ra`/`dec` are referred to the true equator and equinox of date; `alt`
/// includes atmospheric refraction; `az` is measured from north through east.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApparentPosition {
    pub ra: Degrees,
    pub dec: Degrees,
    pub alt: Degrees,
    pub az: Degrees,
}

/// Result of a rise/set search.
pub type Crossing = Result<DateTime<Utc>, EphemerisError>;

/// Capability the visibility engine needs from an ephemeris.
///
/// Searches start at `geometry.instant` and look for the next crossing of
/// `geometry.horizon`. A body that stays below the horizon reports
/// [`EphemerisError::NeverUp`]; one that stays above reports
/// [`EphemerisError::AlwaysUp`].
pub trait EphemerisProvider: Send + Sync + fmt::Debug {
    fn position(&self, body: &Body, geometry: &SiteGeometry) -> ApparentPosition;

    fn next_rising(&self, body: &Body, geometry: &SiteGeometry) -> Crossing;

    fn next_setting(&self, body: &Body, geometry: &SiteGeometry) -> Crossing;

    /// Illuminated fraction of the Moon's disk, in `[0, 1]`.
    fn moon_illumination(&self, instant: DateTime<Utc>) -> f64;
}
