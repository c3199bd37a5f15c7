// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types, one enum per concern.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Malformed angle text.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AngleError {
    #[error("Empty angle string")]
    Empty,

    #[error("Malformed angle component '{0}'")]
    MalformedComponent(String),

    #[error("Too many sexagesimal components in '{0}'")]
    TooManyComponents(String),

    #[error("Minutes or seconds out of range [0, 60) in '{0}'")]
    ComponentOutOfRange(String),
}

/// Invalid target description; raised when the target is built.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TargetError {
    #[error("Invalid right ascension: {0}")]
    RightAscension(#[source] AngleError),

    #[error("Invalid declination: {0}")]
    Declination(#[source] AngleError),

    #[error("Declination {0}° outside [-90°, 90°]")]
    DeclinationOutOfRange(f64),

    #[error("Right ascension {0}° is not finite")]
    NonFiniteRightAscension(f64),

    #[error("Invalid equinox '{0}'")]
    Equinox(String),

    #[error("Catalog record '{code}' is invalid: {source}")]
    Record {
        code: String,
        #[source]
        source: Box<TargetError>,
    },
}

/// Outcome of a rise/set search that found no crossing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EphemerisError {
    #[error("Body never rises above the horizon")]
    NeverUp,

    #[error("Body never sets below the horizon")]
    AlwaysUp,

    #[error("Instant outside the representable calendar range")]
    UnrepresentableInstant,

    #[error("Invalid rise/set search: {0}")]
    InvalidSearch(String),
}

/// Site construction and date handling failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SiteError {
    #[error("Date '{0}' matches none of YYYY-MM-DD[ HH[:MM[:SS]]]")]
    DateFormat(String),

    #[error("Local time {0} does not exist in time zone {1}")]
    NonexistentLocalTime(String, String),

    #[error("Unknown time zone '{0}'")]
    UnknownTimezone(String),

    #[error("Invalid site location: {0}")]
    InvalidLocation(String),

    #[error(transparent)]
    Angle(#[from] AngleError),

    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

/// Failures of the observability decision.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ObservabilityError {
    #[error("Rise instant {rise} precedes the interval start {start}")]
    InternalConsistency {
        rise: DateTime<Utc>,
        start: DateTime<Utc>,
    },

    #[error("Interval stop must be after start")]
    InvalidInterval,

    #[error("Minimum elevation {el_min}° must be below maximum elevation {el_max}°")]
    InvalidElevationBounds { el_min: f64, el_max: f64 },

    #[error("Required duration {0} s must be finite and non-negative")]
    InvalidDuration(f64),

    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}
