// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observation planning primitives.
//!
//! `skywindow` answers the questions asked when planning a night at a
//! ground-based telescope: when does the Sun set, when does twilight end,
//! can this target be tracked for an hour between 22:30 and 23:30 above 15°,
//! and what are its airmass and parallactic angle along the way.
//!
//! # Core types
//!
//! - [`Site`]: observer location, atmosphere and civil time zone; solar and
//!   lunar events, date parsing and zone conversions.
//! - [`Target`]: an immutable fixed position (RA/Dec at an equinox).
//! - [`Site::observable`] with [`Constraints`] → [`Observability`]: the
//!   observability window decision.
//! - [`Snapshot`]: a target's position at one instant with lazily computed
//!   sidereal time, hour angle, parallactic angle, airmass and lunar
//!   quantities.
//! - [`EphemerisProvider`]: the ephemeris boundary; [`LowPrecisionEphemeris`]
//!   is the built-in implementation.
//!
//! # Time
//!
//! Civil instants are [`chrono::DateTime`] values in any zone; internally
//! and at the ephemeris boundary they are always UTC. Astronomical time
//! arithmetic uses [`Time<S>`] on the [`JD`] (TT) and [`UT`] axes, with
//! ΔT = TT − UT applied automatically by [`UT`].
//!
//! ```
//! use skywindow::{Constraints, Site, Target};
//! use qtty::{Degrees, Seconds};
//!
//! let site = Site::new("Subaru", "US/Hawaii", "-155:28:48.900", "+19:49:42.600", 4163.0, 615.0, 0.0)
//!     .unwrap();
//! let vega = Target::parse("vega", "18:36:56.3", "+38:47:01", "2000").unwrap();
//!
//! let start = site.parse_date("2014-04-28 22:30", None).unwrap();
//! let stop = site.parse_date("2014-04-28 23:30", None).unwrap();
//! let limits = Constraints::new(Degrees::new(15.0), Degrees::new(85.0), Seconds::new(2700.0));
//! let window = site.observable(&vega, &start, &stop, &limits).unwrap();
//! assert!(window.is_observable);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`SiteConfig`], [`CatalogRecord`],
//!   [`Observability`] and [`UtcPeriod`].

pub mod airmass;
pub mod angle;
mod config;
mod delta_t;
pub mod ephemeris;
mod error;
pub(crate) mod instant;
mod observability;
mod period;
mod report;
pub(crate) mod scales;
mod sidereal;
mod site;
mod snapshot;
mod target;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use config::SiteConfig;
pub use ephemeris::{
    ApparentPosition, Body, EphemerisProvider, LowPrecisionEphemeris, SiteGeometry,
};
pub use error::{AngleError, EphemerisError, ObservabilityError, SiteError, TargetError};
pub use instant::{Time, TimeScale};
pub use observability::{Constraints, Observability};
pub use period::{complement_within, intersect_periods, Interval, Period, TimeInstant, UtcPeriod};
pub use report::DEFAULT_INTERVAL_MIN;
pub use scales::{JD, UT};
pub use site::{
    horizon_dip, slew_time, Site, SunSetRiseTimes, ASTRONOMICAL_TWILIGHT, EARTH_RADIUS_M,
    NAUTICAL_TWILIGHT,
};
pub use snapshot::Snapshot;
pub use target::{parse_equinox, CatalogRecord, Target, DEFAULT_EQUINOX};

/// Julian Date on the TT axis.
pub type JulianDate = Time<JD>;
