// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observability decision.
//!
//! Given a target, an interval `[start, stop)` and elevation, airmass and
//! duration constraints, [`Site::observable`] finds the window in which the
//! target can be tracked and decides whether that window is long enough.
//!
//! 1. The effective minimum altitude is `el_min`, raised to the altitude of
//!    the requested airmass when one is given.
//! 2. If the target is above that altitude at `start`, the window opens at
//!    `start`; otherwise it opens at the next rising. A target that never
//!    rises is not observable.
//! 3. The window closes at the next setting or at `stop`, whichever comes
//!    first. A target that never sets closes at `stop`.
//! 4. Spans above `el_max` are carved out; the first remaining sub-window
//!    long enough for the requested duration is reported.
//!
//! Only the rise/set pair nearest `start` is considered, so an interval
//! spanning more than one transit reports the first one only.

use crate::airmass;
use crate::ephemeris::{Body, EphemerisProvider, SiteGeometry};
use crate::error::{EphemerisError, ObservabilityError};
use crate::period::{complement_within, intersect_periods, UtcPeriod};
use crate::site::Site;
use crate::target::Target;
use chrono::{DateTime, TimeZone, Utc};
use qtty::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Elevation, airmass and duration limits of an observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub el_min: Degrees,
    pub el_max: Degrees,
    /// Minimum continuous tracking time.
    pub duration: Seconds,
    /// Maximum airmass; raises `el_min` when stricter.
    pub airmass: Option<f64>,
}

impl Constraints {
    pub fn new(el_min: Degrees, el_max: Degrees, duration: Seconds) -> Self {
        Self {
            el_min,
            el_max,
            duration,
            airmass: None,
        }
    }

    pub fn with_airmass(self, airmass: f64) -> Self {
        Self {
            airmass: Some(airmass),
            ..self
        }
    }

    fn validate(&self) -> Result<(), ObservabilityError> {
        let (el_min, el_max) = (self.el_min.value(), self.el_max.value());
        if !(el_min < el_max) {
            return Err(ObservabilityError::InvalidElevationBounds { el_min, el_max });
        }
        let duration = self.duration.value();
        if !duration.is_finite() || duration < 0.0 {
            return Err(ObservabilityError::InvalidDuration(duration));
        }
        Ok(())
    }

    /// Lowest altitude satisfying both `el_min` and the airmass limit.
    pub fn minimum_altitude(&self) -> Degrees {
        match self.airmass {
            Some(am) => {
                let from_airmass = airmass::altitude_for_airmass(am);
                if from_airmass > self.el_min {
                    from_airmass
                } else {
                    self.el_min
                }
            }
            None => self.el_min,
        }
    }
}

/// Outcome of an observability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observability {
    pub is_observable: bool,
    /// Start of the reported window.
    pub rise: Option<DateTime<Utc>>,
    /// End of the reported window.
    pub usable_end: Option<DateTime<Utc>>,
}

impl Observability {
    /// The target never reaches the minimum altitude.
    pub const NEVER_UP: Self = Self {
        is_observable: false,
        rise: None,
        usable_end: None,
    };

    /// Reported window, if any.
    pub fn window(&self) -> Option<UtcPeriod> {
        match (self.rise, self.usable_end) {
            (Some(rise), Some(end)) => Some(UtcPeriod::new(rise, end)),
            _ => None,
        }
    }
}

impl Site {
    /// Decides whether `target` can be tracked inside `[start, stop)` under
    /// `constraints`.
    ///
    /// ```
    /// use skywindow::{Constraints, Site, Target};
    /// use qtty::{Degrees, Seconds};
    ///
    /// let site = Site::new("Subaru", "US/Hawaii", "-155:28:48.900", "+19:49:42.600", 4163.0, 615.0, 0.0)
    ///     .unwrap();
    /// let vega = Target::parse("vega", "18:36:56.3", "+38:47:01", "2000").unwrap();
    /// let start = site.parse_date("2014-04-29 04:30", None).unwrap();
    /// let stop = site.parse_date("2014-04-29 05:30", None).unwrap();
    /// let limits = Constraints::new(Degrees::new(15.0), Degrees::new(85.0), Seconds::new(3594.0));
    /// assert!(site.observable(&vega, &start, &stop, &limits).unwrap().is_observable);
    /// ```
    pub fn observable<Z: TimeZone>(
        &self,
        target: &Target,
        start: &DateTime<Z>,
        stop: &DateTime<Z>,
        constraints: &Constraints,
    ) -> Result<Observability, ObservabilityError> {
        let start = start.with_timezone(&Utc);
        let stop = stop.with_timezone(&Utc);
        if stop <= start {
            return Err(ObservabilityError::InvalidInterval);
        }
        constraints.validate()?;

        let provider = self.provider();
        let body = target.body();
        let min_alt = constraints.minimum_altitude();
        let geometry = self.geometry(start, min_alt);
        log::debug!("{}: effective minimum altitude {min_alt}", target.name());

        let altitude = provider.position(&body, &geometry).alt;
        let rise = if altitude >= min_alt {
            start
        } else {
            match provider.next_rising(&body, &geometry) {
                Ok(rise) => rise,
                Err(EphemerisError::NeverUp) => {
                    log::debug!("{}: never rises above {min_alt}", target.name());
                    return Ok(Observability::NEVER_UP);
                }
                Err(e) => return Err(e.into()),
            }
        };
        let set = match provider.next_setting(&body, &geometry) {
            Ok(set) => set,
            Err(EphemerisError::AlwaysUp) => {
                log::warn!(
                    "{}: never sets below {min_alt}; using interval end {stop}",
                    target.name()
                );
                stop
            }
            Err(e) => return Err(e.into()),
        };

        if rise < start {
            return Err(ObservabilityError::InternalConsistency { rise, start });
        }
        let usable_end = set.min(stop);
        log::debug!("{}: rise {rise}, set {set}, usable end {usable_end}", target.name());

        let needed = constraints.duration;
        if constraints.el_max >= Degrees::new(90.0) || usable_end <= rise {
            let duration = UtcPeriod::new(rise, usable_end).duration_seconds();
            return Ok(Observability {
                is_observable: duration >= needed,
                rise: Some(rise),
                usable_end: Some(usable_end),
            });
        }

        let visible = [UtcPeriod::new(rise, usable_end)];
        let high = self.spans_above(provider, &body, &geometry, constraints.el_max, &visible[0])?;
        let below_max = complement_within(UtcPeriod::new(start, stop), &high);
        let windows = intersect_periods(&visible, &below_max);

        let chosen = windows
            .iter()
            .find(|w| w.duration_seconds() >= needed)
            .or_else(|| windows.first());
        Ok(match chosen {
            Some(window) => {
                log::debug!("{}: window {window} after removing spans above {}", target.name(), constraints.el_max);
                Observability {
                    is_observable: window.duration_seconds() >= needed,
                    rise: Some(window.start),
                    usable_end: Some(window.end),
                }
            }
            None => {
                log::debug!("{}: above {} for the whole window", target.name(), constraints.el_max);
                Observability::NEVER_UP
            }
        })
    }

    /// Span of `window` during which `body` is above `el_max`.
    fn spans_above(
        &self,
        provider: &dyn EphemerisProvider,
        body: &Body,
        geometry: &SiteGeometry,
        el_max: Degrees,
        window: &UtcPeriod,
    ) -> Result<Vec<UtcPeriod>, ObservabilityError> {
        let ceiling = geometry.with_horizon(el_max).at(window.start);
        let enters = if provider.position(body, &ceiling).alt >= el_max {
            window.start
        } else {
            match provider.next_rising(body, &ceiling) {
                Ok(t) if t < window.end => t,
                Ok(_) | Err(EphemerisError::NeverUp) => return Ok(Vec::new()),
                Err(e) => return Err(e.into()),
            }
        };
        let leaves = match provider.next_setting(body, &ceiling.at(enters)) {
            Ok(t) => t.min(window.end),
            Err(EphemerisError::AlwaysUp) => window.end,
            Err(e) => return Err(e.into()),
        };
        Ok(vec![UtcPeriod::new(enters, leaves)])
    }
}
