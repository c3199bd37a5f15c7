// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observing site.
//!
//! A [`Site`] couples a location and its atmosphere with a civil time zone
//! and an [`EphemerisProvider`]. Every query builds a fresh
//! [`SiteGeometry`] for the instant and horizon it needs, so queries never
//! observe each other; the only mutable state is the *current date*, which
//! is consulted solely when a query is given no explicit instant.
//!
//! ```
//! use skywindow::Site;
//! use chrono::{TimeZone, Utc};
//!
//! let site = Site::new("Subaru", "US/Hawaii", "-155:28:48.900", "+19:49:42.600", 4163.0, 615.0, 0.0)
//!     .unwrap();
//! let noon = Utc.with_ymd_and_hms(2014, 4, 29, 22, 0, 0).unwrap();
//! let times = site.sun_set_rise_times(noon).unwrap();
//! assert!(times.sunset < times.sunrise);
//! ```

use crate::angle;
use crate::ephemeris::{Body, EphemerisProvider, LowPrecisionEphemeris, SiteGeometry};
use crate::error::{EphemerisError, SiteError};
use crate::snapshot::Snapshot;
use crate::target::Target;
use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use qtty::*;
use std::sync::Arc;

/// Earth equatorial radius used for the horizon dip, metres.
pub const EARTH_RADIUS_M: f64 = 6_378_160.0;

/// Sun altitude ending nautical twilight.
pub const NAUTICAL_TWILIGHT: Degrees = Degrees::new(-12.0);

/// Sun altitude ending astronomical twilight.
pub const ASTRONOMICAL_TWILIGHT: Degrees = Degrees::new(-18.0);

/// Dip of the sea-level horizon seen from `elevation_m`.
pub fn horizon_dip(elevation_m: f64) -> Degrees {
    let ratio = EARTH_RADIUS_M / (EARTH_RADIUS_M + elevation_m.max(0.0));
    -Radians::new(ratio.acos()).to::<Degree>()
}

/// Solar events of one night, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunSetRiseTimes {
    pub sunset: DateTime<Utc>,
    pub evening_twilight_12: DateTime<Utc>,
    pub evening_twilight_18: DateTime<Utc>,
    pub morning_twilight_18: DateTime<Utc>,
    pub morning_twilight_12: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
}

impl SunSetRiseTimes {
    /// `(sunset, evening 12°, evening 18°, morning 18°, morning 12°, sunrise)`.
    pub fn as_array(&self) -> [DateTime<Utc>; 6] {
        [
            self.sunset,
            self.evening_twilight_12,
            self.evening_twilight_18,
            self.morning_twilight_18,
            self.morning_twilight_12,
            self.sunrise,
        ]
    }
}

/// Time to slew across `d_az` and `d_el` with independent axis rates.
///
/// The axes move simultaneously, so the slower one sets the time.
pub fn slew_time(d_az: Degrees, d_el: Degrees, rate_az: f64, rate_el: f64) -> Seconds {
    Seconds::new((d_el.abs().value() / rate_el).max(d_az.abs().value() / rate_az))
}

/// An observer location with its time zone and ephemeris.
#[derive(Debug, Clone)]
pub struct Site {
    name: String,
    timezone: Tz,
    longitude: Degrees,
    latitude: Degrees,
    elevation_m: f64,
    pressure_mbar: f64,
    temperature_c: f64,
    horizon: Degrees,
    date: DateTime<Utc>,
    provider: Arc<dyn EphemerisProvider>,
}

impl Site {
    /// Builds a site using the built-in [`LowPrecisionEphemeris`].
    ///
    /// `longitude` (east positive) and `latitude` are sexagesimal or decimal
    /// degrees; `timezone` is an IANA name such as `"US/Hawaii"`.
    pub fn new(
        name: &str,
        timezone: &str,
        longitude: &str,
        latitude: &str,
        elevation_m: f64,
        pressure_mbar: f64,
        temperature_c: f64,
    ) -> Result<Self, SiteError> {
        let timezone: Tz = timezone
            .parse()
            .map_err(|_| SiteError::UnknownTimezone(timezone.to_owned()))?;
        Self::from_parts(
            name,
            timezone,
            angle::parse_degrees(longitude)?,
            angle::parse_degrees(latitude)?,
            elevation_m,
            pressure_mbar,
            temperature_c,
        )
    }

    /// Builds a site from already-parsed values.
    pub fn from_parts(
        name: &str,
        timezone: Tz,
        longitude: Degrees,
        latitude: Degrees,
        elevation_m: f64,
        pressure_mbar: f64,
        temperature_c: f64,
    ) -> Result<Self, SiteError> {
        if !latitude.value().is_finite() || latitude.abs() > Degrees::new(90.0) {
            return Err(SiteError::InvalidLocation(format!(
                "latitude {latitude} outside [-90°, 90°]"
            )));
        }
        if !longitude.value().is_finite() {
            return Err(SiteError::InvalidLocation(format!("longitude {longitude}")));
        }
        if !elevation_m.is_finite() || elevation_m <= -EARTH_RADIUS_M {
            return Err(SiteError::InvalidLocation(format!(
                "elevation {elevation_m} m"
            )));
        }
        if !pressure_mbar.is_finite() || pressure_mbar < 0.0 {
            return Err(SiteError::InvalidLocation(format!(
                "pressure {pressure_mbar} mbar"
            )));
        }
        if !temperature_c.is_finite() || temperature_c <= -273.15 {
            return Err(SiteError::InvalidLocation(format!(
                "temperature {temperature_c} °C"
            )));
        }

        Ok(Self {
            name: name.to_owned(),
            timezone,
            longitude: longitude.wrap_signed(),
            latitude,
            elevation_m,
            pressure_mbar,
            temperature_c,
            horizon: horizon_dip(elevation_m),
            date: Utc::now(),
            provider: Arc::new(LowPrecisionEphemeris::default()),
        })
    }

    /// Replaces the ephemeris provider.
    pub fn with_provider(mut self, provider: Arc<dyn EphemerisProvider>) -> Self {
        self.provider = provider;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn longitude(&self) -> Degrees {
        self.longitude
    }

    pub fn latitude(&self) -> Degrees {
        self.latitude
    }

    pub fn elevation_m(&self) -> f64 {
        self.elevation_m
    }

    pub fn pressure_mbar(&self) -> f64 {
        self.pressure_mbar
    }

    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    /// Dip horizon derived from the elevation.
    pub fn horizon(&self) -> Degrees {
        self.horizon
    }

    /// Current date, the default instant of every query.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn provider(&self) -> &dyn EphemerisProvider {
        self.provider.as_ref()
    }

    pub(crate) fn shared_provider(&self) -> Arc<dyn EphemerisProvider> {
        Arc::clone(&self.provider)
    }

    /// Stores `date`, normalized to UTC, as the current date.
    pub fn set_date<Z: TimeZone>(&mut self, date: &DateTime<Z>) {
        self.date = date.with_timezone(&Utc);
    }

    /// Resolves an optional query instant against the current date.
    #[inline]
    fn resolve(&self, date: Option<DateTime<Utc>>) -> DateTime<Utc> {
        date.unwrap_or(self.date)
    }

    /// Query geometry at `instant` (default: the current date) with
    /// `horizon` (default: the dip horizon).
    pub fn geometry(
        &self,
        instant: impl Into<Option<DateTime<Utc>>>,
        horizon: impl Into<Option<Degrees>>,
    ) -> SiteGeometry {
        SiteGeometry {
            longitude: self.longitude,
            latitude: self.latitude,
            elevation_m: self.elevation_m,
            pressure_mbar: self.pressure_mbar,
            temperature_c: self.temperature_c,
            horizon: horizon.into().unwrap_or(self.horizon),
            instant: self.resolve(instant.into()),
        }
    }

    // ── Civil time ────────────────────────────────────────────────────────

    /// Attaches `tz` to a wall-clock time; ambiguous times take the earlier
    /// instant.
    fn localize(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Tz>, SiteError> {
        match tz.from_local_datetime(&naive) {
            LocalResult::Single(t) => Ok(t),
            LocalResult::Ambiguous(earliest, latest) => Ok(earliest.min(latest)),
            LocalResult::None => Err(SiteError::NonexistentLocalTime(
                naive.to_string(),
                tz.name().to_owned(),
            )),
        }
    }

    /// Parses `YYYY-MM-DD[ HH[:MM[:SS]]]` as wall-clock time in `tz`
    /// (default: the site zone). The most precise form that matches wins.
    pub fn parse_date(&self, text: &str, tz: Option<Tz>) -> Result<DateTime<Tz>, SiteError> {
        let tz = tz.unwrap_or(self.timezone);
        let text = text.trim();
        let naive = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .or_else(|| {
                let (day, hour) = text.split_once(' ')?;
                let hour: u32 = hour.trim().parse().ok()?;
                NaiveDate::parse_from_str(day, "%Y-%m-%d")
                    .ok()?
                    .and_hms_opt(hour, 0, 0)
            })
            .or_else(|| {
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .ok()
                    .map(|day| day.and_time(NaiveTime::MIN))
            })
            .ok_or_else(|| SiteError::DateFormat(text.to_owned()))?;
        Self::localize(naive, tz)
    }

    /// Wall-clock time in the site zone to UTC.
    pub fn local_to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>, SiteError> {
        Self::localize(local, self.timezone).map(|t| t.with_timezone(&Utc))
    }

    /// UTC to the site zone.
    pub fn utc_to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.timezone)
    }

    /// Local noon of a calendar day, in UTC.
    pub fn local_noon_utc(&self, day: NaiveDate) -> Result<DateTime<Utc>, SiteError> {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
        self.local_to_utc(day.and_time(noon))
    }

    // ── Solar events ──────────────────────────────────────────────────────

    fn sun_setting(
        &self,
        date: Option<DateTime<Utc>>,
        horizon: Degrees,
    ) -> Result<DateTime<Utc>, SiteError> {
        let geometry = self.geometry(date, horizon);
        Ok(self.provider.next_setting(&Body::Sun, &geometry)?)
    }

    fn sun_rising(
        &self,
        date: Option<DateTime<Utc>>,
        horizon: Degrees,
    ) -> Result<DateTime<Utc>, SiteError> {
        let geometry = self.geometry(date, horizon);
        Ok(self.provider.next_rising(&Body::Sun, &geometry)?)
    }

    /// Next sunset after `date` on the dip horizon.
    pub fn sunset(
        &self,
        date: impl Into<Option<DateTime<Utc>>>,
    ) -> Result<DateTime<Utc>, SiteError> {
        self.sun_setting(date.into(), self.horizon)
    }

    /// Next sunrise after `date` on the dip horizon.
    pub fn sunrise(
        &self,
        date: impl Into<Option<DateTime<Utc>>>,
    ) -> Result<DateTime<Utc>, SiteError> {
        self.sun_rising(date.into(), self.horizon)
    }

    /// End of evening nautical twilight (Sun setting through −12°).
    pub fn evening_twilight_12(
        &self,
        date: impl Into<Option<DateTime<Utc>>>,
    ) -> Result<DateTime<Utc>, SiteError> {
        self.sun_setting(date.into(), NAUTICAL_TWILIGHT)
    }

    /// End of evening astronomical twilight (Sun setting through −18°).
    pub fn evening_twilight_18(
        &self,
        date: impl Into<Option<DateTime<Utc>>>,
    ) -> Result<DateTime<Utc>, SiteError> {
        self.sun_setting(date.into(), ASTRONOMICAL_TWILIGHT)
    }

    /// Start of morning nautical twilight (Sun rising through −12°).
    pub fn morning_twilight_12(
        &self,
        date: impl Into<Option<DateTime<Utc>>>,
    ) -> Result<DateTime<Utc>, SiteError> {
        self.sun_rising(date.into(), NAUTICAL_TWILIGHT)
    }

    /// Start of morning astronomical twilight (Sun rising through −18°).
    pub fn morning_twilight_18(
        &self,
        date: impl Into<Option<DateTime<Utc>>>,
    ) -> Result<DateTime<Utc>, SiteError> {
        self.sun_rising(date.into(), ASTRONOMICAL_TWILIGHT)
    }

    /// All six solar events following `date`.
    pub fn sun_set_rise_times(
        &self,
        date: impl Into<Option<DateTime<Utc>>>,
    ) -> Result<SunSetRiseTimes, SiteError> {
        let date = date.into();
        Ok(SunSetRiseTimes {
            sunset: self.sunset(date)?,
            evening_twilight_12: self.evening_twilight_12(date)?,
            evening_twilight_18: self.evening_twilight_18(date)?,
            morning_twilight_18: self.morning_twilight_18(date)?,
            morning_twilight_12: self.morning_twilight_12(date)?,
            sunrise: self.sunrise(date)?,
        })
    }

    /// Midpoint between the next sunset and sunrise.
    pub fn night_center(
        &self,
        date: impl Into<Option<DateTime<Utc>>>,
    ) -> Result<DateTime<Utc>, SiteError> {
        let date = date.into();
        let sunset = self.sunset(date)?;
        let sunrise = self.sunrise(date)?;
        Ok(sunset + (sunrise - sunset) / 2)
    }

    // ── Lunar events ──────────────────────────────────────────────────────

    /// Maps a crossing to `None` when the Moon has no such event in the
    /// search span.
    fn lunar_event(
        crossing: Result<DateTime<Utc>, EphemerisError>,
    ) -> Result<Option<DateTime<Utc>>, SiteError> {
        match crossing {
            Ok(t) => Ok(Some(t)),
            Err(EphemerisError::NeverUp | EphemerisError::AlwaysUp) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Next moonrise, or `None` if it happens before the next sunset.
    pub fn moon_rise(
        &self,
        date: impl Into<Option<DateTime<Utc>>>,
    ) -> Result<Option<DateTime<Utc>>, SiteError> {
        let date = date.into();
        let geometry = self.geometry(date, None);
        let rise = Self::lunar_event(self.provider.next_rising(&Body::Moon, &geometry))?;
        let sunset = self.sunset(date)?;
        Ok(rise.filter(|t| *t >= sunset))
    }

    /// Next moonset, or `None` if it happens after the next sunrise.
    pub fn moon_set(
        &self,
        date: impl Into<Option<DateTime<Utc>>>,
    ) -> Result<Option<DateTime<Utc>>, SiteError> {
        let date = date.into();
        let geometry = self.geometry(date, None);
        let set = Self::lunar_event(self.provider.next_setting(&Body::Moon, &geometry))?;
        let sunrise = self.sunrise(date)?;
        Ok(set.filter(|t| *t <= sunrise))
    }

    /// Illuminated fraction of the Moon at `date`.
    pub fn moon_phase(&self, date: impl Into<Option<DateTime<Utc>>>) -> f64 {
        self.provider.moon_illumination(self.resolve(date.into()))
    }

    // ── Targets ───────────────────────────────────────────────────────────

    /// Position snapshot of `target` at `instant`.
    pub fn calc<Z: TimeZone>(&self, target: &Target, instant: &DateTime<Z>) -> Snapshot {
        Snapshot::new(target, self, instant)
    }

    /// `(alt₁ − alt₂, az₁ − az₂)` of two targets at `instant`.
    pub fn distance<Z: TimeZone>(
        &self,
        first: &Target,
        second: &Target,
        instant: &DateTime<Z>,
    ) -> (Degrees, Degrees) {
        let a = self.calc(first, instant);
        let b = self.calc(second, instant);
        (a.alt() - b.alt(), a.az() - b.az())
    }
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn subaru() -> Site {
        Site::new(
            "Subaru",
            "US/Hawaii",
            "-155:28:48.900",
            "+19:49:42.600",
            4163.0,
            615.0,
            0.0,
        )
        .unwrap()
    }

    fn hst(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        subaru()
            .timezone()
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn horizon_dip_at_summit() {
        assert!((subaru().horizon() - Degrees::new(-2.0695)).abs() < Degrees::new(1e-3));
        assert_eq!(horizon_dip(0.0), Degrees::new(0.0));
    }

    #[test]
    fn rejects_bad_locations() {
        assert!(matches!(
            Site::new("x", "Mars/Olympus", "0", "0", 0.0, 1010.0, 10.0),
            Err(SiteError::UnknownTimezone(_))
        ));
        assert!(matches!(
            Site::new("x", "UTC", "0", "95", 0.0, 1010.0, 10.0),
            Err(SiteError::InvalidLocation(_))
        ));
        assert!(matches!(
            Site::new("x", "UTC", "0:aa", "0", 0.0, 1010.0, 10.0),
            Err(SiteError::Angle(_))
        ));
        assert!(matches!(
            Site::new("x", "UTC", "0", "0", 0.0, -5.0, 10.0),
            Err(SiteError::InvalidLocation(_))
        ));
    }

    #[test]
    fn geometry_defaults_and_overrides() {
        let mut site = subaru();
        let t = hst(2014, 4, 29, 12, 0, 0);
        site.set_date(&t);
        let g = site.geometry(None, None);
        assert_eq!(g.instant, t);
        assert_eq!(g.horizon, site.horizon());

        let other = hst(2014, 5, 1, 0, 0, 0);
        let g = site.geometry(other, Degrees::new(15.0));
        assert_eq!(g.instant, other);
        assert_eq!(g.horizon, Degrees::new(15.0));
    }

    #[test]
    fn set_date_normalizes_to_utc() {
        let mut site = subaru();
        let local = site.parse_date("2014-04-29 12:00", None).unwrap();
        site.set_date(&local);
        assert_eq!(site.date(), Utc.with_ymd_and_hms(2014, 4, 29, 22, 0, 0).unwrap());
    }

    #[test]
    fn parse_date_precisions() {
        let site = subaru();
        let tz = site.timezone();
        let full = site.parse_date("2014-04-15 19:00:30", None).unwrap();
        assert_eq!(full, tz.with_ymd_and_hms(2014, 4, 15, 19, 0, 30).unwrap());
        let minutes = site.parse_date("2014-04-15 19:05", None).unwrap();
        assert_eq!(minutes, tz.with_ymd_and_hms(2014, 4, 15, 19, 5, 0).unwrap());
        let hour = site.parse_date("2014-04-15 19", None).unwrap();
        assert_eq!(hour, tz.with_ymd_and_hms(2014, 4, 15, 19, 0, 0).unwrap());
        let day = site.parse_date("2014-04-15", None).unwrap();
        assert_eq!(day, tz.with_ymd_and_hms(2014, 4, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_date_with_explicit_zone() {
        let site = subaru();
        let utc = site.parse_date("2014-04-15 19:00", Some(chrono_tz::UTC)).unwrap();
        assert_eq!(
            utc.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2014, 4, 15, 19, 0, 0).unwrap()
        );
    }

    #[test]
    fn parse_date_rejects_garbage() {
        let site = subaru();
        assert!(matches!(
            site.parse_date("15/04/2014", None),
            Err(SiteError::DateFormat(_))
        ));
        assert!(matches!(
            site.parse_date("2014-04-15 25:00", None),
            Err(SiteError::DateFormat(_))
        ));
    }

    #[test]
    fn dst_gap_and_overlap() {
        let site = Site::new("x", "America/New_York", "-74", "40.7", 10.0, 1010.0, 10.0).unwrap();
        assert!(matches!(
            site.parse_date("2021-03-14 02:30", None),
            Err(SiteError::NonexistentLocalTime(_, _))
        ));
        let ambiguous = site.parse_date("2021-11-07 01:30", None).unwrap();
        // earlier of the two instants is the EDT one (UTC−4)
        assert_eq!(
            ambiguous.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2021, 11, 7, 5, 30, 0).unwrap()
        );
    }

    #[test]
    fn zone_conversions() {
        let site = subaru();
        let naive = NaiveDate::from_ymd_opt(2014, 4, 29)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        let utc = site.local_to_utc(naive).unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2014, 4, 30, 6, 0, 0).unwrap());
        assert_eq!(site.utc_to_local(utc).naive_local(), naive);
        let noon = site
            .local_noon_utc(NaiveDate::from_ymd_opt(2014, 4, 29).unwrap())
            .unwrap();
        assert_eq!(noon, Utc.with_ymd_and_hms(2014, 4, 29, 22, 0, 0).unwrap());
    }

    #[test]
    fn sun_events_are_ordered() {
        let site = subaru();
        let times = site.sun_set_rise_times(hst(2014, 4, 29, 12, 0, 0)).unwrap();
        let all = times.as_array();
        assert!(all.windows(2).all(|w| w[0] < w[1]), "{all:?}");

        let expected_sunset = hst(2014, 4, 29, 18, 51, 18);
        assert!((times.sunset - expected_sunset).num_seconds().abs() < 60);
        let expected_sunrise = hst(2014, 4, 30, 5, 46, 48);
        assert!((times.sunrise - expected_sunrise).num_seconds().abs() < 60);
    }

    #[test]
    fn night_center_is_midpoint() {
        let site = subaru();
        let noon = hst(2014, 4, 29, 12, 0, 0);
        let center = site.night_center(noon).unwrap();
        let sunset = site.sunset(noon).unwrap();
        let sunrise = site.sunrise(noon).unwrap();
        assert!(((center - sunset) - (sunrise - center)).num_seconds().abs() <= 1);
    }

    fn raw_moon_events(site: &Site, noon: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let geometry = site.geometry(noon, None);
        let rise = site.provider().next_rising(&Body::Moon, &geometry).unwrap();
        let set = site.provider().next_setting(&Body::Moon, &geometry).unwrap();
        (rise, set)
    }

    #[test]
    fn moonrise_before_sunset_is_dropped() {
        let site = subaru();
        let noon = hst(2014, 4, 10, 12, 0, 0);
        let (raw_rise, _) = raw_moon_events(&site, noon);
        let sunset = site.sunset(noon).unwrap();
        let expected = Utc.with_ymd_and_hms(2014, 4, 11, 0, 56, 42).unwrap();
        assert!((raw_rise - expected).num_seconds().abs() < 120, "{raw_rise}");
        assert!(raw_rise < sunset);

        assert_eq!(site.moon_rise(noon).unwrap(), None);
        let set = site.moon_set(noon).unwrap().unwrap();
        assert!(set <= site.sunrise(noon).unwrap());
    }

    #[test]
    fn moonset_after_sunrise_is_dropped() {
        let site = subaru();
        let noon = hst(2014, 4, 15, 12, 0, 0);
        let (_, raw_set) = raw_moon_events(&site, noon);
        let sunrise = site.sunrise(noon).unwrap();
        let expected = Utc.with_ymd_and_hms(2014, 4, 16, 17, 14, 33).unwrap();
        assert!((raw_set - expected).num_seconds().abs() < 120, "{raw_set}");
        assert!(raw_set > sunrise);

        assert_eq!(site.moon_set(noon).unwrap(), None);
    }

    #[test]
    fn degenerate_provider_search_surfaces_as_an_error() {
        let eph = LowPrecisionEphemeris {
            step: Minutes::new(0.0),
            ..Default::default()
        };
        let site = subaru().with_provider(Arc::new(eph));
        assert!(matches!(
            site.sunset(hst(2014, 4, 29, 12, 0, 0)),
            Err(SiteError::Ephemeris(EphemerisError::InvalidSearch(_)))
        ));
    }

    #[test]
    fn moon_phase_at_full_and_new_moon() {
        let site = subaru();
        let full = Utc.with_ymd_and_hms(2014, 4, 15, 7, 46, 0).unwrap();
        let new = Utc.with_ymd_and_hms(2014, 4, 29, 6, 3, 0).unwrap();
        assert!(site.moon_phase(full) > 0.99);
        assert!(site.moon_phase(new) < 0.01);
    }

    #[test]
    fn slew_time_is_set_by_the_slower_axis() {
        let t = slew_time(Degrees::new(-90.0), Degrees::new(10.0), 0.5, 0.5);
        assert_eq!(t, Seconds::new(180.0));
    }
}
