// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Night-long sampling and plain-text reports.

use crate::angle;
use crate::error::SiteError;
use crate::site::Site;
use crate::snapshot::Snapshot;
use crate::target::Target;
use chrono::{DateTime, TimeDelta, Timelike, Utc};
use chrono_tz::Tz;

/// Default sampling step of [`Site::target_info`], minutes.
pub const DEFAULT_INTERVAL_MIN: u32 = 5;

/// Margin added before the first and after the last sample, minutes.
const MARGIN_MIN: i64 = 15;

/// Floors the minute to a multiple of `interval_min` and sets the second to 5.
fn clock_boundary(t: DateTime<Utc>, interval_min: u32) -> DateTime<Utc> {
    let minute = t.minute() - t.minute() % interval_min;
    t.with_minute(minute)
        .and_then(|t| t.with_second(5))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}

impl Site {
    /// Snapshots of `target` every `interval_min` minutes from 15 minutes
    /// before `start` (default: the next sunset) to 15 minutes after `stop`
    /// (default: the sunrise following `start`).
    ///
    /// Samples sit on rounded clock times; the end is exclusive.
    pub fn target_info(
        &self,
        target: &Target,
        start: impl Into<Option<DateTime<Utc>>>,
        stop: impl Into<Option<DateTime<Utc>>>,
        interval_min: u32,
    ) -> Result<Vec<Snapshot>, SiteError> {
        let interval_min = interval_min.max(1);
        let start = match start.into() {
            Some(start) => start,
            None => self.sunset(None)?,
        };
        let stop = match stop.into() {
            Some(stop) => stop,
            None => self.sunrise(start)?,
        };

        let margin = TimeDelta::minutes(MARGIN_MIN);
        let first = clock_boundary(start - margin, interval_min);
        let last = clock_boundary(stop + margin, interval_min);
        let step = TimeDelta::minutes(i64::from(interval_min));

        let mut history = Vec::new();
        let mut t = first;
        while t < last {
            history.push(self.calc(target, &t));
            t += step;
        }
        Ok(history)
    }

    /// Sunset, twilight and sunrise times of the night following `date`,
    /// printed in `tz` (default: the site zone).
    pub fn text_almanac(&self, date: DateTime<Utc>, tz: Option<Tz>) -> Result<String, SiteError> {
        let tz = tz.unwrap_or(self.timezone());
        let hm = |t: DateTime<Utc>| t.with_timezone(&tz).format("%H:%M").to_string();
        let times = self.sun_set_rise_times(date)?;
        let rule = "_".repeat(30);

        let lines = [
            format!(
                "Almanac for the night of {}",
                date.with_timezone(&tz).format("%Y-%m-%d")
            ),
            String::new(),
            "Evening".to_owned(),
            rule.clone(),
            format!("Sunset: {}", hm(times.sunset)),
            format!("12d: {}", hm(times.evening_twilight_12)),
            format!("18d: {}", hm(times.evening_twilight_18)),
            String::new(),
            "Morning".to_owned(),
            rule,
            format!("18d: {}", hm(times.morning_twilight_18)),
            format!("12d: {}", hm(times.morning_twilight_12)),
            format!("Sunrise: {}", hm(times.sunrise)),
        ];
        let mut text = lines.join("\n");
        text.push('\n');
        Ok(text)
    }

    /// Fixed-width table of [`Site::target_info`] samples: local date, UTC,
    /// LMST, hour angle, parallactic angle, airmass, Moon altitude and Moon
    /// separation.
    pub fn target_info_table(
        &self,
        target: &Target,
        start: impl Into<Option<DateTime<Utc>>>,
        stop: impl Into<Option<DateTime<Utc>>>,
        interval_min: u32,
    ) -> Result<String, SiteError> {
        let history = self.target_info(target, start, stop, interval_min)?;

        let header = format!(
            "{:<16}  {:>5}  {:>5}  {:>5}  {:>7} {:>6} {:>6} {:>7}",
            "Date", "UTC", "LMST", "HA", "PA", "AM", "MnAlt", "MnSep"
        );
        let mut lines = vec![header.clone(), "_".repeat(header.chars().count())];
        for info in &history {
            lines.push(format!(
                "{:<16}  {:>5}  {:>5}  {:>5}  {:>7.2} {:>6.2} {:>6.2} {:>7.2}",
                info.local_time().format("%d%b%Y  %H:%M"),
                info.instant().format("%H:%M"),
                angle::format_hours_minutes(info.lmst()),
                angle::format_hours_minutes(info.hour_angle()),
                info.parallactic_angle().value(),
                info.airmass(),
                info.moon_altitude().value(),
                info.moon_separation().value(),
            ));
        }
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::tests::subaru;
    use chrono::TimeZone;

    fn vega() -> Target {
        Target::parse("vega", "18:36:56.3", "+38:47:01", "2000").unwrap()
    }

    #[test]
    fn clock_boundary_rounds_down() {
        let t = Utc.with_ymd_and_hms(2014, 4, 29, 5, 17, 42).unwrap();
        assert_eq!(
            clock_boundary(t, 5),
            Utc.with_ymd_and_hms(2014, 4, 29, 5, 15, 5).unwrap()
        );
        assert_eq!(
            clock_boundary(t, 60),
            Utc.with_ymd_and_hms(2014, 4, 29, 5, 0, 5).unwrap()
        );
    }

    #[test]
    fn samples_cover_the_padded_interval() {
        let site = subaru();
        let start = Utc.with_ymd_and_hms(2014, 4, 29, 6, 0, 0).unwrap();
        let stop = Utc.with_ymd_and_hms(2014, 4, 29, 7, 0, 0).unwrap();
        let history = site.target_info(&vega(), start, stop, 10).unwrap();

        // 05:40:05 up to, but excluding, 07:10:05
        assert_eq!(history.len(), 9);
        assert_eq!(
            history[0].instant(),
            Utc.with_ymd_and_hms(2014, 4, 29, 5, 40, 5).unwrap()
        );
        assert_eq!(
            history[8].instant(),
            Utc.with_ymd_and_hms(2014, 4, 29, 7, 0, 5).unwrap()
        );
    }

    #[test]
    fn default_range_spans_the_night() {
        let mut site = subaru();
        site.set_date(&Utc.with_ymd_and_hms(2014, 4, 29, 22, 0, 0).unwrap());
        let history = site.target_info(&vega(), None, None, 30).unwrap();
        let sunset = site.sunset(None).unwrap();
        let sunrise = site.sunrise(sunset).unwrap();
        let first = history.first().unwrap().instant();
        let last = history.last().unwrap().instant();
        assert!(first <= sunset - TimeDelta::minutes(14));
        assert!(last >= sunrise - TimeDelta::minutes(30));
        assert!(last < sunrise + TimeDelta::minutes(15));
    }

    #[test]
    fn almanac_layout() {
        let site = subaru();
        let noon = Utc.with_ymd_and_hms(2014, 4, 29, 22, 0, 0).unwrap();
        let text = site.text_almanac(noon, None).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Almanac for the night of 2014-04-29");
        assert_eq!(lines[2], "Evening");
        assert_eq!(lines[3], "_".repeat(30));
        assert!(lines[4].starts_with("Sunset: 18:5"));
        assert!(lines[5].starts_with("12d: 19:3"));
        assert!(lines[6].starts_with("18d: 20:0"));
        assert_eq!(lines[8], "Morning");
        assert_eq!(lines[9], "_".repeat(30));
        assert!(lines[10].starts_with("18d: 04:3"));
        assert!(lines[12].starts_with("Sunrise: 05:4"));
        assert_eq!(lines.len(), 13);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn almanac_in_utc() {
        let site = subaru();
        let noon = Utc.with_ymd_and_hms(2014, 4, 29, 22, 0, 0).unwrap();
        let text = site.text_almanac(noon, Some(chrono_tz::UTC)).unwrap();
        assert!(text.contains("Sunset: 04:5"));
    }

    #[test]
    fn table_has_header_rule_and_rows() {
        let site = subaru();
        let start = Utc.with_ymd_and_hms(2014, 4, 29, 12, 0, 0).unwrap();
        let stop = Utc.with_ymd_and_hms(2014, 4, 29, 13, 0, 0).unwrap();
        let table = site.target_info_table(&vega(), start, stop, 30).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("Date"));
        assert!(lines[1].chars().all(|c| c == '_'));
        assert_eq!(lines[1].len(), lines[0].len());
        // 11:30:05, 12:00:05, 12:30:05
        assert_eq!(lines.len(), 2 + 3);
        assert!(lines[2].starts_with("29Apr2014  01:30"));
        assert_eq!(&lines[2][18..23], "11:30");
    }
}
