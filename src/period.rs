// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Half-open time windows.
//!
//! This module provides:
//! - [`TimeInstant`]: points in time usable as window endpoints
//! - [`Interval<T>`]: a `[start, end)` window over any [`TimeInstant`]
//! - [`UtcPeriod`]: the `DateTime<Utc>` window every public query reports
//! - [`complement_within`] / [`intersect_periods`]: list algebra used to carve
//!   elevation-limited sub-windows out of a rise/set window

use super::{Time, TimeScale};
use chrono::{DateTime, Utc};
use qtty::{Days, Second, Seconds};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

/// A point in time that can bound an [`Interval`].
pub trait TimeInstant: Copy + PartialOrd + fmt::Debug {
    /// Signed span between two instants.
    type Duration;

    /// `self − other`.
    fn difference(&self, other: &Self) -> Self::Duration;
}

impl<S: TimeScale> TimeInstant for Time<S> {
    type Duration = Days;

    #[inline]
    fn difference(&self, other: &Self) -> Days {
        *self - *other
    }
}

impl TimeInstant for DateTime<Utc> {
    type Duration = chrono::Duration;

    #[inline]
    fn difference(&self, other: &Self) -> chrono::Duration {
        *self - *other
    }
}

/// Represents the window `[start, end)` between two instants.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use skywindow::UtcPeriod;
///
/// let night = UtcPeriod::new(
///     Utc.with_ymd_and_hms(2014, 4, 29, 5, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2014, 4, 29, 15, 0, 0).unwrap(),
/// );
/// assert_eq!(night.duration_seconds().value(), 36_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<T: TimeInstant> {
    pub start: T,
    pub end: T,
}

/// Time-scale period alias (`Period<JD>`, `Period<UT>`).
pub type Period<S> = Interval<Time<S>>;

/// UTC interval alias.
pub type UtcPeriod = Interval<DateTime<Utc>>;

impl<T: TimeInstant> Interval<T> {
    /// Creates a new period between two time instants.
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// `end − start`.
    pub fn duration(&self) -> T::Duration {
        self.end.difference(&self.start)
    }

    /// Whether `instant` lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, instant: T) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Returns the overlapping sub-period between `self` and `other`.
    ///
    /// Periods are treated as half-open ranges `[start, end)`: if one period
    /// ends exactly when the other starts, the intersection is empty and `None`
    /// is returned.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = if self.start >= other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end <= other.end {
            self.end
        } else {
            other.end
        };

        if start < end {
            Some(Self::new(start, end))
        } else {
            None
        }
    }
}

impl<T: TimeInstant + fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl Interval<DateTime<Utc>> {
    /// Duration in seconds, with sub-second precision.
    pub fn duration_seconds(&self) -> Seconds {
        let duration = self.duration();
        match duration.num_microseconds() {
            Some(us) => Seconds::new(us as f64 / 1e6),
            None => Seconds::new(duration.num_seconds() as f64),
        }
    }

    /// Re-express both endpoints on a Julian time axis.
    #[inline]
    pub fn to_scale<S: TimeScale>(&self) -> Period<S> {
        Interval::new(Time::<S>::from_utc(self.start), Time::<S>::from_utc(self.end))
    }
}

impl<S: TimeScale> Interval<Time<S>> {
    /// Duration in seconds.
    #[inline]
    pub fn duration_seconds(&self) -> Seconds {
        self.duration().to::<Second>()
    }
}

// Serde support for UtcPeriod as `{ "start": RFC 3339, "end": RFC 3339 }`.
#[cfg(feature = "serde")]
impl Serialize for Interval<DateTime<Utc>> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("UtcPeriod", 2)?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("end", &self.end)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Interval<DateTime<Utc>> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        }

        let raw = Raw::deserialize(deserializer)?;
        if raw.end < raw.start {
            return Err(serde::de::Error::custom("period end precedes start"));
        }
        Ok(Interval::new(raw.start, raw.end))
    }
}

/// Returns the gaps (complement) of `periods` within the bounding `outer` period.
///
/// Given a sorted, non-overlapping list of sub-periods and a bounding period,
/// this returns the time intervals NOT covered by any sub-period.
///
/// Both `outer` and every element of `periods` must have `start <= end`.
/// The function runs in O(n) time with a single pass.
pub fn complement_within<T: TimeInstant>(
    outer: Interval<T>,
    periods: &[Interval<T>],
) -> Vec<Interval<T>> {
    let mut gaps = Vec::new();
    let mut cursor = outer.start;
    for p in periods {
        if p.start > cursor {
            let gap_end = if p.start < outer.end { p.start } else { outer.end };
            if cursor < gap_end {
                gaps.push(Interval::new(cursor, gap_end));
            }
        }
        if p.end > cursor {
            cursor = p.end;
        }
    }
    if cursor < outer.end {
        gaps.push(Interval::new(cursor, outer.end));
    }
    gaps
}

/// Returns the intersection of two sorted, non-overlapping period lists.
///
/// Uses an O(n+m) merge to find all overlapping spans, in chronological order.
pub fn intersect_periods<T: TimeInstant>(a: &[Interval<T>], b: &[Interval<T>]) -> Vec<Interval<T>> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if let Some(overlap) = a[i].intersection(&b[j]) {
            result.push(overlap);
        }
        if a[i].end <= b[j].end {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}
