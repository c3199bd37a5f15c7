// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Scale-tagged Julian instants.
//!
//! The planner works with `chrono::DateTime<Utc>` at its public surface, but
//! every astronomical formula it evaluates wants a Julian Day on a specific
//! axis: sidereal time runs on **UT** (Earth rotation) while precession, the
//! solar theory and the lunar series run on **TT** (uniform dynamical time).
//! [`Time<S>`] keeps the two apart at compile time: the marker `S` decides
//! which axis the stored [`Days`] live on, and `.to::<T>()` routes every
//! cross-axis conversion through JD(TT).

use chrono::{DateTime, Utc};
use qtty::*;
use std::marker::PhantomData;
use std::ops::{Add, Sub};

/// Julian Day of the Unix epoch (1970-01-01T00:00:00Z) on the UT axis.
const UNIX_EPOCH_JD: Days = Days::new(2_440_587.5);

/// Marker trait for time axes.
///
/// Implementors map their native day count to and from an absolute
/// Julian Day in TT, the canonical intermediate used by [`Time::to`].
pub trait TimeScale: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Time`] formatting.
    const LABEL: &'static str;

    /// Convert a quantity in this scale's native unit to an absolute JD(TT).
    fn to_jd_tt(value: Days) -> Days;

    /// Convert an absolute JD(TT) back to this scale's native quantity.
    fn from_jd_tt(jd_tt: Days) -> Days;
}

/// A point on time scale `S`, stored as a single day count.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    quantity: Days,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    /// Create from a raw scalar (days since the scale's epoch).
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
            _scale: PhantomData,
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            quantity: days,
            _scale: PhantomData,
        }
    }

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Absolute Julian Day (TT) corresponding to this instant.
    #[inline]
    pub fn julian_day(&self) -> Days {
        S::to_jd_tt(self.quantity)
    }

    /// Build an instant from an absolute Julian Day (TT).
    #[inline]
    pub fn from_julian_day(jd: Days) -> Self {
        Self::from_days(S::from_jd_tt(jd))
    }

    /// Re-express this instant on another axis.
    ///
    /// ```text
    /// self → JD(TT) → target
    /// ```
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::<T>::from_julian_day(S::to_jd_tt(self.quantity))
    }

    /// Build an instant from a UTC timestamp.
    ///
    /// The timestamp is read as Universal Time (UTC ≈ UT1 at the accuracy the
    /// planner needs); scales on the TT axis pick up the epoch-dependent ΔT
    /// through [`UT`](crate::UT).
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        use super::scales::UT;
        let seconds = Seconds::new(datetime.timestamp() as f64)
            + Seconds::new(datetime.timestamp_subsec_nanos() as f64 / 1e9);
        let jd_ut = UNIX_EPOCH_JD + seconds.to::<Day>();
        Time::<UT>::from_days(jd_ut).to::<S>()
    }

    /// Earlier of two instants.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if other.quantity < self.quantity {
            other
        } else {
            self
        }
    }

    /// Later of two instants.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if other.quantity > self.quantity {
            other
        } else {
            self
        }
    }
}

impl<S: TimeScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", S::LABEL, self.quantity)
    }
}

impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl<S: TimeScale> Sub<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

impl<S: TimeScale> From<Days> for Time<S> {
    #[inline]
    fn from(days: Days) -> Self {
        Self::from_days(days)
    }
}

#[cfg(test)]
mod tests {
    use super::super::scales::{JD, UT};
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn unix_epoch_is_jd_2440587_5_on_ut_axis() {
        let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        let ut = Time::<UT>::from_utc(epoch);
        assert!((ut.quantity() - UNIX_EPOCH_JD).abs() < Days::new(1e-9));
    }

    #[test]
    fn j2000_noon_utc_maps_to_j2000_on_ut_axis() {
        let noon = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let ut = Time::<UT>::from_utc(noon);
        assert!((ut.value() - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn tt_axis_runs_ahead_of_ut_by_delta_t() {
        let noon = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let ut = Time::<UT>::from_utc(noon);
        let tt = Time::<JD>::from_utc(noon);
        let lead = (tt.quantity() - ut.quantity()).to::<Second>();
        assert!(
            (lead - Seconds::new(63.8)).abs() < Seconds::new(1.0),
            "TT − UT = {lead}"
        );
    }

    #[test]
    fn sub_second_precision_survives() {
        let a = Utc.with_ymd_and_hms(2014, 4, 29, 8, 30, 0).unwrap();
        let b = a + chrono::Duration::milliseconds(500);
        let span = Time::<UT>::from_utc(b) - Time::<UT>::from_utc(a);
        assert!((span.to::<Second>() - Seconds::new(0.5)).abs() < Seconds::new(1e-4));
    }

    #[test]
    fn min_max_and_arithmetic() {
        let a = Time::<JD>::new(2_451_545.0);
        let b = a + Days::new(1.5);
        assert_eq!(a.min(b), a);
        assert_eq!(a.max(b), b);
        assert_eq!(b - a, Days::new(1.5));
        assert_eq!((b - Days::new(1.5)).quantity(), a.quantity());
    }

    #[test]
    fn display_carries_scale_label() {
        let ut = Time::<UT>::new(2_451_545.0);
        assert!(format!("{ut}").starts_with("UT"));
    }
}
