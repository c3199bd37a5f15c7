// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-axis markers.
//!
//! | Marker | Axis | Used for |
//! |--------|------|----------|
//! | [`JD`] | Julian Day on the TT axis | precession, nutation, Sun and Moon theories |
//! | [`UT`] | Julian Day on the UT axis | sidereal time, civil timestamps |

use super::instant::{Time, TimeScale};
use qtty::{Day, Days};

/// Julian Date on the uniform TT axis, the identity scale.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JD;

impl TimeScale for JD {
    const LABEL: &'static str = "Julian Day:";

    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt
    }
}

/// Universal Time: a Julian Day on the Earth-rotation axis.
///
/// Conversion to JD(TT) adds ΔT; the inverse solves `ut + ΔT(ut) = tt`
/// by fixed-point iteration, which converges immediately because ΔT
/// changes by well under a second per year.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UT;

impl TimeScale for UT {
    const LABEL: &'static str = "UT";

    #[inline]
    fn to_jd_tt(ut_value: Days) -> Days {
        let dt = super::delta_t::delta_t_seconds(Time::<JD>::from_days(ut_value));
        ut_value + dt.to::<Day>()
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        let mut ut = jd_tt;
        for _ in 0..3 {
            let dt = super::delta_t::delta_t_seconds(Time::<JD>::from_days(ut));
            ut = jd_tt - dt.to::<Day>();
        }
        ut
    }
}

impl From<Time<UT>> for Time<JD> {
    #[inline]
    fn from(t: Time<UT>) -> Self {
        t.to::<JD>()
    }
}

impl From<Time<JD>> for Time<UT> {
    #[inline]
    fn from(t: Time<JD>) -> Self {
        t.to::<UT>()
    }
}
