// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Airmass.
//!
//! Two approximations live here:
//!
//! - [`AirmassTable`]: the forward model `X(h) = 1 / sin(h + 244/(165 + 47·h^1.1))`
//!   tabulated at integer altitudes, used backwards to answer "how high must
//!   a target be to reach airmass X?".
//! - [`hardie`]: the Hardie (1962) polynomial in `sec z − 1`, used for the
//!   airmass of a computed position.

use qtty::*;
use std::sync::LazyLock;

/// Altitude below which [`hardie`] holds the airmass constant.
pub const HARDIE_FLOOR: Degrees = Degrees::new(3.0);

/// Forward model at `altitude` degrees.
///
/// ```
/// use skywindow::airmass::airmass_at;
/// use qtty::Degrees;
///
/// assert!((airmass_at(Degrees::new(90.0)) - 1.0).abs() < 1e-3);
/// ```
pub fn airmass_at(altitude: Degrees) -> f64 {
    let h = altitude.value();
    let apparent = Degrees::new(h + 244.0 / (165.0 + 47.0 * h.powf(1.1)));
    1.0 / apparent.sin()
}

/// Hardie (1962) airmass with the altitude clamped to [`HARDIE_FLOOR`].
pub fn hardie(altitude: Degrees) -> f64 {
    let clamped = if altitude < HARDIE_FLOOR {
        HARDIE_FLOOR
    } else {
        altitude
    };
    let sz = 1.0 / clamped.sin() - 1.0;
    1.0 + sz * (0.998_183_3 - sz * (0.002_875 + 0.000_808_3 * sz))
}

/// `(airmass, altitude)` pairs at integer altitudes 0°‥=90°, ordered by
/// increasing altitude and therefore decreasing airmass.
#[derive(Debug, Clone)]
pub struct AirmassTable {
    entries: Vec<(f64, Degrees)>,
}

static TABLE: LazyLock<AirmassTable> = LazyLock::new(AirmassTable::build);

impl AirmassTable {
    fn build() -> Self {
        let entries = (0..=90)
            .map(|alt| {
                let altitude = Degrees::new(f64::from(alt));
                (airmass_at(altitude), altitude)
            })
            .collect();
        Self { entries }
    }

    /// The process-wide table, built on first use.
    pub fn shared() -> &'static AirmassTable {
        &TABLE
    }

    /// Tabulated pairs.
    pub fn entries(&self) -> &[(f64, Degrees)] {
        &self.entries
    }

    /// Smallest tabulated altitude whose airmass is at most `airmass`, or
    /// 90° when no entry qualifies.
    pub fn altitude_for_airmass(&self, airmass: f64) -> Degrees {
        self.entries
            .iter()
            .find(|(x, _)| *x <= airmass)
            .map(|(_, alt)| *alt)
            .unwrap_or(Degrees::new(90.0))
    }
}

/// [`AirmassTable::altitude_for_airmass`] on the shared table.
#[inline]
pub fn altitude_for_airmass(airmass: f64) -> Degrees {
    AirmassTable::shared().altitude_for_airmass(airmass)
}
