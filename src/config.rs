// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Plain-data site description.

use crate::error::SiteError;
use crate::site::Site;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything needed to build a [`Site`], in the form it is written in
/// configuration files.
///
/// `longitude` (east positive) and `latitude` accept sexagesimal
/// (`"-155:28:48.900"`) or decimal-degree (`"-155.48025"`) text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SiteConfig {
    pub name: String,
    /// IANA zone name, e.g. `"US/Hawaii"`.
    pub timezone: String,
    pub longitude: String,
    pub latitude: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub elevation_m: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_pressure"))]
    pub pressure_mbar: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_temperature"))]
    pub temperature_c: f64,
}

#[cfg(feature = "serde")]
fn default_pressure() -> f64 {
    1010.0
}

#[cfg(feature = "serde")]
fn default_temperature() -> f64 {
    10.0
}

impl Site {
    /// Validates `config` and builds a site with the built-in ephemeris.
    pub fn from_config(config: &SiteConfig) -> Result<Self, SiteError> {
        Site::new(
            &config.name,
            &config.timezone,
            &config.longitude,
            &config.latitude,
            config.elevation_m,
            config.pressure_mbar,
            config.temperature_c,
        )
    }
}

impl TryFrom<&SiteConfig> for Site {
    type Error = SiteError;

    fn try_from(config: &SiteConfig) -> Result<Self, Self::Error> {
        Site::from_config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Degrees;

    fn summit() -> SiteConfig {
        SiteConfig {
            name: "Subaru".into(),
            timezone: "US/Hawaii".into(),
            longitude: "-155:28:48.900".into(),
            latitude: "+19:49:42.600".into(),
            elevation_m: 4163.0,
            pressure_mbar: 615.0,
            temperature_c: 0.0,
        }
    }

    #[test]
    fn builds_a_site() {
        let site = Site::from_config(&summit()).unwrap();
        assert_eq!(site.name(), "Subaru");
        assert!((site.latitude() - Degrees::new(19.828_5)).abs() < Degrees::new(1e-9));
        assert!((site.longitude() - Degrees::new(-155.480_25)).abs() < Degrees::new(1e-9));
        assert_eq!(site.timezone(), chrono_tz::US::Hawaii);
    }

    #[test]
    fn decimal_coordinates_are_accepted() {
        let config = SiteConfig {
            longitude: "-155.48025".into(),
            latitude: "19.8285".into(),
            ..summit()
        };
        let site = Site::try_from(&config).unwrap();
        assert!((site.latitude() - Degrees::new(19.828_5)).abs() < Degrees::new(1e-9));
    }

    #[test]
    fn invalid_fields_are_rejected() {
        let config = SiteConfig {
            timezone: "Nowhere/Special".into(),
            ..summit()
        };
        assert!(matches!(
            Site::from_config(&config),
            Err(SiteError::UnknownTimezone(_))
        ));

        let config = SiteConfig {
            temperature_c: -300.0,
            ..summit()
        };
        assert!(matches!(
            Site::from_config(&config),
            Err(SiteError::InvalidLocation(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn reads_json_with_defaults() {
        let json = r#"{
            "name": "Sea level",
            "timezone": "UTC",
            "longitude": "0",
            "latitude": "+51:28:38"
        }"#;
        let config: SiteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.elevation_m, 0.0);
        assert_eq!(config.pressure_mbar, 1010.0);
        assert_eq!(config.temperature_c, 10.0);
        assert!(Site::from_config(&config).is_ok());
    }
}
