// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sexagesimal angle text.
//!
//! Catalogues and site descriptions write angles as colon-separated
//! sexagesimal strings: right ascension in hours (`"18:36:56.3"`),
//! declination, latitude and longitude in degrees (`"+38:47:01"`,
//! `"-155:28:48.900"`). A single component (`"19.8263"`) is read as a
//! decimal value in the same unit. The sign, if any, leads the string and
//! applies to the whole angle, so `"-0:30"` is half a unit below zero.

use crate::error::AngleError;
use qtty::*;

/// Splits `text` into `(negative, [whole, minutes, seconds])`.
fn parse_components(text: &str) -> Result<(bool, f64, f64, f64), AngleError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AngleError::Empty);
    }
    let (negative, body) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let parts: Vec<&str> = body.split(':').map(str::trim).collect();
    if parts.len() > 3 {
        return Err(AngleError::TooManyComponents(text.to_owned()));
    }

    let mut values = [0.0_f64; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        let value: f64 = part
            .parse()
            .map_err(|_| AngleError::MalformedComponent((*part).to_owned()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(AngleError::MalformedComponent((*part).to_owned()));
        }
        *slot = value;
    }
    if parts.len() > 1 && (values[1] >= 60.0 || values[2] >= 60.0) {
        return Err(AngleError::ComponentOutOfRange(text.to_owned()));
    }
    Ok((negative, values[0], values[1], values[2]))
}

fn sexagesimal(text: &str) -> Result<f64, AngleError> {
    let (negative, whole, minutes, seconds) = parse_components(text)?;
    let magnitude = whole + minutes / 60.0 + seconds / 3600.0;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Parses `[±]D[:M[:S]]` degrees.
///
/// ```
/// use skywindow::angle::parse_degrees;
///
/// let dec = parse_degrees("+38:47:01").unwrap();
/// assert!((dec.value() - 38.783_611).abs() < 1e-6);
/// ```
pub fn parse_degrees(text: &str) -> Result<Degrees, AngleError> {
    sexagesimal(text).map(Degrees::new)
}

/// Parses `[±]H[:M[:S]]` hours, returned as degrees (1ʰ = 15°).
pub fn parse_hours(text: &str) -> Result<Degrees, AngleError> {
    sexagesimal(text).map(|h| HourAngles::new(h).to::<Degree>())
}

/// Splits a non-negative magnitude into rounded `(whole, minutes, seconds)`,
/// carrying any rounding overflow upward.
fn split(magnitude: f64, second_decimals: usize) -> (u64, u64, f64) {
    let scale = 10f64.powi(second_decimals as i32);
    let total = (magnitude * 3600.0 * scale).round() / scale;
    let whole = (total / 3600.0).floor();
    let rest = total - whole * 3600.0;
    let minutes = (rest / 60.0).floor();
    let seconds = rest - minutes * 60.0;
    (whole as u64, minutes as u64, seconds)
}

fn sign_of(value: f64) -> &'static str {
    if value < 0.0 {
        "-"
    } else {
        ""
    }
}

/// `HH:MM:SS.s` rendering of an angle in hours, wrapped to `[0ʰ, 24ʰ)`.
pub fn format_hms(angle: Degrees) -> String {
    let hours = angle.wrap_pos().to::<HourAngle>().value();
    let (h, m, s) = split(hours, 1);
    format!("{:02}:{:02}:{:04.1}", h % 24, m, s)
}

/// `±DD:MM:SS` rendering of an angle in degrees.
pub fn format_dms(angle: Degrees) -> String {
    let value = angle.value();
    let (d, m, s) = split(value.abs(), 0);
    let sign = if value < 0.0 { "-" } else { "+" };
    format!("{sign}{d:02}:{m:02}:{:02}", s as u64)
}

/// Signed `H:MM` rendering of an angle in hours, truncated to the minute.
///
/// Used for sidereal time and hour angle columns.
pub fn format_hours_minutes(angle: Degrees) -> String {
    let hours = angle.to::<HourAngle>().value();
    let total_minutes = (hours.abs() * 60.0).floor() as u64;
    format!("{}{}:{:02}", sign_of(hours), total_minutes / 60, total_minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_sexagesimal_degrees() {
        let lon = parse_degrees("-155:28:48.900").unwrap();
        assert!((lon.value() + 155.480_25).abs() < 1e-9);
        let lat = parse_degrees("+19:49:42.600").unwrap();
        assert!((lat.value() - 19.8285).abs() < 1e-9);
    }

    #[test]
    fn sign_applies_to_whole_angle() {
        assert_eq!(parse_degrees("-0:30").unwrap(), Degrees::new(-0.5));
    }

    #[test]
    fn decimal_single_component() {
        assert_eq!(parse_degrees("19.8263").unwrap(), Degrees::new(19.8263));
        assert_eq!(parse_hours("6").unwrap(), Degrees::new(90.0));
    }

    #[test]
    fn hours_are_scaled_to_degrees() {
        let ra = parse_hours("18:36:56.3").unwrap();
        assert!((ra.value() - 279.234_583_3).abs() < 1e-6);
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!(parse_degrees("   "), Err(AngleError::Empty));
        assert!(matches!(
            parse_degrees("12:ab:00"),
            Err(AngleError::MalformedComponent(_))
        ));
        assert!(matches!(
            parse_degrees("1:2:3:4"),
            Err(AngleError::TooManyComponents(_))
        ));
        assert!(matches!(
            parse_degrees("10:75:00"),
            Err(AngleError::ComponentOutOfRange(_))
        ));
        assert!(matches!(
            parse_degrees("10:-5:00"),
            Err(AngleError::MalformedComponent(_))
        ));
    }

    #[test]
    fn formats_round_trip_through_text() {
        let ra = parse_hours("18:36:56.3").unwrap();
        assert_eq!(format_hms(ra), "18:36:56.3");
        let dec = parse_degrees("+38:47:01").unwrap();
        assert_eq!(format_dms(dec), "+38:47:01");
        assert_eq!(format_dms(Degrees::new(-0.5)), "-00:30:00");
    }

    #[test]
    fn rounding_carries_into_minutes() {
        assert_eq!(format_hms(HourAngles::new(1.0 - 1e-9).to::<Degree>()), "01:00:00.0");
    }

    #[test]
    fn hours_minutes_is_signed_and_truncated() {
        assert_eq!(format_hours_minutes(Degrees::new(-20.0)), "-1:20");
        assert_eq!(format_hours_minutes(Degrees::new(200.0)), "13:20");
    }
}
