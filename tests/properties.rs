use chrono::{TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use qtty::{Degrees, Seconds};
use skywindow::airmass::{airmass_at, altitude_for_airmass, hardie, AirmassTable};
use skywindow::{Constraints, Observability, Site, Target};

fn subaru() -> Site {
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

#[test]
fn below_the_table_minimum_is_zenith() {
    let minimum = AirmassTable::shared()
        .entries()
        .iter()
        .map(|(am, _)| *am)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(altitude_for_airmass(minimum * 0.5), Degrees::new(90.0));
}

proptest! {
    #[test]
    fn prop_altitude_for_airmass_is_monotonic(a in 0.0..90.0f64, b in 0.0..90.0f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let alt_lo = altitude_for_airmass(airmass_at(Degrees::new(lo)));
        let alt_hi = altitude_for_airmass(airmass_at(Degrees::new(hi)));
        prop_assert!(alt_lo <= alt_hi);
    }

    #[test]
    fn prop_hardie_decreases_and_stays_above_one(a in 3.0..90.0f64, b in 3.0..90.0f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let am_lo = hardie(Degrees::new(lo));
        let am_hi = hardie(Degrees::new(hi));
        prop_assert!(am_hi >= 1.0);
        prop_assert!(am_lo >= am_hi);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_observable_windows_meet_their_requirement(
        start_min in 0i64..1440,
        length_min in 10i64..600,
        needed in 0.0..7200.0f64,
        el_min in 0.0..60.0f64,
    ) {
        let site = subaru();
        let vega = Target::parse("vega", "18:36:56.3", "+38:47:01", "2000").unwrap();
        let origin = Utc.with_ymd_and_hms(2014, 4, 29, 0, 0, 0).unwrap();
        let start = origin + TimeDelta::minutes(start_min);
        let stop = start + TimeDelta::minutes(length_min);
        let limits = Constraints::new(Degrees::new(el_min), Degrees::new(89.0), Seconds::new(needed));

        let result = site.observable(&vega, &start, &stop, &limits).unwrap();
        if result.is_observable {
            let window = result.window().unwrap();
            prop_assert!(window.start >= start);
            prop_assert!(window.end <= stop);
            prop_assert!(window.duration_seconds() >= Seconds::new(needed));
        }
        if result.rise.is_none() {
            prop_assert_eq!(result, Observability::NEVER_UP);
        }
    }

    #[test]
    fn prop_parse_date_preserves_order(day in 1u32..28, h1 in 0u32..24, h2 in 0u32..24) {
        let site = subaru();
        let t1 = site.parse_date(&format!("2014-04-{day:02} {h1:02}:00"), None).unwrap();
        let t2 = site.parse_date(&format!("2014-04-{day:02} {h2:02}:00"), None).unwrap();
        prop_assert_eq!(t1 < t2, h1 < h2);
    }
}
