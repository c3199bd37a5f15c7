use qtty::{Degrees, Seconds};
use skywindow::{Constraints, Site, Target, DEFAULT_INTERVAL_MIN};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let site = Site::new(
        "Subaru",
        "US/Hawaii",
        "-155:28:48.900",
        "+19:49:42.600",
        4163.0,
        615.0,
        0.0,
    )?;
    let vega = Target::parse("vega", "18:36:56.3", "+38:47:01", "2000")?;

    let noon = site.parse_date("2014-04-29 12:00", None)?;
    print!("{}", site.text_almanac(noon.to_utc(), None)?);

    let start = site.parse_date("2014-04-28 22:30", None)?;
    let stop = site.parse_date("2014-04-28 23:30", None)?;
    let limits = Constraints::new(Degrees::new(15.0), Degrees::new(85.0), Seconds::new(2700.0))
        .with_airmass(3.0);
    let result = site.observable(&vega, &start, &stop, &limits)?;
    println!("\n{vega}: observable = {}", result.is_observable);
    if let Some(window) = result.window() {
        println!("  window {window} ({})", window.duration_seconds());
    }

    let sunset = site.sunset(noon.to_utc())?;
    let sunrise = site.sunrise(sunset)?;
    println!();
    println!(
        "{}",
        site.target_info_table(&vega, sunset, sunrise, DEFAULT_INTERVAL_MIN * 6)?
    );
    Ok(())
}
