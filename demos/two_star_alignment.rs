//! Simulated alignment session at a site the controller does not know yet.
//!
//! Run with `cargo run --example two_star_alignment [log spec]`, e.g. `trace` to see the
//! per-call transform records.

use flexi_logger::Logger;
use setting_circles::constants::J2000_UNIX_SECONDS;
use setting_circles::sexagesimal::{Dms, Hms};
use setting_circles::time::TimeOrigin;
use setting_circles::transform::to_horizontal;
use setting_circles::{ObserverLocation, SettingCircles, SettingCirclesConfig, Sighting};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_spec = std::env::args().nth(1).unwrap_or_else(|| "debug".to_string());
    let _logger = Logger::try_with_str(log_spec)?.start()?;

    // Mauna Kea; the operator only entered a rough guess
    let truth = ObserverLocation::from_degrees(19.8207, 204.5281)?;
    let config = SettingCirclesConfig::builder()
        .time_origin(TimeOrigin::j2000(-36_000))
        .location(ObserverLocation::from_degrees(20.0, 200.0)?)
        .build()?;
    let mut circles = SettingCircles::new(config);
    println!("seed      {}", circles.location());

    let t0 = J2000_UNIX_SECONDS + 780_018_000;
    let encoders = |circles: &SettingCircles, ra: f64, dec: f64, t: i64| {
        let star = Sighting::from_equatorial(ra, dec, circles.sidereal_angle(t));
        to_horizontal(&star, &truth)
    };

    // Arcturus then Spica, two minutes apart
    let (az, alt) = encoders(&circles, 3.7335, 0.3348, t0);
    let arcturus = circles.designate(3.7335, 0.3348, az, alt, t0);
    circles.one_star_align(&arcturus);
    println!("one star  {}", circles.location());

    let t1 = t0 + 120;
    let (az, alt) = encoders(&circles, 3.5133, -0.1948, t1);
    let spica = circles.designate(3.5133, -0.1948, az, alt, t1);
    circles.two_star_align_rebased(&spica, &arcturus);
    println!("two star  {}", circles.location());

    // a coincident pair is rejected and the calibration kept
    circles.two_star_align(&spica, &spica);

    let fix = circles.capture(az, alt, t1);
    println!(
        "pointing  RA {}  Dec {}  (LST {})",
        Hms::from_radians(fix.right_ascension()),
        Dms::from_radians(fix.declination()),
        Hms::from_radians(fix.sidereal_angle()),
    );
    println!(
        "site      lat {}  lon {}",
        Dms::from_radians(circles.current_latitude()),
        Dms::from_radians(circles.current_longitude()),
    );
    Ok(())
}
