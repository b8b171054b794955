#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::Rng;
use setting_circles::angles::wrap_pi;
use setting_circles::constants::{DPI, RADEG};
use setting_circles::location::ObserverLocation;
use setting_circles::sighting::Sighting;
use setting_circles::transform::to_horizontal;

/// Compare two angles modulo 2π.
pub fn assert_angle_close(actual: f64, expected: f64, epsilon: f64) {
    assert_abs_diff_eq!(wrap_pi(actual - expected), 0.0, epsilon = epsilon);
}

pub fn assert_location_close(actual: &ObserverLocation, expected: &ObserverLocation, epsilon: f64) {
    assert_abs_diff_eq!(actual.latitude(), expected.latitude(), epsilon = epsilon);
    assert_angle_close(actual.longitude(), expected.longitude(), epsilon);
}

/// A star at (ra, dec) as the encoders would report it from `truth` at `sidereal`.
pub fn observe(truth: &ObserverLocation, ra: f64, dec: f64, sidereal: f64) -> Sighting {
    let star = Sighting::from_equatorial(ra, dec, sidereal);
    let (az, alt) = to_horizontal(&star, truth);
    star.with_horizontal(az, alt)
}

pub fn random_site(rng: &mut StdRng) -> ObserverLocation {
    let lat = rng.random_range(-80.0..80.0) * RADEG;
    let lon = rng.random::<f64>() * DPI;
    ObserverLocation::new(lat, lon).unwrap()
}

/// A star above the horizon of `truth`, away from the zenith, the pole and the prime vertical
/// crossing where the one-star hour angle is ill-conditioned.
pub fn random_visible_star(rng: &mut StdRng, truth: &ObserverLocation, sidereal: f64) -> Sighting {
    loop {
        let ra = rng.random::<f64>() * DPI;
        let dec = rng.random_range(-80.0..80.0) * RADEG;
        let s = observe(truth, ra, dec, sidereal);
        let h = wrap_pi(sidereal - ra + truth.longitude());
        let alt = s.altitude();
        if alt > 10.0 * RADEG && alt < 80.0 * RADEG && (h.abs() - 90.0 * RADEG).abs() > 5.0 * RADEG
        {
            return s;
        }
    }
}
