//! # Horizon ↔ sky conversions
//!
//! Pure conversions between the horizon frame (azimuth east from north, altitude) and the sky
//! frame (right ascension, declination) for an observer at a given [`ObserverLocation`], with the
//! sky rotation supplied by the sighting's sidereal angle.
//!
//! The hour angle is taken as
//!
//! ```text
//! h = sidereal − RA + longitude
//! ```
//!
//! and both directions use the `atan2` form of the spherical triangle so that the azimuth (or
//! hour angle) lands in the right quadrant without case analysis.
//!
//! ## Numerical notes
//!
//! - Every `asin` argument is clamped (see [`crate::angles::safe_asin`]).
//! - The `tan(dec)` / `tan(alt)` terms diverge at the poles / zenith; `atan2` still returns a
//!   finite angle there, whose value is then irrelevant to the direction.

use crate::angles::{normalize_two_pi, safe_asin};
use crate::constants::Radian;
use crate::location::ObserverLocation;
use crate::sighting::Sighting;

/// Hour angle implied by a horizon fix at a given latitude.
///
/// This is the horizon-to-equatorial hour-angle relation shared by [`to_equatorial`] and the
/// alignment solvers.
pub fn hour_angle_from_horizontal(azimuth: Radian, altitude: Radian, latitude: Radian) -> Radian {
    let (s_lat, c_lat) = latitude.sin_cos();
    (-azimuth.sin()).atan2(-azimuth.cos() * s_lat + altitude.tan() * c_lat)
}

/// Convert the sky coordinates of `sighting` to (azimuth, altitude).
///
/// Arguments
/// -----------------
/// * `sighting`: provides right ascension, declination and the sidereal angle.
/// * `location`: the observer latitude and longitude.
///
/// Return
/// ----------
/// * `(azimuth, altitude)` with azimuth in `[0, 2π)` and altitude in `[−π/2, π/2]`.
pub fn to_horizontal(sighting: &Sighting, location: &ObserverLocation) -> (Radian, Radian) {
    let h = sighting.sidereal_angle() - sighting.right_ascension() + location.longitude();
    let dec = sighting.declination();
    let (s_lat, c_lat) = location.latitude().sin_cos();
    let (s_h, c_h) = h.sin_cos();

    let azimuth = (-s_h).atan2(-c_h * s_lat + dec.tan() * c_lat);
    let altitude = safe_asin(s_lat * dec.sin() + c_lat * dec.cos() * c_h);

    log::trace!("to_horizontal: h = {h:.6}, az = {azimuth:.6}, alt = {altitude:.6}");
    (normalize_two_pi(azimuth), altitude)
}

/// Convert the horizon coordinates of `sighting` to (right ascension, declination).
///
/// Arguments
/// -----------------
/// * `sighting`: provides azimuth, altitude and the sidereal angle.
/// * `location`: the observer latitude and longitude.
///
/// Return
/// ----------
/// * `(right_ascension, declination)` with RA in `[0, 2π)` and declination in `[−π/2, π/2]`.
pub fn to_equatorial(sighting: &Sighting, location: &ObserverLocation) -> (Radian, Radian) {
    let az = sighting.azimuth();
    let alt = sighting.altitude();
    let latitude = location.latitude();
    let (s_lat, c_lat) = latitude.sin_cos();

    let h = hour_angle_from_horizontal(az, alt, latitude);
    let declination = safe_asin(s_lat * alt.sin() + c_lat * alt.cos() * az.cos());
    let right_ascension = normalize_two_pi(sighting.sidereal_angle() - h + location.longitude());

    log::trace!("to_equatorial: h = {h:.6}, ra = {right_ascension:.6}, dec = {declination:.6}");
    (right_ascension, declination)
}

#[cfg(test)]
mod transform_test {
    use super::*;
    use crate::angles::wrap_pi;
    use crate::constants::{DPI, RADEG};
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_meridian_transit() {
        // A star on the meridian (h = 0) south of the zenith culminates at alt = 90° − |lat − dec|.
        let loc = ObserverLocation::from_degrees(40.0, 0.0).unwrap();
        let s = Sighting::from_equatorial(1.0, 10.0 * RADEG, 1.0);
        let (az, alt) = to_horizontal(&s, &loc);
        assert_abs_diff_eq!(az, 180.0 * RADEG, epsilon = 1e-12);
        assert_abs_diff_eq!(alt, 60.0 * RADEG, epsilon = 1e-12);
    }

    #[test]
    fn test_celestial_pole_altitude_is_latitude() {
        let loc = ObserverLocation::from_degrees(-33.0, 151.0).unwrap();
        let s = Sighting::from_equatorial(2.0, -89.9999 * RADEG, 4.0);
        let (az, alt) = to_horizontal(&s, &loc);
        assert_abs_diff_eq!(alt, -(-33.0 * RADEG), epsilon = 1e-4);
        assert_abs_diff_eq!(wrap_pi(az - 180.0 * RADEG), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_rising_in_the_east() {
        // On the equator, an equatorial star six hours before transit rises due east.
        let loc = ObserverLocation::new(0.0, 0.0).unwrap();
        let s = Sighting::from_equatorial(DPI / 4.0, 0.0, 0.0);
        let (az, alt) = to_horizontal(&s, &loc);
        assert_abs_diff_eq!(az, 90.0 * RADEG, epsilon = 1e-12);
        assert_abs_diff_eq!(alt, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_longitude_shifts_right_ascension() {
        let west = ObserverLocation::from_degrees(50.0, 0.0).unwrap();
        let east = ObserverLocation::from_degrees(50.0, 15.0).unwrap();
        let s = Sighting::from_horizontal(1.3, 0.6, 2.2);
        let (ra_w, dec_w) = to_equatorial(&s, &west);
        let (ra_e, dec_e) = to_equatorial(&s, &east);
        assert_abs_diff_eq!(wrap_pi(ra_e - ra_w), 15.0 * RADEG, epsilon = 1e-12);
        assert_abs_diff_eq!(dec_e, dec_w, epsilon = 1e-15);
    }

    #[test]
    fn test_round_trip_random() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..5_000 {
            let lat = rng.random_range(-80.0..80.0) * RADEG;
            let lon = rng.random_range(0.0..360.0) * RADEG;
            let sidereal = rng.random_range(0.0..DPI);
            let ra = rng.random_range(0.0..360.0) * RADEG;
            let dec = rng.random_range(-80.0..80.0) * RADEG;

            let loc = ObserverLocation::new(lat, lon).unwrap();
            let star = Sighting::from_equatorial(ra, dec, sidereal);
            let (az, alt) = to_horizontal(&star, &loc);
            assert!((0.0..DPI).contains(&az));

            let fix = Sighting::from_horizontal(az, alt, sidereal);
            let (ra2, dec2) = to_equatorial(&fix, &loc);
            assert!((0.0..DPI).contains(&ra2));
            assert_abs_diff_eq!(wrap_pi(ra2 - ra), 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(dec2, dec, epsilon = 1e-5);
        }
    }
}
