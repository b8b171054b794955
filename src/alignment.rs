//! # One- and two-star self-alignment
//!
//! Infers the observer latitude and longitude from star sightings, so the device can be used
//! without entering the site by hand. A sighting here pairs the **catalog** right
//! ascension/declination of a designated star with the **measured** encoder azimuth/altitude and
//! the sidereal angle at capture.
//!
//! ## Procedures
//!
//! - **One star** ([`AlignmentSolver::one_star_align`]): the spherical triangle pole–zenith–star
//!   gives the hour angle up to the two-valued arcsine `ha = −asin(cos a · sin A / cos δ)`,
//!   `hb = π − ha`. The candidate closest to the hour angle predicted by the current longitude is
//!   kept ([`closest_branch`]); latitude follows in closed form and the longitude is then
//!   recomputed from the hour angle at that latitude. The stored longitude is only used to pick a
//!   branch, so it may be off by a few degrees.
//! - **Two stars** ([`AlignmentSolver::two_star_align`]): the angle at star A between the
//!   directions to the zenith and to star B is read in both frames (sine rule for the sine,
//!   cosine rule for the cosine, each scaled by `sin r`); their angle-sum gives the angle
//!   zenith–A–pole, hence the latitude, with no reference to the stored location at all.
//!
//! Each call is a one-shot correction: the location is recomputed from scratch from the
//! supplied sightings and overwritten as a whole. There is no averaging with a previous
//! calibration, and a one-star call after a two-star call replaces the two-star result.
//!
//! ## Conditioning
//!
//! Two-star alignment divides by `sin² r`, `cos a_A` and `cos δ_A`. Configurations where any of
//! those vanish are rejected with [`SettingCirclesError::DegenerateGeometry`] by
//! [`AlignmentSolver::try_two_star_align`]; [`AlignmentSolver::two_star_align`] absorbs the
//! rejection, leaves the location untouched and returns the previous latitude, so the operator
//! can simply retry with a better pair. The thresholds live in [`AlignmentParams`].
//!
//! One-star alignment applies no such guard.
//!
//! ## Example
//!
//! ```rust
//! use setting_circles::alignment::AlignmentSolver;
//! use setting_circles::location::ObserverLocation;
//! use setting_circles::sighting::Sighting;
//! use setting_circles::transform::to_horizontal;
//!
//! let truth = ObserverLocation::from_degrees(48.2, 16.37)?;
//! let sidereal = 1.1;
//!
//! // Arcturus and Vega, as the encoders would report them from the true site
//! let mut arcturus = Sighting::from_equatorial(3.7335, 0.3348, sidereal);
//! let (az, alt) = to_horizontal(&arcturus, &truth);
//! arcturus = arcturus.with_horizontal(az, alt);
//!
//! let mut vega = Sighting::from_equatorial(4.8736, 0.6769, sidereal);
//! let (az, alt) = to_horizontal(&vega, &truth);
//! vega = vega.with_horizontal(az, alt);
//!
//! let mut solver = AlignmentSolver::default();
//! let latitude = solver.two_star_align(&arcturus, &vega);
//! assert!((latitude - truth.latitude()).abs() < 1e-8);
//! # Ok::<(), setting_circles::errors::SettingCirclesError>(())
//! ```

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::angles::{closest_branch, normalize_two_pi, safe_asin, wrap_pi, Branch};
use crate::constants::{Radian, MAX_ABS_ALTITUDE, MAX_ABS_DECLINATION, MIN_SIN2_SEPARATION};
use crate::errors::{DegenerateReason, SettingCirclesError};
use crate::location::ObserverLocation;
use crate::separation::separation;
use crate::sighting::{Frame, Sighting};
use crate::transform::hour_angle_from_horizontal;

/// Conditioning thresholds of two-star alignment.
///
/// The defaults are inherited empirical values. They were never derived from an error budget
/// and are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentParams {
    /// Reject pairs whose `sin²(separation)` is below this value.
    pub min_sin2_separation: f64,
    /// Reject a reference star whose |altitude| exceeds this value (rad).
    pub max_abs_altitude: Radian,
    /// Reject a reference star whose |declination| exceeds this value (rad).
    pub max_abs_declination: Radian,
}

impl Default for AlignmentParams {
    fn default() -> Self {
        AlignmentParams {
            min_sin2_separation: MIN_SIN2_SEPARATION,
            max_abs_altitude: MAX_ABS_ALTITUDE,
            max_abs_declination: MAX_ABS_DECLINATION,
        }
    }
}

impl AlignmentParams {
    pub fn builder() -> AlignmentParamsBuilder {
        AlignmentParamsBuilder::new()
    }

    /// Check the thresholds.
    ///
    /// Errors
    /// ----------
    /// * [`SettingCirclesError::InvalidParameter`] if `min_sin2_separation` is outside `[0, 1)`
    ///   or a limit is outside `(0, π/2]`.
    pub fn validate(&self) -> Result<(), SettingCirclesError> {
        if !(self.min_sin2_separation.is_finite()
            && (0.0..1.0).contains(&self.min_sin2_separation))
        {
            return Err(SettingCirclesError::InvalidParameter(
                "min_sin2_separation must be in [0, 1)".into(),
            ));
        }
        if !is_limit(self.max_abs_altitude) {
            return Err(SettingCirclesError::InvalidParameter(
                "max_abs_altitude must be in (0, π/2]".into(),
            ));
        }
        if !is_limit(self.max_abs_declination) {
            return Err(SettingCirclesError::InvalidParameter(
                "max_abs_declination must be in (0, π/2]".into(),
            ));
        }
        Ok(())
    }
}

fn is_limit(x: f64) -> bool {
    x.is_finite() && x > 0.0 && x <= FRAC_PI_2
}

#[derive(Debug, Clone)]
pub struct AlignmentParamsBuilder {
    params: AlignmentParams,
}

impl Default for AlignmentParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AlignmentParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: AlignmentParams::default(),
        }
    }

    pub fn min_sin2_separation(mut self, v: f64) -> Self {
        self.params.min_sin2_separation = v;
        self
    }
    pub fn max_abs_altitude(mut self, v: Radian) -> Self {
        self.params.max_abs_altitude = v;
        self
    }
    pub fn max_abs_declination(mut self, v: Radian) -> Self {
        self.params.max_abs_declination = v;
        self
    }

    /// Validate and return the parameters.
    ///
    /// Errors
    /// ----------
    /// * See [`AlignmentParams::validate`].
    pub fn build(self) -> Result<AlignmentParams, SettingCirclesError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

/// Outcome of the one-star closed form, before it is stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneStarSolution {
    pub location: ObserverLocation,
    /// Which arcsine candidate of the hour angle was retained.
    pub branch: Branch,
    /// Hour angle of the star at the resolved latitude (rad).
    pub hour_angle: Radian,
}

/// One-star closed form.
///
/// Arguments
/// -----------------
/// * `sighting`: catalog RA/declination plus the measured azimuth/altitude and sidereal angle.
/// * `prior_longitude`: longitude used only to predict the hour angle for the branch choice.
///
/// Return
/// ----------
/// * The resolved location, the retained branch and the recomputed hour angle.
pub fn solve_one_star(sighting: &Sighting, prior_longitude: Radian) -> OneStarSolution {
    let ra = sighting.right_ascension();
    let (sa, ca) = sighting.altitude().sin_cos();
    let (sd, cd) = sighting.declination().sin_cos();
    let (s_az, c_az) = sighting.azimuth().sin_cos();

    let h0 = sighting.sidereal_angle() - ra + prior_longitude;
    let ha = -safe_asin(ca * s_az / cd);
    let hb = PI - ha;
    let branch = closest_branch(h0, ha, hb);

    let r = (sa * sa + (ca * c_az) * (ca * c_az)).sqrt();
    let b = (ca * c_az).atan2(sa);
    let latitude = match branch {
        Branch::Primary => safe_asin(sd / r) - b,
        Branch::Supplementary => -safe_asin(sd / r) - b - PI,
    };
    // the closed form can land one turn away
    let latitude = wrap_pi(latitude);

    let hour_angle = hour_angle_from_horizontal(sighting.azimuth(), sighting.altitude(), latitude);
    let longitude = normalize_two_pi(ra + hour_angle - sighting.sidereal_angle());

    OneStarSolution {
        location: ObserverLocation::from_solution(latitude, longitude),
        branch,
        hour_angle,
    }
}

/// Two-star closed form.
///
/// Both sightings must share one sidereal angle; the stamp of `a` is the one used. `a` is the
/// reference star for the conditioning checks.
///
/// Errors
/// ----------
/// * [`SettingCirclesError::DegenerateGeometry`] when the pair is ill-conditioned under
///   `params`.
pub fn solve_two_star(
    a: &Sighting,
    b: &Sighting,
    params: &AlignmentParams,
) -> Result<ObserverLocation, SettingCirclesError> {
    let cr = separation(a, b, Frame::Equatorial).cos();
    let sr2 = 1.0 - cr * cr;

    if sr2 < params.min_sin2_separation {
        return Err(SettingCirclesError::DegenerateGeometry(
            DegenerateReason::Separation(sr2),
        ));
    }
    if a.altitude().abs() > params.max_abs_altitude {
        return Err(SettingCirclesError::DegenerateGeometry(
            DegenerateReason::NearZenith(a.altitude()),
        ));
    }
    if a.declination().abs() > params.max_abs_declination {
        return Err(SettingCirclesError::DegenerateGeometry(
            DegenerateReason::NearPole(a.declination()),
        ));
    }

    let (s_a1, c_a1) = a.altitude().sin_cos();
    let (s_d1, c_d1) = a.declination().sin_cos();

    // angle at A towards B, horizon frame (sine and cosine rules, both times sin r)
    let sq1 = b.altitude().cos() * (b.azimuth() - a.azimuth()).sin();
    let cq1 = (b.altitude().sin() - s_a1 * cr) / c_a1;
    // same angle, sky frame
    let sq2 = b.declination().cos() * (b.right_ascension() - a.right_ascension()).sin();
    let cq2 = (b.declination().sin() - s_d1 * cr) / c_d1;

    // angle zenith–A–pole as an angle sum
    let cq = (cq1 * cq2 - sq1 * sq2) / sr2;
    let sq = -(sq1 * cq2 + cq1 * sq2) / sr2;

    let latitude = safe_asin(s_d1 * s_a1 + c_d1 * c_a1 * cq);

    // hour angle of A, both terms times cos(latitude)
    let sh = -c_a1 * sq;
    let ch = (s_a1 - s_d1 * latitude.sin()) / c_d1;
    let h1 = sh.atan2(ch);

    let longitude = normalize_two_pi(a.right_ascension() + h1 - a.sidereal_angle());
    Ok(ObserverLocation::from_solution(latitude, longitude))
}

/// Owner of the observer location.
///
/// Seeded at construction, mutated only by the alignment methods, read through
/// [`AlignmentSolver::location`] and the two `current_*` accessors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignmentSolver {
    location: ObserverLocation,
    params: AlignmentParams,
}

impl AlignmentSolver {
    pub fn new(location: ObserverLocation, params: AlignmentParams) -> Self {
        AlignmentSolver { location, params }
    }

    /// Solver seeded with `location` and default thresholds.
    pub fn with_location(location: ObserverLocation) -> Self {
        Self::new(location, AlignmentParams::default())
    }

    /// Snapshot of the current location.
    pub fn location(&self) -> ObserverLocation {
        self.location
    }

    pub fn current_latitude(&self) -> Radian {
        self.location.latitude()
    }

    pub fn current_longitude(&self) -> Radian {
        self.location.longitude()
    }

    pub fn params(&self) -> &AlignmentParams {
        &self.params
    }

    /// One-star alignment.
    ///
    /// Overwrites both latitude and longitude unconditionally and returns the new latitude.
    pub fn one_star_align(&mut self, sighting: &Sighting) -> Radian {
        let solution = solve_one_star(sighting, self.location.longitude());
        log::debug!(
            "one-star alignment: {} -> {} ({:?} branch, h = {:.6})",
            self.location,
            solution.location,
            solution.branch,
            solution.hour_angle
        );
        self.location = solution.location;
        self.location.latitude()
    }

    /// Two-star alignment, reporting rejected configurations.
    ///
    /// On error the location is left untouched.
    pub fn try_two_star_align(
        &mut self,
        a: &Sighting,
        b: &Sighting,
    ) -> Result<Radian, SettingCirclesError> {
        let location = solve_two_star(a, b, &self.params)?;
        log::debug!("two-star alignment: {} -> {}", self.location, location);
        self.location = location;
        Ok(location.latitude())
    }

    /// Two-star alignment.
    ///
    /// Both sightings must have been captured (or re-based, see
    /// [`AlignmentSolver::two_star_align_rebased`]) at one sidereal angle. On an ill-conditioned
    /// pair the location is left untouched and the previous latitude is returned.
    pub fn two_star_align(&mut self, a: &Sighting, b: &Sighting) -> Radian {
        match self.try_two_star_align(a, b) {
            Ok(latitude) => latitude,
            Err(err) => {
                log::warn!("two-star alignment skipped: {err}");
                self.location.latitude()
            }
        }
    }

    /// Two-star alignment from sightings captured at different instants.
    ///
    /// `earlier` is re-projected to the sidereal angle of `latest` through the current location
    /// (typically the result of a previous one-star alignment), then the pair is solved with
    /// `latest` as the reference star.
    pub fn two_star_align_rebased(&mut self, latest: &Sighting, earlier: &Sighting) -> Radian {
        let earlier = earlier.rebased(latest.sidereal_angle(), &self.location);
        self.two_star_align(latest, &earlier)
    }
}

#[cfg(test)]
mod alignment_test {
    use super::*;
    use crate::constants::RADEG;
    use crate::transform::to_horizontal;
    use approx::assert_abs_diff_eq;

    fn observe(truth: &ObserverLocation, ra: Radian, dec: Radian, sidereal: Radian) -> Sighting {
        let s = Sighting::from_equatorial(ra, dec, sidereal);
        let (az, alt) = to_horizontal(&s, truth);
        s.with_horizontal(az, alt)
    }

    #[test]
    fn test_params_builder() {
        let p = AlignmentParams::builder().build().unwrap();
        assert_eq!(p, AlignmentParams::default());
        assert_eq!(p.min_sin2_separation, 4e-4);
        assert_eq!(p.max_abs_altitude, 1.56);
        assert_eq!(p.max_abs_declination, 1.56);

        let p = AlignmentParams::builder()
            .min_sin2_separation(0.01)
            .max_abs_altitude(80.0 * RADEG)
            .build()
            .unwrap();
        assert_eq!(p.min_sin2_separation, 0.01);

        assert!(AlignmentParams::builder()
            .min_sin2_separation(-1.0)
            .build()
            .is_err());
        assert!(AlignmentParams::builder()
            .max_abs_altitude(2.0)
            .build()
            .is_err());
        assert!(AlignmentParams::builder()
            .max_abs_declination(f64::NAN)
            .build()
            .is_err());
    }

    #[test]
    fn test_one_star_recovers_site() {
        let truth = ObserverLocation::from_degrees(51.48, 359.99).unwrap();
        // Capella, well away from the prime vertical
        let s = observe(&truth, 1.3818, 0.8028, 2.5);

        let mut solver = AlignmentSolver::with_location(truth);
        let latitude = solver.one_star_align(&s);
        assert_abs_diff_eq!(latitude, truth.latitude(), epsilon = 1e-8);
        assert_abs_diff_eq!(
            wrap_pi(solver.current_longitude() - truth.longitude()),
            0.0,
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_one_star_tolerates_stale_longitude() {
        let truth = ObserverLocation::from_degrees(-33.87, 151.21).unwrap();
        let sidereal = 0.4;
        // RA chosen so the hour angle is 30°
        let ra = normalize_two_pi(sidereal + truth.longitude() - 30.0 * RADEG);
        let s = observe(&truth, ra, -20.0 * RADEG, sidereal);

        let stale = ObserverLocation::from_degrees(-10.0, 141.21).unwrap();
        let mut solver = AlignmentSolver::with_location(stale);
        let latitude = solver.one_star_align(&s);

        assert_abs_diff_eq!(latitude, truth.latitude(), epsilon = 1e-8);
        assert_abs_diff_eq!(
            wrap_pi(solver.current_longitude() - truth.longitude()),
            0.0,
            epsilon = 1e-8
        );
        assert_eq!(solve_one_star(&s, stale.longitude()).branch, Branch::Primary);
    }

    #[test]
    fn test_one_star_supplementary_branch() {
        // |h| > 90°: the principal arcsine is the wrong hour angle
        let truth = ObserverLocation::from_degrees(60.0, 10.0).unwrap();
        let sidereal = 3.0;
        let ra = normalize_two_pi(sidereal + truth.longitude() - 150.0 * RADEG);
        let s = observe(&truth, ra, 70.0 * RADEG, sidereal);
        assert!(s.altitude() > 0.0);

        let solution = solve_one_star(&s, truth.longitude());
        assert_eq!(solution.branch, Branch::Supplementary);
        assert_abs_diff_eq!(
            solution.location.latitude(),
            truth.latitude(),
            epsilon = 1e-8
        );
        assert_abs_diff_eq!(solution.hour_angle, 150.0 * RADEG, epsilon = 1e-8);
    }

    #[test]
    fn test_two_star_recovers_site() {
        let truth = ObserverLocation::from_degrees(35.0, 250.0).unwrap();
        let sidereal = 5.2;
        let a = observe(&truth, 1.0, 0.3, sidereal);
        let b = observe(&truth, 2.2, -0.1, sidereal);

        let mut solver = AlignmentSolver::default();
        let latitude = solver.two_star_align(&a, &b);
        assert_abs_diff_eq!(latitude, truth.latitude(), epsilon = 1e-8);
        assert_abs_diff_eq!(
            wrap_pi(solver.current_longitude() - truth.longitude()),
            0.0,
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_two_star_rejects_coincident_stars() {
        let truth = ObserverLocation::from_degrees(35.0, 250.0).unwrap();
        let a = observe(&truth, 1.0, 0.3, 5.2);

        let before = ObserverLocation::from_degrees(12.0, 34.0).unwrap();
        let mut solver = AlignmentSolver::with_location(before);

        assert!(matches!(
            solver.try_two_star_align(&a, &a),
            Err(SettingCirclesError::DegenerateGeometry(
                DegenerateReason::Separation(_)
            ))
        ));
        assert_eq!(solver.two_star_align(&a, &a), before.latitude());
        assert_eq!(solver.location(), before);
    }

    #[test]
    fn test_two_star_rejects_antipodal_stars() {
        let a = Sighting::new(1.0, 0.2, 0.5, 0.3, 0.0);
        let b = Sighting::new(1.0 + PI, -0.2, 3.6, -0.3, 0.0);
        let mut solver = AlignmentSolver::default();
        let before = solver.location();
        assert_eq!(solver.two_star_align(&a, &b), before.latitude());
        assert_eq!(solver.location(), before);
    }

    #[test]
    fn test_two_star_rejects_reference_near_zenith() {
        let a = Sighting::new(1.0, 0.3, 0.2, 89.5 * RADEG, 0.0);
        let b = Sighting::new(2.5, -0.2, 2.0, 0.4, 0.0);
        let mut solver = AlignmentSolver::default();
        let before = solver.location();

        assert_eq!(
            solver.try_two_star_align(&a, &b),
            Err(SettingCirclesError::DegenerateGeometry(
                DegenerateReason::NearZenith(89.5 * RADEG)
            ))
        );
        assert_eq!(solver.two_star_align(&a, &b), before.latitude());
        assert_eq!(solver.location(), before);
    }

    #[test]
    fn test_two_star_rejects_reference_near_pole() {
        // Polaris-like reference star
        let a = Sighting::new(0.66, 89.6 * RADEG, 0.01, 0.7, 0.0);
        let b = Sighting::new(3.0, 0.2, 2.0, 0.4, 0.0);
        let mut solver = AlignmentSolver::default();
        assert!(matches!(
            solver.try_two_star_align(&a, &b),
            Err(SettingCirclesError::DegenerateGeometry(
                DegenerateReason::NearPole(_)
            ))
        ));
        // swapping the roles makes the pair usable
        assert!(solver.try_two_star_align(&b, &a).is_ok());
    }

    #[test]
    fn test_stricter_params_reject_more() {
        let truth = ObserverLocation::from_degrees(35.0, 250.0).unwrap();
        let a = observe(&truth, 1.0, 0.3, 5.2);
        let b = observe(&truth, 1.1, 0.3, 5.2);

        let loose = AlignmentParams::default();
        assert!(solve_two_star(&a, &b, &loose).is_ok());

        let strict = AlignmentParams::builder()
            .min_sin2_separation(0.1)
            .build()
            .unwrap();
        assert!(solve_two_star(&a, &b, &strict).is_err());
    }

    #[test]
    fn test_one_star_replaces_two_star_result() {
        let truth = ObserverLocation::from_degrees(35.0, 250.0).unwrap();
        let other = ObserverLocation::from_degrees(-20.0, 250.0).unwrap();
        let sidereal = 5.2;

        let mut solver = AlignmentSolver::default();
        solver.two_star_align(
            &observe(&truth, 1.0, 0.3, sidereal),
            &observe(&truth, 2.2, -0.1, sidereal),
        );
        assert_abs_diff_eq!(solver.current_latitude(), truth.latitude(), epsilon = 1e-8);

        // a single star seen from elsewhere is taken at face value
        let s = observe(&other, normalize_two_pi(sidereal + other.longitude()), 0.0, sidereal);
        solver.one_star_align(&s);
        assert_abs_diff_eq!(solver.current_latitude(), other.latitude(), epsilon = 1e-8);
    }

    #[test]
    fn test_two_star_rebased() {
        let truth = ObserverLocation::from_degrees(45.0, 7.0).unwrap();
        let first = observe(&truth, 0.8, 0.4, 1.0);
        let second = observe(&truth, 2.0, 0.1, 1.3);

        let mut solver = AlignmentSolver::with_location(truth);
        solver.one_star_align(&first);
        let latitude = solver.two_star_align_rebased(&second, &first);
        assert_abs_diff_eq!(latitude, truth.latitude(), epsilon = 1e-8);
        assert_abs_diff_eq!(
            wrap_pi(solver.current_longitude() - truth.longitude()),
            0.0,
            epsilon = 1e-8
        );
    }
}
