//! # Observer location
//!
//! [`ObserverLocation`] is the single piece of mutable state of the pointing engine: the
//! geographic latitude and longitude the horizon frame is attached to.
//!
//! ## Lifecycle
//!
//! 1. Seeded at startup, either with [`ObserverLocation::default`] (the fallback site) or with a
//!    caller-supplied value.
//! 2. Read by [`crate::transform`] on every conversion.
//! 3. Overwritten, as a whole pair, only by [`crate::alignment::AlignmentSolver`].
//!
//! The struct is `Copy`: readers always work on a snapshot, so a reader can never observe a
//! latitude from one calibration paired with a longitude from another.
//!
//! ## Conventions
//!
//! - Latitude in `[−π/2, π/2]`, north positive.
//! - Longitude in `[0, 2π)`, east positive. It enters the hour angle as
//!   `h = sidereal − RA + longitude`, so any constant offset of the sidereal clock (e.g. a
//!   wrong timezone) is absorbed into the longitude found by alignment.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::angles::normalize_two_pi;
use crate::constants::{Degree, Radian, DEFAULT_LATITUDE_DEG, DEFAULT_LONGITUDE_DEG, RADEG};
use crate::errors::SettingCirclesError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    latitude: Radian,
    longitude: Radian,
}

impl ObserverLocation {
    /// Build a location from radians.
    ///
    /// The longitude is normalized into `[0, 2π)`; the latitude must already lie in
    /// `[−π/2, π/2]`.
    ///
    /// Errors
    /// ----------
    /// * [`SettingCirclesError::InvalidLatitude`] if the latitude is out of range or not finite.
    /// * [`SettingCirclesError::InvalidLongitude`] if the longitude is not finite.
    pub fn new(latitude: Radian, longitude: Radian) -> Result<Self, SettingCirclesError> {
        if !latitude.is_finite() || latitude.abs() > FRAC_PI_2 {
            return Err(SettingCirclesError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() {
            return Err(SettingCirclesError::InvalidLongitude(longitude));
        }
        Ok(ObserverLocation {
            latitude,
            longitude: normalize_two_pi(longitude),
        })
    }

    /// Build a location from degrees (longitude east positive, any range).
    pub fn from_degrees(latitude: Degree, longitude: Degree) -> Result<Self, SettingCirclesError> {
        Self::new(latitude * RADEG, longitude * RADEG)
    }

    /// Used by the solvers, whose outputs are already normalized.
    pub(crate) fn from_solution(latitude: Radian, longitude: Radian) -> Self {
        ObserverLocation {
            latitude: latitude.clamp(-FRAC_PI_2, FRAC_PI_2),
            longitude: normalize_two_pi(longitude),
        }
    }

    pub fn latitude(&self) -> Radian {
        self.latitude
    }

    pub fn longitude(&self) -> Radian {
        self.longitude
    }
}

impl Default for ObserverLocation {
    /// The fallback site used before any alignment: 25.75° S, 28.19° E.
    fn default() -> Self {
        ObserverLocation::from_solution(
            DEFAULT_LATITUDE_DEG * RADEG,
            DEFAULT_LONGITUDE_DEG * RADEG,
        )
    }
}

impl std::fmt::Display for ObserverLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lat {:.5}°, lon {:.5}°",
            self.latitude / RADEG,
            self.longitude / RADEG
        )
    }
}
