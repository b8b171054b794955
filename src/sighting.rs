//! # Sightings
//!
//! A [`Sighting`] pairs one direction expressed in both frames with the sidereal angle at which
//! it was captured:
//!
//! ```text
//! Sighting
//! ├── right_ascension, declination   (sky frame)
//! ├── azimuth, altitude              (horizon frame, azimuth east from north)
//! └── sidereal_angle                 (sky rotation at capture)
//! ```
//!
//! Sightings are immutable snapshots. The `with_*` methods and [`Sighting::rebased`] return a
//! new value; nothing in the crate mutates a sighting in place.
//!
//! Two producers exist in practice:
//! - **alignment**: catalog RA/declination of a designated star + the encoder reading,
//!   see [`Sighting::new`];
//! - **pointing readout**: encoder reading + live sidereal angle only,
//!   see [`Sighting::from_horizontal`], later completed by [`crate::transform::to_equatorial`].

use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::angles::normalize_two_pi;
use crate::constants::Radian;
use crate::location::ObserverLocation;
use crate::transform::to_horizontal;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    right_ascension: Radian,
    declination: Radian,
    azimuth: Radian,
    altitude: Radian,
    sidereal_angle: Radian,
}

impl Sighting {
    /// Full sighting: catalog position of a star and the measured encoder fix.
    ///
    /// Right ascension, azimuth and sidereal angle are normalized into `[0, 2π)`; declination
    /// and altitude are clamped into `[−π/2, π/2]`.
    pub fn new(
        right_ascension: Radian,
        declination: Radian,
        azimuth: Radian,
        altitude: Radian,
        sidereal_angle: Radian,
    ) -> Self {
        Sighting {
            right_ascension: normalize_two_pi(right_ascension),
            declination: declination.clamp(-FRAC_PI_2, FRAC_PI_2),
            azimuth: normalize_two_pi(azimuth),
            altitude: altitude.clamp(-FRAC_PI_2, FRAC_PI_2),
            sidereal_angle: normalize_two_pi(sidereal_angle),
        }
    }

    /// Encoder-only sighting; the sky coordinates are left at zero.
    pub fn from_horizontal(azimuth: Radian, altitude: Radian, sidereal_angle: Radian) -> Self {
        Self::new(0.0, 0.0, azimuth, altitude, sidereal_angle)
    }

    /// Catalog-only sighting; the horizon coordinates are left at zero.
    pub fn from_equatorial(
        right_ascension: Radian,
        declination: Radian,
        sidereal_angle: Radian,
    ) -> Self {
        Self::new(right_ascension, declination, 0.0, 0.0, sidereal_angle)
    }

    pub fn right_ascension(&self) -> Radian {
        self.right_ascension
    }

    pub fn declination(&self) -> Radian {
        self.declination
    }

    pub fn azimuth(&self) -> Radian {
        self.azimuth
    }

    pub fn altitude(&self) -> Radian {
        self.altitude
    }

    pub fn sidereal_angle(&self) -> Radian {
        self.sidereal_angle
    }

    /// Copy with the sky coordinates replaced.
    pub fn with_equatorial(&self, right_ascension: Radian, declination: Radian) -> Self {
        Self::new(
            right_ascension,
            declination,
            self.azimuth,
            self.altitude,
            self.sidereal_angle,
        )
    }

    /// Copy with the horizon coordinates replaced.
    pub fn with_horizontal(&self, azimuth: Radian, altitude: Radian) -> Self {
        Self::new(
            self.right_ascension,
            self.declination,
            azimuth,
            altitude,
            self.sidereal_angle,
        )
    }

    /// Re-project this sighting to another instant.
    ///
    /// The sky coordinates are kept and the horizon coordinates are recomputed at
    /// `sidereal_angle` through `location`. Two-star alignment needs both sightings at a single
    /// instant; this is how an earlier star is brought forward to the time of the latest one.
    pub fn rebased(&self, sidereal_angle: Radian, location: &ObserverLocation) -> Self {
        let moved = Self::from_equatorial(self.right_ascension, self.declination, sidereal_angle);
        let (azimuth, altitude) = to_horizontal(&moved, location);
        moved.with_horizontal(azimuth, altitude)
    }
}

/// Coordinate frame a pair of angles is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frame {
    /// (altitude, azimuth)
    Horizontal,
    /// (declination, right ascension)
    Equatorial,
}

impl Frame {
    /// The (elevation-like, longitude-like) pair of `sighting` in this frame.
    pub fn coordinates(&self, sighting: &Sighting) -> (Radian, Radian) {
        match self {
            Frame::Horizontal => (sighting.altitude, sighting.azimuth),
            Frame::Equatorial => (sighting.declination, sighting.right_ascension),
        }
    }

    /// Direction cosines of a sighting in this frame.
    ///
    /// `x` points to longitude-like angle 0, `z` to the zenith (horizontal) or the north
    /// celestial pole (equatorial).
    pub fn unit_vector(&self, sighting: &Sighting) -> Vector3<f64> {
        let (e, b) = self.coordinates(sighting);
        direction_cosines(e, b)
    }
}

/// Unit vector of the direction at elevation `e` and longitude-like angle `b`.
pub fn direction_cosines(e: Radian, b: Radian) -> Vector3<f64> {
    let (se, ce) = e.sin_cos();
    let (sb, cb) = b.sin_cos();
    Vector3::new(ce * cb, ce * sb, se)
}
