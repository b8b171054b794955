//! Great-circle separation between two directions.
//!
//! One formula serves both frames: the spherical law of cosines on an
//! (elevation, longitude) pair, which is (altitude, azimuth) in the horizon frame and
//! (declination, right ascension) in the sky frame. See [`Frame::coordinates`].

use crate::angles::safe_acos;
use crate::constants::Radian;
use crate::sighting::{Frame, Sighting};

/// Cosine of the angular distance between `(e1, b1)` and `(e2, b2)`, clamped to `[−1, 1]`.
pub fn cos_angular_distance(e1: Radian, b1: Radian, e2: Radian, b2: Radian) -> f64 {
    (e1.sin() * e2.sin() + e1.cos() * e2.cos() * (b2 - b1).abs().cos()).clamp(-1.0, 1.0)
}

/// Angular distance between `(e1, b1)` and `(e2, b2)`, in `[0, π]`.
///
/// Identical inputs give exactly zero; elsewhere the result inherits the limited resolution of
/// `acos` near 1 (about 1e-8 rad), which is far below encoder resolution.
pub fn angular_distance(e1: Radian, b1: Radian, e2: Radian, b2: Radian) -> Radian {
    if e1 == e2 && b1 == b2 {
        return 0.0;
    }
    safe_acos(cos_angular_distance(e1, b1, e2, b2))
}

/// Separation of two sightings, read in `frame`.
pub fn separation(p1: &Sighting, p2: &Sighting, frame: Frame) -> Radian {
    let (e1, b1) = frame.coordinates(p1);
    let (e2, b2) = frame.coordinates(p2);
    angular_distance(e1, b1, e2, b2)
}
