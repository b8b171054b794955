//! # Angle normalization and guarded inverse trigonometry
//!
//! Every angle leaving the public API goes through one of the helpers below, and every
//! `asin`/`acos` in the crate is evaluated on a clamped argument. Rounding in chains of
//! transcendental functions routinely pushes a cosine to `1.0000000000000002`; without the
//! clamp that becomes a NaN that then propagates into the observer location.
//!
//! ## Ranges
//!
//! | helper               | output range |
//! |----------------------|--------------|
//! | [`normalize_two_pi`] | `[0, 2π)`    |
//! | [`wrap_pi`]          | `(−π, π]`    |
//! | [`clamp_unit`]       | `[−1, 1]`    |
//!
//! [`closest_branch`] is the tie-break used to resolve the two-valued arcsine of one-star
//! alignment: both candidates are compared to a reference under the shortest signed angular
//! distance.

use std::f64::consts::PI;

use crate::constants::{Radian, DPI};

/// Principal value of an angle in `[0, 2π)`.
pub fn normalize_two_pi(a: Radian) -> Radian {
    let r = a.rem_euclid(DPI);
    // rem_euclid rounds tiny negative inputs up to exactly 2π
    if r >= DPI {
        0.0
    } else {
        r
    }
}

/// Shortest signed representative of an angle, in `(−π, π]`.
pub fn wrap_pi(a: Radian) -> Radian {
    let r = PI - (PI - a).rem_euclid(DPI);
    if r <= -PI {
        r + DPI
    } else {
        r
    }
}

/// Clamp a sine/cosine value drifting out of `[−1, 1]`.
#[inline]
pub fn clamp_unit(x: f64) -> f64 {
    x.clamp(-1.0, 1.0)
}

/// `asin` of a clamped argument, in `[−π/2, π/2]`.
#[inline]
pub fn safe_asin(x: f64) -> Radian {
    clamp_unit(x).asin()
}

/// `acos` of a clamped argument, in `[0, π]`.
#[inline]
pub fn safe_acos(x: f64) -> Radian {
    clamp_unit(x).acos()
}

/// Which candidate of a two-valued solution was retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// The principal value (e.g. the arcsine itself).
    Primary,
    /// The supplementary value (e.g. `π − asin`).
    Supplementary,
}

/// Pick the candidate closest to `reference` under the shortest signed angular distance.
///
/// Both residuals are wrapped into `(−π, π]` before their magnitudes are compared. On an exact
/// tie the supplementary candidate wins.
///
/// Arguments
/// -----------------
/// * `reference`: the angle both candidates are compared against (rad).
/// * `primary`, `supplementary`: the two candidates (rad).
///
/// Return
/// ----------
/// * The [`Branch`] of the closer candidate.
pub fn closest_branch(reference: Radian, primary: Radian, supplementary: Radian) -> Branch {
    let e1 = wrap_pi(reference - primary).abs();
    let e2 = wrap_pi(reference - supplementary).abs();
    if e1 < e2 {
        Branch::Primary
    } else {
        Branch::Supplementary
    }
}
