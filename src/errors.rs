use thiserror::Error;

use crate::constants::Radian;

/// Why a two-star configuration was rejected as ill-conditioned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DegenerateReason {
    /// The two stars are nearly coincident or nearly antipodal (`sin²` of their separation).
    Separation(f64),
    /// The reference star sits too close to the zenith (its altitude, rad).
    NearZenith(Radian),
    /// The reference star sits too close to a celestial pole (its declination, rad).
    NearPole(Radian),
}

impl std::fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegenerateReason::Separation(sr2) => {
                write!(f, "stars nearly coincident or antipodal (sin² r = {sr2:.3e})")
            }
            DegenerateReason::NearZenith(alt) => {
                write!(f, "reference star too close to the zenith (alt = {alt:.4} rad)")
            }
            DegenerateReason::NearPole(dec) => {
                write!(f, "reference star too close to a pole (dec = {dec:.4} rad)")
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingCirclesError {
    #[error("Latitude out of range [-π/2, π/2]: {0}")]
    InvalidLatitude(f64),

    #[error("Longitude is not a finite angle: {0}")]
    InvalidLongitude(f64),

    #[error("Degenerate alignment geometry: {0}")]
    DegenerateGeometry(DegenerateReason),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Time conversion error: {0}")]
    TimeError(#[from] hifitime::HifitimeError),
}

impl PartialEq for SettingCirclesError {
    fn eq(&self, other: &Self) -> bool {
        use SettingCirclesError::*;
        match (self, other) {
            (InvalidLatitude(a), InvalidLatitude(b)) => a == b,
            (InvalidLongitude(a), InvalidLongitude(b)) => a == b,
            (DegenerateGeometry(a), DegenerateGeometry(b)) => a == b,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,

            // hifitime errors are compared by variant only
            (TimeError(_), TimeError(_)) => true,

            _ => false,
        }
    }
}
