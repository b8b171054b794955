//! # Constants and type definitions for setting circles
//!
//! This module centralizes the **angular conversion factors**, the **sidereal clock constants**,
//! and the **type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, hours ↔ radians)
//! - The sidereal-angle approximation coefficients used by [`crate::time::TimeBase`]
//! - The inherited degeneracy thresholds of two-star alignment
//! - Core type aliases (`Radian`, `Degree`, `UnixSeconds`)
//!
//! All angles handled by the public API are expressed in **radians**.

// -------------------------------------------------------------------------------------------------
// Angular constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, one full revolution
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Hours → radians
pub const RADH: f64 = DPI / 24.0;

/// Number of seconds in a mean solar day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

// -------------------------------------------------------------------------------------------------
// Sidereal clock
// -------------------------------------------------------------------------------------------------

/// Sidereal phase (in revolutions) at the time origin.
pub const SIDEREAL_PHASE_AT_ORIGIN: f64 = 0.77905727325;

/// Slow annual drift term of the sidereal rate, in seconds per extra revolution.
pub const SECONDS_PER_TROPICAL_YEAR: f64 = 31_556_925.0;

/// Length of a sidereal day in solar seconds (inverse of the combined rate).
pub const SIDEREAL_DAY_SECONDS: f64 = 86_164.090531;

/// Reduction period applied to elapsed seconds before evaluating the sidereal polynomial.
///
/// Ten sidereal days, rounded to the second.
pub const SIDEREAL_REDUCTION_PERIOD: i64 = 861_641;

/// Unix timestamp of 2000-01-01T12:00:00 UTC.
pub const J2000_UNIX_SECONDS: i64 = 946_728_000;

// -------------------------------------------------------------------------------------------------
// Two-star alignment conditioning
// -------------------------------------------------------------------------------------------------

/// Smallest accepted `sin²` of the separation between the two alignment stars.
pub const MIN_SIN2_SEPARATION: f64 = 4e-4;

/// Largest accepted |altitude| of the reference star (rad), about 89.4°.
pub const MAX_ABS_ALTITUDE: f64 = 1.56;

/// Largest accepted |declination| of the reference star (rad), about 89.4°.
pub const MAX_ABS_DECLINATION: f64 = 1.56;

// -------------------------------------------------------------------------------------------------
// Fallback site
// -------------------------------------------------------------------------------------------------

/// Latitude used before any alignment, in degrees.
pub const DEFAULT_LATITUDE_DEG: Degree = -25.75;

/// Longitude used before any alignment, in degrees east.
pub const DEFAULT_LONGITUDE_DEG: Degree = 28.19;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Wall-clock instant, whole seconds since the Unix epoch (UTC, no leap seconds)
pub type UnixSeconds = i64;
