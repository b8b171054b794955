//! # SettingCircles: time base, transforms and alignment behind one handle
//!
//! This module defines [`SettingCircles`], the façade a hand controller talks to. It wires
//! together:
//!
//! 1. **Time base** ([`TimeBase`]) – wall-clock timestamps to sidereal angle and back.
//! 2. **Alignment state** ([`AlignmentSolver`]) – the observer location, seeded from the
//!    configuration and rewritten by one- and two-star alignment.
//! 3. **Transforms** ([`crate::transform`]) – evaluated against the current location, so callers
//!    never pass the location themselves.
//!
//! ## Typical usage
//!
//! ```rust
//! use setting_circles::setting_circles::{SettingCircles, SettingCirclesConfig};
//! use setting_circles::sexagesimal::Hms;
//!
//! let mut circles = SettingCircles::new(SettingCirclesConfig::default());
//! let now = 1_700_000_000;
//!
//! // operator centers Vega and presses "align"
//! let vega = circles.designate(4.8736, 0.6769, 0.9, 0.7, now);
//! circles.one_star_align(&vega);
//!
//! // live readout of where the tube points
//! let fix = circles.capture(2.1, 0.4, now + 60);
//! println!("RA {}", Hms::from_radians(fix.right_ascension()));
//! ```
//!
//! ## Notes
//!
//! - The façade never writes the device clock. [`SettingCircles::local_time`] is there for
//!   callers that want to re-derive a wall-clock reading from a sidereal angle.
//! - All methods take `&self` except the alignment ones; wrap the handle in the caller's own lock
//!   if it is shared between threads.
//!
//! ## See also
//! ------------
//! * [`SettingCirclesConfig`] – Serializable startup configuration.
//! * [`crate::alignment`] – The alignment procedures and their conditioning thresholds.

use serde::{Deserialize, Serialize};

use crate::alignment::{AlignmentParams, AlignmentSolver};
use crate::constants::{Radian, UnixSeconds};
use crate::errors::SettingCirclesError;
use crate::location::ObserverLocation;
use crate::separation::separation;
use crate::sighting::{Frame, Sighting};
use crate::time::{TimeBase, TimeOrigin, TimestampSource};
use crate::transform;

/// Startup configuration of a [`SettingCircles`] handle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SettingCirclesConfig {
    pub time_origin: TimeOrigin,
    /// Seed location, used until the first successful alignment.
    pub location: ObserverLocation,
    pub alignment: AlignmentParams,
}

impl SettingCirclesConfig {
    pub fn builder() -> SettingCirclesConfigBuilder {
        SettingCirclesConfigBuilder::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SettingCirclesConfigBuilder {
    config: SettingCirclesConfig,
}

impl SettingCirclesConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SettingCirclesConfig::default(),
        }
    }

    pub fn time_origin(mut self, origin: TimeOrigin) -> Self {
        self.config.time_origin = origin;
        self
    }

    pub fn location(mut self, location: ObserverLocation) -> Self {
        self.config.location = location;
        self
    }

    pub fn alignment(mut self, params: AlignmentParams) -> Self {
        self.config.alignment = params;
        self
    }

    /// Validate and return the configuration.
    ///
    /// Errors
    /// ----------
    /// * [`SettingCirclesError::InvalidParameter`] if the alignment thresholds are invalid.
    pub fn build(self) -> Result<SettingCirclesConfig, SettingCirclesError> {
        self.config.alignment.validate()?;
        Ok(self.config)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingCircles {
    time: TimeBase,
    solver: AlignmentSolver,
}

impl SettingCircles {
    pub fn new(config: SettingCirclesConfig) -> Self {
        SettingCircles {
            time: TimeBase::new(config.time_origin),
            solver: AlignmentSolver::new(config.location, config.alignment),
        }
    }

    pub fn time_base(&self) -> &TimeBase {
        &self.time
    }

    pub fn solver(&self) -> &AlignmentSolver {
        &self.solver
    }

    // ---------------------------------------------------------------------------------------
    // Time
    // ---------------------------------------------------------------------------------------

    pub fn sidereal_angle(&self, timestamp: UnixSeconds) -> Radian {
        self.time.sidereal_angle(timestamp)
    }

    pub fn sidereal_angle_now(
        &self,
        clock: &impl TimestampSource,
    ) -> Result<Radian, SettingCirclesError> {
        self.time.sidereal_angle_now(clock)
    }

    /// See [`TimeBase::local_time`].
    pub fn local_time(&self, sidereal_angle: Radian, anchor: UnixSeconds) -> UnixSeconds {
        self.time.local_time(sidereal_angle, anchor)
    }

    // ---------------------------------------------------------------------------------------
    // Transforms at the current location
    // ---------------------------------------------------------------------------------------

    pub fn to_horizontal(&self, sighting: &Sighting) -> (Radian, Radian) {
        transform::to_horizontal(sighting, &self.solver.location())
    }

    pub fn to_equatorial(&self, sighting: &Sighting) -> (Radian, Radian) {
        transform::to_equatorial(sighting, &self.solver.location())
    }

    pub fn separation(&self, p1: &Sighting, p2: &Sighting, frame: Frame) -> Radian {
        separation(p1, p2, frame)
    }

    /// Live pointing fix: the encoder reading at `timestamp`, completed with the sky coordinates
    /// it corresponds to at the current location.
    pub fn capture(&self, azimuth: Radian, altitude: Radian, timestamp: UnixSeconds) -> Sighting {
        let fix = Sighting::from_horizontal(azimuth, altitude, self.sidereal_angle(timestamp));
        let (ra, dec) = self.to_equatorial(&fix);
        fix.with_equatorial(ra, dec)
    }

    /// Alignment sighting: the catalog position of a designated star paired with the encoder
    /// reading taken while it was centered.
    pub fn designate(
        &self,
        right_ascension: Radian,
        declination: Radian,
        azimuth: Radian,
        altitude: Radian,
        timestamp: UnixSeconds,
    ) -> Sighting {
        Sighting::new(
            right_ascension,
            declination,
            azimuth,
            altitude,
            self.sidereal_angle(timestamp),
        )
    }

    /// Angular distance, on the sky, between where the tube points and a catalog target.
    ///
    /// Arguments
    /// -----------------
    /// * `azimuth`, `altitude`: current encoder reading.
    /// * `right_ascension`, `declination`: catalog position of the target.
    /// * `timestamp`: instant of the encoder reading.
    ///
    /// Return
    /// ----------
    /// * The separation in `[0, π]`.
    pub fn pointing_error(
        &self,
        azimuth: Radian,
        altitude: Radian,
        right_ascension: Radian,
        declination: Radian,
        timestamp: UnixSeconds,
    ) -> Radian {
        let fix = self.capture(azimuth, altitude, timestamp);
        let target =
            Sighting::from_equatorial(right_ascension, declination, fix.sidereal_angle());
        separation(&fix, &target, Frame::Equatorial)
    }

    // ---------------------------------------------------------------------------------------
    // Location and alignment
    // ---------------------------------------------------------------------------------------

    pub fn location(&self) -> ObserverLocation {
        self.solver.location()
    }

    pub fn current_latitude(&self) -> Radian {
        self.solver.current_latitude()
    }

    pub fn current_longitude(&self) -> Radian {
        self.solver.current_longitude()
    }

    pub fn one_star_align(&mut self, sighting: &Sighting) -> Radian {
        self.solver.one_star_align(sighting)
    }

    pub fn two_star_align(&mut self, a: &Sighting, b: &Sighting) -> Radian {
        self.solver.two_star_align(a, b)
    }

    pub fn try_two_star_align(
        &mut self,
        a: &Sighting,
        b: &Sighting,
    ) -> Result<Radian, SettingCirclesError> {
        self.solver.try_two_star_align(a, b)
    }

    pub fn two_star_align_rebased(&mut self, latest: &Sighting, earlier: &Sighting) -> Radian {
        self.solver.two_star_align_rebased(latest, earlier)
    }
}
