//! # Sidereal time base
//!
//! Converts wall-clock timestamps to a **sidereal angle** (the rotation of the sky, in radians)
//! and back.
//!
//! ## Model
//!
//! Elapsed seconds since the [`TimeOrigin`] are first reduced modulo
//! [`SIDEREAL_REDUCTION_PERIOD`] (ten sidereal days), then fed to the linear approximation
//!
//! ```text
//! cycle = 0.77905727325 + d / 86400 + d / 31556925
//! angle = 2π · frac(cycle)
//! ```
//!
//! The first rate term is the mean solar day, the second a slow annual drift, and the constant
//! anchors the sky phase at the origin epoch. The reduction keeps `d` small so the polynomial
//! never loses precision. The period is ten sidereal days to within a second, so the phase jump at
//! each reduction boundary stays below 1e-5 rad.
//!
//! The inverse, [`TimeBase::local_time`], is only unique within one sidereal day, so it takes an
//! **anchor** instant (usually "now") and returns the instant within the same sidereal cycle.
//!
//! ## Timestamps
//!
//! Timestamps are whole seconds on the Unix scale ([`UnixSeconds`]). A device clock that runs
//! on local civil time is handled through [`TimeOrigin::timezone_offset_seconds`], which is
//! subtracted before the sidereal evaluation and added back by the inverse. Calendar epochs are
//! resolved with [`hifitime`].
//!
//! ## See also
//! ------------
//! * [`crate::transform`] – Consumes the sidereal angle to build hour angles.
//! * [`crate::alignment`] – Longitude found by alignment absorbs any constant clock offset.

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::angles::normalize_two_pi;
use crate::constants::{
    Radian, UnixSeconds, DPI, J2000_UNIX_SECONDS, SECONDS_PER_DAY, SECONDS_PER_TROPICAL_YEAR,
    SIDEREAL_DAY_SECONDS, SIDEREAL_PHASE_AT_ORIGIN, SIDEREAL_REDUCTION_PERIOD,
};
use crate::errors::SettingCirclesError;

/// Reference instant and clock offset of the sidereal time base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOrigin {
    /// Origin instant, Unix seconds (UTC).
    pub epoch_unix_seconds: UnixSeconds,
    /// Offset of the device clock from UTC, in seconds (east positive).
    pub timezone_offset_seconds: i64,
}

impl TimeOrigin {
    /// Origin at 2000-01-01T12:00:00 UTC.
    pub fn j2000(timezone_offset_seconds: i64) -> Self {
        TimeOrigin {
            epoch_unix_seconds: J2000_UNIX_SECONDS,
            timezone_offset_seconds,
        }
    }

    /// Origin at an arbitrary calendar epoch, rounded to the second.
    pub fn from_epoch(epoch: Epoch, timezone_offset_seconds: i64) -> Self {
        TimeOrigin {
            epoch_unix_seconds: epoch.to_unix_seconds().round() as i64,
            timezone_offset_seconds,
        }
    }

    /// Seconds elapsed since the origin on the UTC scale.
    fn elapsed(&self, timestamp: UnixSeconds) -> i64 {
        timestamp - self.epoch_unix_seconds - self.timezone_offset_seconds
    }
}

impl Default for TimeOrigin {
    fn default() -> Self {
        TimeOrigin::j2000(0)
    }
}

/// Source of wall-clock timestamps.
///
/// The real-time clock of the device is an external collaborator; this trait is the seam it
/// plugs into.
pub trait TimestampSource {
    fn now(&self) -> Result<UnixSeconds, SettingCirclesError>;
}

/// The host system clock, read through [`hifitime::Epoch::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimestampSource for SystemClock {
    fn now(&self) -> Result<UnixSeconds, SettingCirclesError> {
        Ok(Epoch::now()?.to_unix_seconds().floor() as i64)
    }
}

/// A clock frozen at a given instant. Useful for replaying captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub UnixSeconds);

impl TimestampSource for FixedClock {
    fn now(&self) -> Result<UnixSeconds, SettingCirclesError> {
        Ok(self.0)
    }
}

/// Fractional sky cycle (in revolutions, not yet reduced) after `d` reduced seconds.
#[inline]
fn sidereal_cycle(d: i64) -> f64 {
    let d = d as f64;
    SIDEREAL_PHASE_AT_ORIGIN + d / SECONDS_PER_DAY + d / SECONDS_PER_TROPICAL_YEAR
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeBase {
    origin: TimeOrigin,
}

impl TimeBase {
    pub fn new(origin: TimeOrigin) -> Self {
        TimeBase { origin }
    }

    pub fn origin(&self) -> &TimeOrigin {
        &self.origin
    }

    /// Sidereal angle at `timestamp`.
    ///
    /// Arguments
    /// -----------------
    /// * `timestamp`: device clock reading, Unix seconds.
    ///
    /// Return
    /// ----------
    /// * The sky rotation angle in `[0, 2π)`.
    pub fn sidereal_angle(&self, timestamp: UnixSeconds) -> Radian {
        let d = self
            .origin
            .elapsed(timestamp)
            .rem_euclid(SIDEREAL_REDUCTION_PERIOD);
        let cycle = sidereal_cycle(d);
        normalize_two_pi((cycle - cycle.floor()) * DPI)
    }

    /// Sidereal angle at a calendar epoch.
    ///
    /// The epoch is read on the UTC scale and rounded to the nearest whole second.
    pub fn sidereal_angle_at(&self, epoch: &Epoch) -> Radian {
        self.sidereal_angle(epoch.to_unix_seconds().round() as i64)
    }

    /// Sidereal angle now, according to `clock`.
    pub fn sidereal_angle_now(
        &self,
        clock: &impl TimestampSource,
    ) -> Result<Radian, SettingCirclesError> {
        Ok(self.sidereal_angle(clock.now()?))
    }

    /// Wall-clock instant at which the sky reaches `sidereal_angle`, near `anchor`.
    ///
    /// The anchor fixes the reduction period and the whole sky cycle; the input angle then picks
    /// the position within that cycle. The result lies within one sidereal day of the anchor, and
    /// `local_time(sidereal_angle(t), t)` returns `t` to within a second.
    ///
    /// Arguments
    /// -----------------
    /// * `sidereal_angle`: target sky rotation (rad), any range.
    /// * `anchor`: an instant in the same sidereal day, usually the current clock reading.
    ///
    /// Return
    /// ----------
    /// * The device clock reading (Unix seconds, timezone offset applied).
    pub fn local_time(&self, sidereal_angle: Radian, anchor: UnixSeconds) -> UnixSeconds {
        let d0 = self.origin.elapsed(anchor);
        let n = d0.div_euclid(SIDEREAL_REDUCTION_PERIOD);
        let whole_cycles = sidereal_cycle(d0.rem_euclid(SIDEREAL_REDUCTION_PERIOD)).floor();

        let cycle = normalize_two_pi(sidereal_angle) / DPI + whole_cycles;
        let d = ((cycle - SIDEREAL_PHASE_AT_ORIGIN) * SIDEREAL_DAY_SECONDS).round() as i64;

        d + self.origin.epoch_unix_seconds
            + n * SIDEREAL_REDUCTION_PERIOD
            + self.origin.timezone_offset_seconds
    }
}
