//! Sexagesimal readouts for the hand-controller display.
//!
//! Sidereal time and right ascension are shown as `hh:mm:ss`, latitude, longitude and
//! declination as `±dd:mm:ss`. Both are rounded to the nearest whole second, and the rounding
//! carries into minutes and hours/degrees (`00:00:59.6` displays as `00:01:00`).

use std::fmt;

use crate::angles::normalize_two_pi;
use crate::constants::{Radian, RADH, SECONDS_PER_DAY};

/// An hour angle readout in `[00:00:00, 23:59:59]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hms {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Hms {
    /// Read an angle in any range as a time of the sidereal day.
    pub fn from_radians(angle: Radian) -> Self {
        let total = (normalize_two_pi(angle) / RADH * 3600.0).round() as u32;
        // rounding up the last half-second of the day wraps to midnight
        let total = total % SECONDS_PER_DAY as u32;
        Hms {
            hours: total / 3600,
            minutes: total / 60 % 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// A signed degree readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dms {
    pub negative: bool,
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Dms {
    /// Read an angle as signed degrees, without any range reduction.
    pub fn from_radians(angle: Radian) -> Self {
        let arcsec = (angle.to_degrees().abs() * 3600.0).round() as u32;
        Dms {
            // a value that rounds to zero is shown unsigned
            negative: angle < 0.0 && arcsec > 0,
            degrees: arcsec / 3600,
            minutes: arcsec / 60 % 60,
            seconds: arcsec % 60,
        }
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(
            f,
            "{}{:02}:{:02}:{:02}",
            sign, self.degrees, self.minutes, self.seconds
        )
    }
}

#[cfg(test)]
mod sexagesimal_test {
    use super::*;
    use crate::constants::{DPI, RADEG};

    fn hms_to_radians(h: f64, m: f64, s: f64) -> Radian {
        (h * 3600.0 + m * 60.0 + s) / SECONDS_PER_DAY * DPI
    }

    #[test]
    fn test_hms_display() {
        assert_eq!(Hms::from_radians(hms_to_radians(5.0, 14.0, 32.0)).to_string(), "05:14:32");
        assert_eq!(Hms::from_radians(0.0).to_string(), "00:00:00");
        assert_eq!(
            Hms::from_radians(hms_to_radians(18.0, 36.0, 56.3)).to_string(),
            "18:36:56"
        );
    }

    #[test]
    fn test_hms_carry() {
        assert_eq!(Hms::from_radians(hms_to_radians(0.0, 0.0, 59.6)).to_string(), "00:01:00");
        assert_eq!(Hms::from_radians(hms_to_radians(6.0, 59.0, 59.7)).to_string(), "07:00:00");
        assert_eq!(
            Hms::from_radians(hms_to_radians(23.0, 59.0, 59.8)).to_string(),
            "00:00:00"
        );
    }

    #[test]
    fn test_hms_wraps_negative_angles() {
        assert_eq!(Hms::from_radians(-DPI / 24.0).to_string(), "23:00:00");
    }

    #[test]
    fn test_dms_display() {
        assert_eq!(Dms::from_radians(-25.75 * RADEG).to_string(), "-25:45:00");
        assert_eq!(Dms::from_radians(28.19 * RADEG).to_string(), "28:11:24");
        assert_eq!(Dms::from_radians(280.5 * RADEG).to_string(), "280:30:00");
        assert_eq!(Dms::from_radians(-1e-9).to_string(), "00:00:00");
    }

    #[test]
    fn test_dms_carry() {
        let angle = (10.0 + 59.0 / 60.0 + 59.6 / 3600.0) * RADEG;
        assert_eq!(
            Dms::from_radians(angle),
            Dms {
                negative: false,
                degrees: 11,
                minutes: 0,
                seconds: 0
            }
        );
    }
}
