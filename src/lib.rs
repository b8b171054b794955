//! Pointing engine for digital setting circles: sidereal time, horizon ↔ sky conversions and
//! one-/two-star self-alignment of an alt-azimuth mount.
//!
//! Start from [`setting_circles::SettingCircles`]; the modules below are usable on their own.

pub mod alignment;
pub mod angles;
pub mod constants;
pub mod errors;
pub mod location;
pub mod separation;
pub mod sexagesimal;
pub mod setting_circles;
pub mod sighting;
pub mod time;
pub mod transform;

pub use alignment::{AlignmentParams, AlignmentSolver};
pub use errors::SettingCirclesError;
pub use location::ObserverLocation;
pub use setting_circles::{SettingCircles, SettingCirclesConfig};
pub use sighting::{Frame, Sighting};
pub use time::{TimeBase, TimeOrigin};
