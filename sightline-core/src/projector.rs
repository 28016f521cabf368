//! Sighting Position Projection
//!
//! Observers measure a sighting as a relative angle and a distance from the
//! vessel. The relative angle is read clockwise starting at the stern, per
//! survey protocol:
//!
//! | Relative angle | Direction from the vessel |
//! |----------------|---------------------------|
//! | 0              | stern                     |
//! | 90             | port                      |
//! | 180            | bow                       |
//! | 270            | starboard                 |
//!
//! The projector reframes that angle onto the compass using the vessel
//! heading and walks `distance` units from the observation origin.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::angle::{Azimuth, HALF_CIRCLE};
use crate::error::{ensure_finite, GeometryError, Result};
use crate::geometry::Coordinate;

/// An observer's polar measurement relative to the vessel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Degrees clockwise from the stern
    pub relative_angle: f64,
    /// Distance to the sighting, in the planar system's linear units
    pub distance: f64,
}

impl Observation {
    /// Build a checked observation.
    ///
    /// Both values must be finite and the distance must not be negative.
    pub fn new(relative_angle: f64, distance: f64) -> Result<Self> {
        let observation = Observation {
            relative_angle,
            distance,
        };
        observation.validate()?;
        Ok(observation)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("relative angle", self.relative_angle)?;
        ensure_finite("distance", self.distance)?;
        if self.distance < 0.0 {
            return Err(GeometryError::invalid_argument(format!(
                "distance must not be negative, got {}",
                self.distance
            )));
        }
        Ok(())
    }

    /// Compass bearing from the vessel to the sighting
    pub fn absolute_azimuth(&self, heading: Azimuth) -> Azimuth {
        absolute_azimuth(heading, self.relative_angle)
    }

    /// Absolute position of the sighting seen from `origin` on `heading`
    pub fn project_from(&self, origin: Coordinate, heading: Azimuth) -> Result<Coordinate> {
        project_position(origin, heading, self.relative_angle, self.distance)
    }
}

/// Compass bearing for a stern-relative clockwise angle.
///
/// A relative angle of 180 (the bow) points along `heading`.
pub fn absolute_azimuth(heading: Azimuth, relative_angle: f64) -> Azimuth {
    heading + Azimuth::new(relative_angle - HALF_CIRCLE)
}

/// Position `distance` units from `origin` along the bearing described by
/// `heading` and the stern-relative `relative_angle`.
pub fn project_position(
    origin: Coordinate,
    heading: Azimuth,
    relative_angle: f64,
    distance: f64,
) -> Result<Coordinate> {
    let origin = origin.validated("origin")?;
    Observation::new(relative_angle, distance)?;

    let bearing = absolute_azimuth(heading, relative_angle);
    let trig = bearing.to_trig_radians();
    let target = origin.offset(Vector2::new(trig.cos(), trig.sin()) * distance);

    log::trace!(
        "projected {} along {:.2} from ({}, {}) to ({:.3}, {:.3})",
        distance,
        bearing,
        origin.x,
        origin.y,
        target.x,
        target.y
    );
    Ok(target)
}
