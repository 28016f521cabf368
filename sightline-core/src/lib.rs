//! Sightline Core - Directional Geometry for Survey Sightings
//!
//! This crate turns an observer's polar measurement, taken from a moving
//! vessel, into an absolute map position. It is platform-independent: no
//! I/O, no async, no shared state. Every function reads only its arguments,
//! so it can be called from any number of threads at once.
//!
//! # Components
//!
//! - [`angle`]: the [`Azimuth`] compass value type and convention conversions
//! - [`geometry`]: planar [`Coordinate`]s and read-only [`Polyline`] transects
//! - [`locator`]: nearest point and nearest segment search on a polyline
//! - [`heading`]: heading resolution against a transect, [`HeadingResolver`]
//! - [`projector`]: stern-relative observation to absolute position
//!
//! # Example
//!
//! ```rust
//! use sightline_core::{project_position, resolve_heading, Azimuth, Coordinate, GpsFix, Polyline};
//!
//! let transect = Polyline::line(vec![
//!     Coordinate::new(0.0, 0.0),
//!     Coordinate::new(1000.0, 0.0),
//! ])?;
//!
//! // Vessel near the line, GPS course a little north of east
//! let fix = GpsFix::new(Coordinate::new(200.0, 5.0), 80.0)?;
//! let heading = resolve_heading(&transect, &fix)?;
//! assert_eq!(heading, Azimuth::EAST);
//!
//! // Sighting dead ahead, 100 units out
//! let sighting = project_position(fix.location, heading, 180.0, 100.0)?;
//! assert!((sighting.x - 300.0).abs() < 1e-9);
//! # Ok::<(), sightline_core::GeometryError>(())
//! ```

pub mod angle;
pub mod error;
pub mod geometry;
pub mod heading;
pub mod locator;
pub mod projector;

pub use angle::{normalize_degrees, Azimuth, FULL_CIRCLE, HALF_CIRCLE};
pub use error::{GeometryError, Result};
pub use geometry::{Coordinate, Dimension, Polyline};
pub use heading::{disambiguate, resolve_heading, segment_azimuth, GpsFix, HeadingResolver};
pub use locator::{nearest_point, nearest_segment, NearestPoint};
pub use projector::{absolute_azimuth, project_position, Observation};
