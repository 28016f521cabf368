//! Planar Geometry Types
//!
//! Coordinates live in a projected planar system whose linear units are
//! consistent across all inputs. Reprojection from GPS coordinates is the
//! caller's job.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

/// A point in a projected planar coordinate system
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Easting
    pub x: f64,
    /// Northing
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }
    }

    /// Check that both components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Return the coordinate or [`GeometryError::InvalidArgument`] if it is not finite
    pub fn validated(self, name: &str) -> Result<Self> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(GeometryError::invalid_argument(format!(
                "{} must have finite components, got ({}, {})",
                name, self.x, self.y
            )))
        }
    }

    pub fn distance_squared(&self, other: &Coordinate) -> f64 {
        (self.to_point() - other.to_point()).norm_squared()
    }

    pub fn distance(&self, other: &Coordinate) -> f64 {
        self.distance_squared(other).sqrt()
    }

    #[inline]
    pub fn to_point(self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// Offset by a vector
    #[inline]
    pub fn offset(self, delta: Vector2<f64>) -> Self {
        (self.to_point() + delta).into()
    }
}

impl From<Point2<f64>> for Coordinate {
    fn from(point: Point2<f64>) -> Self {
        Coordinate::new(point.x, point.y)
    }
}

impl From<Coordinate> for Point2<f64> {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.to_point()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Coordinate::new(x, y)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([x, y]: [f64; 2]) -> Self {
        Coordinate::new(x, y)
    }
}

/// Topological dimension of a polyline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Open line string(s)
    #[default]
    Line,
    /// Ring(s) bounding an area; the closing segment is implied
    Area,
}

/// Ordered, possibly multi-part reference geometry for a survey transect
///
/// A polyline is only ever read by this crate. Construct it through
/// [`Polyline::new`] (or check a deserialized one with
/// [`Polyline::validate`]) so the segment search can rely on every part
/// having at least one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    #[serde(default)]
    dimension: Dimension,
    parts: Vec<Vec<Coordinate>>,
}

impl Polyline {
    /// Build and validate a polyline
    pub fn new(dimension: Dimension, parts: Vec<Vec<Coordinate>>) -> Result<Self> {
        let polyline = Polyline { dimension, parts };
        polyline.validate()?;
        Ok(polyline)
    }

    /// Single-part line string
    pub fn line(vertices: Vec<Coordinate>) -> Result<Self> {
        Polyline::new(Dimension::Line, vec![vertices])
    }

    /// Single-ring area boundary
    pub fn ring(vertices: Vec<Coordinate>) -> Result<Self> {
        Polyline::new(Dimension::Area, vec![vertices])
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn parts(&self) -> &[Vec<Coordinate>] {
        &self.parts
    }

    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(Vec::len).sum()
    }

    /// Check that the polyline is usable as reference geometry.
    ///
    /// Rejects an empty part list, parts with fewer than two vertices,
    /// non-finite vertices and a polyline whose segments all have zero length.
    pub fn validate(&self) -> Result<()> {
        if self.parts.is_empty() {
            return Err(GeometryError::invalid_geometry("polyline has no parts"));
        }

        for (index, part) in self.parts.iter().enumerate() {
            if part.len() < 2 {
                return Err(GeometryError::invalid_geometry(format!(
                    "part {} has {} vertex(es), at least 2 required",
                    index,
                    part.len()
                )));
            }
            if let Some(bad) = part.iter().find(|c| !c.is_finite()) {
                return Err(GeometryError::invalid_geometry(format!(
                    "part {} has a non-finite vertex ({}, {})",
                    index, bad.x, bad.y
                )));
            }
        }

        if self.length() <= 0.0 {
            return Err(GeometryError::invalid_geometry("polyline has zero length"));
        }

        Ok(())
    }

    /// Total length over all parts, including implied ring closures
    pub fn length(&self) -> f64 {
        (0..self.parts.len())
            .flat_map(|part| self.segments(part))
            .map(|(_, start, end)| start.distance(&end))
            .sum()
    }

    /// Iterate the segments of one part as `(index, start, end)`.
    ///
    /// `index` is the position of `start` within the part. For an area ring
    /// that is not explicitly closed, the closing segment from the last
    /// vertex back to the first is included.
    pub fn segments(&self, part: usize) -> impl Iterator<Item = (usize, Coordinate, Coordinate)> + '_ {
        let vertices: &[Coordinate] = self.parts.get(part).map(Vec::as_slice).unwrap_or(&[]);
        let closing = match (self.dimension, vertices.first(), vertices.last()) {
            (Dimension::Area, Some(first), Some(last)) if vertices.len() > 2 && first != last => {
                Some((vertices.len() - 1, *last, *first))
            }
            _ => None,
        };

        vertices
            .windows(2)
            .enumerate()
            .map(|(index, pair)| (index, pair[0], pair[1]))
            .chain(closing)
    }
}
