//! Nearest Segment Search
//!
//! Finds the polyline segment closest to a query point. The search is a
//! linear scan of point-to-segment distances over every part, which is
//! proportional to the vertex count and needs no spatial index for
//! transect-sized inputs.

use nalgebra::Point2;

use crate::error::{GeometryError, Result};
use crate::geometry::{Coordinate, Polyline};

/// Result of the nearest-point search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPoint {
    /// Index of the part containing the nearest segment
    pub part: usize,
    /// Index of the vertex immediately preceding the nearest point
    pub index: usize,
    /// Closest point on the polyline
    pub point: Coordinate,
    /// Distance from the query to `point`
    pub distance: f64,
    /// Segment start vertex (`part[index]`)
    pub start: Coordinate,
    /// Segment end vertex (`part[index + 1]`, or the first vertex for a ring closure)
    pub end: Coordinate,
}

/// Project a point onto a segment, clamped to its endpoints.
///
/// Returns the parameter `t` in `[0, 1]` and the projected point.
/// A zero-length segment projects everything onto its start; callers that
/// need a direction skip such segments before projecting.
fn project_onto_segment(
    query: Point2<f64>,
    start: Point2<f64>,
    end: Point2<f64>,
) -> (f64, Point2<f64>) {
    let dir = end - start;
    let len_sq = dir.norm_squared();

    if len_sq == 0.0 {
        return (0.0, start);
    }

    let t = ((query - start).dot(&dir) / len_sq).clamp(0.0, 1.0);
    (t, start + dir * t)
}

/// Find the point on `polyline` nearest to `query`.
///
/// Zero-length segments (repeated vertices, collapsed parts) are skipped,
/// so the returned `start` and `end` always differ. Ties keep the first
/// segment encountered in part/vertex order.
pub fn nearest_point(polyline: &Polyline, query: Coordinate) -> Result<NearestPoint> {
    polyline.validate()?;
    let query = query.validated("query coordinate")?;
    let q = query.to_point();

    let mut best: Option<NearestPoint> = None;
    for part in 0..polyline.parts().len() {
        for (index, start, end) in polyline.segments(part) {
            if start == end {
                continue;
            }
            let (_, projected) = project_onto_segment(q, start.to_point(), end.to_point());
            let distance = (q - projected).norm();
            if !distance.is_finite() {
                continue;
            }
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(NearestPoint {
                    part,
                    index,
                    point: projected.into(),
                    distance,
                    start,
                    end,
                });
            }
        }
    }

    let found = best.ok_or_else(|| {
        GeometryError::operation_failed(format!(
            "no non-degenerate segment distance could be computed for ({}, {})",
            query.x, query.y
        ))
    })?;
    log::trace!(
        "nearest point to ({}, {}): part {} vertex {} at distance {:.3}",
        query.x,
        query.y,
        found.part,
        found.index,
        found.distance
    );
    Ok(found)
}

/// Endpoints of the segment nearest to `query`, ordered nearest-first.
///
/// Endpoints at equal distance keep their polyline order.
pub fn nearest_segment(polyline: &Polyline, query: Coordinate) -> Result<(Coordinate, Coordinate)> {
    let nearest = nearest_point(polyline, query)?;
    let (start, end) = (nearest.start, nearest.end);

    if end.distance_squared(&query) < start.distance_squared(&query) {
        Ok((end, start))
    } else {
        Ok((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimension;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn zigzag() -> Polyline {
        Polyline::line(vec![c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0), c(20.0, 10.0)]).unwrap()
    }

    #[test]
    fn test_project_onto_segment() {
        let (t, p) = project_onto_segment(
            Point2::new(5.0, 3.0),
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
        );
        assert_eq!(t, 0.5);
        assert_eq!(p, Point2::new(5.0, 0.0));

        // Beyond the end clamps to the end
        let (t, p) = project_onto_segment(
            Point2::new(15.0, 3.0),
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
        );
        assert_eq!(t, 1.0);
        assert_eq!(p, Point2::new(10.0, 0.0));

        let (t, p) = project_onto_segment(
            Point2::new(15.0, 3.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 2.0),
        );
        assert_eq!(t, 0.0);
        assert_eq!(p, Point2::new(2.0, 2.0));
    }

    #[test]
    fn test_nearest_point() {
        let line = zigzag();
        let nearest = nearest_point(&line, c(12.0, 4.0)).unwrap();
        assert_eq!(nearest.part, 0);
        assert_eq!(nearest.index, 1);
        assert_eq!(nearest.point, c(10.0, 4.0));
        assert_eq!(nearest.distance, 2.0);
    }

    #[test]
    fn test_nearest_segment_ordering() {
        let line = zigzag();

        // Closer to the segment start
        let (first, second) = nearest_segment(&line, c(2.0, 1.0)).unwrap();
        assert_eq!((first, second), (c(0.0, 0.0), c(10.0, 0.0)));

        // Closer to the segment end, so the pair is swapped
        let (first, second) = nearest_segment(&line, c(9.0, -1.0)).unwrap();
        assert_eq!((first, second), (c(10.0, 0.0), c(0.0, 0.0)));
    }

    #[test]
    fn test_nearest_segment_multi_part() {
        let line = Polyline::new(
            Dimension::Line,
            vec![vec![c(0.0, 0.0), c(10.0, 0.0)], vec![c(0.0, 100.0), c(10.0, 100.0)]],
        )
        .unwrap();
        let nearest = nearest_point(&line, c(3.0, 90.0)).unwrap();
        assert_eq!(nearest.part, 1);
        assert_eq!(nearest.index, 0);
        let (first, second) = nearest_segment(&line, c(3.0, 90.0)).unwrap();
        assert_eq!((first, second), (c(0.0, 100.0), c(10.0, 100.0)));
    }

    #[test]
    fn test_nearest_segment_ring_closure() {
        let ring =
            Polyline::ring(vec![c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0), c(0.0, 10.0)]).unwrap();
        let nearest = nearest_point(&ring, c(-1.0, 4.0)).unwrap();
        assert_eq!(nearest.index, 3);
        assert_eq!(nearest.point, c(0.0, 4.0));
        let (first, second) = nearest_segment(&ring, c(-1.0, 4.0)).unwrap();
        assert_eq!((first, second), (c(0.0, 0.0), c(0.0, 10.0)));
    }

    #[test]
    fn test_invalid_query() {
        let line = zigzag();
        assert!(matches!(
            nearest_segment(&line, c(f64::NAN, 0.0)),
            Err(GeometryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_single_point_polyline() {
        // Deserialization skips the validating constructor
        let single: Polyline =
            serde_json::from_str(r#"{"parts": [[{"x": 1.0, "y": 1.0}]]}"#).unwrap();
        assert!(matches!(
            nearest_segment(&single, c(0.0, 0.0)),
            Err(GeometryError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_project_onto_short_segment() {
        // Squared length is far below f64::EPSILON, still a real segment
        let (t, p) = project_onto_segment(
            Point2::new(0.5e-9, 1.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0e-9, 0.0),
        );
        assert!((t - 0.5).abs() < 1e-9);
        assert!((p.x - 0.5e-9).abs() < 1e-18);
    }

    #[test]
    fn test_skips_repeated_vertex() {
        let line = Polyline::line(vec![c(0.0, 0.0), c(0.0, 0.0), c(0.0, 100.0)]).unwrap();
        let nearest = nearest_point(&line, c(0.0, -5.0)).unwrap();
        assert_eq!(nearest.index, 1);
        assert_ne!(nearest.start, nearest.end);

        let (first, second) = nearest_segment(&line, c(0.0, -5.0)).unwrap();
        assert_eq!((first, second), (c(0.0, 0.0), c(0.0, 100.0)));
    }

    #[test]
    fn test_skips_collapsed_part() {
        let line = Polyline::new(
            Dimension::Line,
            vec![vec![c(5.0, 5.0), c(5.0, 5.0)], vec![c(0.0, 0.0), c(100.0, 0.0)]],
        )
        .unwrap();
        // The collapsed part sits right on the query but has no direction
        let nearest = nearest_point(&line, c(5.0, 5.0)).unwrap();
        assert_eq!(nearest.part, 1);
        let (first, second) = nearest_segment(&line, c(5.0, 5.0)).unwrap();
        assert_eq!((first, second), (c(0.0, 0.0), c(100.0, 0.0)));
    }

    #[test]
    fn test_repeated_ring_closure_vertex() {
        let ring = Polyline::ring(vec![
            c(0.0, 0.0),
            c(10.0, 0.0),
            c(10.0, 10.0),
            c(10.0, 10.0),
            c(0.0, 10.0),
        ])
        .unwrap();
        let nearest = nearest_point(&ring, c(11.0, 10.0)).unwrap();
        assert_ne!(nearest.start, nearest.end);
    }
}
