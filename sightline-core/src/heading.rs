//! Transect Heading Resolution
//!
//! A vessel working a survey transect reports a GPS bearing that wanders
//! with wind, current and steering. The transect itself gives a steadier
//! heading, but a line segment has no direction of travel: its azimuth may
//! point the way the vessel is going or exactly the opposite way. The
//! resolver takes the segment nearest the vessel and picks whichever of the
//! two directions lies within a quarter turn of the GPS bearing.

use serde::{Deserialize, Serialize};

use crate::angle::Azimuth;
use crate::error::Result;
use crate::geometry::{Coordinate, Polyline};
use crate::locator::nearest_segment;

/// Half-width of the window in which the segment azimuth is accepted as is
const ACCEPT_WINDOW_DEG: f64 = 90.0;

/// A GPS fix: where the vessel is and which way it is moving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsFix {
    /// Position in the same planar system as the transect
    pub location: Coordinate,
    /// Course over ground
    pub travel_bearing: Azimuth,
}

impl GpsFix {
    /// Build a fix from a location and a bearing in degrees
    pub fn new(location: Coordinate, bearing_deg: f64) -> Result<Self> {
        Ok(GpsFix {
            location: location.validated("fix location")?,
            travel_bearing: Azimuth::try_new(bearing_deg)?,
        })
    }
}

/// Compass bearing of the segment directed `from` -> `to`
pub fn segment_azimuth(from: Coordinate, to: Coordinate) -> Azimuth {
    Azimuth::from_trig_radians((to.y - from.y).atan2(to.x - from.x))
}

/// Choose between `raw` and its reciprocal using the travel bearing.
///
/// The deviation is a plain difference of the two normalized values, in
/// `(-360, 360)`, not a wrapped angular difference. Exactly ±90 falls
/// outside the window and flips.
pub fn disambiguate(raw: Azimuth, travel_bearing: Azimuth) -> Azimuth {
    let diff = raw.degrees() - travel_bearing.degrees();
    if diff > -ACCEPT_WINDOW_DEG && diff < ACCEPT_WINDOW_DEG {
        raw
    } else {
        let flipped = raw.opposite();
        log::debug!(
            "segment azimuth {:.2} deviates {:.2} from bearing {:.2}, using {:.2}",
            raw,
            diff,
            travel_bearing,
            flipped
        );
        flipped
    }
}

/// Resolves a vessel heading against a fixed reference transect
#[derive(Debug, Clone, Copy)]
pub struct HeadingResolver<'a> {
    transect: &'a Polyline,
}

impl<'a> HeadingResolver<'a> {
    /// Create a resolver for one transect.
    ///
    /// Fails with [`GeometryError::InvalidGeometry`](crate::GeometryError::InvalidGeometry) if the transect cannot
    /// be searched.
    pub fn new(transect: &'a Polyline) -> Result<Self> {
        transect.validate()?;
        Ok(HeadingResolver { transect })
    }

    pub fn transect(&self) -> &'a Polyline {
        self.transect
    }

    /// Heading along the transect in the vessel's direction of travel
    pub fn resolve(&self, fix: &GpsFix) -> Result<Azimuth> {
        resolve_heading(self.transect, fix)
    }
}

/// Heading along `transect` near `fix.location`, in the direction of `fix.travel_bearing`
pub fn resolve_heading(transect: &Polyline, fix: &GpsFix) -> Result<Azimuth> {
    let (first, second) = nearest_segment(transect, fix.location)?;
    let raw = segment_azimuth(first, second);
    Ok(disambiguate(raw, fix.travel_bearing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;
    use crate::geometry::Dimension;

    const EPS: f64 = 1e-9;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn fix(x: f64, y: f64, bearing: f64) -> GpsFix {
        GpsFix::new(c(x, y), bearing).unwrap()
    }

    #[test]
    fn test_segment_azimuth() {
        let origin = c(0.0, 0.0);
        let cases = [
            (c(0.0, 1.0), Azimuth::NORTH),
            (c(1.0, 0.0), Azimuth::EAST),
            (c(0.0, -1.0), Azimuth::SOUTH),
            (c(-1.0, 0.0), Azimuth::WEST),
            (c(1.0, 1.0), Azimuth::new(45.0)),
            (c(-1.0, -1.0), Azimuth::new(225.0)),
        ];
        for (to, expected) in cases {
            let azimuth = segment_azimuth(origin, to);
            assert!(
                azimuth.separation(expected) < EPS,
                "{:?} -> {} expected {}",
                to,
                azimuth,
                expected
            );
        }
    }

    #[test]
    fn test_disambiguate_keeps_aligned() {
        assert_eq!(disambiguate(Azimuth::new(100.0), Azimuth::new(120.0)), Azimuth::new(100.0));
        assert_eq!(disambiguate(Azimuth::new(10.0), Azimuth::new(60.0)), Azimuth::new(10.0));
    }

    #[test]
    fn test_disambiguate_flips_opposed() {
        assert_eq!(disambiguate(Azimuth::new(10.0), Azimuth::new(200.0)), Azimuth::new(190.0));
        assert_eq!(disambiguate(Azimuth::new(270.0), Azimuth::new(80.0)), Azimuth::new(90.0));
    }

    #[test]
    fn test_disambiguate_boundary_flips() {
        // Exactly a quarter turn is outside the window
        assert_eq!(disambiguate(Azimuth::new(190.0), Azimuth::new(100.0)), Azimuth::new(10.0));
        assert_eq!(disambiguate(Azimuth::new(10.0), Azimuth::new(100.0)), Azimuth::new(190.0));
    }

    #[test]
    fn test_disambiguate_uses_plain_difference() {
        // 350 is only 20 degrees from 10 on the compass, but the plain
        // difference is 340, so the reciprocal is taken
        assert_eq!(disambiguate(Azimuth::new(350.0), Azimuth::new(10.0)), Azimuth::new(170.0));
        assert_eq!(disambiguate(Azimuth::new(5.0), Azimuth::new(355.0)), Azimuth::new(185.0));
    }

    #[test]
    fn test_resolve_diagonal_transect() {
        let transect = Polyline::line(vec![c(0.0, 0.0), c(1000.0, 1000.0)]).unwrap();
        let resolver = HeadingResolver::new(&transect).unwrap();

        // Near the south-west end, heading north-east
        let heading = resolver.resolve(&fix(100.0, 110.0, 30.0)).unwrap();
        assert!(heading.separation(Azimuth::new(45.0)) < EPS);

        // Near the north-east end the nearest vertex is the segment end,
        // so the raw azimuth already points south-west
        let heading = resolver.resolve(&fix(900.0, 890.0, 200.0)).unwrap();
        assert!(heading.separation(Azimuth::new(225.0)) < EPS);

        // Same place, heading north-east: the raw azimuth is flipped
        let heading = resolver.resolve(&fix(900.0, 890.0, 60.0)).unwrap();
        assert!(heading.separation(Azimuth::new(45.0)) < EPS);
    }

    #[test]
    fn test_resolve_follows_bend() {
        let transect = Polyline::line(vec![c(0.0, 0.0), c(100.0, 0.0), c(100.0, -100.0)]).unwrap();

        let heading = resolve_heading(&transect, &fix(40.0, 2.0, 95.0)).unwrap();
        assert!(heading.separation(Azimuth::EAST) < EPS);

        let heading = resolve_heading(&transect, &fix(40.0, 2.0, 250.0)).unwrap();
        assert!(heading.separation(Azimuth::WEST) < EPS);

        let heading = resolve_heading(&transect, &fix(102.0, -60.0, 160.0)).unwrap();
        assert!(heading.separation(Azimuth::SOUTH) < EPS);
    }

    #[test]
    fn test_resolve_rejects_bad_bearing() {
        assert!(matches!(
            GpsFix::new(c(0.0, 0.0), f64::INFINITY),
            Err(GeometryError::InvalidArgument(_))
        ));
        assert!(GpsFix::new(c(0.0, 0.0), f64::NAN).is_err());
    }

    #[test]
    fn test_resolver_rejects_invalid_transect() {
        let single: Polyline =
            serde_json::from_str(r#"{"parts": [[{"x": 1.0, "y": 1.0}]]}"#).unwrap();
        assert!(matches!(
            HeadingResolver::new(&single),
            Err(GeometryError::InvalidGeometry(_))
        ));
        assert!(matches!(
            resolve_heading(&single, &fix(0.0, 0.0, 0.0)),
            Err(GeometryError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_resolve_across_repeated_vertex() {
        let transect =
            Polyline::line(vec![c(0.0, 0.0), c(0.0, 0.0), c(100.0, 100.0), c(100.0, 100.0)])
                .unwrap();

        let heading = resolve_heading(&transect, &fix(0.0, -5.0, 30.0)).unwrap();
        assert!(heading.separation(Azimuth::new(45.0)) < EPS);

        let heading = resolve_heading(&transect, &fix(105.0, 100.0, 200.0)).unwrap();
        assert!(heading.separation(Azimuth::new(225.0)) < EPS);
    }

    #[test]
    fn test_resolve_skips_collapsed_part() {
        let transect = Polyline::new(
            Dimension::Line,
            vec![vec![c(1.0, 1.0), c(1.0, 1.0)], vec![c(-50.0, 10.0), c(50.0, 10.0)]],
        )
        .unwrap();
        let heading = resolve_heading(&transect, &fix(1.0, 1.0, 80.0)).unwrap();
        assert!(heading.separation(Azimuth::EAST) < EPS);
    }
}
