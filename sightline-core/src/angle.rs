//! Compass Azimuth Value Type
//!
//! [`Azimuth`] is a compass angle in degrees: 0 = North, clockwise positive,
//! always normalized to `[0, 360)`. Normalization happens once, at
//! construction, so every value in circulation already satisfies the range
//! invariant and arithmetic wraps through the same path.
//!
//! Two conventions meet here:
//!
//! | Convention    | Zero  | Positive direction | Used by            |
//! |---------------|-------|--------------------|--------------------|
//! | Compass       | North | clockwise          | bearings, headings |
//! | Trigonometric | East  | counterclockwise   | `sin`, `cos`, `atan2` |
//!
//! The two are related by `compass = 90 - trig` (and back the same way).
//!
//! # Equality
//!
//! Comparison uses the stored normalized value directly, without tolerance.
//! Exact equality is only reliable between values produced along the same
//! construction path; `Azimuth::new(0.1) + Azimuth::new(-0.1)` may land on
//! `359.99999999999994` rather than `0`. Use [`Azimuth::separation`] when
//! comparing values computed along different paths.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, Result};

/// Degrees in a full revolution
pub const FULL_CIRCLE: f64 = 360.0;

/// Degrees in half a revolution
pub const HALF_CIRCLE: f64 = 180.0;

/// Offset between compass and trigonometric zero directions
const QUARTER_CIRCLE: f64 = 90.0;

/// Normalize degrees into `[0, 360)`
///
/// Non-finite input stays non-finite.
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let mut value = degrees % FULL_CIRCLE;
    if value < 0.0 {
        value += FULL_CIRCLE;
    }
    // A tiny negative remainder rounds up to exactly 360 after the addition
    if value >= FULL_CIRCLE {
        value = 0.0;
    }
    // Fold -0.0 into 0.0
    value + 0.0
}

/// Compass azimuth in degrees, normalized to `[0, 360)`
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Azimuth(f64);

impl Azimuth {
    /// North
    pub const NORTH: Azimuth = Azimuth(0.0);
    /// East
    pub const EAST: Azimuth = Azimuth(90.0);
    /// South
    pub const SOUTH: Azimuth = Azimuth(180.0);
    /// West
    pub const WEST: Azimuth = Azimuth(270.0);

    /// Create an azimuth from any real number of degrees.
    ///
    /// Negative, fractional and multi-turn values are wrapped into
    /// `[0, 360)`. The input must be finite; use [`Azimuth::try_new`] for
    /// values that have not been checked.
    #[inline]
    pub fn new(degrees: f64) -> Self {
        debug_assert!(degrees.is_finite(), "non-finite azimuth: {}", degrees);
        Azimuth(normalize_degrees(degrees))
    }

    /// Create an azimuth, rejecting NaN and infinities
    pub fn try_new(degrees: f64) -> Result<Self> {
        ensure_finite("azimuth", degrees).map(Azimuth::new)
    }

    /// Create an azimuth from compass radians
    #[inline]
    pub fn from_radians(radians: f64) -> Self {
        Azimuth::new(radians * 180.0 / PI)
    }

    /// Convert a mathematical angle (0 = East, counterclockwise positive)
    /// in degrees to a compass azimuth.
    #[inline]
    pub fn from_trig_degrees(degrees: f64) -> Self {
        Azimuth::new(QUARTER_CIRCLE - degrees)
    }

    /// Convert a mathematical angle in radians to a compass azimuth.
    ///
    /// Typically fed with the output of `f64::atan2(dy, dx)`.
    #[inline]
    pub fn from_trig_radians(radians: f64) -> Self {
        Azimuth::from_trig_degrees(radians * 180.0 / PI)
    }

    /// The normalized value in degrees
    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// The normalized value in radians, still in compass convention
    #[inline]
    pub fn radians(self) -> f64 {
        self.0 * PI / 180.0
    }

    /// This azimuth as a mathematical angle in degrees, normalized to `[0, 360)`
    #[inline]
    pub fn to_trig_degrees(self) -> f64 {
        normalize_degrees(QUARTER_CIRCLE - self.0)
    }

    /// This azimuth as a mathematical angle in radians
    #[inline]
    pub fn to_trig_radians(self) -> f64 {
        self.to_trig_degrees() * PI / 180.0
    }

    /// The reciprocal bearing, rotated by half a turn
    pub fn opposite(self) -> Self {
        let half = Azimuth::new(HALF_CIRCLE);
        if self.0 < HALF_CIRCLE {
            self + half
        } else {
            self - half
        }
    }

    /// Smallest unsigned angle between two azimuths, in `[0, 180]` degrees
    pub fn separation(self, other: Azimuth) -> f64 {
        let delta = (self.0 - other.0).abs() % FULL_CIRCLE;
        delta.min(FULL_CIRCLE - delta)
    }
}

impl From<f64> for Azimuth {
    fn from(degrees: f64) -> Self {
        Azimuth::new(degrees)
    }
}

impl From<Azimuth> for f64 {
    fn from(azimuth: Azimuth) -> Self {
        azimuth.0
    }
}

impl Add for Azimuth {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Azimuth::new(self.0 + other.0)
    }
}

impl Sub for Azimuth {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Azimuth::new(self.0 - other.0)
    }
}

impl Neg for Azimuth {
    type Output = Self;

    fn neg(self) -> Self {
        Azimuth::new(-self.0)
    }
}

impl AddAssign for Azimuth {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl SubAssign for Azimuth {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl fmt::Display for Azimuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.*}°", precision, self.0),
            None => write!(f, "{}°", self.0),
        }
    }
}
