//! 2D points and the closest-pair result type.

use crate::error::Error;

/// A point in the plane. Coordinates are expected to be finite.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Like [`Point::new`], but rejects NaN and infinite coordinates.
    pub fn try_new(x: f64, y: f64) -> Result<Self, Error> {
        let point = Self { x, y };
        if !point.is_finite() {
            return Err(Error::invalid_input(format!(
                "point ({x}, {y}) has a non-finite coordinate"
            )));
        }
        Ok(point)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance. Uses `hypot` so large coordinates do not overflow.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x as f64, y as f64)
    }
}

/// Minimum pairwise distance together with one pair achieving it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosestPairResult {
    pub distance: f64,
    pub pair: (Point, Point),
}

impl ClosestPairResult {
    pub(crate) fn new(a: Point, b: Point) -> Self {
        Self {
            distance: a.distance(&b),
            pair: (a, b),
        }
    }

    /// True if `other` has the same witness pair, ignoring order within the pair.
    pub fn same_pair(&self, other: &ClosestPairResult) -> bool {
        let (a, b) = self.pair;
        let (c, d) = other.pair;
        (a == c && b == d) || (a == d && b == c)
    }
}
