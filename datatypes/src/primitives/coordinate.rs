use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate in the units of its spatial reference system.
/// For the projected system these are meters, for WGS84 degrees (x = longitude, y = latitude).
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, PartialOrd, Serialize, Default)]
#[repr(C)]
pub struct Coordinate2D {
    pub x: f64,
    pub y: f64,
}

impl Coordinate2D {
    /// Creates a new coordinate
    ///
    /// # Examples
    ///
    /// ```
    /// use rastertiles_datatypes::primitives::Coordinate2D;
    ///
    /// let c = Coordinate2D::new(155_000.0, 463_000.0);
    ///
    /// assert_eq!(c.x, 155_000.0);
    /// assert_eq!(c.y, 463_000.0);
    /// ```
    ///
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Coordinate2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Coordinate2D {
    fn from(tuple: (f64, f64)) -> Self {
        let (x, y) = tuple;
        Self { x, y }
    }
}

impl From<Coordinate2D> for (f64, f64) {
    fn from(coordinate: Coordinate2D) -> (f64, f64) {
        (coordinate.x, coordinate.y)
    }
}

impl From<Coordinate2D> for geo::Coord<f64> {
    fn from(coordinate: Coordinate2D) -> geo::Coord<f64> {
        geo::Coord::from((coordinate.x, coordinate.y))
    }
}

impl From<geo::Coord<f64>> for Coordinate2D {
    fn from(coordinate: geo::Coord<f64>) -> Coordinate2D {
        Coordinate2D {
            x: coordinate.x,
            y: coordinate.y,
        }
    }
}
