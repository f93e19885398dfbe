use super::Coordinate2D;
use crate::error;
use crate::raster::GeoTransform;
use crate::util::Result;
use serde::{Deserialize, Serialize};
use snafu::ensure;

/// An axis-aligned extent `(xmin, ymin, xmax, ymax)` in the projected reference system.
/// Note: may degenerate to a point!
#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(try_from = "ExtentCorners")]
#[repr(C)]
pub struct Extent {
    lower_left_coordinate: Coordinate2D,
    upper_right_coordinate: Coordinate2D,
}

/// Unchecked serialized form of an [`Extent`]
#[derive(Deserialize)]
struct ExtentCorners {
    lower_left_coordinate: Coordinate2D,
    upper_right_coordinate: Coordinate2D,
}

impl TryFrom<ExtentCorners> for Extent {
    type Error = error::Error;

    fn try_from(corners: ExtentCorners) -> Result<Self, Self::Error> {
        let ExtentCorners {
            lower_left_coordinate: ll,
            upper_right_coordinate: ur,
        } = corners;
        Self::new(ll.x, ll.y, ur.x, ur.y)
    }
}

impl Extent {
    /// Creates a new extent
    ///
    /// # Examples
    ///
    /// ```
    /// use rastertiles_datatypes::primitives::Extent;
    ///
    /// let extent = Extent::new(10.0, 10.0, 20.0, 20.0).unwrap();
    ///
    /// assert_eq!(extent.xmax(), 20.0);
    /// assert!(Extent::new(20.0, 10.0, 10.0, 20.0).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// This constructor fails if the coordinate's values are not in order
    ///
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self> {
        let lower_left_coordinate = Coordinate2D::new(xmin, ymin);
        let upper_right_coordinate = Coordinate2D::new(xmax, ymax);
        ensure!(
            lower_left_coordinate.x <= upper_right_coordinate.x
                && lower_left_coordinate.y <= upper_right_coordinate.y,
            error::InvalidExtent {
                lower_left_coordinate,
                upper_right_coordinate
            }
        );
        Ok(Self {
            lower_left_coordinate,
            upper_right_coordinate,
        })
    }

    pub fn new_unchecked(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            lower_left_coordinate: Coordinate2D::new(xmin, ymin),
            upper_right_coordinate: Coordinate2D::new(xmax, ymax),
        }
    }

    /// Derives the extent covered by a raster of `width` x `height` pixels placed with `geo_transform`.
    ///
    /// The x range starts at the origin and grows by `width` pixels, the y range starts at the
    /// origin and grows by `height` (usually negative) pixel heights.
    /// The corners are sorted afterwards, so south-up rasters yield a valid extent as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use rastertiles_datatypes::primitives::Extent;
    /// use rastertiles_datatypes::raster::GeoTransform;
    ///
    /// let geo_transform = GeoTransform::new_with_coordinate_x_y(0.0, 0.5, 100.0, -0.5);
    /// let extent = Extent::from_geo_transform(&geo_transform, 200, 100);
    ///
    /// assert_eq!(extent, Extent::new(0.0, 50.0, 100.0, 100.0).unwrap());
    /// ```
    pub fn from_geo_transform(geo_transform: &GeoTransform, width: usize, height: usize) -> Self {
        let x1 = geo_transform.origin_coordinate.x;
        let x2 = x1 + width as f64 * geo_transform.x_pixel_size;
        let y2 = geo_transform.origin_coordinate.y;
        let y1 = y2 + height as f64 * geo_transform.y_pixel_size;

        Self::new_unchecked(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
    }

    pub fn xmin(&self) -> f64 {
        self.lower_left_coordinate.x
    }

    pub fn ymin(&self) -> f64 {
        self.lower_left_coordinate.y
    }

    pub fn xmax(&self) -> f64 {
        self.upper_right_coordinate.x
    }

    pub fn ymax(&self) -> f64 {
        self.upper_right_coordinate.y
    }
}

impl From<Extent> for (f64, f64, f64, f64) {
    fn from(extent: Extent) -> Self {
        (extent.xmin(), extent.ymin(), extent.xmax(), extent.ymax())
    }
}
