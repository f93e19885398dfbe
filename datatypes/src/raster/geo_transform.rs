use crate::primitives::Coordinate2D;
use serde::{Deserialize, Serialize};

/// This is a typedef for the `GDAL GeoTransform`. It represents an affine transformation matrix.
/// The coefficients are `(origin_x, pixel_width, row_rotation, origin_y, column_rotation, pixel_height)`.
pub type GdalGeoTransform = [f64; 6];

/// The `GeoTransform` is a more user friendly representation of the `GDAL GeoTransform` affine transformation matrix.
/// Tiles are always north-up, so the rotation terms are not represented.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GeoTransform {
    pub origin_coordinate: Coordinate2D,
    pub x_pixel_size: f64,
    pub y_pixel_size: f64,
}

impl GeoTransform {
    /// Generates a new `GeoTransform` with explicit x, y values of the upper left edge
    ///
    /// # Examples
    ///
    /// ```
    /// use rastertiles_datatypes::raster::GeoTransform;
    ///
    /// let geo_transform = GeoTransform::new_with_coordinate_x_y(0.0, 1.0, 0.0, -1.0);
    /// ```
    ///
    pub fn new_with_coordinate_x_y(
        origin_coordinate_x: f64,
        x_pixel_size: f64,
        origin_coordinate_y: f64,
        y_pixel_size: f64,
    ) -> Self {
        Self {
            origin_coordinate: (origin_coordinate_x, origin_coordinate_y).into(),
            x_pixel_size,
            y_pixel_size,
        }
    }

    /// A geotransform with a zero or non-finite pixel size cannot place any pixel
    pub fn is_valid(&self) -> bool {
        self.origin_coordinate.is_finite()
            && self.x_pixel_size.is_finite()
            && self.y_pixel_size.is_finite()
            && self.x_pixel_size != 0.
            && self.y_pixel_size != 0.
    }
}

impl From<GdalGeoTransform> for GeoTransform {
    fn from(gdal_geo_transform: GdalGeoTransform) -> Self {
        Self::new_with_coordinate_x_y(
            gdal_geo_transform[0],
            gdal_geo_transform[1],
            // gdal_geo_transform[2],
            gdal_geo_transform[3],
            // gdal_geo_transform[4],
            gdal_geo_transform[5],
        )
    }
}
