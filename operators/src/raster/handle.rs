use gdal::Dataset;
use gdal::raster::{GdalDataType, GdalType};
use ndarray::Array2;
use rastertiles_datatypes::primitives::{Extent, Polygon};
use rastertiles_datatypes::raster::{GdalGeoTransform, GeoTransform};
use std::fmt;

use crate::error::Error;
use crate::util::Result;

/// The band all operations work on
pub const BAND: usize = 1;

/// An opened raster dataset.
///
/// The handle owns the underlying GDAL dataset and closes it when dropped, so no native
/// resources leak on early returns or errors.
pub struct RasterHandle {
    dataset: Dataset,
}

impl RasterHandle {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn width(&self) -> usize {
        self.dataset.raster_size().0
    }

    pub fn height(&self) -> usize {
        self.dataset.raster_size().1
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        let (width, height) = self.dataset.raster_size();
        (height, width)
    }

    pub fn gdal_geo_transform(&self) -> Result<GdalGeoTransform> {
        Ok(self.dataset.geo_transform()?)
    }

    pub fn geo_transform(&self) -> Result<GeoTransform> {
        self.gdal_geo_transform().map(Into::into)
    }

    /// The coordinate reference system as WKT, empty if the dataset carries none
    pub fn projection(&self) -> String {
        self.dataset.projection()
    }

    pub fn band_type(&self) -> Result<GdalDataType> {
        Ok(self.dataset.rasterband(BAND)?.band_type())
    }

    pub fn no_data_value(&self) -> Result<Option<f64>> {
        Ok(self.dataset.rasterband(BAND)?.no_data_value())
    }

    pub fn set_no_data_value(&mut self, no_data_value: Option<f64>) -> Result<()> {
        let mut band = self.dataset.rasterband(BAND)?;
        band.set_no_data_value(no_data_value)?;
        Ok(())
    }

    /// Reads the whole band as a `(rows, columns)` array
    pub fn read_band<T: GdalType + Copy>(&self) -> Result<Array2<T>> {
        let (width, height) = self.dataset.raster_size();
        let band = self.dataset.rasterband(BAND)?;
        let buffer = band.read_as::<T>((0, 0), (width, height), (width, height), None)?;

        Array2::from_shape_vec((height, width), buffer.data().to_vec())
            .map_err(|_| Error::InvalidRasterSize { width, height })
    }

    /// The area covered by the raster
    pub fn extent(&self) -> Result<Extent> {
        let (width, height) = self.dataset.raster_size();
        Ok(Extent::from_geo_transform(
            &self.geo_transform()?,
            width,
            height,
        ))
    }

    /// The outline of the raster as polygon in the projected reference system
    pub fn footprint(&self) -> Result<Polygon> {
        Ok(Polygon::from_extent(&self.extent()?))
    }
}

impl From<Dataset> for RasterHandle {
    fn from(dataset: Dataset) -> Self {
        Self::new(dataset)
    }
}

impl fmt::Debug for RasterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.dataset.raster_size();
        f.debug_struct("RasterHandle")
            .field("width", &width)
            .field("height", &height)
            .field("geo_transform", &self.dataset.geo_transform().ok())
            .finish_non_exhaustive()
    }
}
