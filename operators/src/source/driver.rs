use gdal::DriverManager;
use std::path::Path;
use tracing::debug;

use super::ConnectionDescriptor;
use crate::raster::RasterHandle;
use crate::util::gdal::gdal_open_dataset;

/// Opens raster datasets from connection descriptors.
///
/// A failed open is not an error but `None`, since a tile that is missing from its table is a
/// regular outcome callers have to handle.
pub trait RasterDriver {
    fn open(&self, descriptor: &ConnectionDescriptor) -> Option<RasterHandle>;
}

impl<F> RasterDriver for F
where
    F: Fn(&ConnectionDescriptor) -> Option<RasterHandle>,
{
    fn open(&self, descriptor: &ConnectionDescriptor) -> Option<RasterHandle> {
        self(descriptor)
    }
}

/// Opens tiles through GDAL's `PostGISRaster` driver
#[derive(Debug, Clone, Copy, Default)]
pub struct GdalRasterDriver;

impl GdalRasterDriver {
    pub const DRIVER_NAME: &'static str = "PostGISRaster";
}

impl RasterDriver for GdalRasterDriver {
    fn open(&self, descriptor: &ConnectionDescriptor) -> Option<RasterHandle> {
        if let Err(error) = DriverManager::get_driver_by_name(Self::DRIVER_NAME) {
            debug!("GDAL driver {} is not available: {error}", Self::DRIVER_NAME);
        }

        match gdal_open_dataset(Path::new(descriptor.as_str())) {
            Ok(dataset) => {
                debug!("Opened dataset: {descriptor}");
                Some(RasterHandle::new(dataset))
            }
            Err(error) => {
                debug!("Could not open dataset {descriptor}: {error}");
                None
            }
        }
    }
}
