use gdal_sys::{CPLErr, GDALResampleAlg};
use std::ptr;
use tracing::debug;

use crate::error::Error;
use crate::raster::RasterHandle;
use crate::util::Result;
use crate::util::gdal::create_mem_dataset;

/// Resamples `source` onto the grid of `match_` using nearest-neighbour interpolation.
///
/// The result is a new in-memory raster with the size, geo transform and projection of `match_`
/// and the band type and nodata value of `source`. Pixels that are not covered by valid source
/// data keep the nodata value, or `0` if `source` has none.
pub fn reproject(source: &RasterHandle, match_: &RasterHandle) -> Result<RasterHandle> {
    let (width, height) = (match_.width(), match_.height());
    if width == 0 || height == 0 {
        return Err(Error::InvalidRasterSize { width, height });
    }

    let mut dataset = create_mem_dataset(source.band_type()?, width, height)?;
    dataset.set_geo_transform(&match_.gdal_geo_transform()?)?;
    dataset.set_projection(&match_.projection())?;

    let no_data_value = source.no_data_value()?;
    if let Some(no_data_value) = no_data_value {
        let mut band = dataset.rasterband(1)?;
        band.set_no_data_value(Some(no_data_value))?;
        band.fill(no_data_value, None)?;
    }

    debug!(
        "Reprojecting {}x{} raster onto {width}x{height} grid",
        source.width(),
        source.height()
    );

    // a null WKT makes GDAL use the projection recorded in the respective dataset
    let result = unsafe {
        gdal_sys::GDALReprojectImage(
            source.dataset().c_dataset(),
            ptr::null(),
            dataset.c_dataset(),
            ptr::null(),
            GDALResampleAlg::GRA_NearestNeighbour,
            0.0,
            0.0,
            None,
            ptr::null_mut(),
            ptr::null_mut(),
        )
    };

    if result != CPLErr::CE_None {
        return Err(Error::Reprojection { cpl_error: result });
    }

    Ok(RasterHandle::new(dataset))
}
