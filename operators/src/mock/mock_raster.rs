use gdal::raster::{Buffer, GdalType};
use gdal::spatial_ref::SpatialRef;
use rastertiles_datatypes::raster::GdalGeoTransform;

use crate::raster::RasterHandle;
use crate::util::gdal::create_mem_dataset;

/// Creates an in-memory raster in `EPSG:28992` with the given `(width, height)`, geo transform,
/// row-major `data` and nodata value.
///
/// # Panics
///
/// If `data` does not match the shape or GDAL fails to create the dataset.
#[allow(clippy::missing_panics_doc)]
pub fn mem_raster<T: GdalType + Copy>(
    (width, height): (usize, usize),
    geo_transform: GdalGeoTransform,
    data: &[T],
    no_data_value: Option<f64>,
) -> RasterHandle {
    assert_eq!(data.len(), width * height, "data does not match the raster shape");

    let mut dataset =
        create_mem_dataset(T::datatype(), width, height).expect("MEM driver must be available");

    dataset
        .set_geo_transform(&geo_transform)
        .expect("setting the geo transform must succeed");
    dataset
        .set_spatial_ref(&SpatialRef::from_epsg(28992).expect("EPSG:28992 must be known"))
        .expect("setting the spatial reference must succeed");

    {
        let mut band = dataset.rasterband(1).expect("band 1 must exist");
        let mut buffer = Buffer::new((width, height), data.to_vec());
        band.write((0, 0), (width, height), &mut buffer)
            .expect("writing the data must succeed");
        band.set_no_data_value(no_data_value)
            .expect("setting the nodata value must succeed");
    }

    RasterHandle::new(dataset)
}
