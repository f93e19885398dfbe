use std::{collections::HashSet, hash::BuildHasher, path::Path};

use gdal::raster::GdalDataType;
use gdal::spatial_ref::{AxisMappingStrategy, SpatialRef};
use gdal::{Dataset, DatasetOptions, DriverManager};
use snafu::ResultExt;
use tracing::debug;

use crate::{
    error::{self, Error},
    util::Result,
};

/// Opens a Gdal Dataset with the given `path`, which may also be a driver specific connection string.
/// Other modules should use this method for Gdal Dataset access as a workaround to avoid strange errors.
pub fn gdal_open_dataset(path: &Path) -> Result<Dataset> {
    gdal_open_dataset_ex(path, DatasetOptions::default())
}

/// Opens a Gdal Dataset with the given `path` and `dataset_options`.
/// Other modules should use this method for Gdal Dataset access as a workaround to avoid strange errors.
pub fn gdal_open_dataset_ex(path: &Path, dataset_options: DatasetOptions) -> Result<Dataset> {
    let dataset_options = {
        let mut dataset_options = dataset_options;
        dataset_options.open_flags |= gdal::GdalOpenFlags::GDAL_OF_VERBOSE_ERROR;
        dataset_options
    };

    Dataset::open_ex(path, dataset_options).context(error::Gdal)
}

/// Creates an in-memory (`MEM`) dataset with a single band of the given data type
pub fn create_mem_dataset(data_type: GdalDataType, width: usize, height: usize) -> Result<Dataset> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidRasterSize { width, height });
    }

    let driver = DriverManager::get_driver_by_name("MEM")?;

    let dataset = match data_type {
        GdalDataType::UInt8 => driver.create_with_band_type::<u8, _>("", width, height, 1)?,
        GdalDataType::UInt16 => driver.create_with_band_type::<u16, _>("", width, height, 1)?,
        GdalDataType::Int16 => driver.create_with_band_type::<i16, _>("", width, height, 1)?,
        GdalDataType::UInt32 => driver.create_with_band_type::<u32, _>("", width, height, 1)?,
        GdalDataType::Int32 => driver.create_with_band_type::<i32, _>("", width, height, 1)?,
        GdalDataType::Float32 => driver.create_with_band_type::<f32, _>("", width, height, 1)?,
        GdalDataType::Float64 => driver.create_with_band_type::<f64, _>("", width, height, 1)?,
        _ => return Err(Error::GdalRasterDataTypeNotSupported),
    };

    Ok(dataset)
}

/// Creates a spatial reference from a projection string (WKT, PROJ or `EPSG:xxxx`) that uses the
/// traditional GIS axis order, i.e., x = easting/longitude and y = northing/latitude.
pub fn spatial_ref_from_definition(definition: &str) -> Result<SpatialRef> {
    let mut spatial_ref = SpatialRef::from_definition(definition)?;
    spatial_ref.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
    Ok(spatial_ref)
}

/// The WGS 84 spatial reference in traditional GIS axis order (x = longitude, y = latitude)
pub fn wgs84_spatial_ref() -> Result<SpatialRef> {
    let mut spatial_ref = SpatialRef::from_epsg(4326)?;
    spatial_ref.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
    Ok(spatial_ref)
}

/// This method registers all GDAL drivers from the `drivers` list.
/// It also de-registers all other drivers.
///
/// It makes sure to call `GDALAllRegister` at least once.
/// Unfortunately, calling this method does not prevent registering other drivers afterwards.
///
pub fn register_gdal_drivers_from_list<S: BuildHasher>(mut drivers: HashSet<String, S>) {
    // this calls `GDALAllRegister` internally
    let number_of_drivers = DriverManager::count();
    let mut start_index = 0;

    for _ in 0..number_of_drivers {
        let Ok(driver) = DriverManager::get_driver(start_index) else {
            // in the unlikely case that we cannot fetch a driver, we will just skip it
            continue;
        };

        // do not unregister the drivers we want to keep
        if drivers.remove(&driver.short_name()) {
            // driver was found in list --> keep it
            start_index += 1;
        } else {
            // driver was not found in list --> unregister the driver
            DriverManager::deregister_driver(&driver);
        }
    }

    if !drivers.is_empty() {
        let mut drivers: Vec<String> = drivers.into_iter().collect();
        drivers.sort();
        debug!("Could not register drivers: {}", drivers.join(", "));
    }
}
