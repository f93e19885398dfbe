use gdal::raster::rasterize;
use gdal::spatial_ref::CoordTransform;
use gdal::vector::ToGdal;
use geo::{Area, CoordsIter};
use geo_types::Geometry;
use ndarray::Array2;
use rastertiles_datatypes::raster::{GdalGeoTransform, GeoTransform};
use tracing::debug;

use crate::error::Error;
use crate::raster::RasterHandle;
use crate::util::Result;
use crate::util::gdal::{create_mem_dataset, spatial_ref_from_definition, wgs84_spatial_ref};

const BURN_VALUE: f64 = 1.;

/// Burns a geometry given in WGS 84 longitude/latitude into a byte mask of `(rows, columns)`.
///
/// The geometry is transformed into `projection` and rasterized onto the grid described by
/// `geo_transform`. Pixels whose centre is covered are `1`, all others `0`.
pub fn rasterize_mask(
    geometry_wgs84: &Geometry<f64>,
    (rows, columns): (usize, usize),
    projection: &str,
    geo_transform: GdalGeoTransform,
) -> Result<Array2<u8>> {
    if rows == 0 || columns == 0 {
        return Err(Error::InvalidRasterSize {
            width: columns,
            height: rows,
        });
    }

    if !geo_transform.iter().all(|c| c.is_finite()) || !GeoTransform::from(geo_transform).is_valid()
    {
        return Err(Error::InvalidGeoTransform { geo_transform });
    }

    validate_geometry(geometry_wgs84)?;

    let wgs84 = wgs84_spatial_ref()?;
    let target = spatial_ref_from_definition(projection)?;

    let mut geometry = geometry_wgs84.to_gdal()?;
    geometry.set_spatial_ref(wgs84.clone());
    geometry.transform_inplace(&CoordTransform::new(&wgs84, &target)?)?;

    let mut dataset = create_mem_dataset(gdal::raster::GdalDataType::UInt8, columns, rows)?;
    dataset.set_geo_transform(&geo_transform)?;
    dataset.set_spatial_ref(&target)?;
    dataset.rasterband(1)?.fill(0., None)?;

    rasterize(&mut dataset, &[1], &[geometry], &[BURN_VALUE], None)?;

    let mask = RasterHandle::new(dataset).read_band::<u8>()?;

    debug!(
        "Rasterized geometry onto {rows}x{columns} grid, {} pixels covered",
        mask.iter().filter(|&&v| v > 0).count()
    );

    Ok(mask)
}

fn validate_geometry(geometry: &Geometry<f64>) -> Result<()> {
    if geometry.coords_count() == 0 {
        return Err(Error::DegenerateGeometry {
            reason: "the geometry is empty",
        });
    }

    if !geometry.coords_iter().all(|c| c.x.is_finite() && c.y.is_finite()) {
        return Err(Error::DegenerateGeometry {
            reason: "the geometry has non-finite coordinates",
        });
    }

    let is_polygonal = matches!(
        geometry,
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) | Geometry::Rect(_) | Geometry::Triangle(_)
    );

    if is_polygonal && geometry.unsigned_area() == 0. {
        return Err(Error::DegenerateGeometry {
            reason: "the polygon has no area",
        });
    }

    Ok(())
}
