mod in_memory;
mod no_data;
mod postgres;

pub use in_memory::InMemoryTileIndex;
pub use no_data::PostgresNoDataLookup;
pub use postgres::PostgresTileIndex;

use rastertiles_datatypes::primitives::Polygon;
use rastertiles_datatypes::spatial_reference::SpatialReference;
use rastertiles_datatypes::tiles::TileRecord;
use rastertiles_operators::raster::RasterHandle;
use snafu::ensure;

use crate::error::{self, Result};

/// Finds the tiles of the index (`data_index`) that cover an area.
pub trait TileIndex {
    /// All records whose footprint intersects `footprint`, touching boundaries included.
    ///
    /// The footprint has to be expressed in EPSG:28992. The order of the records is unspecified.
    fn find_covering(&self, footprint: &Polygon) -> Result<Vec<TileRecord>>;

    /// All records that intersect the extent of `raster`
    fn find_covering_raster(&self, raster: &RasterHandle) -> Result<Vec<TileRecord>> {
        self.find_covering(&raster.footprint()?)
    }
}

fn ensure_index_spatial_reference(footprint: &Polygon) -> Result<()> {
    let expected = SpatialReference::epsg_28992();
    let found = footprint.spatial_reference();

    ensure!(
        found == expected,
        error::SpatialReferenceMismatch { found, expected }
    );

    Ok(())
}
