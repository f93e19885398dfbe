use rastertiles_datatypes::tiles::{TableName, TileRecord};
use tracing::debug;

use super::{ConnectionDescriptor, DatabaseRegistry, NoDataLookup, NoDataResolver, RasterDriver};
use crate::raster::RasterHandle;
use crate::util::Result;

/// Opens single tiles from the raster tables, ready for use with a trustworthy nodata value.
pub struct RasterOpener<D, L> {
    driver: D,
    resolver: NoDataResolver<L>,
    registry: DatabaseRegistry,
}

impl<D, L> RasterOpener<D, L>
where
    D: RasterDriver,
    L: NoDataLookup,
{
    pub fn new(driver: D, lookup: L, registry: DatabaseRegistry) -> Self {
        Self {
            driver,
            resolver: NoDataResolver::new(lookup),
            registry,
        }
    }

    /// Opens `tile` from `table` of the database configured as `alias`.
    ///
    /// Returns `Ok(None)` if the driver could not open the tile. Configuration errors and failed
    /// nodata lookups are returned as errors.
    pub fn open(&self, table: &TableName, tile: &str, alias: &str) -> Result<Option<RasterHandle>> {
        let descriptor = ConnectionDescriptor::build(&self.registry, alias, table, tile)?;

        debug!("Opening dataset: {descriptor}");

        let dataset = self.driver.open(&descriptor);

        if dataset.is_none() {
            debug!("Tile {tile} could not be opened from {table}");
        }

        self.resolver.resolve(dataset, alias, table, tile)
    }

    /// Opens the tile of an index record
    pub fn open_tile(
        &self,
        record: &TileRecord,
        table: &TableName,
        alias: &str,
    ) -> Result<Option<RasterHandle>> {
        self.open(table, record.tile_name(), alias)
    }

    pub fn registry(&self) -> &DatabaseRegistry {
        &self.registry
    }
}
