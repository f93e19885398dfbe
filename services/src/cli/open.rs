use clap::Parser;
use rastertiles_datatypes::tiles::TableName;
use rastertiles_operators::source::{GdalRasterDriver, RasterOpener};
use std::sync::Arc;
use tracing::warn;

use crate::config::{Raster, Settings};
use crate::tiles::PostgresNoDataLookup;
use crate::util::postgres::PostgresConnections;

/// Opens a tile and prints its grid and nodata value
#[derive(Debug, Parser)]
pub struct Open {
    /// The raster table, defaults to `raster.default_table`
    #[arg(long)]
    table: Option<TableName>,
    /// The tile name (`bladnr`)
    #[arg(long)]
    tile: String,
    /// The database that stores the tiles, defaults to `raster.default_alias`
    #[arg(long)]
    alias: Option<String>,
}

#[allow(clippy::print_stdout)]
pub fn open_tile(params: Open, settings: &Settings) -> Result<(), anyhow::Error> {
    let raster: Raster = settings.get_element()?;
    let table = params.table.unwrap_or(raster.default_table);
    let alias = params.alias.unwrap_or(raster.default_alias);

    let registry = settings.databases()?;
    let lookup = PostgresNoDataLookup::new(Arc::new(PostgresConnections::new(registry.clone())));
    let opener = RasterOpener::new(GdalRasterDriver, lookup, registry);

    let Some(dataset) = opener.open(&table, &params.tile, &alias)? else {
        warn!("Tile {} could not be opened from {table}", params.tile);
        return Err(anyhow::anyhow!(
            "tile {tile} not found in {table}",
            tile = params.tile
        ));
    };

    println!("size: {}x{}", dataset.width(), dataset.height());
    println!("geo transform: {:?}", dataset.gdal_geo_transform()?);
    println!("extent: {:?}", dataset.extent()?);
    match dataset.no_data_value()? {
        Some(no_data_value) => println!("nodata: {no_data_value}"),
        None => println!("nodata: none"),
    }

    Ok(())
}
