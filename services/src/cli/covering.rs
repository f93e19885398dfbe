use clap::Parser;
use rastertiles_datatypes::primitives::Polygon;

use crate::config::{Raster, Settings};
use crate::tiles::{PostgresTileIndex, TileIndex};
use crate::util::postgres::PostgresConnections;

/// Lists the tiles that cover an extent in EPSG:28992
#[derive(Debug, Parser)]
pub struct Covering {
    #[arg(long, allow_negative_numbers = true)]
    xmin: f64,
    #[arg(long, allow_negative_numbers = true)]
    ymin: f64,
    #[arg(long, allow_negative_numbers = true)]
    xmax: f64,
    #[arg(long, allow_negative_numbers = true)]
    ymax: f64,
    /// The database that holds the tile index, defaults to `raster.default_alias`
    #[arg(long)]
    alias: Option<String>,
}

#[allow(clippy::print_stdout)]
pub fn list_covering_tiles(params: Covering, settings: &Settings) -> Result<(), anyhow::Error> {
    let raster: Raster = settings.get_element()?;
    let alias = params.alias.unwrap_or(raster.default_alias);

    let footprint = Polygon::from_bounds(params.xmin, params.ymin, params.xmax, params.ymax)?;

    let connections = PostgresConnections::new(settings.databases()?);
    let index = PostgresTileIndex::new(connections.client(&alias)?);

    let mut tiles = index.find_covering(&footprint)?;
    tiles.sort_by(|a, b| a.bladnr.cmp(&b.bladnr));

    for tile in &tiles {
        println!("{tile}\t{}", tile.gid);
    }

    Ok(())
}
