use clap::Parser;
use rastertiles_datatypes::tiles::TableName;
use rastertiles_operators::source::ConnectionDescriptor;

use crate::config::{Raster, Settings};

/// Prints the `PostGISRaster` connection string of a tile
#[derive(Debug, Parser)]
pub struct Descriptor {
    /// The raster table, defaults to `raster.default_table`
    #[arg(long)]
    table: Option<TableName>,
    /// The tile name (`bladnr`)
    #[arg(long)]
    tile: String,
    /// The database that stores the tiles, defaults to `raster.default_alias`
    #[arg(long)]
    alias: Option<String>,
    /// Prints the password instead of masking it
    #[arg(long)]
    show_password: bool,
}

#[allow(clippy::print_stdout)]
pub fn print_descriptor(params: Descriptor, settings: &Settings) -> Result<(), anyhow::Error> {
    let raster: Raster = settings.get_element()?;
    let table = params.table.unwrap_or(raster.default_table);
    let alias = params.alias.unwrap_or(raster.default_alias);

    let descriptor =
        ConnectionDescriptor::build(&settings.databases()?, &alias, &table, &params.tile)?;

    if params.show_password {
        println!("{}", descriptor.as_str());
    } else {
        println!("{descriptor}");
    }

    Ok(())
}
