use clap::{Parser, Subcommand};
use rastertiles_operators::util::gdal::register_gdal_drivers_from_list;
use rastertiles_services::cli::{
    Covering, Descriptor, Open, list_covering_tiles, open_tile, print_descriptor,
};
use rastertiles_services::config::{self, Settings};
use rastertiles_services::logging::init_logging;

/// Resolves and opens AHN and LGN raster tiles
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Lists the tiles that cover an extent
    Covering(Covering),

    /// Prints the connection string of a tile
    Descriptor(Descriptor),

    /// Opens a tile and prints its properties
    Open(Open),
}

impl Commands {
    fn execute(self, settings: &Settings) -> Result<(), anyhow::Error> {
        match self {
            Commands::Covering(params) => list_covering_tiles(params, settings),
            Commands::Descriptor(params) => print_descriptor(params, settings),
            Commands::Open(params) => open_tile(params, settings),
        }
    }
}

fn run(cli: Cli) -> Result<(), anyhow::Error> {
    let settings = Settings::load()?;

    init_logging(&settings.get_element::<config::Logging>()?)?;

    let gdal_config: config::Gdal = settings.get_element()?;
    register_gdal_drivers_from_list(gdal_config.allowed_drivers);

    cli.command.execute(&settings)
}

#[allow(clippy::print_stderr)]
fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
