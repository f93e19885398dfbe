use rastertiles_datatypes::tiles::TableName;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display("DataTypeError: {}", source))]
    DataType {
        source: rastertiles_datatypes::error::Error,
    },

    #[snafu(display("GdalError: {}", source))]
    Gdal {
        source: gdal::errors::GdalError,
    },

    #[snafu(display("No database is configured for the alias \"{}\"", alias))]
    UnknownDatabaseAlias {
        alias: String,
    },

    #[snafu(display(
        "No nodata value found for tile \"{}\" in table \"{}\"",
        tile,
        table
    ))]
    NoDataValueNotFound {
        table: TableName,
        tile: String,
    },

    #[snafu(display("Nodata lookup for tile \"{}\" failed: {}", tile, reason))]
    NoDataLookupFailed {
        tile: String,
        reason: String,
    },

    #[snafu(display(
        "InvalidRasterSize: a raster needs at least one row and one column, got {}x{}",
        width,
        height
    ))]
    InvalidRasterSize {
        width: usize,
        height: usize,
    },

    #[snafu(display("InvalidGeoTransform: {:?}", geo_transform))]
    InvalidGeoTransform {
        geo_transform: [f64; 6],
    },

    #[snafu(display("DegenerateGeometry: {}", reason))]
    DegenerateGeometry {
        reason: &'static str,
    },

    #[snafu(display("Reprojection failed with CPL error {}", cpl_error))]
    Reprojection {
        cpl_error: u32,
    },

    GdalRasterDataTypeNotSupported,
}

impl From<rastertiles_datatypes::error::Error> for Error {
    fn from(datatype_error: rastertiles_datatypes::error::Error) -> Self {
        Self::DataType {
            source: datatype_error,
        }
    }
}

impl From<gdal::errors::GdalError> for Error {
    fn from(gdal_error: gdal::errors::GdalError) -> Self {
        Self::Gdal { source: gdal_error }
    }
}
