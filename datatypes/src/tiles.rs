use crate::error;
use crate::util::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::fmt;

/// One entry of the tile index (`data_index`).
///
/// Records are produced by an external bulk load (`shp2pgsql -s 28992`) and are read-only here.
/// The footprint `the_geom` is always expressed in EPSG:28992.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    pub gid: i32,
    /// x coordinate in RD
    pub x: Option<f64>,
    /// y coordinate in RD
    pub y: Option<f64>,
    pub cellsize: String,
    pub lo_x: String,
    pub lo_y: String,
    /// The sheet number, which is the filename key of the tile in the raster tables
    pub bladnr: String,
    pub update: Option<NaiveDate>,
    pub datum: Option<NaiveDate>,
    pub min_datum: Option<NaiveDate>,
    pub max_datum: Option<NaiveDate>,
    pub ar: Option<f64>,
    #[serde(skip)]
    pub the_geom: Option<geo::MultiPolygon<f64>>,
}

impl TileRecord {
    /// Creates a record with only the identifying attributes and a footprint set
    pub fn new(gid: i32, bladnr: impl Into<String>, the_geom: Option<geo::MultiPolygon<f64>>) -> Self {
        Self {
            gid,
            x: None,
            y: None,
            cellsize: String::new(),
            lo_x: String::new(),
            lo_y: String::new(),
            bladnr: bladnr.into(),
            update: None,
            datum: None,
            min_datum: None,
            max_datum: None,
            ar: None,
            the_geom,
        }
    }

    /// The tile name used as `filename` in the raster tables
    pub fn tile_name(&self) -> &str {
        &self.bladnr
    }
}

impl fmt::Display for TileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bladnr)
    }
}

/// The name of a table that stores raster tiles, one row per tile with a `filename` and a `rast` column.
///
/// Table names end up in SQL statements and connection strings, so they are restricted to plain
/// identifiers: an ASCII letter or underscore followed by ASCII letters, digits or underscores.
/// Names are folded to lower case, the way PostgreSQL treats unquoted identifiers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName(String);

impl TableName {
    /// elevation tiles (AHN)
    pub const AHN: &'static str = "data_ahn";
    /// land use tiles (LGN)
    pub const LGN: &'static str = "data_lgn";

    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        let mut chars = name.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

        ensure!(valid, error::InvalidTableName { name });

        Ok(Self(name.to_ascii_lowercase()))
    }

    pub fn ahn() -> Self {
        Self(Self::AHN.to_string())
    }

    pub fn lgn() -> Self {
        Self(Self::LGN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name as a quoted SQL identifier
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl Default for TableName {
    fn default() -> Self {
        Self::ahn()
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TableName {
    type Error = error::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TableName> for String {
    fn from(table_name: TableName) -> Self {
        table_name.0
    }
}

impl std::str::FromStr for TableName {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
