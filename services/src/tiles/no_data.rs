use rastertiles_datatypes::tiles::TableName;
use rastertiles_operators::source::NoDataLookup;
use std::sync::Arc;

use crate::error::Result;
use crate::util::postgres::PostgresConnections;

/// Reads the nodata value of a tile from its raster table with `ST_BandNoDataValue`
pub struct PostgresNoDataLookup {
    connections: Arc<PostgresConnections>,
}

impl PostgresNoDataLookup {
    pub fn new(connections: Arc<PostgresConnections>) -> Self {
        Self { connections }
    }

    fn query(&self, alias: &str, table: &TableName, tile: &str) -> Result<Option<f64>> {
        let client = self.connections.client(alias)?;

        let statement = format!(
            "SELECT ST_BandNoDataValue(rast) FROM {} WHERE filename = $1 LIMIT 1",
            table.quoted()
        );

        let Some(row) = client.query_opt(&statement, &[&tile])? else {
            return Ok(None);
        };

        Ok(row.try_get::<_, Option<f64>>(0)?)
    }
}

impl NoDataLookup for PostgresNoDataLookup {
    fn band_no_data_value(
        &self,
        alias: &str,
        table: &TableName,
        tile: &str,
    ) -> rastertiles_operators::util::Result<Option<f64>> {
        self.query(alias, table, tile).map_err(|error| {
            rastertiles_operators::error::Error::NoDataLookupFailed {
                tile: tile.to_string(),
                reason: error.to_string(),
            }
        })
    }
}
