use rastertiles_datatypes::tiles::TableName;
use tracing::{debug, info};

use crate::error::Error;
use crate::raster::RasterHandle;
use crate::util::Result;

/// Fetches the nodata value of band 1 of a tile as stored in the database (`ST_BandNoDataValue`).
pub trait NoDataLookup {
    /// Returns `None` if the table has no row for `tile` or the stored value is `NULL`.
    fn band_no_data_value(&self, alias: &str, table: &TableName, tile: &str)
    -> Result<Option<f64>>;
}

impl<L: NoDataLookup + ?Sized> NoDataLookup for &L {
    fn band_no_data_value(
        &self,
        alias: &str,
        table: &TableName,
        tile: &str,
    ) -> Result<Option<f64>> {
        (**self).band_no_data_value(alias, table, tile)
    }
}

/// Replaces the nodata value the `PostGISRaster` driver reports when it cannot be trusted.
///
/// The driver reports `0` when it falls back to its default, which would mask valid zero readings.
/// In that case the authoritative value is fetched from the database.
#[derive(Debug, Clone)]
pub struct NoDataResolver<L> {
    lookup: L,
}

impl<L: NoDataLookup> NoDataResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Resolves the nodata value of band 1 in place.
    ///
    /// A missing dataset is passed through untouched and no query is issued.
    pub fn resolve(
        &self,
        dataset: Option<RasterHandle>,
        alias: &str,
        table: &TableName,
        tile: &str,
    ) -> Result<Option<RasterHandle>> {
        let Some(mut dataset) = dataset else {
            debug!("No dataset for tile {tile}, skipping nodata resolution");
            return Ok(None);
        };

        if !is_driver_default(dataset.no_data_value()?) {
            return Ok(Some(dataset));
        }

        let no_data_value = self
            .lookup
            .band_no_data_value(alias, table, tile)?
            .ok_or_else(|| Error::NoDataValueNotFound {
                table: table.clone(),
                tile: tile.to_string(),
            })?;

        info!("Resolved nodata value of tile {tile} in {table} to {no_data_value}");

        dataset.set_no_data_value(Some(no_data_value))?;

        Ok(Some(dataset))
    }
}

#[allow(clippy::float_cmp)]
fn is_driver_default(no_data_value: Option<f64>) -> bool {
    no_data_value == Some(0.)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockNoDataLookup, mem_raster};

    fn raster_with_no_data(no_data_value: Option<f64>) -> RasterHandle {
        mem_raster::<f32>(
            (10, 10),
            [0.0, 10.0, 0.0, 100.0, 0.0, -10.0],
            &[1.0; 100],
            no_data_value,
        )
    }

    #[test]
    fn replaces_zero_with_database_value() {
        let lookup = MockNoDataLookup::default().with_value("T1", -9999.0);
        let resolver = NoDataResolver::new(&lookup);

        let resolved = resolver
            .resolve(
                Some(raster_with_no_data(Some(0.0))),
                "raster",
                &TableName::ahn(),
                "T1",
            )
            .unwrap()
            .unwrap();

        assert_eq!(resolved.no_data_value().unwrap(), Some(-9999.0));
        assert_eq!(lookup.queries(), 1);
    }

    #[test]
    fn keeps_non_zero_values_without_query() {
        let lookup = MockNoDataLookup::default().with_value("T1", -9999.0);
        let resolver = NoDataResolver::new(&lookup);

        let resolved = resolver
            .resolve(
                Some(raster_with_no_data(Some(255.0))),
                "raster",
                &TableName::ahn(),
                "T1",
            )
            .unwrap()
            .unwrap();

        assert_eq!(resolved.no_data_value().unwrap(), Some(255.0));
        assert_eq!(lookup.queries(), 0);
    }

    #[test]
    fn keeps_missing_no_data_without_query() {
        let lookup = MockNoDataLookup::default();
        let resolver = NoDataResolver::new(&lookup);

        let resolved = resolver
            .resolve(
                Some(raster_with_no_data(None)),
                "raster",
                &TableName::ahn(),
                "T1",
            )
            .unwrap()
            .unwrap();

        assert_eq!(resolved.no_data_value().unwrap(), None);
        assert_eq!(lookup.queries(), 0);
    }

    #[test]
    fn missing_dataset_is_a_no_op() {
        let lookup = MockNoDataLookup::default();
        let resolver = NoDataResolver::new(&lookup);

        let resolved = resolver
            .resolve(None, "raster", &TableName::ahn(), "T1")
            .unwrap();

        assert!(resolved.is_none());
        assert_eq!(lookup.queries(), 0);
    }

    #[test]
    fn missing_row_is_an_error() {
        let lookup = MockNoDataLookup::default();
        let resolver = NoDataResolver::new(&lookup);

        let result = resolver.resolve(
            Some(raster_with_no_data(Some(0.0))),
            "raster",
            &TableName::lgn(),
            "T2",
        );

        assert!(matches!(
            result,
            Err(Error::NoDataValueNotFound { table, tile }) if table == TableName::lgn() && tile == "T2"
        ));
        assert_eq!(lookup.queries(), 1);
    }
}
