use geo::{Geometry, MultiPolygon};
use rastertiles_datatypes::primitives::Polygon;
use rastertiles_datatypes::tiles::TileRecord;
use snafu::ResultExt;
use std::str::FromStr;
use std::sync::Arc;
use tokio_postgres::Row;
use tracing::debug;
use wkt::Wkt;

use super::{TileIndex, ensure_index_spatial_reference};
use crate::error::{self, Error, Result};
use crate::util::postgres::PostgresClient;

// `x`, `y` and `ar` are `numeric` columns when loaded with `shp2pgsql`
const FIND_COVERING: &str = r#"
    SELECT gid, x::double precision, y::double precision, cellsize, lo_x, lo_y, bladnr,
        "update", datum, min_datum, max_datum, ar::double precision, ST_AsText(the_geom)
    FROM data_index
    WHERE ST_Intersects(the_geom, ST_GeomFromText($1, 28992))"#;

/// The tile index stored in the `data_index` table of a PostGIS database
pub struct PostgresTileIndex {
    client: Arc<PostgresClient>,
}

impl PostgresTileIndex {
    pub fn new(client: Arc<PostgresClient>) -> Self {
        Self { client }
    }
}

impl TileIndex for PostgresTileIndex {
    fn find_covering(&self, footprint: &Polygon) -> Result<Vec<TileRecord>> {
        ensure_index_spatial_reference(footprint)?;

        let rows = self.client.query(FIND_COVERING, &[&footprint.to_wkt()])?;

        debug!("{} tiles intersect {}", rows.len(), footprint.to_wkt());

        rows.iter().map(tile_record_from_row).collect()
    }
}

fn tile_record_from_row(row: &Row) -> Result<TileRecord> {
    let the_geom: Option<String> = row.try_get(12).context(error::TokioPostgres)?;

    Ok(TileRecord {
        gid: row.try_get(0).context(error::TokioPostgres)?,
        x: row.try_get(1).context(error::TokioPostgres)?,
        y: row.try_get(2).context(error::TokioPostgres)?,
        cellsize: text_or_empty(row, 3)?,
        lo_x: text_or_empty(row, 4)?,
        lo_y: text_or_empty(row, 5)?,
        bladnr: text_or_empty(row, 6)?,
        update: row.try_get(7).context(error::TokioPostgres)?,
        datum: row.try_get(8).context(error::TokioPostgres)?,
        min_datum: row.try_get(9).context(error::TokioPostgres)?,
        max_datum: row.try_get(10).context(error::TokioPostgres)?,
        ar: row.try_get(11).context(error::TokioPostgres)?,
        the_geom: the_geom.as_deref().map(multi_polygon_from_wkt).transpose()?,
    })
}

fn text_or_empty(row: &Row, index: usize) -> Result<String> {
    let text: Option<String> = row.try_get(index).context(error::TokioPostgres)?;
    Ok(text.unwrap_or_default())
}

/// Parses the footprint of a tile, which is a polygon or a multi polygon
pub(crate) fn multi_polygon_from_wkt(text: &str) -> Result<MultiPolygon<f64>> {
    let wkt = Wkt::<f64>::from_str(text).map_err(|reason| Error::Wkt {
        wkt: text.to_string(),
        reason: reason.to_string(),
    })?;

    let geometry = Geometry::<f64>::try_from(wkt).map_err(|reason| Error::Wkt {
        wkt: text.to_string(),
        reason: reason.to_string(),
    })?;

    match geometry {
        Geometry::MultiPolygon(multi_polygon) => Ok(multi_polygon),
        Geometry::Polygon(polygon) => Ok(MultiPolygon::new(vec![polygon])),
        _ => Err(Error::UnexpectedGeometryType {
            wkt: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::postgres::test_connections;
    use geo::{Area, Intersects, point};

    // `shp2pgsql` layout of the index, with two tiles 100 m apart
    const CREATE_INDEX: &str = r#"
        CREATE TEMPORARY TABLE data_index (
            gid serial PRIMARY KEY,
            x numeric,
            y numeric,
            cellsize varchar(10),
            lo_x varchar(10),
            lo_y varchar(10),
            bladnr varchar(10),
            "update" date,
            datum date,
            min_datum date,
            max_datum date,
            ar numeric,
            the_geom geometry(MultiPolygon, 28992)
        );

        INSERT INTO data_index (x, y, cellsize, lo_x, lo_y, bladnr, "update", ar, the_geom) VALUES
            (50.5, 50.5, '0.5', '0', '0', 'T1', '2014-03-01', 10000,
                ST_GeomFromText('MULTIPOLYGON(((0 0,100 0,100 100,0 100,0 0)))', 28992)),
            (250.5, 50.5, '0.5', '200', '0', 'T2', NULL, 10000,
                ST_GeomFromText('MULTIPOLYGON(((200 0,300 0,300 100,200 100,200 0)))', 28992));
    "#;

    fn test_index() -> PostgresTileIndex {
        let client = test_connections().client("raster").unwrap();
        client.batch_execute(CREATE_INDEX).unwrap();
        PostgresTileIndex::new(client)
    }

    fn tile_names(index: &PostgresTileIndex, footprint: &Polygon) -> Vec<String> {
        let mut names: Vec<String> = index
            .find_covering(footprint)
            .unwrap()
            .into_iter()
            .map(|record| record.bladnr)
            .collect();
        names.sort();
        names
    }

    #[ignore]
    #[test]
    fn finds_covering_tiles_in_postgis() {
        let index = test_index();

        assert_eq!(
            tile_names(&index, &Polygon::from_bounds(10.0, 10.0, 20.0, 20.0).unwrap()),
            vec!["T1"]
        );
        assert_eq!(
            tile_names(&index, &Polygon::from_bounds(50.0, 10.0, 250.0, 20.0).unwrap()),
            vec!["T1", "T2"]
        );
        assert!(
            tile_names(&index, &Polygon::from_bounds(120.0, 10.0, 180.0, 20.0).unwrap())
                .is_empty()
        );
    }

    #[ignore]
    #[test]
    fn touching_tiles_are_covering_in_postgis() {
        let index = test_index();

        assert_eq!(
            tile_names(&index, &Polygon::from_bounds(100.0, 0.0, 150.0, 10.0).unwrap()),
            vec!["T1"]
        );
        assert!(
            tile_names(&index, &Polygon::from_bounds(100.5, 0.0, 150.0, 10.0).unwrap())
                .is_empty()
        );
    }

    #[ignore]
    #[test]
    #[allow(clippy::float_cmp)]
    fn reads_numeric_and_date_columns() {
        let index = test_index();

        let records = index
            .find_covering(&Polygon::from_bounds(10.0, 10.0, 20.0, 20.0).unwrap())
            .unwrap();
        let record = &records[0];

        assert_eq!(record.x, Some(50.5));
        assert_eq!(record.y, Some(50.5));
        assert_eq!(record.ar, Some(10000.0));
        assert_eq!(record.cellsize, "0.5");
        assert_eq!(
            record.update.as_ref().map(ToString::to_string).as_deref(),
            Some("2014-03-01")
        );
        assert_eq!(record.datum, None);
        assert!(record.the_geom.is_some());
    }

    #[test]
    fn parses_multi_polygons() {
        let multi_polygon = multi_polygon_from_wkt(
            "MULTIPOLYGON(((120000 487500,125000 487500,125000 481250,120000 481250,120000 487500)))",
        )
        .unwrap();

        assert_eq!(multi_polygon.0.len(), 1);
        assert!((multi_polygon.unsigned_area() - 5000.0 * 6250.0).abs() < 1e-6);
        assert!(multi_polygon.intersects(&point!(x: 122_000.0, y: 485_000.0)));
    }

    #[test]
    fn parses_polygons() {
        let multi_polygon = multi_polygon_from_wkt("POLYGON((0 0,10 0,10 10,0 10,0 0))").unwrap();

        assert_eq!(multi_polygon.0.len(), 1);
    }

    #[test]
    fn footprint_wkt_round_trips() {
        let footprint = Polygon::from_bounds(10.0, 10.0, 20.5, 20.0).unwrap();

        let parsed = multi_polygon_from_wkt(&footprint.to_wkt()).unwrap();

        assert!((parsed.unsigned_area() - 105.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_other_geometries() {
        assert!(matches!(
            multi_polygon_from_wkt("POINT(1 2)"),
            Err(Error::UnexpectedGeometryType { .. })
        ));
        assert!(matches!(
            multi_polygon_from_wkt("POLYGON((0 0,"),
            Err(Error::Wkt { .. })
        ));
    }
}
