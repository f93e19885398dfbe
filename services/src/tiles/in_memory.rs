use rastertiles_datatypes::primitives::Polygon;
use rastertiles_datatypes::tiles::TileRecord;

use super::{TileIndex, ensure_index_spatial_reference};
use crate::error::Result;

/// A tile index that keeps all records in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryTileIndex {
    records: Vec<TileRecord>,
}

impl InMemoryTileIndex {
    pub fn new(records: Vec<TileRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn with_record(mut self, record: TileRecord) -> Self {
        self.records.push(record);
        self
    }
}

impl TileIndex for InMemoryTileIndex {
    fn find_covering(&self, footprint: &Polygon) -> Result<Vec<TileRecord>> {
        ensure_index_spatial_reference(footprint)?;

        Ok(self
            .records
            .iter()
            .filter(|record| {
                record
                    .the_geom
                    .as_ref()
                    .is_some_and(|geometry| footprint.intersects_geometry(geometry))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use geo::{MultiPolygon, polygon};
    use rastertiles_datatypes::spatial_reference::SpatialReference;
    use rastertiles_operators::mock::mem_raster;

    fn square(gid: i32, name: &str, xmin: f64, ymin: f64, size: f64) -> TileRecord {
        let (xmax, ymax) = (xmin + size, ymin + size);
        TileRecord::new(
            gid,
            name,
            Some(MultiPolygon::new(vec![polygon![
                (x: xmin, y: ymin),
                (x: xmax, y: ymin),
                (x: xmax, y: ymax),
                (x: xmin, y: ymax),
            ]])),
        )
    }

    fn index() -> InMemoryTileIndex {
        InMemoryTileIndex::new(vec![
            square(1, "A", 0.0, 0.0, 100.0),
            square(2, "B", 100.0, 0.0, 100.0),
            square(3, "C", 0.0, 100.0, 100.0),
            square(4, "D", 100.0, 100.0, 100.0),
        ])
        .with_record(TileRecord::new(5, "no_geometry", None))
    }

    fn names(records: &[TileRecord]) -> Vec<String> {
        let mut names: Vec<String> = records.iter().map(ToString::to_string).collect();
        names.sort();
        names
    }

    #[test]
    fn finds_intersecting_tiles() {
        let found = index()
            .find_covering(&Polygon::from_bounds(10.0, 10.0, 20.0, 20.0).unwrap())
            .unwrap();

        assert_eq!(names(&found), vec!["A"]);
    }

    #[test]
    fn spanning_footprint_finds_all_tiles() {
        let found = index()
            .find_covering(&Polygon::from_bounds(50.0, 50.0, 150.0, 150.0).unwrap())
            .unwrap();

        assert_eq!(names(&found), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn touching_boundaries_count() {
        let edge = index()
            .find_covering(&Polygon::from_bounds(200.0, 10.0, 210.0, 20.0).unwrap())
            .unwrap();
        assert_eq!(names(&edge), vec!["B"]);

        let corner = index()
            .find_covering(&Polygon::from_bounds(200.0, 200.0, 210.0, 210.0).unwrap())
            .unwrap();
        assert_eq!(names(&corner), vec!["D"]);
    }

    #[test]
    fn no_match_is_empty() {
        let found = index()
            .find_covering(&Polygon::from_bounds(500.0, 500.0, 600.0, 600.0).unwrap())
            .unwrap();

        assert!(found.is_empty());
    }

    #[test]
    fn rejects_geographic_footprints() {
        let footprint = Polygon::new(
            vec![(4.0, 52.0).into(), (5.0, 52.0).into(), (5.0, 53.0).into()],
            SpatialReference::epsg_4326(),
        )
        .unwrap();

        assert!(matches!(
            index().find_covering(&footprint),
            Err(Error::SpatialReferenceMismatch { .. })
        ));
    }

    #[test]
    fn finds_tiles_covering_a_raster() {
        let raster = mem_raster::<u8>((5, 5), [150.0, 10.0, 0.0, 50.0, 0.0, -10.0], &[0; 25], None);

        let found = index().find_covering_raster(&raster).unwrap();

        assert_eq!(names(&found), vec!["B"]);
    }
}
