use super::{Coordinate2D, Extent};
use crate::error;
use crate::spatial_reference::SpatialReference;
use crate::util::Result;
use geo::Intersects;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use wkt::ToWkt;

/// A single closed ring tagged with the spatial reference its coordinates are expressed in.
///
/// It is used as a query footprint against the tile index and as the outline of raster extents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolygonRing")]
pub struct Polygon {
    ring: Vec<Coordinate2D>,
    spatial_reference: SpatialReference,
}

/// Unchecked serialized form of a [`Polygon`]
#[derive(Deserialize)]
struct PolygonRing {
    ring: Vec<Coordinate2D>,
    spatial_reference: SpatialReference,
}

impl TryFrom<PolygonRing> for Polygon {
    type Error = error::Error;

    fn try_from(value: PolygonRing) -> Result<Self, Self::Error> {
        Self::new(value.ring, value.spatial_reference)
    }
}

impl Polygon {
    /// Creates a polygon from a ring of coordinates.
    /// A ring that is not explicitly closed gets its first coordinate appended.
    ///
    /// # Errors
    ///
    /// Fails if the ring has less than three distinct positions
    ///
    pub fn new(ring: Vec<Coordinate2D>, spatial_reference: SpatialReference) -> Result<Self> {
        let mut ring = ring;

        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last()) {
            if first != *last {
                ring.push(first);
            }
        }

        ensure!(
            ring.len() >= 4,
            error::UnclosedRing {
                num_coordinates: ring.len()
            }
        );

        Ok(Self {
            ring,
            spatial_reference,
        })
    }

    /// Builds the outline of `extent` in the projected reference system.
    ///
    /// The ring starts in the lower left corner and runs counter-clockwise:
    /// `(xmin, ymin), (xmax, ymin), (xmax, ymax), (xmin, ymax), (xmin, ymin)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rastertiles_datatypes::primitives::{Extent, Polygon};
    ///
    /// let polygon = Polygon::from_extent(&Extent::new(0.0, 0.0, 2.0, 1.0).unwrap());
    ///
    /// assert_eq!(polygon.ring().len(), 5);
    /// assert_eq!(polygon.ring()[2], (2.0, 1.0).into());
    /// ```
    pub fn from_extent(extent: &Extent) -> Self {
        let (x1, y1, x2, y2) = (*extent).into();

        Self {
            ring: vec![
                (x1, y1).into(),
                (x2, y1).into(),
                (x2, y2).into(),
                (x1, y2).into(),
                (x1, y1).into(),
            ],
            spatial_reference: SpatialReference::epsg_28992(),
        }
    }

    /// Builds the outline from explicit bounds, see [`Polygon::from_extent`].
    pub fn from_bounds(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self> {
        Ok(Self::from_extent(&Extent::new(xmin, ymin, xmax, ymax)?))
    }

    pub fn ring(&self) -> &[Coordinate2D] {
        &self.ring
    }

    pub fn spatial_reference(&self) -> SpatialReference {
        self.spatial_reference
    }

    /// The smallest extent that contains the ring
    pub fn extent(&self) -> Extent {
        let (xmin, ymin, xmax, ymax) = self.ring.iter().fold(
            (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
            |(xmin, ymin, xmax, ymax), c| (xmin.min(c.x), ymin.min(c.y), xmax.max(c.x), ymax.max(c.y)),
        );
        Extent::new_unchecked(xmin, ymin, xmax, ymax)
    }

    /// Checks whether two rings describe the same closed shape, regardless of the starting
    /// vertex and the orientation.
    pub fn is_ring_equivalent(&self, other: &Self) -> bool {
        if self.spatial_reference != other.spatial_reference {
            return false;
        }

        // drop the closing coordinate
        let a = &self.ring[..self.ring.len() - 1];
        let b = &other.ring[..other.ring.len() - 1];

        if a.len() != b.len() {
            return false;
        }

        let n = a.len();
        let matches_from = |offset: usize, reversed: bool| {
            (0..n).all(|i| {
                let j = if reversed {
                    (offset + n - i) % n
                } else {
                    (offset + i) % n
                };
                a[i] == b[j]
            })
        };

        (0..n).any(|offset| matches_from(offset, false) || matches_from(offset, true))
    }

    /// Checks whether the polygon shares at least one point with `geometry`.
    /// Touching boundaries count as intersecting.
    pub fn intersects_geometry(&self, geometry: &geo::MultiPolygon<f64>) -> bool {
        geo::Polygon::from(self).intersects(geometry)
    }

    /// Well-known text of the ring, e.g. for passing it to `ST_GeomFromText`
    pub fn to_wkt(&self) -> String {
        geo::Polygon::from(self).wkt_string()
    }
}

impl From<&Polygon> for geo::Polygon<f64> {
    fn from(polygon: &Polygon) -> geo::Polygon<f64> {
        geo::Polygon::new(
            geo::LineString::from(
                polygon
                    .ring
                    .iter()
                    .map(|&c| geo::Coord::from(c))
                    .collect::<Vec<_>>(),
            ),
            vec![],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::GeoTransform;

    #[test]
    fn new_closes_open_rings() {
        let polygon = Polygon::new(
            vec![(0.0, 0.0).into(), (1.0, 0.0).into(), (1.0, 1.0).into()],
            SpatialReference::epsg_28992(),
        )
        .unwrap();

        assert_eq!(polygon.ring().len(), 4);
        assert_eq!(polygon.ring().first(), polygon.ring().last());
    }

    #[test]
    fn new_rejects_degenerate_rings() {
        assert!(
            Polygon::new(
                vec![(0.0, 0.0).into(), (1.0, 0.0).into()],
                SpatialReference::epsg_28992()
            )
            .is_err()
        );
        assert!(Polygon::new(vec![], SpatialReference::epsg_28992()).is_err());
    }

    #[test]
    fn from_extent_ring_order() {
        let polygon = Polygon::from_bounds(1.0, 2.0, 3.0, 4.0).unwrap();

        assert_eq!(
            polygon.ring(),
            &[
                Coordinate2D::new(1.0, 2.0),
                Coordinate2D::new(3.0, 2.0),
                Coordinate2D::new(3.0, 4.0),
                Coordinate2D::new(1.0, 4.0),
                Coordinate2D::new(1.0, 2.0),
            ]
        );
        assert_eq!(polygon.spatial_reference(), SpatialReference::epsg_28992());
    }

    #[test]
    fn raster_outline_equals_bounds_outline() {
        let cases = [
            (GeoTransform::new_with_coordinate_x_y(0.0, 1.0, 10.0, -1.0), 10, 10),
            (GeoTransform::new_with_coordinate_x_y(120_000.0, 0.5, 487_500.0, -0.5), 2000, 2500),
            (GeoTransform::new_with_coordinate_x_y(-13.25, 0.25, 7.5, -0.125), 3, 7),
        ];

        for (geo_transform, width, height) in cases {
            let extent = Extent::from_geo_transform(&geo_transform, width, height);
            assert!(extent.xmin() < extent.xmax());
            assert!(extent.ymin() < extent.ymax());

            let from_raster = Polygon::from_extent(&extent);
            let from_bounds =
                Polygon::from_bounds(extent.xmin(), extent.ymin(), extent.xmax(), extent.ymax())
                    .unwrap();

            assert!(from_raster.is_ring_equivalent(&from_bounds));
        }
    }

    #[test]
    fn ring_equivalence_ignores_start_and_orientation() {
        let a = Polygon::from_bounds(0.0, 0.0, 1.0, 1.0).unwrap();
        let rotated = Polygon::new(
            vec![
                (1.0, 1.0).into(),
                (0.0, 1.0).into(),
                (0.0, 0.0).into(),
                (1.0, 0.0).into(),
            ],
            SpatialReference::epsg_28992(),
        )
        .unwrap();
        let reversed = Polygon::new(
            vec![
                (0.0, 0.0).into(),
                (0.0, 1.0).into(),
                (1.0, 1.0).into(),
                (1.0, 0.0).into(),
            ],
            SpatialReference::epsg_28992(),
        )
        .unwrap();
        let other = Polygon::from_bounds(0.0, 0.0, 2.0, 1.0).unwrap();

        assert!(a.is_ring_equivalent(&rotated));
        assert!(a.is_ring_equivalent(&reversed));
        assert!(!a.is_ring_equivalent(&other));
    }

    #[test]
    fn extent_of_ring() {
        let polygon = Polygon::new(
            vec![(0.0, 5.0).into(), (3.0, -1.0).into(), (6.0, 5.0).into()],
            SpatialReference::epsg_28992(),
        )
        .unwrap();

        assert_eq!(polygon.extent(), Extent::new(0.0, -1.0, 6.0, 5.0).unwrap());
    }

    #[test]
    fn intersection_with_multi_polygon() {
        let tile: geo::MultiPolygon<f64> =
            geo::Polygon::from(&Polygon::from_bounds(0.0, 0.0, 100.0, 100.0).unwrap()).into();

        let inside = Polygon::from_bounds(10.0, 10.0, 20.0, 20.0).unwrap();
        let touching = Polygon::from_bounds(100.0, 0.0, 110.0, 10.0).unwrap();
        let corner = Polygon::from_bounds(100.0, 100.0, 110.0, 110.0).unwrap();
        let outside = Polygon::from_bounds(100.5, 0.0, 110.0, 10.0).unwrap();

        assert!(inside.intersects_geometry(&tile));
        assert!(touching.intersects_geometry(&tile));
        assert!(corner.intersects_geometry(&tile));
        assert!(!outside.intersects_geometry(&tile));
    }

    #[test]
    fn wkt_output() {
        let polygon = Polygon::from_bounds(0.0, 0.0, 1.5, 2.0).unwrap();

        assert_eq!(polygon.to_wkt(), "POLYGON((0 0,1.5 0,1.5 2,0 2,0 0))");
    }

    #[test]
    fn deserialization_validates_the_ring() {
        let polygon: Polygon = serde_json::from_str(
            r#"{"ring":[{"x":0.0,"y":0.0},{"x":1.0,"y":0.0},{"x":1.0,"y":1.0}],"spatial_reference":"EPSG:28992"}"#,
        )
        .unwrap();
        assert_eq!(polygon.ring().len(), 4);

        let result =
            serde_json::from_str::<Polygon>(r#"{"ring":[],"spatial_reference":"EPSG:28992"}"#);
        assert!(result.is_err());
    }
}
