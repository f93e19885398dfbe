mod coordinate;
mod extent;
mod polygon;

pub use coordinate::Coordinate2D;
pub use extent::Extent;
pub use polygon::Polygon;
