use crate::primitives::Coordinate2D;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display(
        "The conditions xmin <= xmax && ymin <= ymax are not met by ll:{} ur:{}",
        lower_left_coordinate,
        upper_right_coordinate
    ))]
    InvalidExtent {
        lower_left_coordinate: Coordinate2D,
        upper_right_coordinate: Coordinate2D,
    },

    #[snafu(display(
        "A polygon ring needs at least four coordinates including the closing one, got {}",
        num_coordinates
    ))]
    UnclosedRing { num_coordinates: usize },

    #[snafu(display("InvalidSpatialReferenceString: {}", spatial_reference_string))]
    InvalidSpatialReferenceString { spatial_reference_string: String },

    #[snafu(display("ParseU32: {}", source))]
    ParseU32 {
        source: <u32 as std::str::FromStr>::Err,
    },

    #[snafu(display("\"{}\" is not a valid raster table name", name))]
    InvalidTableName { name: String },
}
