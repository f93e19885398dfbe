pub mod error;
pub mod mock;
pub mod processing;
pub mod raster;
pub mod source;
pub mod util;
