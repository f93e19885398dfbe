mod connection;
mod driver;
mod no_data;
mod opener;

pub use connection::{ConnectionDescriptor, DatabaseRegistry, DatabaseSettings};
pub use driver::{GdalRasterDriver, RasterDriver};
pub use no_data::{NoDataLookup, NoDataResolver};
pub use opener::RasterOpener;
