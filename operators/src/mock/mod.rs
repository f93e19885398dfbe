mod mock_no_data_lookup;
mod mock_raster;

pub use mock_no_data_lookup::*;
pub use mock_raster::*;
