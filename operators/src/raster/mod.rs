mod handle;

pub use handle::RasterHandle;
