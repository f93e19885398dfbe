mod rasterize;
mod reproject;

pub use rasterize::rasterize_mask;
pub use reproject::reproject;
