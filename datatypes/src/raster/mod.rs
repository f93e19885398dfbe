mod geo_transform;

pub use self::geo_transform::{GdalGeoTransform, GeoTransform};
