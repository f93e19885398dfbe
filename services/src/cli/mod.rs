mod covering;
mod descriptor;
mod open;

pub use covering::{Covering, list_covering_tiles};
pub use descriptor::{Descriptor, print_descriptor};
pub use open::{Open, open_tile};
