//! Contains coordinates, keys, bounds rectangles, tile types and blobs.

mod blob;
pub use blob::*;

mod tile_bbox;
pub use tile_bbox::*;

mod tile_coord;
pub use tile_coord::*;

mod tile_format;
pub use tile_format::*;

mod tile_key;
pub use tile_key::*;

mod tile_variant;
pub use tile_variant::*;
