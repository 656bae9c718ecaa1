//! SQLite file `*.fbtiles` as tile store
//!
//! The main components of this module are:
//! - `FBTilesWriter`: opens or creates a store and writes tiles into it.
//! - the bounds index, extended on every tile write.
//! - the schema bootstrap and the reconciliation of the type registry.

mod bounds;
mod schema;
mod writer;

pub use bounds::BoundsRecord;
pub use schema::TypeRegistry;
pub use writer::FBTilesWriter;
