//! FBTiles container: write tiles into an FBTiles (SQLite) store.
//!
//! An FBTiles store keeps one row per tile cell with two independent payload slots,
//! one for the primary rendering and one for the collared rendering of the cell.
//! Alongside the tiles it maintains a bounds record per zoom level and variant,
//! extended in the same transaction as every tile write.
//!
//! # Quick start
//! ```rust,no_run
//! use fbtiles_container::*;
//! use fbtiles_core::*;
//!
//! fn main() -> fbtiles_core::Result<()> {
//!     let path = std::env::temp_dir().join("example1.fbtiles");
//!     let mut writer = FBTilesWriter::create_path(&path)?;
//!     writer.put_tile(2, 1, 0, &Blob::from("tile"), TileFormat::JPG, TileVariant::Primary)?;
//!     writer.put_tile(2, 1, 0, &Blob::from("collared"), TileFormat::JPG, TileVariant::Collared)?;
//!     writer.close()?;
//!     Ok(())
//! }
//! ```

mod config;
pub use config::*;

mod content;
pub use content::*;

mod fbtiles;
pub use fbtiles::*;
