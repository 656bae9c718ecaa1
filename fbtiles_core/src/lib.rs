//! Value types shared by the FBTiles store and its command line tool.
//!
//! Contains tile coordinates, the 64-bit tile key codec, the tile type registry,
//! bounds rectangles and the error type used across the workspace.

mod error;
pub use error::*;

pub mod types;
pub use types::*;
