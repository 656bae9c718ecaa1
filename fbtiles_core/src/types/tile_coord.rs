//! Three-dimensional tile coordinates as addressed by an FBTiles store.
//!
//! A [`TileCoord`] can only be created through [`TileCoord::new`], which checks every
//! component against the bit width it occupies in a [`TileKey`](crate::TileKey):
//! 8 bits for the zoom level, 28 bits each for column and row.
//!
//! ```
//! use fbtiles_core::TileCoord;
//!
//! let coord = TileCoord::new(7, 293, 200).unwrap();
//! assert_eq!(coord.level(), 7);
//! assert_eq!(coord.x(), 293);
//! assert_eq!(coord.y(), 200);
//!
//! assert!(TileCoord::new(256, 0, 0).is_err());
//! ```

use crate::{FBTilesError, Result};
use std::fmt::{self, Debug, Display};

/// Highest zoom level that fits into a tile key.
pub const MAX_LEVEL: u32 = 0xff;

/// Highest column or row index that fits into a tile key.
pub const MAX_INDEX: u32 = 0x0fff_ffff;

/// A validated tile coordinate: zoom level, column (`x`) and row (`y`).
#[derive(Eq, PartialEq, Clone, Hash, Copy, PartialOrd, Ord)]
pub struct TileCoord {
	pub(crate) level: u8,
	pub(crate) x: u32,
	pub(crate) y: u32,
}

impl TileCoord {
	/// Create a new `TileCoord`.
	///
	/// The zoom level is taken as `u32` so that callers passing unchecked numbers get an
	/// error instead of a silent wrap.
	///
	/// # Errors
	/// Returns [`FBTilesError::OutOfRange`] if `level` > 255 or `x`/`y` > 2^28 - 1.
	pub fn new(level: u32, x: u32, y: u32) -> Result<TileCoord> {
		check_range("level", level, MAX_LEVEL)?;
		check_range("x", x, MAX_INDEX)?;
		check_range("y", y, MAX_INDEX)?;
		Ok(TileCoord {
			level: level as u8,
			x,
			y,
		})
	}

	#[must_use]
	pub fn level(&self) -> u8 {
		self.level
	}

	/// Column index.
	#[must_use]
	pub fn x(&self) -> u32 {
		self.x
	}

	/// Row index.
	#[must_use]
	pub fn y(&self) -> u32 {
		self.y
	}
}

fn check_range(name: &'static str, value: u32, max: u32) -> Result<()> {
	if value > max {
		return Err(FBTilesError::OutOfRange {
			name,
			value: u64::from(value),
			max: u64::from(max),
		});
	}
	Ok(())
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, [{}, {}])", self.level, self.x, self.y)
	}
}

impl Display for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}/{}", self.level, self.x, self.y)
	}
}
