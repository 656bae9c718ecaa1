//! Packing of tile coordinates into a single sortable 64-bit key.
//!
//! Bit layout, most significant first:
//!
//! | bits   | content      |
//! |--------|--------------|
//! | 63..56 | zoom level   |
//! | 55..28 | column (`x`) |
//! | 27..0  | row (`y`)    |
//!
//! Because the level occupies the high bits, every key of a lower level sorts below
//! every key of a higher level.
//!
//! ```
//! use fbtiles_core::{TileCoord, TileKey};
//!
//! let key = TileKey::encode(2, 1, 0);
//! assert_eq!(key.as_u64(), (2 << 28) | 1);
//! assert_eq!(key.decode(), TileCoord::new(0, 2, 1).unwrap());
//! ```

use super::{TileCoord, tile_coord::MAX_INDEX};
use std::{
	fmt::{self, Debug},
	ops::RangeInclusive,
};

const LEVEL_SHIFT: u32 = 56;
const X_SHIFT: u32 = 28;
const LEVEL_MASK: u64 = 0xff;
const INDEX_MASK: u64 = MAX_INDEX as u64;

/// Key of a tile row in an FBTiles store.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileKey(u64);

impl TileKey {
	/// Pack column, row and zoom level into a key.
	///
	/// Every component is masked to its bit width, so out-of-range input silently
	/// addresses a different tile. Validate with [`TileCoord::new`] first.
	#[must_use]
	pub fn encode(x: u32, y: u32, level: u32) -> TileKey {
		let level = u64::from(level) & LEVEL_MASK;
		let x = u64::from(x) & INDEX_MASK;
		let y = u64::from(y) & INDEX_MASK;
		TileKey((level << LEVEL_SHIFT) | (x << X_SHIFT) | y)
	}

	#[must_use]
	pub fn from_coord(coord: &TileCoord) -> TileKey {
		TileKey::encode(coord.x(), coord.y(), u32::from(coord.level()))
	}

	/// Unpack the key. Every 64-bit value decodes to a valid coordinate.
	#[must_use]
	pub fn decode(self) -> TileCoord {
		TileCoord {
			level: ((self.0 >> LEVEL_SHIFT) & LEVEL_MASK) as u8,
			x: ((self.0 >> X_SHIFT) & INDEX_MASK) as u32,
			y: (self.0 & INDEX_MASK) as u32,
		}
	}

	#[must_use]
	pub fn as_u64(self) -> u64 {
		self.0
	}

	/// The key as stored in an SQLite `INTEGER` column.
	///
	/// This is a bit-for-bit reinterpretation; keys of level 128 and above become negative.
	#[must_use]
	pub fn as_i64(self) -> i64 {
		self.0 as i64
	}

	#[must_use]
	pub fn from_i64(value: i64) -> TileKey {
		TileKey(value as u64)
	}

	/// All keys belonging to `level`, from `x = 0, y = 0` up to the largest column and row.
	///
	/// Stored keys of level 128 and above are negative after [`TileKey::as_i64`], so
	/// SQL range scans stay correct only when both ends belong to the same level.
	#[must_use]
	pub fn level_range(level: u8) -> RangeInclusive<TileKey> {
		let level = u32::from(level);
		TileKey::encode(0, 0, level)..=TileKey::encode(MAX_INDEX, MAX_INDEX, level)
	}
}

impl Debug for TileKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileKey({:#018x})", self.0)
	}
}
