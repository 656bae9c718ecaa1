//! Primary or collared rendering of a tile cell.

use std::fmt::{Display, Formatter};

/// Selects one of the two payload slots of a tile cell.
///
/// A collared tile is an alternate rendering of the same cell carrying extra context
/// around its border. Both variants are stored independently on the same row, and
/// each has its own bounds record per zoom level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TileVariant {
	#[default]
	Primary,
	Collared,
}

impl TileVariant {
	pub const ALL: [TileVariant; 2] = [TileVariant::Primary, TileVariant::Collared];

	#[must_use]
	pub fn is_collared(&self) -> bool {
		matches!(self, TileVariant::Collared)
	}

	/// Value of the `collared` column in the `bounds` table.
	#[must_use]
	pub fn as_flag(&self) -> u8 {
		u8::from(self.is_collared())
	}

	#[must_use]
	pub fn from_flag(flag: i64) -> Option<TileVariant> {
		match flag {
			0 => Some(TileVariant::Primary),
			1 => Some(TileVariant::Collared),
			_ => None,
		}
	}
}

impl From<bool> for TileVariant {
	fn from(collared: bool) -> Self {
		if collared {
			TileVariant::Collared
		} else {
			TileVariant::Primary
		}
	}
}

impl Display for TileVariant {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			TileVariant::Primary => "primary",
			TileVariant::Collared => "collared",
		})
	}
}
