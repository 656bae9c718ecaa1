//! The fixed registry of tile content types.
//!
//! Every `TileFormat` is persisted in the `datatypes` table of a store with the id
//! `index + 1`, where `index` is its position in [`TileFormat::ALL`]. Tile rows refer to
//! these ids, so the order of this enumeration must never change; new types may only be
//! appended.
//!
//! ```rust
//! use fbtiles_core::TileFormat;
//!
//! assert_eq!(TileFormat::JPG.id(), 1);
//! assert_eq!(TileFormat::PNG.id(), 2);
//! assert_eq!(TileFormat::from_id(2), Some(TileFormat::PNG));
//!
//! assert_eq!(TileFormat::from_filename("tile.JPEG").unwrap(), TileFormat::JPG);
//! assert!(TileFormat::from_filename("tile.webp").is_err());
//! ```

use crate::{FBTilesError, Result};
#[cfg(feature = "cli")]
use clap::ValueEnum;
use std::{
	fmt::{Display, Formatter},
	path::Path,
	str::FromStr,
};

/// Supported tile content types.
#[allow(clippy::upper_case_acronyms)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileFormat {
	JPG,
	PNG,
}

impl TileFormat {
	/// All formats in registry order.
	pub const ALL: [TileFormat; 2] = [TileFormat::JPG, TileFormat::PNG];

	/// The persisted identifier: position in [`TileFormat::ALL`] plus one.
	#[must_use]
	pub fn id(&self) -> i64 {
		match self {
			TileFormat::JPG => 1,
			TileFormat::PNG => 2,
		}
	}

	#[must_use]
	pub fn from_id(id: i64) -> Option<TileFormat> {
		let index = usize::try_from(id.checked_sub(1)?).ok()?;
		TileFormat::ALL.get(index).copied()
	}

	/// Name as stored in the `datatypes` table.
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			TileFormat::JPG => "JPG",
			TileFormat::PNG => "PNG",
		}
	}

	/// Parse a type name or extension, ignoring case, surrounding whitespace and leading dots.
	///
	/// # Errors
	/// Returns [`FBTilesError::UnknownType`] if the name is not in the registry.
	pub fn parse_str(value: &str) -> Result<TileFormat> {
		match value.to_lowercase().trim_matches([' ', '.']) {
			"jpg" | "jpeg" => Ok(TileFormat::JPG),
			"png" => Ok(TileFormat::PNG),
			_ => Err(FBTilesError::UnknownType(value.trim().to_string())),
		}
	}

	/// Sniff the format from the extension of `filename`.
	///
	/// # Errors
	/// Returns [`FBTilesError::UnknownType`] if there is no extension or it is not in the registry.
	pub fn from_filename(filename: impl AsRef<Path>) -> Result<TileFormat> {
		let path = filename.as_ref();
		let extension = path
			.extension()
			.and_then(|e| e.to_str())
			.ok_or_else(|| FBTilesError::UnknownType(path.display().to_string()))?;
		TileFormat::parse_str(extension)
	}
}

impl FromStr for TileFormat {
	type Err = FBTilesError;

	fn from_str(s: &str) -> Result<Self> {
		TileFormat::parse_str(s)
	}
}

impl Display for TileFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
