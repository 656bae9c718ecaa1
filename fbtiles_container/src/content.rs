//! Loading tile content from files.

use fbtiles_core::{Blob, FBTilesError, Result, TileFormat};
use std::path::Path;

/// Payload of one tile slot: the raw bytes and their type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileContent {
	pub blob: Blob,
	pub format: TileFormat,
}

impl TileContent {
	#[must_use]
	pub fn new(blob: Blob, format: TileFormat) -> TileContent {
		TileContent { blob, format }
	}

	/// Read a tile file, taking its type from the file extension.
	///
	/// # Errors
	/// [`FBTilesError::UnknownType`] if the extension is not a registered type,
	/// [`FBTilesError::Load`] if the file cannot be read.
	pub fn from_path(path: &Path) -> Result<TileContent> {
		let format = TileFormat::from_filename(path)?;
		log::trace!("read {format} tile from {path:?}");
		let data = std::fs::read(path).map_err(|source| FBTilesError::Load {
			path: path.to_path_buf(),
			source,
		})?;
		Ok(TileContent::new(Blob::from(data), format))
	}
}
