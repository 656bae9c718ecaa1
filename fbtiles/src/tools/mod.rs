pub mod add;
pub mod bounds;
pub mod probe;
pub mod verify;

use anyhow::{Context, Result};
use fbtiles_container::{FBTilesWriter, StoreConfig};
use std::path::Path;

fn load_config(config: Option<&Path>) -> Result<StoreConfig> {
	match config {
		Some(config) => StoreConfig::from_path(config),
		None => Ok(StoreConfig::default()),
	}
}

/// Open or create a store with the config file given on the command line, or the defaults.
pub fn open_store(path: &Path, config: Option<&Path>) -> Result<FBTilesWriter> {
	FBTilesWriter::open_with_config(path, load_config(config)?).with_context(|| format!("opening {path:?}"))
}

/// Like [`open_store`], but fails instead of creating a missing store.
pub fn open_existing_store(path: &Path, config: Option<&Path>) -> Result<FBTilesWriter> {
	FBTilesWriter::open_existing(path, load_config(config)?).with_context(|| format!("opening {path:?}"))
}
