use super::open_store;
use anyhow::{Context, Result};
use clap::Args;
use fbtiles_container::TileContent;
use fbtiles_core::{Blob, TileFormat, TileVariant};
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// FBTiles store to write into, created if it does not exist
	#[arg(required = true)]
	store: PathBuf,

	/// tile file to add
	/// the type is taken from the extension: *.jpg, *.jpeg, *.png
	#[arg(required = true, verbatim_doc_comment)]
	file: PathBuf,

	/// column of the tile
	#[arg(short, required = true)]
	x: u32,

	/// row of the tile
	#[arg(short, required = true)]
	y: u32,

	/// zoom level of the tile
	#[arg(short, required = true)]
	z: u32,

	/// store the tile as the collared variant of the cell
	#[arg(long)]
	collared: bool,

	/// override the tile type instead of using the file extension
	#[arg(long, value_enum)]
	format: Option<TileFormat>,

	/// YAML file with store settings
	#[arg(long)]
	config: Option<PathBuf>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let variant = TileVariant::from(arguments.collared);
	let content = match arguments.format {
		Some(format) => {
			let data = std::fs::read(&arguments.file).with_context(|| format!("reading {:?}", arguments.file))?;
			TileContent::new(Blob::from(data), format)
		}
		None => TileContent::from_path(&arguments.file)?,
	};

	let mut writer = open_store(&arguments.store, arguments.config.as_deref())?;
	writer
		.put_tile(
			arguments.x,
			arguments.y,
			arguments.z,
			&content.blob,
			content.format,
			variant,
		)
		.with_context(|| {
			format!(
				"adding {:?} as {variant} tile {}/{}/{}",
				arguments.file, arguments.z, arguments.x, arguments.y
			)
		})?;
	writer.close()?;

	log::info!(
		"added {} tile {}/{}/{} ({variant}) to {:?}",
		content.format,
		arguments.z,
		arguments.x,
		arguments.y,
		arguments.store
	);
	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::{tests::run_command, tools::test_helpers::path_str};
	use fbtiles_container::FBTilesWriter;
	use fbtiles_core::{TileCoord, TileFormat, TileVariant};
	use tempfile::TempDir;

	#[test]
	fn adds_primary_and_collared_tile() {
		let dir = TempDir::new().unwrap();
		let store = dir.path().join("example1.fbtiles");
		let tile = dir.path().join("example1.jpg");
		let tile_b = dir.path().join("example1b.jpg");
		std::fs::write(&tile, b"A").unwrap();
		std::fs::write(&tile_b, b"B").unwrap();

		let store_str = path_str(&store);
		run_command(vec!["fbtiles", "add", store_str, path_str(&tile), "-x", "2", "-y", "1", "-z", "0"]).unwrap();
		run_command(vec![
			"fbtiles",
			"add",
			store_str,
			path_str(&tile_b),
			"-x",
			"2",
			"-y",
			"1",
			"-z",
			"0",
			"--collared",
		])
		.unwrap();

		let mut writer = FBTilesWriter::open_path(&store).unwrap();
		let coord = TileCoord::new(0, 2, 1).unwrap();
		let primary = writer.get_tile(&coord, TileVariant::Primary).unwrap().unwrap();
		let collared = writer.get_tile(&coord, TileVariant::Collared).unwrap().unwrap();
		assert_eq!(primary.blob.as_slice(), b"A");
		assert_eq!(collared.blob.as_slice(), b"B");
		assert_eq!(writer.count_tiles().unwrap(), 1);
		writer.close().unwrap();
	}

	#[test]
	fn format_override() {
		let dir = TempDir::new().unwrap();
		let store = dir.path().join("store.fbtiles");
		let tile = dir.path().join("tile.bin");
		std::fs::write(&tile, b"png bytes").unwrap();

		run_command(vec![
			"fbtiles",
			"add",
			path_str(&store),
			path_str(&tile),
			"-x",
			"0",
			"-y",
			"0",
			"-z",
			"0",
			"--format",
			"png",
		])
		.unwrap();

		let writer = FBTilesWriter::open_path(&store).unwrap();
		let content = writer
			.get_tile(&TileCoord::new(0, 0, 0).unwrap(), TileVariant::Primary)
			.unwrap()
			.unwrap();
		assert_eq!(content.format, TileFormat::PNG);
	}

	#[test]
	fn rejects_unknown_extension() {
		let dir = TempDir::new().unwrap();
		let store = dir.path().join("store.fbtiles");
		let tile = dir.path().join("tile.webp");
		std::fs::write(&tile, b"webp").unwrap();

		let err = run_command(vec!["fbtiles", "add", path_str(&store), path_str(&tile), "-x", "0", "-y", "0", "-z", "0"])
			.unwrap_err();
		assert!(format!("{err:#}").contains("unknown tile type"));
		assert!(!store.exists());
	}

	#[test]
	fn rejects_out_of_range_zoom() {
		let dir = TempDir::new().unwrap();
		let store = dir.path().join("store.fbtiles");
		let tile = dir.path().join("tile.png");
		std::fs::write(&tile, b"png").unwrap();

		let err = run_command(vec!["fbtiles", "add", path_str(&store), path_str(&tile), "-x", "0", "-y", "0", "-z", "256"])
			.unwrap_err();
		assert!(format!("{err:#}").contains("level (256) is out of range, must be <= 255"));
	}
}
