use super::open_existing_store;
use anyhow::{Result, bail};
use clap::Args;
use fbtiles_container::FBTilesWriter;
use fbtiles_core::TileVariant;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// FBTiles store to check
	#[arg(required = true)]
	store: PathBuf,

	/// YAML file with store settings
	#[arg(long)]
	config: Option<PathBuf>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let mut writer = open_existing_store(&arguments.store, arguments.config.as_deref())?;
	let problems = check(&writer)?;
	writer.close()?;

	if !problems.is_empty() {
		for problem in &problems {
			log::error!("{problem}");
		}
		bail!("{} bounds records of {:?} are inconsistent", problems.len(), arguments.store);
	}
	log::info!("bounds of {:?} are consistent", arguments.store);
	Ok(())
}

/// Compare every stored bounds record with a full scan of the tiles.
fn check(writer: &FBTilesWriter) -> Result<Vec<String>> {
	let mut problems = Vec::new();
	for level in writer.levels()? {
		for variant in TileVariant::ALL {
			let stored = writer.get_bounds(level, variant)?;
			let scanned = writer.scan_bounds(level, variant)?;
			if stored != scanned {
				problems.push(format!(
					"level {level} {variant}: stored {stored:?}, scanned {scanned:?}"
				));
			}
		}
	}
	for record in writer.all_bounds()? {
		if writer.scan_bounds(record.level, record.variant)?.is_none() {
			problems.push(format!("{record} has no tiles"));
		}
	}
	Ok(problems)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		tests::run_command,
		tools::test_helpers::{path_str, sample_store},
	};
	use r2d2_sqlite::rusqlite::Connection;

	#[test]
	fn consistent_store() {
		let (_dir, path) = sample_store();
		let writer = FBTilesWriter::open_path(&path).unwrap();
		assert!(check(&writer).unwrap().is_empty());
		run_command(vec!["fbtiles", "verify", path_str(&path)]).unwrap();
	}

	#[test]
	fn detects_tampered_bounds() {
		let (_dir, path) = sample_store();
		Connection::open(&path)
			.unwrap()
			.execute_batch("UPDATE bounds SET maxX = 999 WHERE zoom = 7; INSERT INTO bounds VALUES (9, 1, 1, 1, 1, 1);")
			.unwrap();

		let writer = FBTilesWriter::open_path(&path).unwrap();
		let problems = check(&writer).unwrap();
		assert_eq!(problems.len(), 2);
		assert!(problems[0].starts_with("level 7 primary: stored"));
		assert_eq!(problems[1], "9 collared: [1,1,1,1] has no tiles");

		let err = run_command(vec!["fbtiles", "verify", path_str(&path)]).unwrap_err();
		assert!(err.to_string().contains("2 bounds records"));
	}
}
