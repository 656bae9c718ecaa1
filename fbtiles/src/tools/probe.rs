use super::open_existing_store;
use anyhow::Result;
use clap::Args;
use fbtiles_container::FBTilesWriter;
use itertools::Itertools;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// FBTiles store you want to probe
	#[arg(required = true)]
	store: PathBuf,

	/// YAML file with store settings
	#[arg(long)]
	config: Option<PathBuf>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let mut writer = open_existing_store(&arguments.store, arguments.config.as_deref())?;
	print!("{}", report(&writer)?);
	writer.close()?;
	Ok(())
}

fn report(writer: &FBTilesWriter) -> Result<String> {
	let mut text = format!("store: {:?}\n", writer.path());
	text.push_str(&format!(
		"types: {}\n",
		writer
			.registry()
			.iter()
			.map(|(format, id)| format!("{id}={format}"))
			.join(", ")
	));
	text.push_str(&format!("tiles: {}\n", writer.count_tiles()?));
	text.push_str(&format!("levels: {}\n", writer.levels()?.iter().join(", ")));
	for record in writer.all_bounds()? {
		text.push_str(&format!("bounds {record}\n"));
	}
	Ok(text)
}
