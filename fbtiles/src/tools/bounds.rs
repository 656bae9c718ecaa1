use super::open_existing_store;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// FBTiles store
	#[arg(required = true)]
	store: PathBuf,

	/// YAML file with store settings
	#[arg(long)]
	config: Option<PathBuf>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let mut writer = open_existing_store(&arguments.store, arguments.config.as_deref())?;
	for line in render(&writer)? {
		println!("{line}");
	}
	writer.close()?;
	Ok(())
}

/// One line per record: `zoom collared minX maxX minY maxY`.
fn render(writer: &fbtiles_container::FBTilesWriter) -> Result<Vec<String>> {
	Ok(writer
		.all_bounds()?
		.iter()
		.map(|r| {
			format!(
				"{} {} {} {} {} {}",
				r.level,
				r.variant.as_flag(),
				r.bbox.x_min,
				r.bbox.x_max,
				r.bbox.y_min,
				r.bbox.y_max
			)
		})
		.collect())
}
