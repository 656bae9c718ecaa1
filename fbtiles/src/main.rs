mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<InfoLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Add a tile file to an FBTiles store
	Add(tools::add::Subcommand),

	/// Print the bounds records of an FBTiles store
	Bounds(tools::bounds::Subcommand),

	/// Show information about an FBTiles store
	Probe(tools::probe::Subcommand),

	/// Check the bounds records against the stored tiles
	Verify(tools::verify::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::Add(arguments) => tools::add::run(arguments),
		Commands::Bounds(arguments) => tools::bounds::run(arguments),
		Commands::Probe(arguments) => tools::probe::run(arguments),
		Commands::Verify(arguments) => tools::verify::run(arguments),
	}
}
