#![allow(missing_docs)]

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "nbtdoc", about = "NBT document and region inspection tools")]
struct Cli {
	/// Raise log verbosity; repeat for more detail.
	#[arg(short, long, global = true, action = ArgAction::Count)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print format and layout summary.
	Info(cmd::info::Args),
	/// Dump the tag tree.
	Print(cmd::print::Args),
	/// Re-encode a file in another format.
	Convert(cmd::convert::Args),
	/// Write a fresh document.
	New(cmd::new::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> nbtdoc::nbt::Result<()> {
	match command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Print(args) => cmd::print::run(args),
		Commands::Convert(args) => cmd::convert::run(args),
		Commands::New(args) => cmd::new::run(args),
	}
}

fn init_tracing(verbose: u8) {
	let default = match verbose {
		0 => "warn",
		1 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
