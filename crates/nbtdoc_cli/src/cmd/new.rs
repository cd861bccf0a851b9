use std::path::PathBuf;

use nbtdoc::nbt::{NbtFile, Result};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
}

/// Write a gzip document holding one empty `Data` compound.
pub fn run(args: Args) -> Result<()> {
	let Args { path } = args;
	let file = NbtFile::new_document();
	file.save(&path)?;
	println!("created {} ({})", path.display(), file.format.as_str());
	Ok(())
}
