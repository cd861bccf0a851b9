use std::path::{Path, PathBuf};

use nbtdoc::nbt::{FileFormat, NbtFile, Result};
use tracing::warn;

/// Target layout selectable on the command line.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FormatArg {
	Uncompressed,
	Gzip,
	Region,
}

impl From<FormatArg> for FileFormat {
	fn from(value: FormatArg) -> Self {
		match value {
			FormatArg::Uncompressed => Self::Uncompressed,
			FormatArg::Gzip => Self::Gzip,
			FormatArg::Region => Self::Region,
		}
	}
}

#[derive(clap::Args)]
pub struct Args {
	pub input: PathBuf,
	pub output: PathBuf,
	/// Output layout; defaults to the output path convention, then the input's format.
	#[arg(long, value_enum)]
	pub format: Option<FormatArg>,
}

/// Load `input` and write it to `output` in the selected format.
pub fn run(args: Args) -> Result<()> {
	let Args { input, output, format } = args;

	let mut file = NbtFile::open(&input)?;
	let detected = file.format;
	file.format = format.map_or_else(|| default_format(detected, &output), FileFormat::from);
	if (file.format == FileFormat::Region) != FileFormat::is_region_path(&output) {
		warn!(output = %output.display(), format = file.format.as_str(), "output extension does not match format");
	}

	file.save(&output)?;
	println!("wrote {} ({})", output.display(), file.format.as_str());
	Ok(())
}

fn default_format(input: FileFormat, output: &Path) -> FileFormat {
	if FileFormat::is_region_path(output) {
		return FileFormat::Region;
	}
	match input {
		FileFormat::Region => FileFormat::Gzip,
		other => other,
	}
}
