use std::fs;
use std::path::PathBuf;

use nbtdoc::nbt::{FileFormat, NbtFile, Result, SlotEntry, read_slot_table};
use serde::Serialize;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Emit a JSON report.
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct InfoReport {
	path: String,
	format: &'static str,
	entries: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	region: Option<RegionReport>,
}

#[derive(Serialize)]
struct RegionReport {
	chunks: usize,
	slots: Vec<SlotReport>,
}

#[derive(Serialize)]
struct SlotReport {
	x: u8,
	z: u8,
	sector_offset: u32,
	sector_count: u8,
	timestamp: i32,
}

impl From<&SlotEntry> for SlotReport {
	fn from(slot: &SlotEntry) -> Self {
		Self {
			x: slot.pos.x,
			z: slot.pos.z,
			sector_offset: slot.sector_offset,
			sector_count: slot.sector_count,
			timestamp: slot.timestamp,
		}
	}
}

/// Print format, root size, and the populated region slots.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let bytes = fs::read(&path)?;
	let file = NbtFile::from_bytes(&path, &bytes)?;
	let region = if file.format == FileFormat::Region {
		let slots: Vec<SlotReport> = read_slot_table(&bytes)?.iter().filter(|slot| !slot.is_empty()).map(SlotReport::from).collect();
		Some(RegionReport { chunks: slots.len(), slots })
	} else {
		None
	};

	let report = InfoReport {
		path: path.display().to_string(),
		format: file.format.as_str(),
		entries: file.root.len(),
		region,
	};

	if json {
		let text = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
		println!("{text}");
		return Ok(());
	}

	println!("path: {}", report.path);
	println!("format: {}", report.format);
	println!("entries: {}", report.entries);
	if let Some(region) = report.region {
		println!("chunks: {}", region.chunks);
		for slot in region.slots {
			println!(
				"  {}, {}: sector {} x{} last_change {}",
				slot.x, slot.z, slot.sector_offset, slot.sector_count, slot.timestamp
			);
		}
	}

	Ok(())
}
