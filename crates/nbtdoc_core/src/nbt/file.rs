use std::fs;
use std::path::Path;

use crate::nbt::document::{load_with, save};
use crate::nbt::region::{load_region_with, save_region};
use crate::nbt::{Compound, Compression, LoadOptions, Result, Value};

/// Extension that selects the region codec.
pub const REGION_EXTENSION: &str = "mca";

/// On-disk layout of an NBT file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
	/// Plain single document.
	Uncompressed,
	/// gzip-framed single document.
	Gzip,
	/// Region archive of chunk documents.
	Region,
}

impl FileFormat {
	/// Render format as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Uncompressed => "uncompressed",
			Self::Gzip => "gzip",
			Self::Region => "region",
		}
	}

	/// Return `true` when `path` names a region file by extension.
	pub fn is_region_path(path: &Path) -> bool {
		path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case(REGION_EXTENSION))
	}
}

impl From<Compression> for FileFormat {
	fn from(value: Compression) -> Self {
		match value {
			Compression::None => Self::Uncompressed,
			Compression::Gzip => Self::Gzip,
		}
	}
}

/// Decoded file: root compound plus the format it was read as and will be written as.
#[derive(Debug, Clone, PartialEq)]
pub struct NbtFile {
	/// Root compound; for regions, one compound entry per chunk.
	pub root: Compound,
	/// Persisted layout.
	pub format: FileFormat,
}

impl NbtFile {
	/// Wrap an existing tree.
	pub fn new(root: Compound, format: FileFormat) -> Self {
		Self { root, format }
	}

	/// Fresh gzip document whose root holds one empty `Data` compound.
	pub fn new_document() -> Self {
		let mut root = Compound::new();
		root.push("Data", Value::Compound(Compound::new()));
		Self::new(root, FileFormat::Gzip)
	}

	/// Read and decode a file from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let bytes = fs::read(path)?;
		Self::from_bytes(path, &bytes)
	}

	/// Decode bytes, using `path_hint` only to choose between the region and document codecs.
	pub fn from_bytes(path_hint: impl AsRef<Path>, bytes: &[u8]) -> Result<Self> {
		Self::from_bytes_with(path_hint, bytes, &LoadOptions::default())
	}

	/// Decode bytes with explicit limits.
	pub fn from_bytes_with(path_hint: impl AsRef<Path>, bytes: &[u8], options: &LoadOptions) -> Result<Self> {
		if FileFormat::is_region_path(path_hint.as_ref()) {
			return Ok(Self::new(load_region_with(bytes, options)?, FileFormat::Region));
		}

		let (root, compression) = load_with(bytes, options)?;
		Ok(Self::new(root, compression.into()))
	}

	/// Encode using [`NbtFile::format`].
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		match self.format {
			FileFormat::Uncompressed => save(&self.root, Compression::None),
			FileFormat::Gzip => save(&self.root, Compression::Gzip),
			FileFormat::Region => save_region(&self.root),
		}
	}

	/// Encode and write to disk.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
		let bytes = self.to_bytes()?;
		fs::write(path, bytes)?;
		Ok(())
	}
}
