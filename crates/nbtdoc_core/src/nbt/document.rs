//! Whole-document load and save with compression sniffing.

use std::io::Write;

use tracing::debug;

use crate::nbt::compound::write_entries;
use crate::nbt::compression::{decode_gzip, gzip_encoder};
use crate::nbt::{Compound, Compression, Cursor, Entry, LoadOptions, NbtError, Result, TagType, Writer};

/// Decode a document, detecting whether it is gzip-framed.
pub fn load(bytes: &[u8]) -> Result<(Compound, Compression)> {
	load_with(bytes, &LoadOptions::default())
}

/// Decode a document with explicit limits.
///
/// A buffer starting with the compound id is first parsed as plain bytes; if that fails for any reason it is
/// retried as gzip. Any other first byte goes straight to gzip.
pub fn load_with(bytes: &[u8], options: &LoadOptions) -> Result<(Compound, Compression)> {
	if bytes.len() > 1 && bytes[0] == TagType::Compound.id() {
		match parse_body_with(&mut Cursor::new(bytes), options) {
			Ok(root) => return Ok((root, Compression::None)),
			Err(err) => debug!(error = %err, "uncompressed parse failed, retrying as gzip"),
		}
	}

	let raw = decode_gzip(bytes, options.max_decompressed_bytes)?;
	let root = parse_body_with(&mut Cursor::new(&raw), options)?;
	Ok((root, Compression::Gzip))
}

/// Parse an unnamed root compound from uncompressed bytes.
pub fn parse_body(cursor: &mut Cursor<'_>) -> Result<Compound> {
	parse_body_with(cursor, &LoadOptions::default())
}

/// Parse an unnamed root compound with explicit limits.
///
/// The root name is read and discarded.
pub fn parse_body_with(cursor: &mut Cursor<'_>, options: &LoadOptions) -> Result<Compound> {
	let id = cursor.read_u8()?;
	if id != TagType::Compound.id() {
		return Err(NbtError::InvalidRootTag { id });
	}
	cursor.read_string()?;
	Compound::read(cursor, options, 0)
}

/// Encode `root` as a document.
pub fn save(root: &Compound, compression: Compression) -> Result<Vec<u8>> {
	save_to(Vec::new(), root, compression)
}

/// Encode `root` as a document into `sink`, returning the sink.
///
/// The compressor is dropped on every exit path; on success its trailer is flushed first.
pub fn save_to<W: Write>(sink: W, root: &Compound, compression: Compression) -> Result<W> {
	match compression {
		Compression::None => {
			let mut writer = Writer::new(sink);
			write_body(&mut writer, root.iter())?;
			Ok(writer.into_inner())
		}
		Compression::Gzip => {
			let mut writer = Writer::new(gzip_encoder(sink));
			write_body(&mut writer, root.iter())?;
			Ok(writer.into_inner().finish()?)
		}
	}
}

/// Write the root compound id, an empty root name, then `entries` and the terminator.
pub fn write_body<'e, W: Write>(writer: &mut Writer<W>, entries: impl Iterator<Item = &'e Entry>) -> Result<()> {
	writer.write_u8(TagType::Compound.id())?;
	writer.write_string("")?;
	write_entries(writer, entries)
}
