//! Region archive codec.
//!
//! A region packs a 32x32 grid of independently zlib-compressed chunk documents behind two 4 KiB tables:
//! per-slot `(3-byte sector offset, 1-byte sector count)` followed by per-slot 4-byte timestamps. Chunk
//! payloads start at byte 8192 and are padded to 4096-byte sectors. Decoded chunks are stored on a synthetic
//! root compound under `"<x>, <z>"` keys.

use std::fmt;

use tracing::{debug, warn};

use crate::nbt::compression::{decode_zlib, zlib_encoder};
use crate::nbt::document::{parse_body_with, write_body};
use crate::nbt::{Compound, Cursor, LoadOptions, NbtError, Result, Value, Writer};

/// Chunks per region edge.
pub const REGION_WIDTH: u8 = 32;
/// Slots per region.
pub const SLOT_COUNT: usize = 1024;
/// Allocation unit of the chunk area.
pub const SECTOR_SIZE: usize = 4096;
/// Sectors taken by the slot and timestamp tables.
pub const HEADER_SECTORS: u32 = 2;
/// Byte size of the slot and timestamp tables.
pub const HEADER_SIZE: usize = SECTOR_SIZE * HEADER_SECTORS as usize;
/// The only supported chunk compression marker.
pub const COMPRESSION_ZLIB: u8 = 2;
/// Chunk entry that mirrors the slot timestamp.
pub const LAST_CHANGE: &str = "LastChange";

// Only the low 28 bits of a chunk length field are significant.
const LENGTH_MASK: u32 = 0x0FFF_FFFF;

/// Chunk coordinate inside one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkPos {
	/// Column, `0..32`.
	pub x: u8,
	/// Row, `0..32`.
	pub z: u8,
}

impl ChunkPos {
	/// Create a position, rejecting coordinates outside the grid.
	pub fn new(x: u8, z: u8) -> Option<Self> {
		(x < REGION_WIDTH && z < REGION_WIDTH).then_some(Self { x, z })
	}

	/// Position of table slot `slot`, or `None` past the last slot; `x` varies fastest.
	pub fn from_slot(slot: usize) -> Option<Self> {
		let width = usize::from(REGION_WIDTH);
		(slot < SLOT_COUNT).then(|| Self {
			x: (slot % width) as u8,
			z: (slot / width) as u8,
		})
	}

	/// Every position in table slot order.
	pub fn all() -> impl Iterator<Item = Self> {
		(0..REGION_WIDTH).flat_map(|z| (0..REGION_WIDTH).map(move |x| Self { x, z }))
	}

	/// Table slot index of this position.
	pub fn slot(self) -> usize {
		usize::from(self.z) * usize::from(REGION_WIDTH) + usize::from(self.x)
	}

	/// Root entry name for this position.
	pub fn key(self) -> String {
		self.to_string()
	}

	/// Parse a `"<x>, <z>"` root entry name; only the exact form produced by [`ChunkPos::key`] is accepted.
	pub fn parse_key(key: &str) -> Option<Self> {
		let (x, z) = key.split_once(", ")?;
		let pos = Self::new(x.parse().ok()?, z.parse().ok()?)?;
		(pos.key() == key).then_some(pos)
	}
}

impl fmt::Display for ChunkPos {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}, {}", self.x, self.z)
	}
}

/// One slot of the region tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotEntry {
	/// Chunk position of the slot.
	pub pos: ChunkPos,
	/// Sector index of the chunk, counted from the file start; `0` marks an empty slot.
	pub sector_offset: u32,
	/// Sectors claimed by the chunk.
	pub sector_count: u8,
	/// Last-change value from the timestamp table.
	pub timestamp: i32,
}

impl SlotEntry {
	fn empty(pos: ChunkPos) -> Self {
		Self {
			pos,
			sector_offset: 0,
			sector_count: 0,
			timestamp: 0,
		}
	}

	/// Return `true` when the slot holds no chunk.
	pub fn is_empty(&self) -> bool {
		self.sector_offset == 0
	}

	/// File offset of the chunk's length field.
	pub fn byte_offset(&self) -> usize {
		// (offset - 2) sectors past the two header sectors
		self.sector_offset as usize * SECTOR_SIZE
	}
}

/// Read both header tables without touching chunk payloads.
pub fn read_slot_table(bytes: &[u8]) -> Result<Vec<SlotEntry>> {
	let mut cursor = Cursor::new(bytes);
	let mut slots = Vec::with_capacity(SLOT_COUNT);
	for pos in ChunkPos::all() {
		let sector_offset = cursor.read_u24()?;
		let sector_count = cursor.read_u8()?;
		slots.push(SlotEntry {
			pos,
			sector_offset,
			sector_count,
			timestamp: 0,
		});
	}
	for slot in &mut slots {
		slot.timestamp = cursor.read_i32()?;
	}
	Ok(slots)
}

/// Decode a region into a root compound keyed by chunk position.
pub fn load_region(bytes: &[u8]) -> Result<Compound> {
	load_region_with(bytes, &LoadOptions::default())
}

/// Decode a region with explicit limits.
///
/// A chunk without a `LastChange` entry gets one appended from the timestamp table. Any bad slot fails the
/// whole region.
pub fn load_region_with(bytes: &[u8], options: &LoadOptions) -> Result<Compound> {
	let slots = read_slot_table(bytes)?;

	let mut root = Compound::new();
	for slot in slots.iter().filter(|slot| !slot.is_empty()) {
		let mut chunk = read_chunk(bytes, slot, options)?;
		if chunk.find(LAST_CHANGE).is_none() {
			chunk.push(LAST_CHANGE, Value::Int(slot.timestamp));
		}
		root.push(slot.pos.key(), Value::Compound(chunk));
	}

	debug!(chunks = root.len(), len = bytes.len(), "decoded region");
	Ok(root)
}

fn read_chunk(bytes: &[u8], slot: &SlotEntry, options: &LoadOptions) -> Result<Compound> {
	let ChunkPos { x, z } = slot.pos;
	let mut cursor = Cursor::at(bytes, slot.byte_offset());

	let field = cursor.read_u32()? & LENGTH_MASK;
	// stored length counts the compression marker
	let len = field.checked_sub(1).ok_or(NbtError::InvalidChunkLength { x, z, len: field })? as usize;
	let format = cursor.read_u8()?;
	let payload = cursor.read_exact(len)?;
	if format != COMPRESSION_ZLIB {
		return Err(NbtError::UnsupportedCompressionFormat { x, z, format });
	}

	let raw = decode_zlib(payload, options.max_decompressed_bytes)?;
	parse_body_with(&mut Cursor::new(&raw), options)
}

/// Encode a root compound keyed by chunk position as a region.
///
/// Missing or empty chunks leave their slot empty. A chunk's `LastChange` Int moves into the timestamp table
/// and is left out of the stored chunk body; `root` itself is not modified.
pub fn save_region(root: &Compound) -> Result<Vec<u8>> {
	warn_unplaced(root);

	let mut slots = Vec::with_capacity(SLOT_COUNT);
	let mut area = Vec::new();
	for pos in ChunkPos::all() {
		let entry = match root.get(&pos.key()).and_then(Value::as_compound) {
			Some(chunk) if !chunk.is_empty() => write_chunk(&mut area, pos, chunk)?,
			_ => SlotEntry::empty(pos),
		};
		slots.push(entry);
	}

	let mut writer = Writer::new(Vec::with_capacity(HEADER_SIZE + area.len()));
	for slot in &slots {
		writer.write_u24(slot.sector_offset)?;
		writer.write_u8(slot.sector_count)?;
	}
	for slot in &slots {
		writer.write_i32(slot.timestamp)?;
	}
	writer.write_bytes(&area)?;

	debug!(chunks = slots.iter().filter(|slot| !slot.is_empty()).count(), len = writer.pos(), "encoded region");
	Ok(writer.into_inner())
}

fn write_chunk(area: &mut Vec<u8>, pos: ChunkPos, chunk: &Compound) -> Result<SlotEntry> {
	let start = area.len();

	let mut body = chunk.view();
	let mut timestamp = 0;
	if let Some(last_change) = chunk.find(LAST_CHANGE) {
		match last_change.value.as_int() {
			Some(value) => {
				timestamp = value;
				body.remove_entry(last_change);
			}
			None => warn!(chunk = %pos, tag = %last_change.tag_type(), "LastChange is not an int, keeping it in the chunk body"),
		}
	}

	area.extend_from_slice(&[0; 4]);
	area.push(COMPRESSION_ZLIB);
	{
		let mut writer = Writer::new(zlib_encoder(&mut *area));
		write_body(&mut writer, body.iter())?;
		writer.into_inner().finish()?;
	}

	let total = area.len() - start;
	let sector_count = sector_count(pos, total)?;
	let written = (total - 4) as u32 & LENGTH_MASK;
	area[start..start + 4].copy_from_slice(&written.to_be_bytes());
	area.resize(area.len().next_multiple_of(SECTOR_SIZE), 0);

	Ok(SlotEntry {
		pos,
		sector_offset: (start / SECTOR_SIZE) as u32 + HEADER_SECTORS,
		sector_count,
		timestamp,
	})
}

// Existing files claim one sector more than whole sectors used, so an exact multiple of 4096 still counts one
// extra sector.
fn sector_count(pos: ChunkPos, total: usize) -> Result<u8> {
	u8::try_from(total / SECTOR_SIZE + 1).map_err(|_| NbtError::ChunkTooLarge {
		x: pos.x,
		z: pos.z,
		len: total,
	})
}

fn warn_unplaced(root: &Compound) {
	for entry in root {
		match ChunkPos::parse_key(&entry.name) {
			None => warn!(name = %entry.name, "ignoring region entry without a chunk key"),
			Some(_) if entry.value.as_compound().is_none() => {
				warn!(name = %entry.name, tag = %entry.tag_type(), "ignoring region entry that is not a compound")
			}
			Some(_) => {}
		}
	}
}

#[cfg(test)]
mod tests;
