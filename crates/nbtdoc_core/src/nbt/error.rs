use thiserror::Error;

use crate::nbt::TagType;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, NbtError>;

/// Errors produced while decoding and encoding documents and region archives.
#[derive(Debug, Error)]
pub enum NbtError {
	/// Filesystem, stream, or compression IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Type id with no registered payload handler.
	#[error("unknown tag type {id}")]
	UnknownTagType {
		/// Offending wire type id.
		id: u8,
	},
	/// Document did not start with a compound tag.
	#[error("invalid root tag {id}, must be a compound")]
	InvalidRootTag {
		/// Wire type id found at the root.
		id: u8,
	},
	/// Region chunk uses a compression marker other than zlib.
	#[error("chunk {x}, {z} has unknown compression format {format}, only 2 (zlib) is supported")]
	UnsupportedCompressionFormat {
		/// Chunk column within the region.
		x: u8,
		/// Chunk row within the region.
		z: u8,
		/// Stored compression marker.
		format: u8,
	},
	/// Not enough bytes remained for a requested read.
	#[error("stream overflow at offset {offset}: need {need} bytes, buffer length {len}")]
	StreamOverflow {
		/// Byte offset where the read was attempted.
		offset: usize,
		/// Requested bytes.
		need: usize,
		/// Total length of the source buffer.
		len: usize,
	},
	/// Array or list element count was negative.
	#[error("negative length {len} at offset {offset}")]
	NegativeLength {
		/// Byte offset of the length field.
		offset: usize,
		/// Parsed signed length.
		len: i32,
	},
	/// Text bytes are not valid modified UTF-8.
	#[error("invalid text of {len} bytes at offset {offset}")]
	InvalidText {
		/// Byte offset of the first text byte.
		offset: usize,
		/// Declared byte length.
		len: usize,
	},
	/// Text does not fit the 2-byte length prefix.
	#[error("string of {len} bytes exceeds 65535")]
	StringTooLong {
		/// Encoded byte length.
		len: usize,
	},
	/// Array or list does not fit the signed 4-byte count.
	#[error("array of {len} elements exceeds i32::MAX")]
	ArrayTooLong {
		/// Element count.
		len: usize,
	},
	/// List element does not match the declared element type.
	#[error("list type mismatch: expected {expected}, got {got}")]
	ListTypeMismatch {
		/// Declared element type.
		expected: TagType,
		/// Type of the rejected element.
		got: TagType,
	},
	/// Nesting exceeded the configured limit.
	#[error("nesting depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Region chunk length field cannot hold the compression marker.
	#[error("chunk {x}, {z} has invalid length field {len}")]
	InvalidChunkLength {
		/// Chunk column within the region.
		x: u8,
		/// Chunk row within the region.
		z: u8,
		/// Stored length field.
		len: u32,
	},
	/// Encoded chunk does not fit the 1-byte sector count.
	#[error("chunk {x}, {z} encodes to {len} bytes, more than 255 sectors")]
	ChunkTooLarge {
		/// Chunk column within the region.
		x: u8,
		/// Chunk row within the region.
		z: u8,
		/// Encoded byte length including the 4-byte length field.
		len: usize,
	},
}
