use std::io::{Read, Write};

use flate2::Compression as Level;
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};

use crate::nbt::{NbtError, Result};

/// Compression framing of a whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Plain document bytes.
	None,
	/// gzip-framed document bytes.
	Gzip,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Gzip => "gzip",
		}
	}
}

/// Decode a gzip stream, failing once output exceeds `limit` bytes.
pub(crate) fn decode_gzip(raw: &[u8], limit: usize) -> Result<Vec<u8>> {
	read_limited(GzDecoder::new(raw), limit)
}

/// Decode a zlib stream, failing once output exceeds `limit` bytes.
pub(crate) fn decode_zlib(raw: &[u8], limit: usize) -> Result<Vec<u8>> {
	read_limited(ZlibDecoder::new(raw), limit)
}

/// Wrap `sink` in a gzip compressor; call `finish` to flush the trailer.
pub(crate) fn gzip_encoder<W: Write>(sink: W) -> GzEncoder<W> {
	GzEncoder::new(sink, Level::default())
}

/// Wrap `sink` in a zlib compressor; call `finish` to flush the trailer.
pub(crate) fn zlib_encoder<W: Write>(sink: W) -> ZlibEncoder<W> {
	ZlibEncoder::new(sink, Level::default())
}

fn read_limited<R: Read>(mut decoder: R, limit: usize) -> Result<Vec<u8>> {
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > limit {
			return Err(NbtError::DecompressedTooLarge { limit });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}
