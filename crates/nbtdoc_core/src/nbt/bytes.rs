use std::io::Write;

use cesu8::{from_java_cesu8, to_java_cesu8};
use tracing::warn;

use crate::nbt::{NbtError, Result};

/// Bounded big-endian cursor over an immutable byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Create a cursor at `pos`, which may lie past the end of `bytes`.
	pub fn at(bytes: &'a [u8], pos: usize) -> Self {
		Self { bytes, pos }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return total source length.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return `true` when the source holds no bytes at all.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(self.overflow(n));
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	fn overflow(&self, need: usize) -> NbtError {
		NbtError::StreamOverflow {
			offset: self.pos,
			need,
			len: self.bytes.len(),
		}
	}

	/// Read one unsigned byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Read one signed byte.
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `i16`.
	pub fn read_i16(&mut self) -> Result<i16> {
		Ok(i16::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian unsigned three-byte integer.
	pub fn read_u24(&mut self) -> Result<u32> {
		let [a, b, c] = self.read_array()?;
		Ok(u32::from_be_bytes([0, a, b, c]))
	}

	/// Read a big-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `i64`.
	pub fn read_i64(&mut self) -> Result<i64> {
		Ok(i64::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian IEEE-754 `f32`.
	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian IEEE-754 `f64`.
	pub fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_be_bytes(self.read_array()?))
	}

	/// Read a signed 4-byte element count, rejecting negative values.
	pub fn read_len(&mut self) -> Result<usize> {
		let offset = self.pos;
		let len = self.read_i32()?;
		usize::try_from(len).map_err(|_| NbtError::NegativeLength { offset, len })
	}

	/// Read 2-byte length-prefixed modified UTF-8 text.
	///
	/// `C0 80` decodes to NUL and surrogate pairs decode to supplementary characters. Plain UTF-8 that the
	/// writer would encode differently (raw NUL, 4-byte sequences) is accepted with a warning.
	pub fn read_string(&mut self) -> Result<String> {
		let len = usize::from(self.read_u16()?);
		let offset = self.pos;
		let raw = self.read_exact(len)?;
		let text = from_java_cesu8(raw).map_err(|_| NbtError::InvalidText { offset, len })?;
		if *to_java_cesu8(&text) != *raw {
			warn!(offset, len, "text is not modified UTF-8, saving will re-encode it");
		}
		Ok(text.into_owned())
	}

	/// Read a 4-byte count followed by that many bytes.
	pub fn read_byte_array(&mut self) -> Result<Vec<u8>> {
		let count = self.read_len()?;
		Ok(self.read_exact(count)?.to_vec())
	}

	/// Read a 4-byte count followed by that many big-endian `i32` values.
	pub fn read_int_array(&mut self) -> Result<Vec<i32>> {
		let raw = self.read_elements(4)?;
		Ok(raw.chunks_exact(4).map(|chunk| i32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])).collect())
	}

	/// Read a 4-byte count followed by that many big-endian `i64` values.
	pub fn read_long_array(&mut self) -> Result<Vec<i64>> {
		let raw = self.read_elements(8)?;
		Ok(raw
			.chunks_exact(8)
			.map(|chunk| {
				let mut buf = [0_u8; 8];
				buf.copy_from_slice(chunk);
				i64::from_be_bytes(buf)
			})
			.collect())
	}

	fn read_elements(&mut self, width: usize) -> Result<&'a [u8]> {
		let count = self.read_len()?;
		let need = count.checked_mul(width).ok_or_else(|| self.overflow(usize::MAX))?;
		self.read_exact(need)
	}
}

/// Big-endian writer tracking the number of bytes emitted to its sink.
pub struct Writer<W> {
	inner: W,
	pos: usize,
}

impl<W: Write> Writer<W> {
	/// Wrap a byte sink.
	pub fn new(inner: W) -> Self {
		Self { inner, pos: 0 }
	}

	/// Return bytes written through this writer.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Unwrap the sink.
	pub fn into_inner(self) -> W {
		self.inner
	}

	/// Write raw bytes.
	pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
		self.inner.write_all(bytes)?;
		self.pos += bytes.len();
		Ok(())
	}

	/// Write one unsigned byte.
	pub fn write_u8(&mut self, value: u8) -> Result<()> {
		self.write_bytes(&[value])
	}

	/// Write one signed byte.
	pub fn write_i8(&mut self, value: i8) -> Result<()> {
		self.write_bytes(&value.to_be_bytes())
	}

	/// Write a big-endian `u16`.
	pub fn write_u16(&mut self, value: u16) -> Result<()> {
		self.write_bytes(&value.to_be_bytes())
	}

	/// Write a big-endian `i16`.
	pub fn write_i16(&mut self, value: i16) -> Result<()> {
		self.write_bytes(&value.to_be_bytes())
	}

	/// Write the low 24 bits of `value` as a big-endian three-byte integer.
	pub fn write_u24(&mut self, value: u32) -> Result<()> {
		let [_, a, b, c] = value.to_be_bytes();
		self.write_bytes(&[a, b, c])
	}

	/// Write a big-endian `u32`.
	pub fn write_u32(&mut self, value: u32) -> Result<()> {
		self.write_bytes(&value.to_be_bytes())
	}

	/// Write a big-endian `i32`.
	pub fn write_i32(&mut self, value: i32) -> Result<()> {
		self.write_bytes(&value.to_be_bytes())
	}

	/// Write a big-endian `i64`.
	pub fn write_i64(&mut self, value: i64) -> Result<()> {
		self.write_bytes(&value.to_be_bytes())
	}

	/// Write a big-endian IEEE-754 `f32`.
	pub fn write_f32(&mut self, value: f32) -> Result<()> {
		self.write_bytes(&value.to_be_bytes())
	}

	/// Write a big-endian IEEE-754 `f64`.
	pub fn write_f64(&mut self, value: f64) -> Result<()> {
		self.write_bytes(&value.to_be_bytes())
	}

	/// Write a signed 4-byte element count.
	pub fn write_len(&mut self, len: usize) -> Result<()> {
		let len = i32::try_from(len).map_err(|_| NbtError::ArrayTooLong { len })?;
		self.write_i32(len)
	}

	/// Write 2-byte length-prefixed modified UTF-8 text; the limit applies to the encoded length.
	pub fn write_string(&mut self, value: &str) -> Result<()> {
		let encoded = to_java_cesu8(value);
		let len = u16::try_from(encoded.len()).map_err(|_| NbtError::StringTooLong { len: encoded.len() })?;
		self.write_u16(len)?;
		self.write_bytes(&encoded)
	}

	/// Write a 4-byte count followed by the bytes.
	pub fn write_byte_array(&mut self, values: &[u8]) -> Result<()> {
		self.write_len(values.len())?;
		self.write_bytes(values)
	}

	/// Write a 4-byte count followed by big-endian `i32` values.
	pub fn write_int_array(&mut self, values: &[i32]) -> Result<()> {
		self.write_len(values.len())?;
		let raw: Vec<u8> = values.iter().flat_map(|value| value.to_be_bytes()).collect();
		self.write_bytes(&raw)
	}

	/// Write a 4-byte count followed by big-endian `i64` values.
	pub fn write_long_array(&mut self, values: &[i64]) -> Result<()> {
		self.write_len(values.len())?;
		let raw: Vec<u8> = values.iter().flat_map(|value| value.to_be_bytes()).collect();
		self.write_bytes(&raw)
	}
}

#[cfg(test)]
mod tests;
