//! Tag registry: maps one-byte wire ids to payload codecs.
//!
//! Every payload is produced and consumed through [`read_payload`] and [`write_payload`]. An id outside the
//! closed [`TagType`] set has no handler and surfaces as [`NbtError::UnknownTagType`].

use std::fmt;
use std::io::Write;

use crate::nbt::{Compound, Cursor, List, LoadOptions, NbtError, Result, Value, Writer};

/// Wire type identifier of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagType {
	/// Compound terminator; never carries a payload.
	End = 0,
	/// Signed 8-bit integer.
	Byte = 1,
	/// Signed 16-bit integer.
	Short = 2,
	/// Signed 32-bit integer.
	Int = 3,
	/// Signed 64-bit integer.
	Long = 4,
	/// IEEE-754 single precision float.
	Float = 5,
	/// IEEE-754 double precision float.
	Double = 6,
	/// Count-prefixed raw bytes.
	ByteArray = 7,
	/// Length-prefixed text.
	String = 8,
	/// Homogeneous sequence of unnamed payloads.
	List = 9,
	/// Ordered named entries closed by `End`.
	Compound = 10,
	/// Count-prefixed `i32` values.
	IntArray = 11,
	/// Count-prefixed `i64` values.
	LongArray = 12,
}

impl TagType {
	/// Map a wire id to its tag type.
	pub fn from_id(id: u8) -> Option<Self> {
		Some(match id {
			0 => Self::End,
			1 => Self::Byte,
			2 => Self::Short,
			3 => Self::Int,
			4 => Self::Long,
			5 => Self::Float,
			6 => Self::Double,
			7 => Self::ByteArray,
			8 => Self::String,
			9 => Self::List,
			10 => Self::Compound,
			11 => Self::IntArray,
			12 => Self::LongArray,
			_ => return None,
		})
	}

	/// Return the wire id.
	pub fn id(self) -> u8 {
		self as u8
	}

	/// Render tag type as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::End => "end",
			Self::Byte => "byte",
			Self::Short => "short",
			Self::Int => "int",
			Self::Long => "long",
			Self::Float => "float",
			Self::Double => "double",
			Self::ByteArray => "byte_array",
			Self::String => "string",
			Self::List => "list",
			Self::Compound => "compound",
			Self::IntArray => "int_array",
			Self::LongArray => "long_array",
		}
	}
}

impl fmt::Display for TagType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Look up the handler for a wire id.
pub fn lookup(id: u8) -> Option<TagType> {
	TagType::from_id(id)
}

/// Decode one payload of type `tag` at nesting level `depth`.
pub fn read_payload(tag: TagType, cursor: &mut Cursor<'_>, options: &LoadOptions, depth: u32) -> Result<Value> {
	Ok(match tag {
		TagType::End => return Err(NbtError::UnknownTagType { id: tag.id() }),
		TagType::Byte => Value::Byte(cursor.read_i8()?),
		TagType::Short => Value::Short(cursor.read_i16()?),
		TagType::Int => Value::Int(cursor.read_i32()?),
		TagType::Long => Value::Long(cursor.read_i64()?),
		TagType::Float => Value::Float(cursor.read_f32()?),
		TagType::Double => Value::Double(cursor.read_f64()?),
		TagType::ByteArray => Value::ByteArray(cursor.read_byte_array()?),
		TagType::String => Value::String(cursor.read_string()?),
		TagType::List => Value::List(read_list(cursor, options, nested(depth, options)?)?),
		TagType::Compound => Value::Compound(Compound::read(cursor, options, nested(depth, options)?)?),
		TagType::IntArray => Value::IntArray(cursor.read_int_array()?),
		TagType::LongArray => Value::LongArray(cursor.read_long_array()?),
	})
}

/// Encode the payload of `value`; the type id and name are the caller's concern.
pub fn write_payload<W: Write>(writer: &mut Writer<W>, value: &Value) -> Result<()> {
	match value {
		Value::Byte(v) => writer.write_i8(*v),
		Value::Short(v) => writer.write_i16(*v),
		Value::Int(v) => writer.write_i32(*v),
		Value::Long(v) => writer.write_i64(*v),
		Value::Float(v) => writer.write_f32(*v),
		Value::Double(v) => writer.write_f64(*v),
		Value::ByteArray(v) => writer.write_byte_array(v),
		Value::String(v) => writer.write_string(v),
		Value::List(list) => {
			writer.write_u8(list.elem_type().id())?;
			writer.write_len(list.len())?;
			for item in list.iter() {
				write_payload(writer, item)?;
			}
			Ok(())
		}
		Value::Compound(compound) => compound.write(writer),
		Value::IntArray(v) => writer.write_int_array(v),
		Value::LongArray(v) => writer.write_long_array(v),
	}
}

fn read_list(cursor: &mut Cursor<'_>, options: &LoadOptions, depth: u32) -> Result<List> {
	let id = cursor.read_u8()?;
	let elem_type = lookup(id).ok_or(NbtError::UnknownTagType { id })?;
	let count = cursor.read_len()?;

	let mut items = Vec::with_capacity(count.min(cursor.remaining()));
	for _ in 0..count {
		items.push(read_payload(elem_type, cursor, options, depth)?);
	}
	Ok(List::from_parts(elem_type, items))
}

fn nested(depth: u32, options: &LoadOptions) -> Result<u32> {
	if depth >= options.max_depth {
		return Err(NbtError::DepthExceeded { max_depth: options.max_depth });
	}
	Ok(depth + 1)
}
