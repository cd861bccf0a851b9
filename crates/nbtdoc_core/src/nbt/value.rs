use crate::nbt::{Compound, NbtError, Result, TagType};

/// Payload of one tag.
///
/// There is no `End` variant: the terminator only exists on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Signed 8-bit integer.
	Byte(i8),
	/// Signed 16-bit integer.
	Short(i16),
	/// Signed 32-bit integer.
	Int(i32),
	/// Signed 64-bit integer.
	Long(i64),
	/// Single precision float.
	Float(f32),
	/// Double precision float.
	Double(f64),
	/// Raw bytes.
	ByteArray(Vec<u8>),
	/// UTF-8 text.
	String(String),
	/// Homogeneous sequence.
	List(List),
	/// Nested named entries.
	Compound(Compound),
	/// Packed `i32` values.
	IntArray(Vec<i32>),
	/// Packed `i64` values.
	LongArray(Vec<i64>),
}

impl Value {
	/// Return the wire type of this payload.
	pub fn tag_type(&self) -> TagType {
		match self {
			Self::Byte(_) => TagType::Byte,
			Self::Short(_) => TagType::Short,
			Self::Int(_) => TagType::Int,
			Self::Long(_) => TagType::Long,
			Self::Float(_) => TagType::Float,
			Self::Double(_) => TagType::Double,
			Self::ByteArray(_) => TagType::ByteArray,
			Self::String(_) => TagType::String,
			Self::List(_) => TagType::List,
			Self::Compound(_) => TagType::Compound,
			Self::IntArray(_) => TagType::IntArray,
			Self::LongArray(_) => TagType::LongArray,
		}
	}

	/// Return the integer when this is an `Int`.
	pub fn as_int(&self) -> Option<i32> {
		match self {
			Self::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Return the text when this is a `String`.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(v) => Some(v),
			_ => None,
		}
	}

	/// Borrow the list when this is a `List`.
	pub fn as_list(&self) -> Option<&List> {
		match self {
			Self::List(v) => Some(v),
			_ => None,
		}
	}

	/// Borrow the compound when this is a `Compound`.
	pub fn as_compound(&self) -> Option<&Compound> {
		match self {
			Self::Compound(v) => Some(v),
			_ => None,
		}
	}

	/// Mutably borrow the compound when this is a `Compound`.
	pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
		match self {
			Self::Compound(v) => Some(v),
			_ => None,
		}
	}
}

impl From<Compound> for Value {
	fn from(value: Compound) -> Self {
		Self::Compound(value)
	}
}

impl From<List> for Value {
	fn from(value: List) -> Self {
		Self::List(value)
	}
}

/// Homogeneous tag sequence with a declared element type.
///
/// Every element's [`Value::tag_type`] equals [`List::elem_type`]. An empty list may declare `End`, which is
/// how empty lists appear on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
	elem_type: TagType,
	items: Vec<Value>,
}

impl Default for List {
	fn default() -> Self {
		Self::new(TagType::End)
	}
}

impl List {
	/// Create an empty list of `elem_type`.
	pub fn new(elem_type: TagType) -> Self {
		Self { elem_type, items: Vec::new() }
	}

	/// Build a list, rejecting elements that do not match `elem_type`.
	pub fn from_values(elem_type: TagType, items: Vec<Value>) -> Result<Self> {
		if let Some(bad) = items.iter().find(|item| item.tag_type() != elem_type) {
			return Err(NbtError::ListTypeMismatch {
				expected: elem_type,
				got: bad.tag_type(),
			});
		}
		Ok(Self { elem_type, items })
	}

	/// Assemble a list whose homogeneity the decoder already guarantees.
	pub(crate) fn from_parts(elem_type: TagType, items: Vec<Value>) -> Self {
		Self { elem_type, items }
	}

	/// Append `value`; an empty `End` list adopts the type of its first element.
	pub fn push(&mut self, value: Value) -> Result<()> {
		let got = value.tag_type();
		if self.items.is_empty() && self.elem_type == TagType::End {
			self.elem_type = got;
		}
		if got != self.elem_type {
			return Err(NbtError::ListTypeMismatch { expected: self.elem_type, got });
		}
		self.items.push(value);
		Ok(())
	}

	/// Remove and return the element at `index`.
	pub fn remove(&mut self, index: usize) -> Option<Value> {
		(index < self.items.len()).then(|| self.items.remove(index))
	}

	/// Declared element type.
	pub fn elem_type(&self) -> TagType {
		self.elem_type
	}

	/// Number of elements.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Return `true` when the list holds no elements.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Borrow the element at `index`.
	pub fn get(&self, index: usize) -> Option<&Value> {
		self.items.get(index)
	}

	/// Iterate elements in order.
	pub fn iter(&self) -> std::slice::Iter<'_, Value> {
		self.items.iter()
	}

	/// Consume the list, returning its elements.
	pub fn into_values(self) -> Vec<Value> {
		self.items
	}
}

impl<'a> IntoIterator for &'a List {
	type Item = &'a Value;
	type IntoIter = std::slice::Iter<'a, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}
