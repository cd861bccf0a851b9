use std::io::Write;

use crate::nbt::tag::{lookup, read_payload, write_payload};
use crate::nbt::{Cursor, LoadOptions, NbtError, Result, TagType, Value, Writer};

/// Named tag stored in a compound.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
	/// Entry name; not required to be unique within its compound.
	pub name: String,
	/// Entry payload.
	pub value: Value,
}

impl Entry {
	/// Create an entry.
	pub fn new(name: impl Into<String>, value: Value) -> Self {
		Self { name: name.into(), value }
	}

	/// Wire type of the payload.
	pub fn tag_type(&self) -> TagType {
		self.value.tag_type()
	}
}

/// Ordered, owning sequence of entries.
///
/// Insertion order is preserved on every round-trip. Duplicate names are kept; lookups by name resolve to the
/// first match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
	entries: Vec<Entry>,
}

impl Compound {
	/// Create an empty compound.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Return `true` when there are no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Borrow entries in stored order.
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	/// Iterate entries in stored order.
	pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
		self.entries.iter()
	}

	/// Find the first entry named `name`.
	pub fn find(&self, name: &str) -> Option<&Entry> {
		self.entries.iter().find(|entry| entry.name == name)
	}

	/// Mutably find the first entry named `name`.
	pub fn find_mut(&mut self, name: &str) -> Option<&mut Entry> {
		self.entries.iter_mut().find(|entry| entry.name == name)
	}

	/// Borrow the payload of the first entry named `name`.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.find(name).map(|entry| &entry.value)
	}

	/// Index of the first entry named `name`.
	pub fn position(&self, name: &str) -> Option<usize> {
		self.entries.iter().position(|entry| entry.name == name)
	}

	/// Index of `entry` when it is stored in this compound, compared by identity.
	pub fn position_of(&self, entry: &Entry) -> Option<usize> {
		self.entries.iter().position(|item| std::ptr::eq(item, entry))
	}

	/// Insert `entry` at `position`, or append when `position` is `None` or past the end.
	///
	/// Returns the index the entry landed at.
	pub fn insert(&mut self, entry: Entry, position: Option<usize>) -> usize {
		let index = position.map_or(self.entries.len(), |pos| pos.min(self.entries.len()));
		self.entries.insert(index, entry);
		index
	}

	/// Append a new entry.
	pub fn push(&mut self, name: impl Into<String>, value: Value) {
		self.entries.push(Entry::new(name, value));
	}

	/// Remove and return the entry at `index`.
	pub fn remove(&mut self, index: usize) -> Option<Entry> {
		(index < self.entries.len()).then(|| self.entries.remove(index))
	}

	/// Remove and return the first entry named `name`.
	pub fn remove_named(&mut self, name: &str) -> Option<Entry> {
		let index = self.position(name)?;
		self.remove(index)
	}

	/// Borrow every entry as a view that can be filtered without touching this compound.
	pub fn view(&self) -> CompoundView<'_> {
		CompoundView::new(self)
	}

	/// Decode entries up to and including the `End` terminator.
	pub fn read(cursor: &mut Cursor<'_>, options: &LoadOptions, depth: u32) -> Result<Self> {
		let mut entries = Vec::new();
		loop {
			let id = cursor.read_u8()?;
			if id == TagType::End.id() {
				break;
			}

			let name = cursor.read_string()?;
			let tag = lookup(id).ok_or(NbtError::UnknownTagType { id })?;
			let value = read_payload(tag, cursor, options, depth)?;
			entries.push(Entry { name, value });
		}
		Ok(Self { entries })
	}

	/// Encode every entry followed by the `End` terminator.
	pub fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
		write_entries(writer, self.entries.iter())
	}
}

impl FromIterator<Entry> for Compound {
	fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().collect(),
		}
	}
}

impl<'a> IntoIterator for &'a Compound {
	type Item = &'a Entry;
	type IntoIter = std::slice::Iter<'a, Entry>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

/// Non-owning view over the entries of a [`Compound`].
///
/// Removing from the view only drops the reference; the source compound is never modified.
#[derive(Debug, Clone)]
pub struct CompoundView<'a> {
	entries: Vec<&'a Entry>,
}

impl<'a> CompoundView<'a> {
	/// Reference every entry of `source` in order.
	pub fn new(source: &'a Compound) -> Self {
		Self {
			entries: source.entries.iter().collect(),
		}
	}

	/// Number of referenced entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Return `true` when no entries are referenced.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate referenced entries in order.
	pub fn iter(&self) -> impl Iterator<Item = &'a Entry> + '_ {
		self.entries.iter().copied()
	}

	/// Find the first referenced entry named `name`.
	pub fn find(&self, name: &str) -> Option<&'a Entry> {
		self.iter().find(|entry| entry.name == name)
	}

	/// Drop `entry` from the view, compared by identity.
	pub fn remove_entry(&mut self, entry: &Entry) -> bool {
		let Some(index) = self.entries.iter().position(|item| std::ptr::eq(*item, entry)) else {
			return false;
		};
		self.entries.remove(index);
		true
	}

	/// Encode referenced entries followed by the `End` terminator.
	pub fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
		write_entries(writer, self.iter())
	}
}

/// Encode `entries` in order followed by the `End` terminator.
pub(crate) fn write_entries<'e, W: Write>(writer: &mut Writer<W>, entries: impl Iterator<Item = &'e Entry>) -> Result<()> {
	for entry in entries {
		writer.write_u8(entry.tag_type().id())?;
		writer.write_string(&entry.name)?;
		write_payload(writer, &entry.value)?;
	}
	writer.write_u8(TagType::End.id())
}
