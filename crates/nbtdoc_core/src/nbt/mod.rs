mod bytes;
mod compound;
mod compression;
pub mod document;
mod error;
mod file;
mod options;
pub mod region;
pub mod tag;
mod value;

/// Bounded big-endian reader and position-tracking writer.
pub use bytes::{Cursor, Writer};
/// Ordered entry container and its borrowing view.
pub use compound::{Compound, CompoundView, Entry};
/// Whole-document compression mode.
pub use compression::Compression;
/// Single-document load and save entry points.
pub use document::{load, load_with, parse_body, save};
/// Error and result aliases.
pub use error::{NbtError, Result};
/// File-level format selection and persistence.
pub use file::{FileFormat, NbtFile, REGION_EXTENSION};
/// Decoder limits.
pub use options::LoadOptions;
/// Region archive entry points and slot helpers.
pub use region::{ChunkPos, SlotEntry, load_region, read_slot_table, save_region};
/// Wire tag type identifiers.
pub use tag::TagType;
/// Tag payload values.
pub use value::{List, Value};
