//! Public library API for reading and writing named binary tag documents and region archives.

/// Tag tree model, byte codec, document codec, and region codec.
pub mod nbt;
