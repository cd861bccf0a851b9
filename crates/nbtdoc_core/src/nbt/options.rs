/// Limits applied while decoding untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
	/// Maximum nesting of compounds and lists below the root.
	pub max_depth: u32,
	/// Maximum decompressed size of one document or region chunk.
	pub max_decompressed_bytes: usize,
}

impl Default for LoadOptions {
	fn default() -> Self {
		Self {
			max_depth: 512,
			max_decompressed_bytes: 512 * 1024 * 1024,
		}
	}
}
