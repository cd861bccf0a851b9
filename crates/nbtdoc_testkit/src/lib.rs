//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static SCRATCH_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Create a fresh, empty directory under the target directory for one test.
pub fn scratch_dir(label: &str) -> PathBuf {
	let seq = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed);
	let dir = target_dir().join("nbtdoc-scratch").join(format!("{label}-{}-{seq}", std::process::id()));
	if dir.exists() {
		std::fs::remove_dir_all(&dir).expect("stale scratch dir removes");
	}
	std::fs::create_dir_all(&dir).expect("scratch dir creates");
	dir
}

/// Uncompressed `hello_world` document: one string entry `name = "Bananrama"` under a root named `hello world`.
pub fn hello_world_nbt() -> Vec<u8> {
	let mut out = vec![0x0A];
	push_str(&mut out, "hello world");
	out.push(0x08);
	push_str(&mut out, "name");
	push_str(&mut out, "Bananrama");
	out.push(0x00);
	out
}

fn push_str(out: &mut Vec<u8>, text: &str) {
	let len = u16::try_from(text.len()).expect("fixture text fits u16");
	out.extend_from_slice(&len.to_be_bytes());
	out.extend_from_slice(text.as_bytes());
}
