use std::fmt::Write as _;
use std::path::PathBuf;

use nbtdoc::nbt::{Compound, Entry, NbtFile, Result, Value};
use serde_json::{Map, Number, Value as Json, json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Emit the tree as JSON instead of text.
	#[arg(long)]
	pub json: bool,
	/// Deepest nesting level expanded in text output.
	#[arg(long, default_value_t = PrintOptions::default().max_depth)]
	pub max_depth: u32,
	/// Most list, array, or compound items shown per level in text output.
	#[arg(long, default_value_t = PrintOptions::default().max_items)]
	pub max_items: usize,
}

/// Output truncation limits for text rendering.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum recursive print depth for nested lists/compounds.
	pub max_depth: u32,
	/// Maximum number of items printed per compound, list, or array.
	pub max_items: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_depth: 16,
			max_items: 32,
			max_string_len: 200,
		}
	}
}

/// Load a file and print its tree.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		json,
		max_depth,
		max_items,
	} = args;

	let file = NbtFile::open(&path)?;
	if json {
		let out = json!({
			"format": file.format.as_str(),
			"root": compound_json(&file.root),
		});
		let text = serde_json::to_string_pretty(&out).map_err(std::io::Error::other)?;
		println!("{text}");
		return Ok(());
	}

	let options = PrintOptions {
		max_depth,
		max_items,
		..PrintOptions::default()
	};
	println!("format: {}", file.format.as_str());
	print!("{}", render_compound(&file.root, options));
	Ok(())
}

/// Render compound entries as indented text, one entry per line.
pub fn render_compound(compound: &Compound, options: PrintOptions) -> String {
	let mut out = String::new();
	write_entries(&mut out, compound, 0, options);
	out
}

fn write_entries(out: &mut String, compound: &Compound, depth: u32, options: PrintOptions) {
	let pad = "  ".repeat(depth as usize);
	for entry in compound.iter().take(options.max_items) {
		let _ = write!(out, "{pad}{}: ", entry.name);
		write_value(out, &entry.value, depth, options);
	}
	if compound.len() > options.max_items {
		let _ = writeln!(out, "{pad}... {} more entries", compound.len() - options.max_items);
	}
}

fn write_value(out: &mut String, value: &Value, depth: u32, options: PrintOptions) {
	let pad = "  ".repeat(depth as usize);
	let _ = match value {
		Value::Byte(v) => writeln!(out, "{v}b"),
		Value::Short(v) => writeln!(out, "{v}s"),
		Value::Int(v) => writeln!(out, "{v}"),
		Value::Long(v) => writeln!(out, "{v}L"),
		Value::Float(v) => writeln!(out, "{v}f"),
		Value::Double(v) => writeln!(out, "{v}d"),
		Value::ByteArray(v) => writeln!(out, "byte_array[{}] {}", v.len(), preview(v, options)),
		Value::IntArray(v) => writeln!(out, "int_array[{}] {}", v.len(), preview(v, options)),
		Value::LongArray(v) => writeln!(out, "long_array[{}] {}", v.len(), preview(v, options)),
		Value::String(v) => writeln!(out, "\"{}\"", truncate(v, options.max_string_len)),
		Value::Compound(compound) => {
			if depth >= options.max_depth {
				let _ = writeln!(out, "compound {{ ... {} entries }}", compound.len());
				return;
			}
			let _ = writeln!(out, "compound {{");
			write_entries(out, compound, depth + 1, options);
			writeln!(out, "{pad}}}")
		}
		Value::List(list) => {
			if depth >= options.max_depth {
				let _ = writeln!(out, "list<{}>[{}] [ ... ]", list.elem_type(), list.len());
				return;
			}
			let _ = writeln!(out, "list<{}>[{}] [", list.elem_type(), list.len());
			for item in list.iter().take(options.max_items) {
				let _ = write!(out, "{pad}  ");
				write_value(out, item, depth + 1, options);
			}
			if list.len() > options.max_items {
				let _ = writeln!(out, "{pad}  ... {} more", list.len() - options.max_items);
			}
			writeln!(out, "{pad}]")
		}
	};
}

fn preview<T: std::fmt::Display>(items: &[T], options: PrintOptions) -> String {
	let shown: Vec<String> = items.iter().take(options.max_items).map(ToString::to_string).collect();
	let more = if items.len() > options.max_items { ", ..." } else { "" };
	format!("[{}{more}]", shown.join(", "))
}

fn truncate(text: &str, max_chars: usize) -> String {
	if text.chars().count() <= max_chars {
		return text.to_owned();
	}
	let mut out: String = text.chars().take(max_chars).collect();
	out.push_str("...");
	out
}

/// Convert compound entries to `{"name", "type", "value"}` JSON nodes.
pub fn compound_json(compound: &Compound) -> Json {
	Json::Array(compound.iter().map(entry_json).collect())
}

fn entry_json(entry: &Entry) -> Json {
	let mut node = Map::new();
	node.insert("name".to_owned(), Json::from(entry.name.as_str()));
	node.insert("type".to_owned(), Json::from(entry.tag_type().as_str()));
	if let Value::List(list) = &entry.value {
		node.insert("elem_type".to_owned(), Json::from(list.elem_type().as_str()));
	}
	node.insert("value".to_owned(), value_json(&entry.value));
	Json::Object(node)
}

/// Convert one payload to JSON; non-finite floats become `null`.
pub fn value_json(value: &Value) -> Json {
	match value {
		Value::Byte(v) => Json::from(*v),
		Value::Short(v) => Json::from(*v),
		Value::Int(v) => Json::from(*v),
		Value::Long(v) => Json::from(*v),
		Value::Float(v) => float_json(f64::from(*v)),
		Value::Double(v) => float_json(*v),
		Value::ByteArray(v) => Json::from(v.clone()),
		Value::String(v) => Json::from(v.as_str()),
		Value::List(list) => Json::Array(list.iter().map(value_json).collect()),
		Value::Compound(compound) => compound_json(compound),
		Value::IntArray(v) => Json::from(v.clone()),
		Value::LongArray(v) => Json::from(v.clone()),
	}
}

fn float_json(value: f64) -> Json {
	Number::from_f64(value).map_or(Json::Null, Json::Number)
}
