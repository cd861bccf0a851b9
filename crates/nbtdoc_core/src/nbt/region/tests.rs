use std::io::Write;

use crate::nbt::compression::{decode_zlib, zlib_encoder};
use crate::nbt::region::{HEADER_SIZE, LAST_CHANGE, SECTOR_SIZE, sector_count};
use crate::nbt::{ChunkPos, Compound, Compression, Cursor, NbtError, Value, load_region, parse_body, read_slot_table, save, save_region};

/// Build a region from `(slot, sector_offset, sector_count, timestamp)` rows and a raw chunk area.
fn raw_region(rows: &[(usize, u32, u8, i32)], area: &[u8]) -> Vec<u8> {
	let mut out = vec![0_u8; HEADER_SIZE];
	for &(slot, offset, count, timestamp) in rows {
		out[slot * 4..slot * 4 + 3].copy_from_slice(&offset.to_be_bytes()[1..]);
		out[slot * 4 + 3] = count;
		out[4096 + slot * 4..4096 + slot * 4 + 4].copy_from_slice(&timestamp.to_be_bytes());
	}
	out.extend_from_slice(area);
	out
}

fn zlib_document(root: &Compound) -> Vec<u8> {
	let plain = save(root, Compression::None).expect("document saves");
	let mut encoder = zlib_encoder(Vec::new());
	encoder.write_all(&plain).expect("zlib writes");
	encoder.finish().expect("zlib finishes")
}

fn chunk_area(field: u32, marker: u8, payload: &[u8]) -> Vec<u8> {
	let mut area = field.to_be_bytes().to_vec();
	area.push(marker);
	area.extend_from_slice(payload);
	area.resize(area.len().next_multiple_of(SECTOR_SIZE), 0);
	area
}

fn noise(len: usize) -> Vec<u8> {
	let mut state = 0x1234_5678_u32;
	(0..len)
		.map(|_| {
			state ^= state << 13;
			state ^= state >> 17;
			state ^= state << 5;
			(state >> 24) as u8
		})
		.collect()
}

fn sample_chunk(level: i32) -> Compound {
	let mut chunk = Compound::new();
	chunk.push("xPos", Value::Int(level));
	chunk.push("Sections", Value::ByteArray(vec![level as u8; 32]));
	chunk
}

#[test]
fn chunk_key_round_trips() {
	let pos = ChunkPos::new(31, 4).expect("in range");
	assert_eq!(pos.key(), "31, 4");
	assert_eq!(ChunkPos::parse_key("31, 4"), Some(pos));
	assert_eq!(ChunkPos::from_slot(pos.slot()), Some(pos));
	assert_eq!(ChunkPos::parse_key("32, 0"), None);
	assert_eq!(ChunkPos::parse_key("1,2"), None);
	assert_eq!(ChunkPos::new(0, 32), None);
}

#[test]
fn non_canonical_keys_are_not_chunk_keys() {
	for key in ["05, 5", "+5, 5", "5, 05", "5,  5"] {
		assert_eq!(ChunkPos::parse_key(key), None, "{key}");
	}
}

#[test]
fn slots_past_the_table_have_no_position() {
	assert_eq!(ChunkPos::from_slot(1023), ChunkPos::new(31, 31));
	assert_eq!(ChunkPos::from_slot(1024), None);

	let slots: Vec<_> = ChunkPos::all().map(ChunkPos::slot).collect();
	assert_eq!(slots, (0..1024).collect::<Vec<_>>());
}

#[test]
fn sector_count_claims_one_past_whole_sectors() {
	let pos = ChunkPos::new(0, 0).expect("in range");
	assert_eq!(sector_count(pos, 5).expect("fits"), 1);
	assert_eq!(sector_count(pos, 4095).expect("fits"), 1);
	assert_eq!(sector_count(pos, 4096).expect("fits"), 2);
	assert_eq!(sector_count(pos, 4097).expect("fits"), 2);
	assert_eq!(sector_count(pos, 255 * 4096 - 1).expect("fits"), 255);
	assert!(matches!(sector_count(pos, 255 * 4096), Err(NbtError::ChunkTooLarge { len: 1_044_480, .. })));
}

#[test]
fn chunk_filling_one_sector_exactly_claims_two() {
	let saved = (3800..4200)
		.map(|len| {
			let mut chunk = Compound::new();
			chunk.push("noise", Value::ByteArray(noise(len)));
			let mut root = Compound::new();
			root.push("0, 0", Value::Compound(chunk));
			save_region(&root).expect("region saves")
		})
		.find(|bytes| u32::from_be_bytes([bytes[8192], bytes[8193], bytes[8194], bytes[8195]]) as usize + 4 == SECTOR_SIZE)
		.expect("some payload size encodes to exactly one sector");

	assert_eq!(saved.len(), HEADER_SIZE + SECTOR_SIZE);
	let slot = read_slot_table(&saved).expect("tables read")[0];
	assert_eq!((slot.sector_offset, slot.sector_count), (2, 2));
	assert!(load_region(&saved).expect("region loads").find("0, 0").is_some());
}

#[test]
fn empty_root_encodes_as_bare_header() {
	let bytes = save_region(&Compound::new()).expect("region saves");
	assert_eq!(bytes, vec![0_u8; HEADER_SIZE]);
	assert!(load_region(&bytes).expect("region loads").is_empty());
}

#[test]
fn missing_and_empty_chunks_leave_slot_empty() {
	let mut root = Compound::new();
	root.push("0, 0", Value::Compound(sample_chunk(1)));
	root.push("5, 5", Value::Compound(Compound::new()));

	let bytes = save_region(&root).expect("region saves");
	let slots = read_slot_table(&bytes).expect("tables read");
	let five = slots[ChunkPos::new(5, 5).expect("in range").slot()];
	assert_eq!((five.sector_offset, five.sector_count, five.timestamp), (0, 0, 0));
	assert_eq!(bytes.len(), HEADER_SIZE + SECTOR_SIZE);

	let loaded = load_region(&bytes).expect("region loads");
	assert!(loaded.find("5, 5").is_none());
	assert!(loaded.find("0, 0").is_some());
}

#[test]
fn chunks_are_sector_aligned_in_slot_order() {
	let mut root = Compound::new();
	root.push("1, 0", Value::Compound(sample_chunk(2)));
	root.push("0, 0", Value::Compound(sample_chunk(1)));

	let bytes = save_region(&root).expect("region saves");
	assert_eq!(bytes.len() % SECTOR_SIZE, 0);

	let slots = read_slot_table(&bytes).expect("tables read");
	assert_eq!((slots[0].sector_offset, slots[0].sector_count), (2, 1));
	assert_eq!((slots[1].sector_offset, slots[1].sector_count), (3, 1));

	let field = u32::from_be_bytes([bytes[8192], bytes[8193], bytes[8194], bytes[8195]]) as usize;
	assert_eq!(bytes[8196], 2);
	let raw = decode_zlib(&bytes[8197..8196 + field], usize::MAX).expect("chunk inflates");
	let body = parse_body(&mut Cursor::new(&raw)).expect("chunk parses");
	assert_eq!(body, sample_chunk(1));
	assert!(bytes[8196 + field..12288].iter().all(|byte| *byte == 0));

	let loaded = load_region(&bytes).expect("region loads");
	let names: Vec<_> = loaded.iter().map(|entry| entry.name.as_str()).collect();
	assert_eq!(names, ["0, 0", "1, 0"]);
}

#[test]
fn last_change_moves_between_table_and_chunk() {
	let payload = zlib_document(&sample_chunk(7));
	let area = chunk_area(payload.len() as u32 + 1, 2, &payload);
	let bytes = raw_region(&[(0, 2, 1, 1000)], &area);

	let loaded = load_region(&bytes).expect("region loads");
	let chunk = loaded.get("0, 0").and_then(Value::as_compound).expect("chunk present");
	assert_eq!(chunk.entries().last().map(|entry| entry.name.as_str()), Some(LAST_CHANGE));
	assert_eq!(chunk.get(LAST_CHANGE), Some(&Value::Int(1000)));

	let saved = save_region(&loaded).expect("region saves");
	let slots = read_slot_table(&saved).expect("tables read");
	assert_eq!(slots[0].timestamp, 1000);

	let field = u32::from_be_bytes([saved[8192], saved[8193], saved[8194], saved[8195]]) as usize;
	let raw = decode_zlib(&saved[8197..8196 + field], usize::MAX).expect("chunk inflates");
	let body = parse_body(&mut Cursor::new(&raw)).expect("chunk parses");
	assert!(body.find(LAST_CHANGE).is_none());
	assert_eq!(body, sample_chunk(7));

	assert_eq!(loaded.get("0, 0").and_then(Value::as_compound), Some(chunk), "save must not modify the tree");
}

#[test]
fn reencoding_a_loaded_region_is_byte_identical() {
	let mut root = Compound::new();
	for (index, key) in ["0, 0", "31, 0", "4, 17", "31, 31"].into_iter().enumerate() {
		let mut chunk = sample_chunk(index as i32);
		chunk.push(LAST_CHANGE, Value::Int(100 + index as i32));
		root.push(key, Value::Compound(chunk));
	}

	let first = save_region(&root).expect("region saves");
	let loaded = load_region(&first).expect("region loads");
	let second = save_region(&loaded).expect("region resaves");
	assert_eq!(first, second);
}

#[test]
fn non_int_last_change_stays_in_body() {
	let mut chunk = sample_chunk(3);
	chunk.push(LAST_CHANGE, Value::Long(5));
	let mut root = Compound::new();
	root.push("2, 2", Value::Compound(chunk.clone()));

	let bytes = save_region(&root).expect("region saves");
	let slot = read_slot_table(&bytes).expect("tables read")[66];
	assert_eq!(slot.timestamp, 0);

	let loaded = load_region(&bytes).expect("region loads");
	assert_eq!(loaded.get("2, 2").and_then(Value::as_compound), Some(&chunk));
}

#[test]
fn payload_past_end_reports_exact_overflow() {
	let mut area = 101_u32.to_be_bytes().to_vec();
	area.push(2);
	area.extend_from_slice(&[0_u8; 10]);
	let bytes = raw_region(&[(0, 2, 1, 0)], &area);
	assert_eq!(bytes.len(), 8207);

	let err = load_region(&bytes).expect_err("truncated chunk should fail");
	assert!(
		matches!(
			err,
			NbtError::StreamOverflow {
				offset: 8197,
				need: 100,
				len: 8207
			}
		),
		"got {err:?}"
	);
}

#[test]
fn slot_offset_past_end_reports_overflow() {
	let bytes = raw_region(&[(3, 10, 1, 0)], &[]);
	let err = load_region(&bytes).expect_err("dangling offset should fail");
	assert!(matches!(
		err,
		NbtError::StreamOverflow {
			offset: 40960,
			need: 4,
			len: 8192
		}
	));
}

#[test]
fn truncated_header_reports_overflow() {
	let err = load_region(&[0_u8; 100]).expect_err("short header should fail");
	assert!(matches!(err, NbtError::StreamOverflow { offset: 100, need: 3, len: 100 }));
}

#[test]
fn unsupported_marker_names_slot_and_value() {
	let payload = zlib_document(&sample_chunk(1));
	let area = chunk_area(payload.len() as u32 + 1, 1, &payload);
	let bytes = raw_region(&[(35, 2, 1, 0)], &area);

	let err = load_region(&bytes).expect_err("marker 1 should fail");
	assert!(matches!(err, NbtError::UnsupportedCompressionFormat { x: 3, z: 1, format: 1 }));
}

#[test]
fn length_field_top_nibble_is_ignored() {
	let payload = zlib_document(&sample_chunk(9));
	let area = chunk_area(0xF000_0000 | (payload.len() as u32 + 1), 2, &payload);
	let bytes = raw_region(&[(0, 2, 1, 0)], &area);

	let loaded = load_region(&bytes).expect("masked length loads");
	let chunk = loaded.get("0, 0").and_then(Value::as_compound).expect("chunk present");
	assert_eq!(chunk.get("xPos"), Some(&Value::Int(9)));
}

#[test]
fn zero_length_field_is_rejected() {
	let area = chunk_area(0, 2, &[]);
	let bytes = raw_region(&[(33, 2, 1, 0)], &area);
	let err = load_region(&bytes).expect_err("zero length should fail");
	assert!(matches!(err, NbtError::InvalidChunkLength { x: 1, z: 1, len: 0 }));
}

#[test]
fn oversized_chunk_is_rejected() {
	let mut chunk = Compound::new();
	chunk.push("noise", Value::ByteArray(noise(1_200_000)));
	let mut root = Compound::new();
	root.push("0, 1", Value::Compound(chunk));

	let err = save_region(&root).expect_err("chunk over 255 sectors should fail");
	assert!(matches!(err, NbtError::ChunkTooLarge { x: 0, z: 1, .. }));
}
