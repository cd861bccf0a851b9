use crate::nbt::{Cursor, NbtError, Writer};

#[test]
fn reads_big_endian_scalars() {
	let mut bytes = Vec::new();
	bytes.push(0xFF);
	bytes.extend_from_slice(&(-2_i16).to_be_bytes());
	bytes.extend_from_slice(&[0x01, 0x02, 0x03]);
	bytes.extend_from_slice(&0x1122_3344_i32.to_be_bytes());
	bytes.extend_from_slice(&(-5_i64).to_be_bytes());
	bytes.extend_from_slice(&1.5_f32.to_be_bytes());
	bytes.extend_from_slice(&(-0.25_f64).to_be_bytes());

	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_i8().expect("i8"), -1);
	assert_eq!(cursor.read_i16().expect("i16"), -2);
	assert_eq!(cursor.read_u24().expect("u24"), 0x01_0203);
	assert_eq!(cursor.read_i32().expect("i32"), 0x1122_3344);
	assert_eq!(cursor.read_i64().expect("i64"), -5);
	assert_eq!(cursor.read_f32().expect("f32"), 1.5);
	assert_eq!(cursor.read_f64().expect("f64"), -0.25);
	assert_eq!(cursor.remaining(), 0);
}

#[test]
fn string_length_counts_bytes_not_chars() {
	let mut writer = Writer::new(Vec::new());
	writer.write_string("héllo").expect("string writes");
	let bytes = writer.into_inner();
	assert_eq!(&bytes[..2], &[0x00, 0x06]);

	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_string().expect("string reads"), "héllo");
}

#[test]
fn nul_and_supplementary_chars_use_modified_utf8() {
	// U+1F600 as a CESU-8 surrogate pair
	let emoji = [0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80];
	let mut bytes = vec![0x00, 0x02, 0xC0, 0x80, 0x00, 0x06];
	bytes.extend_from_slice(&emoji);

	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_string().expect("nul reads"), "\0");
	assert_eq!(cursor.read_string().expect("emoji reads"), "\u{1F600}");

	let mut writer = Writer::new(Vec::new());
	writer.write_string("\0").expect("nul writes");
	writer.write_string("\u{1F600}").expect("emoji writes");
	assert_eq!(writer.into_inner(), bytes);
}

#[test]
fn undecodable_text_is_rejected() {
	let bytes = [0x00, 0x02, b'a', 0xFF];
	let mut cursor = Cursor::new(&bytes);
	let err = cursor.read_string().expect_err("invalid text should fail");
	assert!(matches!(err, NbtError::InvalidText { offset: 2, len: 2 }), "got {err:?}");
}

#[test]
fn overflow_reports_offset_need_and_length() {
	let bytes = [0x00, 0x00, 0x00, 0x05, 0xAA];
	let mut cursor = Cursor::new(&bytes);
	let err = cursor.read_byte_array().expect_err("array longer than source should fail");
	assert!(matches!(err, NbtError::StreamOverflow { offset: 4, need: 5, len: 5 }));
}

#[test]
fn cursor_past_end_overflows_without_panicking() {
	let bytes = [0_u8; 8];
	let mut cursor = Cursor::at(&bytes, 20);
	assert_eq!(cursor.remaining(), 0);
	let err = cursor.read_u32().expect_err("read past end should fail");
	assert!(matches!(err, NbtError::StreamOverflow { offset: 20, need: 4, len: 8 }));
}

#[test]
fn negative_array_count_is_rejected() {
	let bytes = (-1_i32).to_be_bytes();
	let mut cursor = Cursor::new(&bytes);
	let err = cursor.read_int_array().expect_err("negative count should fail");
	assert!(matches!(err, NbtError::NegativeLength { offset: 0, len: -1 }));
}

#[test]
fn arrays_use_signed_count_prefix() {
	let mut writer = Writer::new(Vec::new());
	writer.write_int_array(&[1, -1]).expect("int array writes");
	writer.write_long_array(&[7]).expect("long array writes");
	assert_eq!(writer.pos(), 4 + 8 + 4 + 8);
	let bytes = writer.into_inner();
	assert_eq!(&bytes[..4], &[0, 0, 0, 2]);

	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_int_array().expect("int array reads"), vec![1, -1]);
	assert_eq!(cursor.read_long_array().expect("long array reads"), vec![7]);
}

#[test]
fn oversized_string_is_rejected() {
	let text = "x".repeat(usize::from(u16::MAX) + 1);
	let mut writer = Writer::new(Vec::new());
	let err = writer.write_string(&text).expect_err("string too long should fail");
	assert!(matches!(err, NbtError::StringTooLong { len: 65536 }));
	assert_eq!(writer.pos(), 0);
}

#[test]
fn u24_keeps_low_three_bytes() {
	let mut writer = Writer::new(Vec::new());
	writer.write_u24(0x12_3456).expect("u24 writes");
	assert_eq!(writer.into_inner(), vec![0x12, 0x34, 0x56]);
}
