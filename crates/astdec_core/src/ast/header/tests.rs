use astdec_testkit::{WireFormat, WireWriter};

use crate::ast::{Configuration, DecodeError, MAGIC, ModuleHeader, ValueReader};

#[test]
fn testkit_magic_matches_decoder_magic() {
	assert_eq!(astdec_testkit::MAGIC, MAGIC);
}

#[test]
fn parses_counts_after_magic() {
	let mut writer = WireWriter::new(WireFormat::default());
	writer.header(3, 9);
	let bytes = writer.finish();

	let mut reader = ValueReader::new(&bytes, &Configuration::default(), "module");
	let header = ModuleHeader::parse(&mut reader).expect("header parses");
	assert_eq!(header, ModuleHeader { tag_count: 3, object_count: 9 });
	assert_eq!(reader.consumed(), ModuleHeader::SIZE);
}

#[test]
fn counts_stay_fixed_width_under_varints() {
	let mut writer = WireWriter::new(WireFormat::default());
	writer.header(1, 2);
	let bytes = writer.finish();

	let config = Configuration {
		enable_varints: true,
		..Configuration::default()
	};
	let mut reader = ValueReader::new(&bytes, &config, "module");
	let header = ModuleHeader::parse(&mut reader).expect("header parses");
	assert_eq!(header.object_count, 2);
}

#[test]
fn rejects_wrong_magic() {
	let mut bytes = MAGIC.to_vec();
	bytes[1] = b'X';
	bytes.extend_from_slice(&[0; 8]);
	let mut reader = ValueReader::new(&bytes, &Configuration::default(), "module");
	let err = ModuleHeader::parse(&mut reader).expect_err("bad magic");
	assert!(matches!(err, DecodeError::BadMagic { ref got } if got[1] == b'X'));
}

#[test]
fn short_input_is_bad_magic() {
	let mut reader = ValueReader::new(&MAGIC[..3], &Configuration::default(), "module");
	let err = ModuleHeader::parse(&mut reader).expect_err("short magic");
	assert!(matches!(err, DecodeError::BadMagic { ref got } if got.len() == 3));
}

#[test]
fn truncated_counts_are_truncation() {
	let mut reader = ValueReader::new(&MAGIC, &Configuration::default(), "module");
	let err = ModuleHeader::parse(&mut reader).expect_err("missing counts");
	assert!(matches!(err, DecodeError::Truncated { at: 8, .. }));
}
