use crate::ast::{Configuration, DecodeError, IndexEncoding, InliningEncoding, StringEncoding};

#[test]
fn default_configuration_is_fixed_width_length_prefixed() {
	let config = Configuration::default();
	assert_eq!(config.index_encoding(), IndexEncoding::Fixed32);
	assert_eq!(config.string_encoding(), StringEncoding::LengthPrefixed);
	assert_eq!(config.inlining_encoding(), InliningEncoding::Disabled);
	assert!(config.enabled_flags().is_empty());
}

#[test]
fn varints_take_precedence_over_three_byte_indices() {
	let config = Configuration {
		enable_varints: true,
		three_byte_indices: true,
		..Configuration::default()
	};
	assert_eq!(config.index_encoding(), IndexEncoding::Leb128);

	let fixed = Configuration {
		three_byte_indices: true,
		..Configuration::default()
	};
	assert_eq!(fixed.index_encoding(), IndexEncoding::Fixed24);
}

#[test]
fn inlining_encoding_follows_flags() {
	let flagged = Configuration::default().with_flag("ConditionalInlining").expect("known flag");
	assert_eq!(flagged.inlining_encoding(), InliningEncoding::Flagged);
	assert!(flagged.has_inlining_stream());

	let packed = flagged
		.with_flag("PackedInliningFlags")
		.and_then(|config| config.with_flag("PackedIndexStream"))
		.expect("known flags");
	assert_eq!(packed.inlining_encoding(), InliningEncoding::Packed { dedicated_stream: true });
	assert!(!packed.has_inlining_stream());
	assert!(packed.has_packed_index_stream());
}

#[test]
fn packed_index_stream_alone_does_not_enable_packing() {
	let config = Configuration {
		packed_index_stream: true,
		..Configuration::default()
	};
	assert!(!config.has_packed_index_stream());
	assert_eq!(config.inlining_encoding(), InliningEncoding::Disabled);
}

#[test]
fn json_uses_wire_flag_names() {
	let config = Configuration::from_json(r#"{"EnableVarints": true, "InternedSymbols": true}"#).expect("config parses");
	assert!(config.enable_varints);
	assert!(config.interned_symbols);
	assert!(!config.type_tag_stream);
	assert_eq!(config.enabled_flags(), vec!["EnableVarints", "InternedSymbols"]);
}

#[test]
fn json_rejects_unknown_flags() {
	let err = Configuration::from_json(r#"{"EnableVarint": true}"#).expect_err("typo should fail");
	assert!(matches!(err, DecodeError::InvalidJson(_)));
}

#[test]
fn set_flag_rejects_unknown_names() {
	let mut config = Configuration::default();
	let err = config.set_flag("Varints", true).expect_err("unknown flag");
	assert!(matches!(err, DecodeError::UnknownFlag { ref name } if name == "Varints"));

	for name in Configuration::FLAG_NAMES {
		config.set_flag(name, true).expect("listed flag is settable");
	}
	assert_eq!(config.enabled_flags().len(), Configuration::FLAG_NAMES.len());
}
