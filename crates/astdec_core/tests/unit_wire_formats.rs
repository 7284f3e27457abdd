#![allow(missing_docs)]

use astdec::ast::{Configuration, FieldDescriptor, Module, Shape, ShapeTable, Value, decode_module};
use astdec_testkit::{ModuleFixture, WireFormat, WireWriter};

const TAGS: [&str; 5] = ["Item", "string", "integer", "double", "boolean"];
const ITEM: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
	Plain,
	Flagged,
	Packed,
	PackedStream,
}

enum Bundle {
	Null,
	Table(u32),
	Inline(u32),
}

struct Sections {
	objects: WireWriter,
	flags: Vec<u8>,
	packed: WireWriter,
}

fn shapes() -> ShapeTable {
	ShapeTable::from_shapes([Shape::new(
		"Item",
		vec![
			FieldDescriptor::pinned("label", "string"),
			FieldDescriptor::union("note", &["string", "null"]),
			FieldDescriptor::pinned("count", "integer"),
			FieldDescriptor::pinned("ratio", "double"),
			FieldDescriptor::pinned("flag", "boolean"),
			FieldDescriptor::union("next", &["Item", "null"]),
		],
	)])
	.expect("shapes are unique")
}

fn formats() -> Vec<WireFormat> {
	let mut out = Vec::new();
	for varints in [false, true] {
		for three_byte_indices in [false, true] {
			for null_terminated_strings in [false, true] {
				out.push(WireFormat {
					varints,
					three_byte_indices,
					null_terminated_strings,
				});
			}
		}
	}
	out
}

fn config(format: WireFormat, mode: Mode) -> Configuration {
	Configuration {
		enable_varints: format.varints,
		three_byte_indices: format.three_byte_indices,
		null_terminated_strings: format.null_terminated_strings,
		conditional_inlining: mode != Mode::Plain,
		packed_inlining_flags: matches!(mode, Mode::Packed | Mode::PackedStream),
		packed_index_stream: mode == Mode::PackedStream,
		..Configuration::default()
	}
}

fn write_item(sections: &mut Sections, label: &str, note: Option<&str>, count: i32, ratio: f64, flag: bool) {
	sections
		.objects
		.string(Some(label))
		.string(note)
		.i32(count)
		.f64(ratio)
		.u8(u8::from(flag));
}

fn write_bundle(sections: &mut Sections, mode: Mode, bundle: Bundle) {
	match mode {
		Mode::Plain => {
			let index = match bundle {
				Bundle::Null => None,
				Bundle::Table(index) => Some(index),
				Bundle::Inline(_) => panic!("plain references cannot inline"),
			};
			sections.objects.index(index);
		}
		Mode::Flagged => match bundle {
			Bundle::Null => sections.flags.push(0xFF),
			Bundle::Table(index) => {
				sections.flags.push(0);
				sections.objects.index(Some(index));
			}
			Bundle::Inline(tag) => {
				sections.flags.push(1);
				sections.objects.index(Some(tag));
			}
		},
		Mode::Packed | Mode::PackedStream => {
			let sink = if mode == Mode::PackedStream {
				&mut sections.packed
			} else {
				&mut sections.objects
			};
			match bundle {
				Bundle::Null => sink.index(None),
				Bundle::Table(index) => sink.index(Some(index << 1)),
				Bundle::Inline(tag) => sink.index(Some((tag << 1) | 1)),
			};
		}
	}
}

/// Two table items; the second points at an inline item when the mode allows it, else back at the first.
fn container(format: WireFormat, mode: Mode) -> Vec<u8> {
	let mut fixture = ModuleFixture::new(format, &TAGS);
	fixture.object_count = 2;

	let mut sections = Sections {
		objects: fixture.writer(),
		flags: Vec::new(),
		packed: fixture.writer(),
	};
	sections.objects.u32(2);

	sections.objects.index(Some(ITEM));
	write_item(&mut sections, "first", None, -7, 0.25, true);
	write_bundle(&mut sections, mode, Bundle::Table(1));

	sections.objects.index(Some(ITEM));
	write_item(&mut sections, "", Some(""), 300, -1.5, false);
	if mode == Mode::Plain {
		write_bundle(&mut sections, mode, Bundle::Table(0));
	} else {
		write_bundle(&mut sections, mode, Bundle::Inline(ITEM));
		write_item(&mut sections, "nested", None, 0, 0.0, false);
		write_bundle(&mut sections, mode, Bundle::Null);
	}

	fixture.objects = sections.objects.finish();
	if mode == Mode::Flagged {
		fixture.inlining_flags = Some(sections.flags);
	}
	if mode == Mode::PackedStream {
		fixture.packed_indices = Some(sections.packed.finish());
	}

	let mut root = fixture.writer();
	root.index(Some(ITEM)).index(Some(0));
	fixture.root = root.finish();
	fixture.to_bytes()
}

fn decode(format: WireFormat, mode: Mode) -> Module {
	decode_module(&container(format, mode), &config(format, mode), &shapes())
		.unwrap_or_else(|err| panic!("decode failed for {format:?} {mode:?}: {err}"))
}

#[test]
fn every_primitive_format_decodes_the_same_graph() {
	let baseline = decode(WireFormat::default(), Mode::Plain);
	let first = &baseline.objects()[0];
	assert_eq!(first.field("label"), Some(&Value::String("first".into())));
	assert_eq!(first.field("note"), Some(&Value::Null));
	assert_eq!(first.field("count"), Some(&Value::Integer(-7)));
	assert_eq!(first.field("ratio"), Some(&Value::Double(0.25)));
	assert_eq!(first.field("flag"), Some(&Value::Bool(true)));
	assert_eq!(first.field("next"), Some(&Value::Ref(1)));

	let second = &baseline.objects()[1];
	assert_eq!(second.field("label"), Some(&Value::String("".into())));
	assert_eq!(second.field("note"), Some(&Value::String("".into())));
	assert_eq!(second.field("next"), Some(&Value::Ref(0)));

	for format in formats() {
		let module = decode(format, Mode::Plain);
		assert_eq!(module.objects(), baseline.objects(), "objects differ for {format:?}");
		assert_eq!(module.root(), baseline.root(), "root differs for {format:?}");
	}
}

#[test]
fn inlining_encodings_agree() {
	for format in [
		WireFormat::default(),
		WireFormat {
			varints: true,
			null_terminated_strings: true,
			..WireFormat::default()
		},
	] {
		let flagged = decode(format, Mode::Flagged);
		let Some(Value::Inline(nested)) = flagged.objects()[1].field("next") else {
			panic!("expected inline item for {format:?}");
		};
		assert_eq!(nested.field("label"), Some(&Value::String("nested".into())));
		assert_eq!(nested.field("next"), Some(&Value::Null));

		for mode in [Mode::Packed, Mode::PackedStream] {
			let module = decode(format, mode);
			assert_eq!(module.objects(), flagged.objects(), "objects differ for {format:?} {mode:?}");
			assert!(module.streams().iter().all(|stream| stream.leftover() == 0));
		}
	}
}
