use std::sync::Arc;

use astdec::ast::{FieldValue, ObjectValue, Value};

use super::{PrintOptions, render_value, value_to_json};

fn leaf(value: i32, next: Value) -> ObjectValue {
	ObjectValue {
		shape: Arc::from("Leaf"),
		fields: vec![
			FieldValue {
				name: Arc::from("value"),
				value: Value::Integer(value),
			},
			FieldValue {
				name: Arc::from("next"),
				value: next,
			},
		],
	}
}

fn render(value: &Value, options: PrintOptions) -> String {
	let mut out = String::new();
	render_value(&mut out, value, 0, 0, options);
	out
}

#[test]
fn inline_objects_render_nested_fields() {
	let value = Value::Inline(Box::new(leaf(1, Value::Ref(3))));
	let text = render(&value, PrintOptions::default());
	assert_eq!(text, "Leaf {\n  value = 1\n  next = -> #3\n}\n");
}

#[test]
fn arrays_and_strings_are_truncated() {
	let options = PrintOptions {
		max_array_items: 2,
		max_string_len: 3,
		..PrintOptions::default()
	};
	let value = Value::Array(vec![Value::String("abcdef".into()), Value::Symbol("xy".into()), Value::Null]);
	let text = render(&value, options);
	assert_eq!(text, "[\n  \"abc...\"\n  :xy\n  ... 1 more\n]\n");
}

#[test]
fn depth_limit_elides_objects() {
	let options = PrintOptions {
		max_print_depth: 1,
		..PrintOptions::default()
	};
	let inner = Value::Inline(Box::new(leaf(2, Value::Null)));
	let value = Value::Inline(Box::new(leaf(1, inner)));
	let text = render(&value, options);
	assert!(text.contains("Leaf { ... }"), "{text}");
}

#[test]
fn json_uses_shape_key_and_ref_markers() {
	let value = Value::Inline(Box::new(leaf(5, Value::Ref(0))));
	let json = value_to_json(&value, "kind");
	assert_eq!(json, serde_json::json!({ "kind": "Leaf", "value": 5, "next": { "$ref": 0 } }));

	let symbols = Value::Array(vec![Value::InternedSymbol(4), Value::Symbol("x".into())]);
	assert_eq!(value_to_json(&symbols, "type"), serde_json::json!([{ "$symbol": 4 }, "x"]));
}
