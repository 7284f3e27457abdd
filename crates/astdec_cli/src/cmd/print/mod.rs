use std::fmt::Write;

use astdec::ast::{ObjectValue, Value};
use serde_json::{Map, Value as JsonValue};

/// Output truncation limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single object.
	pub max_fields_per_object: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum nesting printed for arrays and inline objects.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_object: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Print one decoded value tree on stdout.
pub fn print_value(value: &Value, indent: usize, options: PrintOptions) {
	let mut out = String::new();
	render_value(&mut out, value, indent, 0, options);
	print!("{out}");
}

/// Render one decoded value tree as indented text lines.
pub fn render_value(out: &mut String, value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Null => line(out, &pad, "null"),
		Value::Bool(v) => line(out, &pad, v),
		Value::Integer(v) => line(out, &pad, v),
		Value::Double(v) => line(out, &pad, v),
		Value::String(v) => line(out, &pad, format_args!("\"{}\"", truncate(v, options.max_string_len))),
		Value::Symbol(v) => line(out, &pad, format_args!(":{}", truncate(v, options.max_string_len))),
		Value::InternedSymbol(v) => line(out, &pad, format_args!(":#{v}")),
		Value::Ref(v) => line(out, &pad, format_args!("-> #{v}")),
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				line(out, &pad, format_args!("[... {} items]", items.len()));
				return;
			}
			line(out, &pad, "[");
			for item in items.iter().take(options.max_array_items) {
				render_value(out, item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				line(out, &pad, format_args!("  ... {} more", items.len() - options.max_array_items));
			}
			line(out, &pad, "]");
		}
		Value::Inline(object) => render_object(out, object, indent, depth, options),
	}
}

/// Render an object header and its fields.
pub fn render_object(out: &mut String, object: &ObjectValue, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	if depth >= options.max_print_depth {
		line(out, &pad, format_args!("{} {{ ... }}", object.shape));
		return;
	}

	line(out, &pad, format_args!("{} {{", object.shape));
	for field in object.fields.iter().take(options.max_fields_per_object) {
		let _ = write!(out, "{pad}  {} = ", field.name);
		if matches!(field.value, Value::Inline(_) | Value::Array(_)) {
			out.push('\n');
			render_value(out, &field.value, indent + 4, depth + 1, options);
		} else {
			render_value(out, &field.value, 0, depth + 1, options);
		}
	}
	if object.fields.len() > options.max_fields_per_object {
		line(out, &pad, format_args!("  ... {} more fields", object.fields.len() - options.max_fields_per_object));
	}
	line(out, &pad, "}");
}

/// Convert a decoded value into JSON.
///
/// Objects carry their shape name under `shape_key`; table references
/// become `{"$ref": index}` and interned symbols `{"$symbol": index}`.
pub fn value_to_json(value: &Value, shape_key: &str) -> JsonValue {
	match value {
		Value::Null => JsonValue::Null,
		Value::Bool(v) => serde_json::json!(v),
		Value::Integer(v) => serde_json::json!(v),
		Value::Double(v) => serde_json::json!(v),
		Value::String(v) | Value::Symbol(v) => serde_json::json!(v.as_ref()),
		Value::InternedSymbol(v) => serde_json::json!({ "$symbol": v }),
		Value::Ref(v) => serde_json::json!({ "$ref": v }),
		Value::Array(items) => JsonValue::Array(items.iter().map(|item| value_to_json(item, shape_key)).collect()),
		Value::Inline(object) => object_to_json(object, shape_key),
	}
}

/// Convert an object into JSON with its shape name under `shape_key`.
pub fn object_to_json(object: &ObjectValue, shape_key: &str) -> JsonValue {
	let mut out: Map<String, JsonValue> = object
		.fields
		.iter()
		.map(|field| (field.name.to_string(), value_to_json(&field.value, shape_key)))
		.collect();
	out.insert(shape_key.to_owned(), serde_json::json!(object.shape.as_ref()));
	JsonValue::Object(out)
}

fn line(out: &mut String, pad: &str, body: impl std::fmt::Display) {
	let _ = writeln!(out, "{pad}{body}");
}

fn truncate(text: &str, max: usize) -> String {
	match text.char_indices().nth(max) {
		Some((cut, _)) => format!("{}...", &text[..cut]),
		None => text.to_owned(),
	}
}

#[cfg(test)]
mod tests;
