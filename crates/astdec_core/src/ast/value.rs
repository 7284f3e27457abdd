use std::sync::Arc;

/// One decoded wire value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Null string, symbol, or object reference.
	Null,
	/// `boolean`.
	Bool(bool),
	/// `integer`.
	Integer(i32),
	/// `double`.
	Double(f64),
	/// `string`.
	String(Box<str>),
	/// Inline `symbol` text.
	Symbol(Box<str>),
	/// Interned `symbol` index, resolved by the consumer.
	InternedSymbol(u32),
	/// `array`, homogeneous on the wire.
	Array(Vec<Value>),
	/// Object-table slot.
	Ref(usize),
	/// Object embedded at its point of reference.
	Inline(Box<ObjectValue>),
}

impl Value {
	/// Short label for the value's variant.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "boolean",
			Self::Integer(_) => "integer",
			Self::Double(_) => "double",
			Self::String(_) => "string",
			Self::Symbol(_) | Self::InternedSymbol(_) => "symbol",
			Self::Array(_) => "array",
			Self::Ref(_) => "ref",
			Self::Inline(_) => "inline",
		}
	}

	/// Return `true` for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Integer payload, if any.
	pub fn as_integer(&self) -> Option<i32> {
		match self {
			Self::Integer(value) => Some(*value),
			_ => None,
		}
	}

	/// String or inline symbol text, if any.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) | Self::Symbol(value) => Some(value),
			_ => None,
		}
	}

	/// Array elements, if any.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}
}

/// A decoded object: its shape name plus fields in declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
	/// Shape tag this object was decoded with.
	pub shape: Arc<str>,
	/// Field values in shape order.
	pub fields: Vec<FieldValue>,
}

impl ObjectValue {
	/// Look up a field by name.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}
}

/// One named field of an [`ObjectValue`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field name from the shape.
	pub name: Arc<str>,
	/// Decoded value.
	pub value: Value,
}
