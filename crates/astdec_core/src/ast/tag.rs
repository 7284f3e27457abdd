//! Built-in wire tag names and their decode classes.

/// Polymorphic tag: the concrete tag precedes the value.
pub const ANY: &str = "any";
/// Untyped object reference.
pub const OBJECT: &str = "object";
/// Homogeneous array.
pub const ARRAY: &str = "array";
/// Symbol, inline or interned.
pub const SYMBOL: &str = "symbol";
/// UTF-8 string.
pub const STRING: &str = "string";
/// One-byte boolean.
pub const BOOLEAN: &str = "boolean";
/// Fixed 32-bit signed integer.
pub const INTEGER: &str = "integer";
/// Fixed binary64.
pub const DOUBLE: &str = "double";
/// Null member of a field union.
pub const NULL: &str = "null";

/// Decode class of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
	/// `any`.
	Any,
	/// `symbol`.
	Symbol,
	/// `string`.
	String,
	/// `boolean`.
	Boolean,
	/// `integer`.
	Integer,
	/// `double`.
	Double,
	/// `array`.
	Array,
	/// `object` or a shape name.
	Object,
}

impl TagKind {
	/// Classify a tag name; unknown names are object tags.
	pub fn of(tag: &str) -> Self {
		match tag {
			ANY => Self::Any,
			SYMBOL => Self::Symbol,
			STRING => Self::String,
			BOOLEAN => Self::Boolean,
			INTEGER => Self::Integer,
			DOUBLE => Self::Double,
			ARRAY => Self::Array,
			_ => Self::Object,
		}
	}

	/// Scalar tags eligible for `NoOverridingPrimitiveStream`.
	pub fn is_primitive(self) -> bool {
		matches!(self, Self::Symbol | Self::String | Self::Boolean | Self::Integer | Self::Double)
	}
}

/// Return `true` for scalar tag names.
pub fn is_primitive(tag: &str) -> bool {
	TagKind::of(tag).is_primitive()
}
