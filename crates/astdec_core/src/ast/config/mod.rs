use serde::Deserialize;

use crate::ast::{DecodeError, Result};

/// Wire-format switches fixed for the lifetime of one decode.
///
/// Field names deserialize from the wire flag names (`EnableVarints`, ...).
/// Missing keys default to `false`; unknown keys are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default, deny_unknown_fields)]
pub struct Configuration {
	/// LEB128 varints instead of fixed-width integers and indices.
	pub enable_varints: bool,
	/// Fixed-width fallback uses 3 bytes instead of 4.
	pub three_byte_indices: bool,
	/// Zero-terminated strings (0xFF marks null) instead of length-prefixed.
	pub null_terminated_strings: bool,
	/// Object references may embed the object inline.
	pub conditional_inlining: bool,
	/// Inlining flag packed into the low bit of a single index.
	pub packed_inlining_flags: bool,
	/// Packed inlining indices come from a dedicated stream.
	pub packed_index_stream: bool,
	/// All type tags come from a dedicated stream.
	pub type_tag_stream: bool,
	/// Field values are partitioned into one stream per tag.
	pub value_stream_per_type: bool,
	/// Primitive fields of partitioned inline objects keep their per-type stream.
	pub no_overriding_primitive_stream: bool,
	/// Inline objects read every field from their shape's value stream.
	pub partitioned_inlining: bool,
	/// Symbols are interning-table indices instead of inline strings.
	pub interned_symbols: bool,
}

/// Integer encoding used for varints and indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexEncoding {
	/// Little-endian base-128 varint.
	Leb128,
	/// Three little-endian bytes, zero-extended.
	Fixed24,
	/// Four little-endian bytes.
	Fixed32,
}

/// String framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
	/// Index-encoded byte length followed by payload; null index is a null string.
	LengthPrefixed,
	/// Payload followed by a zero byte; a leading 0xFF is a null string.
	NullTerminated,
}

/// How object references encode inline objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InliningEncoding {
	/// Every reference is a plain object-table index.
	Disabled,
	/// One flag byte, then a type tag or an object index.
	Flagged,
	/// One index whose low bit is the inline flag.
	Packed {
		/// Indices come from the packed-index stream.
		dedicated_stream: bool,
	},
}

impl Configuration {
	/// Wire names of every flag, in container order of relevance.
	pub const FLAG_NAMES: [&'static str; 11] = [
		"EnableVarints",
		"ThreeByteIndices",
		"NullTerminatedStrings",
		"ConditionalInlining",
		"PackedInliningFlags",
		"PackedIndexStream",
		"TypeTagStream",
		"ValueStreamPerType",
		"NoOverridingPrimitiveStream",
		"PartitionedInlining",
		"InternedSymbols",
	];

	/// Parse a configuration from JSON text.
	pub fn from_json(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// Set a flag by its wire name.
	pub fn set_flag(&mut self, name: &str, value: bool) -> Result<()> {
		*self.flag_mut(name).ok_or_else(|| DecodeError::UnknownFlag { name: name.to_owned() })? = value;
		Ok(())
	}

	/// Builder form of [`Configuration::set_flag`].
	pub fn with_flag(mut self, name: &str) -> Result<Self> {
		self.set_flag(name, true)?;
		Ok(self)
	}

	/// Wire names of the flags that are on.
	pub fn enabled_flags(&self) -> Vec<&'static str> {
		let mut copy = *self;
		Self::FLAG_NAMES
			.into_iter()
			.filter(|name| copy.flag_mut(name).is_some_and(|flag| *flag))
			.collect()
	}

	/// Integer encoding for varints and indices.
	pub fn index_encoding(&self) -> IndexEncoding {
		match (self.enable_varints, self.three_byte_indices) {
			(true, _) => IndexEncoding::Leb128,
			(false, true) => IndexEncoding::Fixed24,
			(false, false) => IndexEncoding::Fixed32,
		}
	}

	/// String framing.
	pub fn string_encoding(&self) -> StringEncoding {
		if self.null_terminated_strings {
			StringEncoding::NullTerminated
		} else {
			StringEncoding::LengthPrefixed
		}
	}

	/// Object-reference inlining scheme.
	pub fn inlining_encoding(&self) -> InliningEncoding {
		match (self.conditional_inlining, self.packed_inlining_flags) {
			(false, _) => InliningEncoding::Disabled,
			(true, false) => InliningEncoding::Flagged,
			(true, true) => InliningEncoding::Packed {
				dedicated_stream: self.packed_index_stream,
			},
		}
	}

	/// Whether the container carries an inlining-flag substream.
	pub fn has_inlining_stream(&self) -> bool {
		self.conditional_inlining && !self.packed_inlining_flags
	}

	/// Whether the container carries a packed-index substream.
	pub fn has_packed_index_stream(&self) -> bool {
		self.packed_inlining_flags && self.packed_index_stream
	}

	/// Whether inline objects read all fields from their shape's value stream.
	pub fn partitions_inline_objects(&self) -> bool {
		self.value_stream_per_type && self.partitioned_inlining
	}

	fn flag_mut(&mut self, name: &str) -> Option<&mut bool> {
		Some(match name {
			"EnableVarints" => &mut self.enable_varints,
			"ThreeByteIndices" => &mut self.three_byte_indices,
			"NullTerminatedStrings" => &mut self.null_terminated_strings,
			"ConditionalInlining" => &mut self.conditional_inlining,
			"PackedInliningFlags" => &mut self.packed_inlining_flags,
			"PackedIndexStream" => &mut self.packed_index_stream,
			"TypeTagStream" => &mut self.type_tag_stream,
			"ValueStreamPerType" => &mut self.value_stream_per_type,
			"NoOverridingPrimitiveStream" => &mut self.no_overriding_primitive_stream,
			"PartitionedInlining" => &mut self.partitioned_inlining,
			"InternedSymbols" => &mut self.interned_symbols,
			_ => return None,
		})
	}
}

/// Runtime limits and behavior switches independent of the wire format.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting of objects and arrays.
	pub max_depth: u32,
	/// Maximum declared array length.
	pub max_array_len: usize,
	/// Maximum declared object count.
	pub max_objects: usize,
	/// Error when a substream still has unread bytes after decoding.
	pub strict_streams: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 512,
			max_array_len: 1 << 24,
			max_objects: 1 << 24,
			strict_streams: false,
		}
	}
}

impl DecodeOptions {
	/// Preset that also rejects trailing bytes in any substream.
	pub fn strict() -> Self {
		Self {
			strict_streams: true,
			..Self::default()
		}
	}
}

#[cfg(test)]
mod tests;
