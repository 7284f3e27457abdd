use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors produced while loading and decoding a binary AST module.
///
/// Every variant is fatal: a decode that returns an error produces no module.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Container header does not start with the expected magic.
	#[error("magic header does not match (got {got:02x?})")]
	BadMagic {
		/// Bytes found where the magic was expected.
		got: Vec<u8>,
	},
	/// A read ran past the end of the active stream.
	#[error("truncated {stream}: at offset {at}, need {need} bytes, remaining {rem}")]
	Truncated {
		/// Description of the stream being read.
		stream: Box<str>,
		/// Absolute byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available in the stream.
		rem: usize,
	},
	/// A LEB128 varint did not fit in 32 bits.
	#[error("varint overflow in {stream} at offset {at}")]
	VarintOverflow {
		/// Description of the stream being read.
		stream: Box<str>,
		/// Absolute byte offset of the varint's first byte.
		at: usize,
	},
	/// String bytes were not valid UTF-8.
	#[error("invalid utf-8 string in {stream} at offset {at} ({len} bytes)")]
	InvalidUtf8 {
		/// Description of the stream being read.
		stream: Box<str>,
		/// Absolute byte offset of the string payload.
		at: usize,
		/// Payload length in bytes.
		len: usize,
	},
	/// Substream footer length disagrees with its header length.
	#[error("substream {stream} length footer {footer} does not match header {header}")]
	FramingMismatch {
		/// Substream description.
		stream: Box<str>,
		/// Length read before the payload.
		header: u32,
		/// Length read after the payload.
		footer: u32,
	},
	/// Tag table entry was null.
	#[error("tag table entry {index} is null")]
	NullTagName {
		/// Position in the tag table.
		index: usize,
	},
	/// Tag index was null or outside the tag table.
	#[error("invalid tag index {index:?} (tag count {count})")]
	InvalidTagIndex {
		/// Decoded index, `None` for the null index.
		index: Option<u32>,
		/// Number of loaded tags.
		count: usize,
	},
	/// Resolved tag has no registered shape.
	#[error("no shape registered for tag {tag}")]
	UnknownShape {
		/// Tag name that failed lookup.
		tag: Box<str>,
	},
	/// An `any` value named `any` as its concrete tag.
	#[error("found 'any' type tag when reading an any-tagged value")]
	NestedAny,
	/// Object-table index out of range.
	#[error("invalid object index {index} (table length {len})")]
	InvalidObjectIndex {
		/// Offending index.
		index: u32,
		/// Object table length.
		len: usize,
	},
	/// Object-table slot was never populated.
	#[error("object table slot {index} is uninitialized")]
	UninitializedSlot {
		/// Empty slot index.
		index: usize,
	},
	/// Object reference decoded before the table was allocated.
	#[error("object table expected but not allocated")]
	ObjectTableMissing,
	/// Object table allocated twice.
	#[error("object table already allocated")]
	ObjectTableAlreadyAllocated,
	/// Object-table substream count disagrees with the preallocated table.
	#[error("read {count} object(s) into table of length {len}")]
	ObjectCountMismatch {
		/// Count stored in the object-table substream.
		count: u32,
		/// Preallocated table length.
		len: usize,
	},
	/// Per-type value streams are on but no stream exists for a tag.
	#[error("no value stream for tag {tag}")]
	MissingValueStream {
		/// Tag without a registered stream.
		tag: Box<str>,
	},
	/// Root substream decoded to null.
	#[error("failed to retrieve root from module")]
	NullRoot,
	/// A field of an object failed to decode.
	#[error("failed while reading field {field} of {shape}: {source}")]
	Field {
		/// Shape being decoded.
		shape: Box<str>,
		/// Field being decoded.
		field: Box<str>,
		/// Underlying failure.
		#[source]
		source: Box<DecodeError>,
	},
	/// Nesting of objects and arrays exceeded the configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Array length exceeded the configured limit.
	#[error("decode array too large: count={count}, max={max}")]
	ArrayTooLarge {
		/// Declared array length.
		count: usize,
		/// Maximum permitted length.
		max: usize,
	},
	/// Declared object count exceeded the configured limit.
	#[error("object table too large: count={count}, max={max}")]
	TooManyObjects {
		/// Declared object count.
		count: usize,
		/// Maximum permitted count.
		max: usize,
	},
	/// Strict mode found unconsumed bytes in a substream.
	#[error("substream {stream} has {leftover} unread byte(s)")]
	TrailingBytes {
		/// Substream description.
		stream: Box<str>,
		/// Unconsumed bytes.
		leftover: usize,
	},
	/// Configuration flag name not recognized.
	#[error("unknown configuration flag: {name}")]
	UnknownFlag {
		/// User-provided flag name.
		name: String,
	},
	/// Shape registered twice.
	#[error("duplicate shape: {name}")]
	DuplicateShape {
		/// Shape name.
		name: String,
	},
	/// Shape or configuration JSON failed to parse.
	#[error("invalid json: {0}")]
	InvalidJson(#[from] serde_json::Error),
}

impl DecodeError {
	/// Innermost error beneath any field annotations.
	pub fn root_cause(&self) -> &DecodeError {
		let mut current = self;
		while let DecodeError::Field { source, .. } = current {
			current = source;
		}
		current
	}

	/// `(shape, field)` annotations from the outermost object inward.
	pub fn field_path(&self) -> Vec<(&str, &str)> {
		let mut out = Vec::new();
		let mut current = self;
		while let DecodeError::Field { shape, field, source } = current {
			out.push((shape.as_ref(), field.as_ref()));
			current = source;
		}
		out
	}
}
