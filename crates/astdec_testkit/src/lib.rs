//! Shared test helpers for workspace crates.
//!
//! [`WireWriter`] produces container bytes under any wire format so tests can
//! build fixtures without a real encoder.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Container magic, duplicated here so fixtures do not depend on the decoder.
pub const MAGIC: [u8; 8] = [0x89, b'A', b'S', b'T', 0x0D, 0x0A, 0x1A, 0x0A];

/// Encoding switches that change primitive byte layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WireFormat {
	/// LEB128 varints for indices and unsigned counts.
	pub varints: bool,
	/// Three-byte fixed indices when varints are off.
	pub three_byte_indices: bool,
	/// Zero-terminated strings with 0xFF as null.
	pub null_terminated_strings: bool,
}

/// Append-only byte writer mirroring the decoder's primitive reads.
#[derive(Debug, Clone, Default)]
pub struct WireWriter {
	format: WireFormat,
	bytes: Vec<u8>,
}

impl WireWriter {
	/// Create an empty writer.
	pub fn new(format: WireFormat) -> Self {
		Self { format, bytes: Vec::new() }
	}

	/// Wire format used by this writer.
	pub fn format(&self) -> WireFormat {
		self.format
	}

	/// Bytes written so far.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Consume the writer and return its bytes.
	pub fn finish(self) -> Vec<u8> {
		self.bytes
	}

	/// Append raw bytes.
	pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
		self.bytes.extend_from_slice(bytes);
		self
	}

	/// Append one byte.
	pub fn u8(&mut self, value: u8) -> &mut Self {
		self.bytes.push(value);
		self
	}

	/// Append a little-endian `u32`.
	pub fn u32(&mut self, value: u32) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append the low three bytes of `value`, little-endian.
	pub fn u24(&mut self, value: u32) -> &mut Self {
		self.raw(&value.to_le_bytes()[..3])
	}

	/// Append a little-endian `i32`.
	pub fn i32(&mut self, value: i32) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a little-endian binary64.
	pub fn f64(&mut self, value: f64) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append an unsigned LEB128 varint regardless of format.
	pub fn leb_u32(&mut self, mut value: u32) -> &mut Self {
		loop {
			let byte = (value & 0x7F) as u8;
			value >>= 7;
			if value == 0 {
				return self.u8(byte);
			}
			self.u8(byte | 0x80);
		}
	}

	/// Append a signed LEB128 varint regardless of format.
	pub fn leb_i32(&mut self, value: i32) -> &mut Self {
		let mut value = i64::from(value);
		loop {
			let byte = (value & 0x7F) as u8;
			value >>= 7;
			let done = (value == 0 && byte & 0x40 == 0) || (value == -1 && byte & 0x40 != 0);
			if done {
				return self.u8(byte);
			}
			self.u8(byte | 0x80);
		}
	}

	/// Append an unsigned integer in the format's index encoding.
	pub fn var_u32(&mut self, value: u32) -> &mut Self {
		match (self.format.varints, self.format.three_byte_indices) {
			(true, _) => self.leb_u32(value),
			(false, true) => self.u24(value),
			(false, false) => self.u32(value),
		}
	}

	/// Append a 1-based index; `None` writes the null index.
	pub fn index(&mut self, value: Option<u32>) -> &mut Self {
		self.var_u32(value.map_or(0, |index| index + 1))
	}

	/// Append a string in the format's framing; `None` writes the null string.
	pub fn string(&mut self, value: Option<&str>) -> &mut Self {
		match (self.format.null_terminated_strings, value) {
			(true, None) => self.u8(0xFF),
			(true, Some(text)) => self.raw(text.as_bytes()).u8(0),
			(false, None) => self.index(None),
			(false, Some(text)) => self.index(Some(text.len() as u32)).raw(text.as_bytes()),
		}
	}

	/// Append a framed substream whose payload is built by `build`.
	pub fn substream(&mut self, description: &str, build: impl FnOnce(&mut WireWriter)) -> &mut Self {
		let mut inner = WireWriter::new(self.format);
		build(&mut inner);
		self.substream_bytes(description, &inner.bytes)
	}

	/// Append a framed substream around prebuilt payload bytes.
	pub fn substream_bytes(&mut self, description: &str, payload: &[u8]) -> &mut Self {
		let len = payload.len() as u32;
		self.string(Some(description)).u32(len).raw(payload).u32(len)
	}

	/// Append magic and the two header counts.
	pub fn header(&mut self, tag_count: u32, object_count: u32) -> &mut Self {
		self.raw(&MAGIC).u32(tag_count).u32(object_count)
	}

	/// Append the tag-table substream.
	pub fn tag_table(&mut self, tags: &[&str]) -> &mut Self {
		self.substream("tags", |stream| {
			stream.u32(tags.len() as u32);
			for tag in tags {
				stream.string(Some(*tag));
			}
		})
	}
}

/// Section payloads of one container, assembled in wire order by [`ModuleFixture::to_bytes`].
///
/// Optional sections are written only when present, so a fixture must match
/// the configuration the decoder runs with.
#[derive(Debug, Clone, Default)]
pub struct ModuleFixture {
	/// Wire format for every section.
	pub format: WireFormat,
	/// Tag table entries.
	pub tags: Vec<String>,
	/// Header tag count; defaults to the tag table length.
	pub tag_count: Option<u32>,
	/// Header object count.
	pub object_count: u32,
	/// Inlining-flag stream payload.
	pub inlining_flags: Option<Vec<u8>>,
	/// Type-tag stream payload.
	pub type_tags: Option<Vec<u8>>,
	/// Packed-index stream payload.
	pub packed_indices: Option<Vec<u8>>,
	/// Per-type value streams as `(tag index, payload)`.
	pub value_streams: Vec<(u32, Vec<u8>)>,
	/// Object-table payload, including its leading count; left empty, a zero count is written.
	pub objects: Vec<u8>,
	/// Root payload.
	pub root: Vec<u8>,
}

impl ModuleFixture {
	/// Empty fixture with a tag table.
	pub fn new(format: WireFormat, tags: &[&str]) -> Self {
		Self {
			format,
			tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
			..Self::default()
		}
	}

	/// Fresh writer in this fixture's format.
	pub fn writer(&self) -> WireWriter {
		WireWriter::new(self.format)
	}

	/// Index of `tag` in this fixture's tag table.
	pub fn tag(&self, tag: &str) -> u32 {
		let tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
		tag_index(&tags, tag)
	}

	/// Serialize the container.
	pub fn to_bytes(&self) -> Vec<u8> {
		let tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
		let mut out = self.writer();
		out.header(self.tag_count.unwrap_or(tags.len() as u32), self.object_count);
		out.tag_table(&tags);
		if let Some(payload) = &self.inlining_flags {
			out.substream_bytes("inlining", payload);
		}
		if let Some(payload) = &self.type_tags {
			out.substream_bytes("typeTags", payload);
		}
		if let Some(payload) = &self.packed_indices {
			out.substream_bytes("packedIndices", payload);
		}
		for (tag, payload) in &self.value_streams {
			let description = format!("values:{}", self.tags[*tag as usize]);
			out.index(Some(*tag)).substream_bytes(&description, payload);
		}
		if self.objects.is_empty() {
			out.substream("objects", |stream| {
				stream.u32(0);
			});
		} else {
			out.substream_bytes("objects", &self.objects);
		}
		out.substream_bytes("root", &self.root);
		out.finish()
	}
}

/// Position of `tag` in `tags`, for writing tag indices in fixtures.
pub fn tag_index(tags: &[&str], tag: &str) -> u32 {
	tags.iter()
		.position(|item| *item == tag)
		.unwrap_or_else(|| panic!("tag {tag} missing from fixture tag table")) as u32
}

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Write `bytes` to a fresh file under the target directory and return its path.
pub fn write_fixture(name: &str, bytes: &[u8]) -> PathBuf {
	static COUNTER: AtomicUsize = AtomicUsize::new(0);

	let dir = target_dir().join("astdec-fixtures");
	std::fs::create_dir_all(&dir).expect("fixture dir is creatable");
	let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
	let path = dir.join(format!("{}-{unique}-{name}", std::process::id()));
	std::fs::write(&path, bytes).expect("fixture is writable");
	path
}

/// Serialize `value` as JSON into a fresh fixture file.
pub fn write_json_fixture(name: &str, value: &serde_json::Value) -> PathBuf {
	let text = serde_json::to_vec_pretty(value).expect("fixture json serializes");
	write_fixture(name, &text)
}
