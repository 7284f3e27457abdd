use std::sync::Arc;

use crate::ast::decode::Decoder;
use crate::ast::{
	Configuration, DecodeObserver, DecodeOptions, ModuleHeader, NoopObserver, ObjectValue, Result, ShapeRegistry, Value, ValueReader,
};

/// A fully decoded module.
#[derive(Debug, Clone)]
pub struct Module {
	config: Configuration,
	header: ModuleHeader,
	tags: Vec<Arc<str>>,
	objects: Vec<ObjectValue>,
	root: Value,
	streams: Vec<StreamSummary>,
}

/// Framing facts about one substream after decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSummary {
	/// Description string from the substream header.
	pub description: Box<str>,
	/// Absolute offset of the payload.
	pub offset: usize,
	/// Payload length in bytes.
	pub len: usize,
	/// Bytes the decoder consumed.
	pub consumed: usize,
}

impl StreamSummary {
	/// Bytes left unread.
	pub fn leftover(&self) -> usize {
		self.len.saturating_sub(self.consumed)
	}
}

impl Module {
	/// Configuration the module was decoded with.
	pub fn configuration(&self) -> &Configuration {
		&self.config
	}

	/// Container header.
	pub fn header(&self) -> ModuleHeader {
		self.header
	}

	/// Tag table in index order.
	pub fn tags(&self) -> &[Arc<str>] {
		&self.tags
	}

	/// Object table in slot order.
	pub fn objects(&self) -> &[ObjectValue] {
		&self.objects
	}

	/// Object at table slot `index`.
	pub fn object(&self, index: usize) -> Option<&ObjectValue> {
		self.objects.get(index)
	}

	/// Root value.
	pub fn root(&self) -> &Value {
		&self.root
	}

	/// Every substream in container order, including the tag table, object table, and root.
	pub fn streams(&self) -> &[StreamSummary] {
		&self.streams
	}

	/// Object behind a [`Value::Ref`] or [`Value::Inline`].
	pub fn resolve<'m>(&'m self, value: &'m Value) -> Option<&'m ObjectValue> {
		match value {
			Value::Ref(index) => self.object(*index),
			Value::Inline(object) => Some(object),
			_ => None,
		}
	}
}

/// Decode a module with default limits and no observer.
pub fn decode_module(bytes: &[u8], config: &Configuration, shapes: &dyn ShapeRegistry) -> Result<Module> {
	decode_module_with(bytes, config, shapes, &DecodeOptions::default(), &mut NoopObserver)
}

/// Decode a module: header, tag table, auxiliary streams, object table, then root.
pub fn decode_module_with(
	bytes: &[u8],
	config: &Configuration,
	shapes: &dyn ShapeRegistry,
	options: &DecodeOptions,
	observer: &mut dyn DecodeObserver,
) -> Result<Module> {
	let mut reader = ValueReader::new(bytes, config, "module");
	let header = ModuleHeader::parse(&mut reader)?;
	let mut decoder = Decoder::new(*config, options, shapes, observer);

	let tags = decoder.add_stream(reader.read_substream()?);
	decoder.load_tags(tags)?;

	if config.has_inlining_stream() {
		decoder.inlining_stream = Some(decoder.add_stream(reader.read_substream()?));
	}
	if config.type_tag_stream {
		decoder.type_tag_stream = Some(decoder.add_stream(reader.read_substream()?));
	}
	if config.has_packed_index_stream() {
		decoder.packed_index_stream = Some(decoder.add_stream(reader.read_substream()?));
	}

	if config.value_stream_per_type {
		for _ in 0..decoder.tag_count() {
			let tag = decoder.tag_at(reader.read_index()?)?;
			let stream = decoder.add_stream(reader.read_substream()?);
			decoder.register_value_stream(tag, stream);
		}
	}

	decoder.allocate_object_table(header.object_count)?;
	let objects = decoder.add_stream(reader.read_substream()?);
	decoder.decode_object_table(objects)?;

	let root_stream = decoder.add_stream(reader.read_substream()?);
	let root = decoder.decode_root(root_stream)?;

	let parts = decoder.finish()?;
	Ok(Module {
		config: *config,
		header,
		tags: parts.tags,
		objects: parts.objects,
		root,
		streams: parts.streams,
	})
}
