use std::collections::HashMap;
use std::sync::Arc;

use crate::ast::tag::{self, TagKind};
use crate::ast::{
	Configuration, DecodeError, DecodeObserver, DecodeOptions, FieldDescriptor, FieldValue, ObjectValue, Result, Shape, ShapeRegistry, StreamSummary,
	Value, ValueReader, pick_tag_for_field,
};

mod inline;

/// Handle to one registered substream reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StreamId(usize);

/// Decode state for one module: every stream cursor, the tag table, and the object table.
///
/// Readers live in one arena addressed by [`StreamId`], so auxiliary streams
/// (type tags, inlining flags, per-type values) can be swapped in for the
/// active reader without aliasing borrows.
pub(crate) struct Decoder<'a, 'o> {
	config: Configuration,
	options: &'a DecodeOptions,
	shapes: &'a dyn ShapeRegistry,
	observer: &'o mut dyn DecodeObserver,
	streams: Vec<ValueReader<'a>>,
	tags: Vec<Arc<str>>,
	pub(crate) type_tag_stream: Option<StreamId>,
	pub(crate) inlining_stream: Option<StreamId>,
	pub(crate) packed_index_stream: Option<StreamId>,
	value_streams: HashMap<Arc<str>, StreamId>,
	objects: Option<Vec<Option<ObjectValue>>>,
	depth: u32,
}

/// Everything a finished decode hands to the module.
pub(crate) struct DecodedParts {
	pub tags: Vec<Arc<str>>,
	pub objects: Vec<ObjectValue>,
	pub streams: Vec<StreamSummary>,
}

impl<'a, 'o> Decoder<'a, 'o> {
	pub(crate) fn new(config: Configuration, options: &'a DecodeOptions, shapes: &'a dyn ShapeRegistry, observer: &'o mut dyn DecodeObserver) -> Self {
		Self {
			config,
			options,
			shapes,
			observer,
			streams: Vec::new(),
			tags: Vec::new(),
			type_tag_stream: None,
			inlining_stream: None,
			packed_index_stream: None,
			value_streams: HashMap::new(),
			objects: None,
			depth: 0,
		}
	}

	/// Register a framed substream and return its handle.
	pub(crate) fn add_stream(&mut self, reader: ValueReader<'a>) -> StreamId {
		self.observer.stream_opened(reader.description(), reader.base(), reader.len());
		self.streams.push(reader);
		StreamId(self.streams.len() - 1)
	}

	pub(crate) fn reader(&mut self, id: StreamId) -> &mut ValueReader<'a> {
		&mut self.streams[id.0]
	}

	pub(crate) fn tag_count(&self) -> usize {
		self.tags.len()
	}

	/// Populate the tag table from its substream: `u32` count, then strings.
	pub(crate) fn load_tags(&mut self, id: StreamId) -> Result<()> {
		let reader = &mut self.streams[id.0];
		let count = reader.read_u32()? as usize;
		let mut tags = Vec::with_capacity(count.min(reader.remaining()));
		for index in 0..count {
			let name = reader.read_utf8_string()?.ok_or(DecodeError::NullTagName { index })?;
			tags.push(Arc::from(name));
		}
		self.tags = tags;
		Ok(())
	}

	pub(crate) fn register_value_stream(&mut self, tag: Arc<str>, id: StreamId) {
		self.value_streams.insert(tag, id);
	}

	/// Resolve a decoded tag index against the tag table.
	pub(crate) fn tag_at(&self, index: Option<u32>) -> Result<Arc<str>> {
		index
			.and_then(|value| self.tags.get(value as usize))
			.cloned()
			.ok_or(DecodeError::InvalidTagIndex {
				index,
				count: self.tags.len(),
			})
	}

	/// Read a tag index from the type-tag stream, or from `reader` when there is none.
	pub(crate) fn read_type_tag(&mut self, reader: StreamId) -> Result<Arc<str>> {
		let source = self.type_tag_stream.unwrap_or(reader);
		let index = self.streams[source.0].read_index()?;
		let tag = self.tag_at(index)?;
		self.observer.tag_read(self.streams[source.0].description(), &tag);
		Ok(tag)
	}

	/// Preallocate every object-table slot as empty.
	pub(crate) fn allocate_object_table(&mut self, count: u32) -> Result<()> {
		if self.objects.is_some() {
			return Err(DecodeError::ObjectTableAlreadyAllocated);
		}

		let count = count as usize;
		if count > self.options.max_objects {
			return Err(DecodeError::TooManyObjects {
				count,
				max: self.options.max_objects,
			});
		}

		self.objects = Some(std::iter::repeat_with(|| None).take(count).collect());
		Ok(())
	}

	/// Populate every preallocated slot, in table order, from the object-table stream.
	pub(crate) fn decode_object_table(&mut self, reader: StreamId) -> Result<()> {
		let count = self.reader(reader).read_u32()?;
		let len = self.objects.as_ref().ok_or(DecodeError::ObjectTableMissing)?.len();
		if count as usize != len {
			return Err(DecodeError::ObjectCountMismatch { count, len });
		}

		for index in 0..len {
			let object = self.decode_object_contents(reader, None)?;
			self.observer.object_populated(index, &object.shape);
			if let Some(slot) = self.objects.as_mut().and_then(|table| table.get_mut(index)) {
				*slot = Some(object);
			}
		}
		Ok(())
	}

	/// Decode the module root as an `any` value; null is an error.
	pub(crate) fn decode_root(&mut self, reader: StreamId) -> Result<Value> {
		let root = self.decode_value(reader, tag::ANY)?;
		if root.is_null() {
			return Err(DecodeError::NullRoot);
		}
		Ok(root)
	}

	/// Tear down the decoder, checking every slot was populated.
	///
	/// A slot is empty here only when the table was allocated but the
	/// object-table pass never ran.
	pub(crate) fn finish(self) -> Result<DecodedParts> {
		let streams: Vec<StreamSummary> = self
			.streams
			.iter()
			.map(|reader| StreamSummary {
				description: reader.description().into(),
				offset: reader.base(),
				len: reader.len(),
				consumed: reader.consumed(),
			})
			.collect();

		if self.options.strict_streams {
			if let Some(stream) = streams.iter().find(|stream| stream.leftover() > 0) {
				return Err(DecodeError::TrailingBytes {
					stream: stream.description.clone(),
					leftover: stream.leftover(),
				});
			}
		}

		let objects = self
			.objects
			.unwrap_or_default()
			.into_iter()
			.enumerate()
			.map(|(index, slot)| slot.ok_or(DecodeError::UninitializedSlot { index }))
			.collect::<Result<Vec<_>>>()?;

		Ok(DecodedParts {
			tags: self.tags,
			objects,
			streams,
		})
	}

	/// Decode one value whose tag is already known.
	fn decode_value(&mut self, reader: StreamId, tag: &str) -> Result<Value> {
		self.decode_tagged(reader, tag, false)
	}

	/// `via_any` marks a value whose concrete tag was just read for an `any` slot.
	fn decode_tagged(&mut self, reader: StreamId, tag: &str, via_any: bool) -> Result<Value> {
		match TagKind::of(tag) {
			TagKind::Any => {
				let inner = self.read_type_tag(reader)?;
				if TagKind::of(&inner) == TagKind::Any {
					return Err(DecodeError::NestedAny);
				}
				self.decode_tagged(reader, &inner, true)
			}
			TagKind::Symbol => {
				if self.config.interned_symbols {
					return Ok(self.reader(reader).read_index()?.map_or(Value::Null, Value::InternedSymbol));
				}
				Ok(self.reader(reader).read_utf8_string()?.map_or(Value::Null, Value::Symbol))
			}
			TagKind::String => Ok(self.reader(reader).read_utf8_string()?.map_or(Value::Null, Value::String)),
			TagKind::Boolean => Ok(Value::Bool(self.reader(reader).read_byte()? != 0)),
			TagKind::Integer => Ok(Value::Integer(self.reader(reader).read_i32()?)),
			TagKind::Double => Ok(Value::Double(self.reader(reader).read_f64()?)),
			TagKind::Array => self.decode_array(reader),
			TagKind::Object => self.decode_object_reference(reader, tag, via_any),
		}
	}

	/// Arrays are monomorphic: a length, then one element tag when non-empty.
	fn decode_array(&mut self, reader: StreamId) -> Result<Value> {
		let len = self.reader(reader).read_var_u32()? as usize;
		if len > self.options.max_array_len {
			return Err(DecodeError::ArrayTooLarge {
				count: len,
				max: self.options.max_array_len,
			});
		}
		if len == 0 {
			return Ok(Value::Array(Vec::new()));
		}

		let element_tag = self.read_type_tag(reader)?;
		self.nested(|this| {
			let mut items = Vec::with_capacity(len.min(this.streams[reader.0].remaining()));
			for _ in 0..len {
				items.push(this.decode_value(reader, &element_tag)?);
			}
			Ok(Value::Array(items))
		})
	}

	fn decode_object_reference(&mut self, reader: StreamId, tag: &str, via_any: bool) -> Result<Value> {
		if tag != tag::OBJECT && self.shapes.shape(tag).is_none() {
			return Err(DecodeError::UnknownShape { tag: tag.into() });
		}

		// An `any` slot is never inlined: its reference is always a plain table index.
		let index = if self.config.conditional_inlining && !via_any {
			match self.read_inlining_bundle(reader)? {
				inline::InliningBundle::Null => return Ok(Value::Null),
				inline::InliningBundle::Inlined(shape) => {
					let object = self.decode_object_contents(reader, Some(shape))?;
					return Ok(Value::Inline(Box::new(object)));
				}
				inline::InliningBundle::Table(index) => Some(index),
			}
		} else {
			self.reader(reader).read_index()?
		};

		self.table_entry(index)
	}

	fn table_entry(&self, index: Option<u32>) -> Result<Value> {
		let table = self.objects.as_ref().ok_or(DecodeError::ObjectTableMissing)?;
		let Some(index) = index else {
			return Ok(Value::Null);
		};
		if index as usize >= table.len() {
			return Err(DecodeError::InvalidObjectIndex { index, len: table.len() });
		}
		Ok(Value::Ref(index as usize))
	}

	/// Decode an object's fields; `inline_tag` is the known shape of an inline object.
	fn decode_object_contents(&mut self, reader: StreamId, inline_tag: Option<Arc<str>>) -> Result<ObjectValue> {
		let inline = inline_tag.is_some();
		let shape_name = match inline_tag {
			Some(tag) => tag,
			None => self.read_type_tag(reader)?,
		};

		let shapes = self.shapes;
		let shape = shapes
			.shape(&shape_name)
			.ok_or_else(|| DecodeError::UnknownShape { tag: shape_name.as_ref().into() })?;

		let mut active = reader;
		let mut forced = false;
		if inline {
			if self.config.partitions_inline_objects() {
				active = self.value_stream(&shape_name)?;
				forced = true;
			}
			self.observer.object_inlined(&shape_name, self.streams[active.0].description());
		}

		self.nested(|this| this.decode_fields(active, shape, forced))
	}

	fn decode_fields(&mut self, active: StreamId, shape: &'a Shape, forced: bool) -> Result<ObjectValue> {
		let mut fields = Vec::with_capacity(shape.fields.len());
		for field in &shape.fields {
			let value = self.decode_field(active, shape, field, forced).map_err(|source| DecodeError::Field {
				shape: shape.name.as_ref().into(),
				field: field.name.as_ref().into(),
				source: Box::new(source),
			})?;
			fields.push(FieldValue {
				name: field.name.clone(),
				value,
			});
		}

		Ok(ObjectValue {
			shape: shape.name.clone(),
			fields,
		})
	}

	fn decode_field(&mut self, active: StreamId, shape: &Shape, field: &'a FieldDescriptor, forced: bool) -> Result<Value> {
		let tag = pick_tag_for_field(field, self.shapes);

		// Primitives keep their own per-type stream even inside partitioned objects.
		let forced = forced && !(self.config.no_overriding_primitive_stream && tag::is_primitive(tag));
		let source = if forced { active } else { self.stream_for_tag(active, tag)? };

		self.observer
			.field_stream(&shape.name, &field.name, self.streams[source.0].description(), source != active);
		self.decode_value(source, tag)
	}

	fn stream_for_tag(&self, active: StreamId, tag: &str) -> Result<StreamId> {
		if self.config.value_stream_per_type {
			self.value_stream(tag)
		} else {
			Ok(active)
		}
	}

	fn value_stream(&self, tag: &str) -> Result<StreamId> {
		self.value_streams
			.get(tag)
			.copied()
			.ok_or_else(|| DecodeError::MissingValueStream { tag: tag.into() })
	}

	fn nested<T>(&mut self, body: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
		if self.depth >= self.options.max_depth {
			return Err(DecodeError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}

		self.depth += 1;
		let result = body(self);
		self.depth -= 1;
		result
	}
}
