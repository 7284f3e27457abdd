use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::ast::tag;
use crate::ast::{DecodeError, Result};

const DEFAULT_SHAPE_KEY: &str = "type";

/// Read-only lookup from tag name to shape.
///
/// Hosts supply the registry; the decoder never mutates it.
pub trait ShapeRegistry {
	/// Shape registered for `tag`, if any.
	fn shape(&self, tag: &str) -> Option<&Shape>;

	/// Reserved key under which hosts render an object's shape name.
	fn shape_key(&self) -> &str {
		DEFAULT_SHAPE_KEY
	}
}

/// Schema of one named object tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Shape {
	/// Tag name.
	pub name: Arc<str>,
	/// Fields in wire order.
	pub fields: Vec<FieldDescriptor>,
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldDescriptor {
	/// Field name.
	pub name: Arc<str>,
	/// Declared type.
	#[serde(rename = "type")]
	pub ty: FieldType,
}

/// Declared field type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldType {
	/// One concrete tag.
	Tag(Arc<str>),
	/// Any of several tags, possibly including `null`.
	Union(Vec<Arc<str>>),
}

impl Shape {
	/// Build a shape from its name and fields.
	pub fn new(name: &str, fields: Vec<FieldDescriptor>) -> Self {
		Self { name: name.into(), fields }
	}
}

impl FieldDescriptor {
	/// Field pinned to one tag.
	pub fn pinned(name: &str, tag: &str) -> Self {
		Self {
			name: name.into(),
			ty: FieldType::Tag(tag.into()),
		}
	}

	/// Field accepting any of `tags`.
	pub fn union(name: &str, tags: &[&str]) -> Self {
		Self {
			name: name.into(),
			ty: FieldType::Union(tags.iter().map(|tag| Arc::from(*tag)).collect()),
		}
	}
}

/// Wire tag used to decode `field`.
///
/// Pinned tags are used as declared. Unions drop `null`; one remaining member
/// is used as declared, several registered shapes collapse to `object`, and
/// anything else collapses to `any`.
pub fn pick_tag_for_field<'a>(field: &'a FieldDescriptor, shapes: &dyn ShapeRegistry) -> &'a str {
	let members = match &field.ty {
		FieldType::Tag(name) => return name,
		FieldType::Union(members) => members,
	};

	let mut candidates = members.iter().filter(|member| member.as_ref() != tag::NULL);
	let Some(first) = candidates.next() else {
		return tag::ANY;
	};

	let mut rest = candidates.peekable();
	if rest.peek().is_none() {
		return first;
	}

	let all_shapes = std::iter::once(first).chain(rest).all(|member| shapes.shape(member).is_some());
	if all_shapes { tag::OBJECT } else { tag::ANY }
}

/// In-memory [`ShapeRegistry`] keyed by shape name.
#[derive(Debug, Clone)]
pub struct ShapeTable {
	shapes: HashMap<Arc<str>, Shape>,
	order: Vec<Arc<str>>,
	shape_key: Box<str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ShapeTableJson {
	#[serde(default)]
	shape_key: Option<Box<str>>,
	shapes: Vec<Shape>,
}

impl Default for ShapeTable {
	fn default() -> Self {
		Self {
			shapes: HashMap::new(),
			order: Vec::new(),
			shape_key: DEFAULT_SHAPE_KEY.into(),
		}
	}
}

impl ShapeTable {
	/// Create an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a table from shapes, rejecting duplicate names.
	pub fn from_shapes(shapes: impl IntoIterator<Item = Shape>) -> Result<Self> {
		let mut table = Self::new();
		for shape in shapes {
			table.insert(shape)?;
		}
		Ok(table)
	}

	/// Parse `{"shapeKey": ..., "shapes": [...]}` JSON.
	pub fn from_json(text: &str) -> Result<Self> {
		let parsed: ShapeTableJson = serde_json::from_str(text)?;
		let mut table = Self::from_shapes(parsed.shapes)?;
		if let Some(key) = parsed.shape_key {
			table.shape_key = key;
		}
		Ok(table)
	}

	/// Replace the reserved shape key.
	pub fn with_shape_key(mut self, key: &str) -> Self {
		self.shape_key = key.into();
		self
	}

	/// Register a shape.
	pub fn insert(&mut self, shape: Shape) -> Result<()> {
		if self.shapes.contains_key(&shape.name) {
			return Err(DecodeError::DuplicateShape { name: shape.name.to_string() });
		}
		self.order.push(shape.name.clone());
		self.shapes.insert(shape.name.clone(), shape);
		Ok(())
	}

	/// Number of registered shapes.
	pub fn len(&self) -> usize {
		self.order.len()
	}

	/// Return `true` when no shapes are registered.
	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	/// Shapes in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &Shape> {
		self.order.iter().filter_map(|name| self.shapes.get(name))
	}
}

impl ShapeRegistry for ShapeTable {
	fn shape(&self, tag: &str) -> Option<&Shape> {
		self.shapes.get(tag)
	}

	fn shape_key(&self) -> &str {
		&self.shape_key
	}
}

#[cfg(test)]
mod tests;
