mod bytes;
mod config;
mod decode;
mod error;
mod file;
mod header;
mod module;
mod observer;
mod reader;
mod shape;
pub mod tag;
mod value;

/// Bounded byte cursor.
pub use bytes::Cursor;
/// Wire-format switches, derived encodings, and decode limits.
pub use config::{Configuration, DecodeOptions, IndexEncoding, InliningEncoding, StringEncoding};
/// Error and result aliases.
pub use error::{DecodeError, Result};
/// Container file abstraction.
pub use file::AstFile;
/// Container header representation.
pub use header::{MAGIC, ModuleHeader};
/// Module assembly entry points and decoded module.
pub use module::{Module, StreamSummary, decode_module, decode_module_with};
/// Diagnostic hook invoked during decoding.
pub use observer::{DecodeObserver, NoopObserver};
/// Primitive value reader over a framed byte range.
pub use reader::ValueReader;
/// Shape registry representation.
pub use shape::{FieldDescriptor, FieldType, Shape, ShapeRegistry, ShapeTable, pick_tag_for_field};
/// Decoded object graph types.
pub use value::{FieldValue, ObjectValue, Value};
