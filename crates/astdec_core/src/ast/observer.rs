/// Diagnostic hook invoked as the decoder makes routing decisions.
///
/// All methods default to no-ops; implement the ones you need.
pub trait DecodeObserver {
	/// A substream was framed and registered.
	fn stream_opened(&mut self, _description: &str, _offset: usize, _len: usize) {}

	/// A type tag was resolved from `stream`.
	fn tag_read(&mut self, _stream: &str, _tag: &str) {}

	/// A field is about to decode from `stream`; `redirected` is set when the
	/// stream differs from the one active for the enclosing object.
	fn field_stream(&mut self, _shape: &str, _field: &str, _stream: &str, _redirected: bool) {}

	/// An inline object of `shape` is about to decode from `stream`.
	fn object_inlined(&mut self, _shape: &str, _stream: &str) {}

	/// Object-table slot `index` finished decoding.
	fn object_populated(&mut self, _index: usize, _shape: &str) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DecodeObserver for NoopObserver {}
