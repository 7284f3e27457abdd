use std::sync::Arc;

use crate::ast::decode::{Decoder, StreamId};
use crate::ast::{InliningEncoding, Result};

const NULL_FLAG: u8 = 0xFF;

/// How one object reference is encoded at its point of use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InliningBundle {
	/// No object.
	Null,
	/// Object embedded here with a known shape tag.
	Inlined(Arc<str>),
	/// Object-table slot index.
	Table(u32),
}

impl Decoder<'_, '_> {
	/// Decode an inlining bundle in the configured wire form.
	pub(crate) fn read_inlining_bundle(&mut self, reader: StreamId) -> Result<InliningBundle> {
		match self.config.inlining_encoding() {
			InliningEncoding::Packed { dedicated_stream } => {
				let source = match (dedicated_stream, self.packed_index_stream) {
					(true, Some(stream)) => stream,
					_ => reader,
				};
				self.read_packed_bundle(source)
			}
			InliningEncoding::Flagged | InliningEncoding::Disabled => self.read_flagged_bundle(reader),
		}
	}

	fn read_packed_bundle(&mut self, source: StreamId) -> Result<InliningBundle> {
		let Some(packed) = self.reader(source).read_index()? else {
			return Ok(InliningBundle::Null);
		};

		let payload = packed >> 1;
		if packed & 1 == 1 {
			let tag = self.tag_at(Some(payload))?;
			Ok(InliningBundle::Inlined(tag))
		} else {
			Ok(InliningBundle::Table(payload))
		}
	}

	fn read_flagged_bundle(&mut self, reader: StreamId) -> Result<InliningBundle> {
		let flag_source = self.inlining_stream.unwrap_or(reader);
		match self.reader(flag_source).read_byte()? {
			NULL_FLAG => Ok(InliningBundle::Null),
			0 => match self.reader(reader).read_index()? {
				Some(index) => Ok(InliningBundle::Table(index)),
				None => Ok(InliningBundle::Null),
			},
			_ => Ok(InliningBundle::Inlined(self.read_type_tag(reader)?)),
		}
	}
}
