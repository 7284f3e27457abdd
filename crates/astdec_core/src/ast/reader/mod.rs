use crate::ast::bytes::Cursor;
use crate::ast::{Configuration, DecodeError, IndexEncoding, Result, StringEncoding};

const NULL_STRING_MARKER: u8 = 0xFF;
const MAX_VARINT_BYTES: usize = 5;

/// Primitive value reader over one framed byte range.
///
/// The integer and string encodings are fixed when the reader is built, so
/// every substream read from it shares its parent's wire format.
#[derive(Debug, Clone)]
pub struct ValueReader<'a> {
	cursor: Cursor<'a>,
	ints: IndexEncoding,
	strings: StringEncoding,
	description: Box<str>,
}

impl<'a> ValueReader<'a> {
	/// Create a reader over a whole buffer.
	pub fn new(bytes: &'a [u8], config: &Configuration, description: &str) -> Self {
		Self {
			cursor: Cursor::new(bytes),
			ints: config.index_encoding(),
			strings: config.string_encoding(),
			description: description.into(),
		}
	}

	/// Stream description used in error reports.
	pub fn description(&self) -> &str {
		&self.description
	}

	/// Current absolute offset in the parent buffer.
	pub fn offset(&self) -> usize {
		self.cursor.offset()
	}

	/// Absolute offset of the first byte of this stream.
	pub fn base(&self) -> usize {
		self.cursor.base()
	}

	/// Length of this stream in bytes.
	pub fn len(&self) -> usize {
		self.cursor.len()
	}

	/// Return `true` when the stream holds no bytes.
	pub fn is_empty(&self) -> bool {
		self.cursor.is_empty()
	}

	/// Bytes consumed so far.
	pub fn consumed(&self) -> usize {
		self.cursor.pos()
	}

	/// Bytes still unread.
	pub fn remaining(&self) -> usize {
		self.cursor.remaining()
	}

	/// Look ahead without advancing.
	pub fn peek_byte(&self, offset: usize) -> Option<u8> {
		self.cursor.peek(offset)
	}

	/// Read one byte.
	pub fn read_byte(&mut self) -> Result<u8> {
		self.cursor.read().ok_or_else(|| self.truncated(1))
	}

	/// Read `n` raw bytes.
	pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
		self.cursor.read_exact(n).ok_or_else(|| self.truncated(n))
	}

	/// Advance `n` bytes without decoding them.
	pub fn skip(&mut self, n: usize) -> Result<()> {
		self.cursor.skip(n).ok_or_else(|| self.truncated(n))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read three little-endian bytes, zero-extended to `u32`.
	pub fn read_u24(&mut self) -> Result<u32> {
		let [b0, b1, b2] = self.read_array::<3>()?;
		Ok(u32::from_le_bytes([b0, b1, b2, 0]))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian IEEE-754 binary64.
	pub fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_le_bytes(self.read_array()?))
	}

	/// Read an unsigned integer in the configured index encoding.
	pub fn read_var_u32(&mut self) -> Result<u32> {
		match self.ints {
			IndexEncoding::Leb128 => self.read_leb_u32(),
			IndexEncoding::Fixed24 => self.read_u24(),
			IndexEncoding::Fixed32 => self.read_u32(),
		}
	}

	/// Read a signed integer: LEB128 when varints are on, else a fixed `i32`.
	pub fn read_var_i32(&mut self) -> Result<i32> {
		match self.ints {
			IndexEncoding::Leb128 => self.read_leb_i32(),
			IndexEncoding::Fixed24 | IndexEncoding::Fixed32 => self.read_i32(),
		}
	}

	/// Read a 1-based index; wire value 0 is null.
	pub fn read_index(&mut self) -> Result<Option<u32>> {
		Ok(self.read_var_u32()?.checked_sub(1))
	}

	/// Read a string in the configured framing; `None` is the null string.
	pub fn read_utf8_string(&mut self) -> Result<Option<Box<str>>> {
		let at = self.offset();
		let bytes = match self.strings {
			StringEncoding::LengthPrefixed => {
				let Some(len) = self.read_index()? else {
					return Ok(None);
				};
				self.read_bytes(len as usize)?
			}
			StringEncoding::NullTerminated => {
				if self.peek_byte(0) == Some(NULL_STRING_MARKER) {
					self.skip(1)?;
					return Ok(None);
				}
				self.cursor.read_until_zero().ok_or_else(|| self.truncated(1))?
			}
		};

		match std::str::from_utf8(bytes) {
			Ok(text) => Ok(Some(text.into())),
			Err(_) => Err(DecodeError::InvalidUtf8 {
				stream: self.description.clone(),
				at,
				len: bytes.len(),
			}),
		}
	}

	/// Read a framed substream and return a reader scoped to its payload.
	///
	/// Layout: description string, `u32` length, payload, `u32` length.
	pub fn read_substream(&mut self) -> Result<ValueReader<'a>> {
		let description = self.read_utf8_string()?.unwrap_or_else(|| "substream".into());
		let header = self.read_u32()?;
		let base = self.offset();
		let payload = self.read_bytes(header as usize)?;
		let footer = self.read_u32()?;
		if footer != header {
			return Err(DecodeError::FramingMismatch {
				stream: description,
				header,
				footer,
			});
		}

		Ok(ValueReader {
			cursor: Cursor::with_base(payload, base),
			ints: self.ints,
			strings: self.strings,
			description,
		})
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		self.cursor.read_array().ok_or_else(|| self.truncated(N))
	}

	fn read_leb_u32(&mut self) -> Result<u32> {
		let at = self.offset();
		let mut result = 0_u32;
		for index in 0..MAX_VARINT_BYTES {
			let byte = self.read_byte()?;
			let bits = u32::from(byte & 0x7F);
			let shift = 7 * index as u32;
			if index == MAX_VARINT_BYTES - 1 && bits > 0x0F {
				return Err(self.overflow(at));
			}
			result |= bits << shift;
			if byte & 0x80 == 0 {
				return Ok(result);
			}
		}
		Err(self.overflow(at))
	}

	fn read_leb_i32(&mut self) -> Result<i32> {
		let at = self.offset();
		let mut result = 0_i64;
		let mut shift = 0_u32;
		for _ in 0..MAX_VARINT_BYTES {
			let byte = self.read_byte()?;
			result |= i64::from(byte & 0x7F) << shift;
			shift += 7;
			if byte & 0x80 == 0 {
				if shift < 64 && byte & 0x40 != 0 {
					result |= -1_i64 << shift;
				}
				return i32::try_from(result).map_err(|_| self.overflow(at));
			}
		}
		Err(self.overflow(at))
	}

	fn truncated(&self, need: usize) -> DecodeError {
		DecodeError::Truncated {
			stream: self.description.clone(),
			at: self.offset(),
			need,
			rem: self.remaining(),
		}
	}

	fn overflow(&self, at: usize) -> DecodeError {
		DecodeError::VarintOverflow {
			stream: self.description.clone(),
			at,
		}
	}
}
