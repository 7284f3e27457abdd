/// Bounded forward cursor over a byte range of a larger buffer.
///
/// Reads never fail loudly: running past the end yields `None` and leaves the
/// position unchanged, so callers decide how to report truncation.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
	base: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0 of `bytes`.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self::with_base(bytes, 0)
	}

	/// Create a cursor whose range starts at absolute offset `base` of a parent buffer.
	pub fn with_base(bytes: &'a [u8], base: usize) -> Self {
		Self { bytes, pos: 0, base }
	}

	/// Return current position relative to the range start.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return current absolute offset in the parent buffer.
	pub fn offset(&self) -> usize {
		self.base + self.pos
	}

	/// Return absolute offset of the range start.
	pub fn base(&self) -> usize {
		self.base
	}

	/// Return range length.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return `true` when the range is empty.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Look at the byte `offset` positions ahead without advancing.
	pub fn peek(&self, offset: usize) -> Option<u8> {
		self.bytes.get(self.pos.checked_add(offset)?).copied()
	}

	/// Read one byte and advance.
	pub fn read(&mut self) -> Option<u8> {
		let byte = self.peek(0)?;
		self.pos += 1;
		Some(byte)
	}

	/// Read exactly `n` bytes and advance.
	pub fn read_exact(&mut self, n: usize) -> Option<&'a [u8]> {
		if n > self.remaining() {
			return None;
		}

		let start = self.pos;
		self.pos += n;
		Some(&self.bytes[start..self.pos])
	}

	/// Read a fixed-size byte array and advance.
	pub fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Some(out)
	}

	/// Advance `n` bytes without reading; refuses to move past the end.
	pub fn skip(&mut self, n: usize) -> Option<()> {
		self.read_exact(n).map(|_| ())
	}

	/// Bytes between the current position and the next zero byte, consuming the terminator.
	pub fn read_until_zero(&mut self) -> Option<&'a [u8]> {
		let rem = &self.bytes[self.pos.min(self.bytes.len())..];
		let rel_end = rem.iter().position(|byte| *byte == 0)?;
		let start = self.pos;
		self.pos = start + rel_end + 1;
		Some(&self.bytes[start..start + rel_end])
	}
}
