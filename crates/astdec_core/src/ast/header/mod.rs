use crate::ast::{DecodeError, Result, ValueReader};

/// Fixed byte sequence opening every container.
pub const MAGIC: [u8; 8] = [0x89, b'A', b'S', b'T', 0x0D, 0x0A, 0x1A, 0x0A];

/// Container header: magic plus the two table counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleHeader {
	/// Declared number of tags.
	pub tag_count: u32,
	/// Declared number of object-table slots.
	pub object_count: u32,
}

impl ModuleHeader {
	/// Bytes occupied by the header.
	pub const SIZE: usize = MAGIC.len() + 8;

	/// Validate the magic and read the counts from the start of `reader`.
	pub fn parse(reader: &mut ValueReader<'_>) -> Result<Self> {
		if reader.remaining() < MAGIC.len() {
			let got = reader.read_bytes(reader.remaining())?.to_vec();
			return Err(DecodeError::BadMagic { got });
		}

		let got = reader.read_bytes(MAGIC.len())?;
		if got != MAGIC {
			return Err(DecodeError::BadMagic { got: got.to_vec() });
		}

		let tag_count = reader.read_u32()?;
		let object_count = reader.read_u32()?;
		Ok(Self { tag_count, object_count })
	}
}

#[cfg(test)]
mod tests;
