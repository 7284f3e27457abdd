use std::fs;
use std::path::Path;

use crate::ast::{Configuration, DecodeObserver, DecodeOptions, Module, ModuleHeader, Result, ShapeRegistry, ValueReader};

/// Module container loaded into memory with its header checked.
#[derive(Debug, Clone)]
pub struct AstFile {
	header: ModuleHeader,
	bytes: Vec<u8>,
}

impl AstFile {
	/// Read a container from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::from_bytes(fs::read(path)?)
	}

	/// Wrap container bytes, rejecting input that does not open with the magic.
	pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
		let mut reader = ValueReader::new(&bytes, &Configuration::default(), "module");
		let header = ModuleHeader::parse(&mut reader)?;
		Ok(Self { header, bytes })
	}

	/// Header counts; wire flags do not affect them.
	pub fn header(&self) -> ModuleHeader {
		self.header
	}

	/// Raw container bytes.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Decode the module with default limits.
	pub fn decode(&self, config: &Configuration, shapes: &dyn ShapeRegistry) -> Result<Module> {
		crate::ast::decode_module(&self.bytes, config, shapes)
	}

	/// Decode the module with explicit limits and an observer.
	pub fn decode_with(
		&self,
		config: &Configuration,
		shapes: &dyn ShapeRegistry,
		options: &DecodeOptions,
		observer: &mut dyn DecodeObserver,
	) -> Result<Module> {
		crate::ast::decode_module_with(&self.bytes, config, shapes, options, observer)
	}
}
