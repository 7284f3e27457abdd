use std::fs;
use std::path::{Path, PathBuf};

use astdec::ast::{AstFile, Configuration, DecodeOptions, Module, NoopObserver, Result, ShapeTable};

use crate::cmd::trace::StderrTrace;

/// Options shared by every command that decodes a module.
#[derive(clap::Args, Debug, Clone)]
pub struct LoadArgs {
	/// Shape registry JSON.
	#[arg(long)]
	pub shapes: PathBuf,
	/// Configuration JSON using wire flag names.
	#[arg(long)]
	pub config: Option<PathBuf>,
	/// Enable one flag by wire name; repeatable.
	#[arg(long = "flag", value_name = "NAME")]
	pub flags: Vec<String>,
	/// Fail when any substream has unread bytes.
	#[arg(long)]
	pub strict: bool,
	/// Print decoder events to stderr.
	#[arg(long)]
	pub trace: bool,
}

/// Everything a command needs after loading inputs.
pub(crate) struct Loaded {
	pub file: AstFile,
	pub shapes: ShapeTable,
	pub module: Module,
}

/// Build the configuration from `--config` and `--flag`.
pub(crate) fn load_configuration(args: &LoadArgs) -> Result<Configuration> {
	let mut config = match &args.config {
		Some(path) => Configuration::from_json(&fs::read_to_string(path)?)?,
		None => Configuration::default(),
	};
	for name in &args.flags {
		config.set_flag(name, true)?;
	}
	Ok(config)
}

/// Open, configure and decode the module at `path`.
pub(crate) fn load_module(path: &Path, args: &LoadArgs) -> Result<Loaded> {
	let config = load_configuration(args)?;
	let shapes = ShapeTable::from_json(&fs::read_to_string(&args.shapes)?)?;
	let file = AstFile::open(path)?;
	let options = if args.strict { DecodeOptions::strict() } else { DecodeOptions::default() };

	let module = if args.trace {
		file.decode_with(&config, &shapes, &options, &mut StderrTrace)?
	} else {
		file.decode_with(&config, &shapes, &options, &mut NoopObserver)?
	};

	Ok(Loaded { file, shapes, module })
}

/// Pretty-print a serializable payload on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: failed to serialize json: {err}"),
	}
}
