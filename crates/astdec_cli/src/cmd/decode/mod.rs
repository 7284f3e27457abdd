use std::path::PathBuf;

use astdec::ast::{Result, ShapeRegistry};

use crate::cmd::print::{PrintOptions, object_to_json, print_value, render_object, value_to_json};
use crate::cmd::util::{LoadArgs, emit_json, load_module};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[command(flatten)]
	pub load: LoadArgs,
	#[arg(long)]
	pub json: bool,
}

/// Decode a module and print its root followed by the object table.
pub fn run(args: Args) -> Result<()> {
	let Args { path, load, json } = args;
	let loaded = load_module(&path, &load)?;
	let module = &loaded.module;

	if json {
		let shape_key = loaded.shapes.shape_key();
		let payload = DecodeJson {
			path: path.display().to_string(),
			root: value_to_json(module.root(), shape_key),
			objects: module.objects().iter().map(|object| object_to_json(object, shape_key)).collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	let options = PrintOptions::default();
	println!("path: {}", path.display());
	println!("root:");
	print_value(module.root(), 2, options);
	println!("objects: {}", module.objects().len());
	for (index, object) in module.objects().iter().enumerate() {
		let mut out = String::new();
		render_object(&mut out, object, 2, 0, options);
		print!("  #{index}\n{out}");
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct DecodeJson {
	path: String,
	root: serde_json::Value,
	objects: Vec<serde_json::Value>,
}
