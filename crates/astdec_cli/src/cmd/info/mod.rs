use std::path::PathBuf;

use astdec::ast::Result;

use crate::cmd::util::{LoadArgs, emit_json, load_module};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[command(flatten)]
	pub load: LoadArgs,
	#[arg(long)]
	pub json: bool,
}

/// Print container facts, the tag table and substream framing.
pub fn run(args: Args) -> Result<()> {
	let Args { path, load, json } = args;
	let loaded = load_module(&path, &load)?;
	let module = &loaded.module;
	let header = module.header();

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			size: loaded.file.bytes().len(),
			tag_count: header.tag_count,
			object_count: header.object_count,
			flags: module.configuration().enabled_flags(),
			tags: module.tags().iter().map(|tag| tag.to_string()).collect(),
			streams: module
				.streams()
				.iter()
				.map(|stream| StreamJson {
					description: stream.description.to_string(),
					offset: stream.offset,
					len: stream.len,
					consumed: stream.consumed,
				})
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("size: {}", loaded.file.bytes().len());
	println!("tag_count: {}", header.tag_count);
	println!("object_count: {}", header.object_count);
	println!("flags: {}", module.configuration().enabled_flags().join(", "));

	println!("tags:");
	for (index, tag) in module.tags().iter().enumerate() {
		println!("  {index}: {tag}");
	}

	println!("streams:");
	for stream in module.streams() {
		println!(
			"  {} @{} len={} consumed={} leftover={}",
			stream.description,
			stream.offset,
			stream.len,
			stream.consumed,
			stream.leftover()
		);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct StreamJson {
	description: String,
	offset: usize,
	len: usize,
	consumed: usize,
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	size: usize,
	tag_count: u32,
	object_count: u32,
	flags: Vec<&'static str>,
	tags: Vec<String>,
	streams: Vec<StreamJson>,
}
