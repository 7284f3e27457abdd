use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use astdec_testkit::{ModuleFixture, WireFormat, target_dir as workspace_target_dir, write_fixture, write_json_fixture};

static ASTDEC_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn run_astdec(args: &[&str]) -> Output {
	Command::new(astdec_bin()).args(args).output().expect("astdec command executes")
}

pub(crate) fn run_astdec_json(args: &[&str]) -> serde_json::Value {
	let output = run_astdec(args);
	assert!(
		output.status.success(),
		"astdec command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

/// Shapes file for [`leaf_module_path`]: `Leaf { value: integer, next: Leaf | null }`.
pub(crate) fn leaf_shapes_path() -> String {
	let shapes = serde_json::json!({
		"shapeKey": "kind",
		"shapes": [{
			"name": "Leaf",
			"fields": [
				{ "name": "value", "type": "integer" },
				{ "name": "next", "type": ["Leaf", "null"] }
			]
		}]
	});
	path_arg(write_json_fixture("leaf-shapes.json", &shapes))
}

/// Two leaves, `10 -> 20 -> null`, rooted at slot 0.
pub(crate) fn leaf_module_bytes() -> Vec<u8> {
	let mut fixture = ModuleFixture::new(WireFormat::default(), &["Leaf", "integer"]);
	fixture.object_count = 2;

	let mut objects = fixture.writer();
	objects.u32(2);
	objects.index(Some(0)).i32(10).index(Some(1));
	objects.index(Some(0)).i32(20).index(None);
	fixture.objects = objects.finish();

	let mut root = fixture.writer();
	root.index(Some(0)).index(Some(0));
	fixture.root = root.finish();
	fixture.to_bytes()
}

pub(crate) fn leaf_module_path() -> String {
	path_arg(write_fixture("leaf.ast", &leaf_module_bytes()))
}

pub(crate) fn path_arg(path: PathBuf) -> String {
	path.to_string_lossy().into_owned()
}

fn astdec_bin() -> &'static PathBuf {
	ASTDEC_BIN.get_or_init(resolve_astdec_bin)
}

fn resolve_astdec_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_astdec") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = workspace_target_dir();

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "astdec.exe" } else { "astdec" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "astdec"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build astdec binary at {}", bin.display());

	bin
}
