use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use varscope_testkit::{fixture_path as shared_fixture_path, target_dir as workspace_target_dir};

static VARSCOPE_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn session_fixture() -> String {
	shared_fixture_path("session.json").to_string_lossy().into_owned()
}

pub(crate) fn run_varscope(args: &[&str]) -> Output {
	Command::new(varscope_bin()).args(args).output().expect("varscope command executes")
}

pub(crate) fn run_varscope_json(args: &[&str]) -> serde_json::Value {
	let output = run_varscope(args);
	assert!(
		output.status.success(),
		"varscope command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

pub(crate) fn run_varscope_failure(args: &[&str]) -> (String, String) {
	let output = run_varscope(args);
	assert!(!output.status.success(), "varscope command should fail: {args:?}");
	(
		String::from_utf8_lossy(&output.stdout).into_owned(),
		String::from_utf8_lossy(&output.stderr).into_owned(),
	)
}

pub(crate) fn stdout_text(output: &Output) -> String {
	assert!(
		output.status.success(),
		"varscope command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	String::from_utf8_lossy(&output.stdout).into_owned()
}

fn varscope_bin() -> &'static PathBuf {
	VARSCOPE_BIN.get_or_init(resolve_varscope_bin)
}

fn resolve_varscope_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_varscope") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = workspace_target_dir();

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "varscope.exe" } else { "varscope" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "varscope"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build varscope binary at {}", bin.display());

	bin
}
