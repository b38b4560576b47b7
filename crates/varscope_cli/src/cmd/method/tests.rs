use crate::cmd::test_support::{run_varscope, run_varscope_failure, run_varscope_json, stdout_text};

#[test]
fn method_strips_namespace_root() {
	let json = run_varscope_json(&["method", "\\App\\User::login", "--json"]);

	assert_eq!(json["class"], "App\\User");
	assert_eq!(json["method"], "login");
}

#[test]
fn method_text_output() {
	let output = run_varscope(&["method", "Foo::bar"]);
	assert_eq!(stdout_text(&output), "class: Foo\nmethod: bar\n");
}

#[test]
fn method_rejects_empty_method() {
	let (_, stderr) = run_varscope_failure(&["method", "Foo::"]);
	assert!(stderr.contains("error: invalid class method: Foo::"), "stderr: {stderr}");
}
