use crate::var::{ClassMethod, VarError};

#[test]
fn strips_leading_namespace_root() {
	let parsed = ClassMethod::parse("\\Foo::bar").expect("method parses");
	assert_eq!(parsed.class, "Foo");
	assert_eq!(parsed.method, "bar");
}

#[test]
fn keeps_inner_namespace_separators() {
	let parsed = ClassMethod::parse("\\App\\Model::save").expect("method parses");
	assert_eq!(parsed.class, "App\\Model");
	assert_eq!(parsed.method, "save");
}

#[test]
fn single_character_method_is_accepted() {
	let parsed = ClassMethod::parse("Foo::x").expect("method parses");
	assert_eq!(parsed.method, "x");
}

#[test]
fn rejects_empty_parts() {
	for input in ["Foo::", "::bar", "\\::bar", "Foo"] {
		let err = ClassMethod::parse(input).expect_err("input should be rejected");
		assert!(matches!(err, VarError::InvalidClassMethod { .. }), "input {input:?}");
	}
}

#[test]
fn rejects_reserved_characters() {
	assert!(ClassMethod::parse("Foo bar::baz").is_err());
	assert!(ClassMethod::parse("Foo::bar#2").is_err());
}
