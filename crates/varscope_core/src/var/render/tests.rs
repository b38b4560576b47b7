use std::cell::RefCell;
use std::rc::Rc;

use crate::var::{
	AccessMode, MAX_FLOAT_PRECISION, Object, RenderOptions, Renderer, Resource, Table, Value, VisitSet, format_float, mangle_private, mangle_protected,
	render_flat,
};

fn ints(values: impl IntoIterator<Item = i64>) -> Table {
	let mut table = Table::new();
	for value in values {
		table.push(value);
	}
	table
}

fn user() -> Value {
	let mut props = Table::new();
	props.insert("name", "ada");
	props.insert(mangle_private("User", "secret").as_str(), 1_i64);
	props.insert(mangle_protected("level").as_str(), 2_i64);
	Value::object(Object::new(Some("User"), 7, props))
}

fn flat(value: &Value) -> String {
	Renderer::new(RenderOptions::default()).flat(value)
}

fn markup(value: &Value) -> String {
	Renderer::new(RenderOptions::default()).markup(value)
}

#[test]
fn flat_scalars() {
	assert_eq!(flat(&Value::Null), "null");
	assert_eq!(flat(&Value::Bool(true)), "bool(true)");
	assert_eq!(flat(&Value::Int(-5)), "int(-5)");
	assert_eq!(flat(&Value::Float(1.5)), "float(1.5)");
	assert_eq!(flat(&Value::str("hi")), "string(2) \"hi\"");
	assert_eq!(flat(&Value::Resource(Resource::new(3, Some("stream")))), "resource(#3) \"stream\"");
	assert_eq!(flat(&Value::Resource(Resource::new(4, None))), "resource(#4) \"unknown\"");
}

#[test]
fn flat_array_lists_keys_in_order() {
	let mut table = Table::new();
	table.insert(0_i64, 1_i64);
	table.insert("k", "v");

	assert_eq!(flat(&Value::array(table)), "array(2) [0 => int(1), \"k\" => string(1) \"v\"]");
}

#[test]
fn self_reference_renders_single_marker() {
	let table = Rc::new(RefCell::new(ints([1])));
	table.borrow_mut().push(Value::Array(table.clone()));

	let mut renderer = Renderer::default();
	let out = renderer.flat(&Value::Array(table.clone()));

	assert_eq!(out, "array(2) [0 => int(1), 1 => ** RECURSION **]");
	assert!(renderer.visiting().is_empty());
}

#[test]
fn aliased_siblings_are_not_recursion() {
	let inner = Rc::new(RefCell::new(ints([1])));
	let mut outer = Table::new();
	outer.push(Value::Array(inner.clone()));
	outer.push(Value::Array(inner));

	assert_eq!(
		flat(&Value::array(outer)),
		"array(2) [0 => array(1) [0 => int(1)], 1 => array(1) [0 => int(1)]]"
	);
}

#[test]
fn object_cycle_renders_marker() {
	let props = Rc::new(RefCell::new(Table::new()));
	let node = Rc::new(Object::with_shared_properties(Some("Node"), 1, props.clone()));
	props.borrow_mut().insert("self", Value::Object(node.clone()));

	assert_eq!(flat(&Value::Object(node)), "Node#1 (1) [\"self\" => ** RECURSION **]");
}

#[test]
fn budget_truncates_but_keeps_count() {
	let value = Value::array(ints(0..10));
	let options = RenderOptions {
		budget: 20,
		..RenderOptions::default()
	};
	let mut visiting = VisitSet::new();
	let mut out = String::new();

	let remaining = render_flat(&value, &options, &mut visiting, &mut out);

	assert_eq!(out, "array(10) [0 => int(0), ...]");
	assert!(remaining < 0);
	assert!(visiting.is_empty());
}

#[test]
fn long_string_is_cut_to_budget() {
	let options = RenderOptions {
		budget: 5,
		..RenderOptions::default()
	};
	let mut out = String::new();
	render_flat(&Value::str("abcdefghij"), &options, &mut VisitSet::new(), &mut out);

	assert_eq!(out, "string(10) \"abcde...\"");
}

#[test]
fn string_within_slack_is_not_cut() {
	let options = RenderOptions {
		budget: 8,
		..RenderOptions::default()
	};
	let mut out = String::new();
	render_flat(&Value::str("abcdefghij"), &options, &mut VisitSet::new(), &mut out);

	assert_eq!(out, "string(10) \"abcdefghij\"");
}

#[test]
fn flat_object_unmangles_property_keys() {
	assert_eq!(
		flat(&user()),
		"User#7 (3) [\"name\" => string(3) \"ada\", \"User:secret\" => int(1), \"level\" => int(2)]"
	);
}

#[test]
fn opaque_object_without_class() {
	let value = Value::object(Object::opaque(None, 9));
	assert_eq!(flat(&value), "Unknown class#9 (0) []");
	assert_eq!(markup(&value), "<object class=\"\" id=\"9\" num=\"0\"></object>");
}

#[test]
fn debug_table_replaces_properties_when_rendering() {
	let object = Object::new(Some("Point"), 2, [("x", 1_i64)].into_iter().collect())
		.with_debug_info(|_| [("shown", true)].into_iter().collect());

	assert_eq!(flat(&Value::object(object)), "Point#2 (1) [\"shown\" => bool(true)]");
}

#[test]
fn busy_table_faults_without_stopping_siblings() {
	let inner = Rc::new(RefCell::new(ints([1])));
	let mut outer = Table::new();
	outer.push(Value::Array(inner.clone()));
	outer.push(2_i64);
	let value = Value::array(outer);

	let _writer = inner.borrow_mut();
	let mut renderer = Renderer::new(RenderOptions {
		access: AccessMode::FaultTolerant,
		..RenderOptions::default()
	});

	assert_eq!(renderer.flat(&value), "array(2) [0 => ???, 1 => int(2)]");
	assert_eq!(
		renderer.markup(&value),
		"<array num=\"2\"><element name=\"0\"><error severity=\"error\" /></element><element name=\"1\"><int value=\"2\" /></element></array>"
	);
	assert!(renderer.visiting().is_empty());
}

#[test]
fn markup_scalars_and_arrays() {
	let mut table = Table::new();
	table.insert("a", Value::Null);
	table.insert(0_i64, false);

	assert_eq!(
		markup(&Value::array(table)),
		"<array num=\"2\"><element name=\"a\"><null /></element><element name=\"0\"><bool value=\"false\" /></element></array>"
	);
	assert_eq!(markup(&Value::Float(0.5)), "<float value=\"0.5\" />");
	assert_eq!(markup(&Value::str("<a&b>")), "<string length=\"5\" value=\"&lt;a&amp;b&gt;\" />");
	assert_eq!(
		markup(&Value::Resource(Resource::new(2, None))),
		"<resource id=\"2\" type=\"unknown\" />"
	);
}

#[test]
fn markup_object_reports_protection() {
	assert_eq!(
		markup(&user()),
		concat!(
			"<object class=\"User\" id=\"7\" num=\"3\">",
			"<property name=\"name\" protection=\"public\"><string length=\"3\" value=\"ada\" /></property>",
			"<property name=\"secret\" class=\"User\" protection=\"private\"><int value=\"1\" /></property>",
			"<property name=\"level\" protection=\"protected\"><int value=\"2\" /></property>",
			"</object>"
		)
	);
}

#[test]
fn markup_marks_recursion() {
	let table = Rc::new(RefCell::new(Table::new()));
	table.borrow_mut().push(Value::Array(table.clone()));

	assert_eq!(
		markup(&Value::Array(table)),
		"<array num=\"1\"><element name=\"0\"><recursion /></element></array>"
	);
}

#[test]
fn float_formatting_follows_significant_digits() {
	assert_eq!(format_float(0.1, 14), "0.1");
	assert_eq!(format_float(1.0, 14), "1");
	assert_eq!(format_float(1e25, 14), "1.0E+25");
	assert_eq!(format_float(1.5e-7, 14), "1.5E-7");
	assert_eq!(format_float(123_456.789, 4), "1.235E+5");
	assert_eq!(format_float(0.0001, 14), "0.0001");
	assert_eq!(format_float(0.000_01, 14), "1.0E-5");
	assert_eq!(format_float(1.0 / 3.0, 14), "0.33333333333333");
	assert_eq!(format_float(-2.5, 14), "-2.5");
}

#[test]
fn float_formatting_special_values() {
	assert_eq!(format_float(f64::INFINITY, 14), "INF");
	assert_eq!(format_float(f64::NEG_INFINITY, 14), "-INF");
	assert_eq!(format_float(f64::NAN, 14), "NAN");
	assert_eq!(format_float(-0.0, 14), "-0");
	assert_eq!(format_float(7.0, 0), "7");
}

#[test]
fn truncation_inside_nested_child_restores_visit_set() {
	let mut outer = Table::new();
	outer.push(Value::array(ints(0..10)));
	outer.push(Value::array(ints(0..10)));
	let value = Value::array(outer);
	let mut renderer = Renderer::new(RenderOptions {
		budget: 30,
		..RenderOptions::default()
	});

	let first = renderer.flat(&value);
	assert_eq!(first, "array(2) [0 => array(10) [0 => int(0), ...], ...]");
	assert!(renderer.visiting().is_empty());

	assert_eq!(renderer.flat(&value), first);
	assert!(renderer.visiting().is_empty());
}

#[test]
fn extreme_budget_saturates() {
	let options = RenderOptions {
		budget: i64::MIN,
		..RenderOptions::default()
	};
	let mut visiting = VisitSet::new();

	let mut out = String::new();
	assert_eq!(render_flat(&Value::Null, &options, &mut visiting, &mut out), i64::MIN);
	assert_eq!(out, "null");

	let mut out = String::new();
	let remaining = render_flat(&Value::array(ints(0..3)), &options, &mut visiting, &mut out);
	assert_eq!(out, "array(3) [...]");
	assert_eq!(remaining, i64::MIN);
	assert!(visiting.is_empty());

	let mut out = String::new();
	render_flat(&Value::str("abcdefghij"), &options, &mut visiting, &mut out);
	assert_eq!(out, "string(10) \"abc...\"");
}

#[test]
fn oversized_precision_is_clamped() {
	assert_eq!(format_float(1.5, usize::MAX), "1.5");
	assert_eq!(format_float(0.25, MAX_FLOAT_PRECISION + 1), "0.25");

	let mut renderer = Renderer::new(RenderOptions {
		precision: 4_000_000_000,
		..RenderOptions::default()
	});
	assert_eq!(renderer.flat(&Value::Float(0.25)), "float(0.25)");
}
