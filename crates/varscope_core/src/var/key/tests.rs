use crate::var::{Key, Visibility, mangle_private, mangle_protected, property_key, unmangle};

#[test]
fn canonical_integers_become_indexes() {
	assert_eq!(Key::from_literal("0"), Key::Index(0));
	assert_eq!(Key::from_literal("17"), Key::Index(17));
	assert_eq!(Key::from_literal("-3"), Key::Index(-3));
}

#[test]
fn non_canonical_numbers_stay_names() {
	for literal in ["01", "-0", "+1", "1.5", "", "-", "1a", "99999999999999999999"] {
		assert_eq!(Key::from_literal(literal), Key::Name(literal.into()), "literal {literal:?}");
	}
}

#[test]
fn private_key_unmangles_to_owner() {
	let key = mangle_private("Base", "secret");
	let decoded = unmangle(&key);

	assert_eq!(decoded.name, "secret");
	assert_eq!(decoded.class, Some("Base"));
	assert_eq!(decoded.visibility, Visibility::Private);
}

#[test]
fn protected_key_has_no_owner() {
	let key = mangle_protected("guarded");
	let decoded = unmangle(&key);

	assert_eq!(decoded.name, "guarded");
	assert_eq!(decoded.class, None);
	assert_eq!(decoded.visibility, Visibility::Protected);
}

#[test]
fn plain_and_broken_keys_are_public() {
	let plain = unmangle("name");
	assert_eq!((plain.name, plain.class, plain.visibility), ("name", None, Visibility::Public));

	let broken = unmangle("\0Base");
	assert_eq!(broken.name, "\0Base");
	assert_eq!(broken.visibility, Visibility::Public);
}

#[test]
fn path_label_uses_field_name() {
	assert_eq!(Key::Index(4).path_label(), "4");
	assert_eq!(Key::name(mangle_private("Base", "secret")).path_label(), "secret");
	assert_eq!(property_key("plain"), "plain");
}
