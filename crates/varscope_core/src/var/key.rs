use std::fmt;

/// Marker byte opening a mangled property key.
pub const MANGLE_MARKER: char = '\0';
/// Owner segment used for protected properties.
pub const PROTECTED_OWNER: &str = "*";

/// Key of one table entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
	/// Integer index.
	Index(i64),
	/// String name, possibly a mangled property key.
	Name(Box<str>),
}

impl Key {
	/// Build a key from path literal text.
	///
	/// Canonical decimal integers (`0`, `17`, `-3`) become [`Key::Index`]; anything else,
	/// including `01`, `-0`, and `+1`, stays a [`Key::Name`].
	pub fn from_literal(literal: &str) -> Self {
		match parse_canonical_index(literal) {
			Some(index) => Self::Index(index),
			None => Self::Name(literal.into()),
		}
	}

	/// Build a string key without numeric normalisation.
	pub fn name(name: impl Into<Box<str>>) -> Self {
		Self::Name(name.into())
	}

	/// Render the key the way synthesized paths show it.
	///
	/// Numeric keys render in decimal and mangled names render as their field name only.
	pub fn path_label(&self) -> String {
		match self {
			Self::Index(index) => index.to_string(),
			Self::Name(name) => property_key(name).to_owned(),
		}
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Index(index) => write!(f, "{index}"),
			Self::Name(name) => f.write_str(name),
		}
	}
}

impl From<i64> for Key {
	fn from(value: i64) -> Self {
		Self::Index(value)
	}
}

impl From<&str> for Key {
	fn from(value: &str) -> Self {
		Self::from_literal(value)
	}
}

fn parse_canonical_index(literal: &str) -> Option<i64> {
	let digits = literal.strip_prefix('-').unwrap_or(literal);
	if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
		return None;
	}
	if digits.len() > 1 && digits.starts_with('0') {
		return None;
	}
	if literal.starts_with('-') && digits == "0" {
		return None;
	}
	literal.parse::<i64>().ok()
}

/// Declared visibility of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
	/// Visible everywhere.
	Public,
	/// Visible to the declaring class and subclasses.
	Protected,
	/// Visible to the declaring class only.
	Private,
}

impl Visibility {
	/// Render visibility as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Public => "public",
			Self::Protected => "protected",
			Self::Private => "private",
		}
	}
}

/// Field name, owning class, and visibility decoded from a property key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unmangled<'a> {
	/// Plain field name.
	pub name: &'a str,
	/// Declaring class for private fields.
	pub class: Option<&'a str>,
	/// Decoded visibility.
	pub visibility: Visibility,
}

/// Decode a possibly mangled property key.
///
/// Keys that start with the marker but lack the inner separator are returned as public
/// with their raw text.
pub fn unmangle(key: &str) -> Unmangled<'_> {
	let public = Unmangled {
		name: key,
		class: None,
		visibility: Visibility::Public,
	};

	let Some(rest) = key.strip_prefix(MANGLE_MARKER) else {
		return public;
	};
	let Some((owner, name)) = rest.split_once(MANGLE_MARKER) else {
		return public;
	};

	if owner == PROTECTED_OWNER {
		Unmangled {
			name,
			class: None,
			visibility: Visibility::Protected,
		}
	} else {
		Unmangled {
			name,
			class: Some(owner),
			visibility: Visibility::Private,
		}
	}
}

/// Return the field-name part of a possibly mangled key.
pub fn property_key(key: &str) -> &str {
	unmangle(key).name
}

/// Build the mangled key of a private field declared by `class`.
pub fn mangle_private(class: &str, field: &str) -> String {
	format!("{MANGLE_MARKER}{class}{MANGLE_MARKER}{field}")
}

/// Build the mangled key of a protected field.
pub fn mangle_protected(field: &str) -> String {
	mangle_private(PROTECTED_OWNER, field)
}

#[cfg(test)]
mod tests;
