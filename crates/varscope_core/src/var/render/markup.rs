use std::borrow::Cow;
use std::fmt::Write;

use super::{RenderOptions, VisitSet, array_identity, format_float, object_identity};
use crate::var::{ArrayRef, Key, ObjectRef, Resource, Table, Value, Visibility, unmangle};

/// Render a value as nested markup elements.
///
/// Markup has no budget; cycles still render as `<recursion />`.
pub fn render_markup(value: &Value, options: &RenderOptions, visiting: &mut VisitSet, out: &mut String) {
	let mut writer = MarkupWriter { options, visiting, out };
	writer.value(value);
}

struct MarkupWriter<'a> {
	options: &'a RenderOptions,
	visiting: &'a mut VisitSet,
	out: &'a mut String,
}

impl MarkupWriter<'_> {
	fn value(&mut self, value: &Value) {
		match value {
			Value::Null => self.out.push_str("<null />"),
			Value::Bool(flag) => {
				let _ = write!(self.out, "<bool value=\"{flag}\" />");
			}
			Value::Int(number) => {
				let _ = write!(self.out, "<int value=\"{number}\" />");
			}
			Value::Float(number) => {
				let _ = write!(self.out, "<float value=\"{}\" />", format_float(*number, self.options.precision));
			}
			Value::Str(bytes) => {
				let text = String::from_utf8_lossy(bytes);
				let _ = write!(self.out, "<string length=\"{}\" value=\"{}\" />", bytes.len(), escape_attr(&text));
			}
			Value::Array(table) => self.array(table),
			Value::Object(object) => self.object(object),
			Value::Resource(Resource { id, type_name }) => {
				let type_name = type_name.as_deref().unwrap_or("unknown");
				let _ = write!(self.out, "<resource id=\"{id}\" type=\"{}\" />", escape_attr(type_name));
			}
		}
	}

	fn array(&mut self, table: &ArrayRef) {
		let id = array_identity(table);
		if !self.visiting.enter(id) {
			self.out.push_str("<recursion />");
			return;
		}

		let access = self.options.access;
		let read = access.read(table, |entries| {
			let _ = write!(self.out, "<array num=\"{}\">", entries.len());
			for (key, value) in entries.iter() {
				let _ = write!(self.out, "<element name=\"{}\">", escape_attr(&key.to_string()));
				self.value(value);
				self.out.push_str("</element>");
			}
			self.out.push_str("</array>");
		});
		if read.is_err() {
			tracing::warn!("array table unreadable while rendering markup");
			self.fault();
		}

		self.visiting.leave(id);
	}

	fn object(&mut self, object: &ObjectRef) {
		let temporary = object.debug_table();
		if temporary.is_none() && object.properties.is_none() {
			self.object_head(object, 0);
			self.out.push_str("</object>");
			return;
		}

		let id = object_identity(object);
		if !self.visiting.enter(id) {
			self.out.push_str("<recursion />");
			return;
		}

		match (&temporary, &object.properties) {
			(Some(table), _) => self.object_body(object, table),
			(None, Some(shared)) => {
				let access = self.options.access;
				if access.read(shared, |table| self.object_body(object, table)).is_err() {
					tracing::warn!(handle = object.handle, "object properties unreadable while rendering markup");
					self.fault();
				}
			}
			(None, None) => {}
		}

		self.visiting.leave(id);
	}

	fn object_body(&mut self, object: &ObjectRef, table: &Table) {
		self.object_head(object, table.len());
		for (key, value) in table.iter() {
			self.property_open(key);
			self.value(value);
			self.out.push_str("</property>");
		}
		self.out.push_str("</object>");
	}

	fn object_head(&mut self, object: &ObjectRef, count: usize) {
		let class = object.class_name.as_deref().unwrap_or("");
		let _ = write!(self.out, "<object class=\"{}\" id=\"{}\" num=\"{count}\">", escape_attr(class), object.handle);
	}

	fn property_open(&mut self, key: &Key) {
		let Key::Name(name) = key else {
			let _ = write!(self.out, "<property name=\"{key}\">");
			return;
		};

		let field = unmangle(name);
		match (field.visibility, field.class) {
			(Visibility::Private, Some(class)) => {
				let _ = write!(
					self.out,
					"<property name=\"{}\" class=\"{}\" protection=\"private\">",
					escape_attr(field.name),
					escape_attr(class)
				);
			}
			(visibility, _) => {
				let _ = write!(self.out, "<property name=\"{}\" protection=\"{}\">", escape_attr(field.name), visibility.as_str());
			}
		}
	}

	fn fault(&mut self) {
		self.out.push_str("<error severity=\"error\" />");
	}
}

/// Escape text for use inside a double-quoted markup attribute.
pub fn escape_attr(input: &str) -> Cow<'_, str> {
	if !input.chars().any(|ch| matches!(ch, '&' | '<' | '>' | '"' | '\'') || ch.is_control()) {
		return Cow::Borrowed(input);
	}

	let mut out = String::with_capacity(input.len() + 8);
	for ch in input.chars() {
		match ch {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&apos;"),
			'\t' | '\n' | '\r' => {
				let _ = write!(out, "&#x{:x};", u32::from(ch));
			}
			c if c.is_control() => out.push('\u{FFFD}'),
			c => out.push(c),
		}
	}
	Cow::Owned(out)
}
