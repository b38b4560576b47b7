use std::fmt::{self, Write};

use super::{ELLIPSIS, FAULT_MARKER, RECURSION_MARKER, RenderOptions, VisitSet, array_identity, format_float, object_identity};
use crate::var::{ArrayRef, Key, ObjectRef, Resource, Table, Value, Visibility, unmangle};

/// Render a value on one line, spending at most about `options.budget` bytes.
///
/// Returns the remaining budget, which is negative when output was truncated.
pub fn render_flat(value: &Value, options: &RenderOptions, visiting: &mut VisitSet, out: &mut String) -> i64 {
	let mut writer = FlatWriter { options, visiting, out };
	writer.value(value, options.budget)
}

#[derive(Clone, Copy)]
enum KeyStyle {
	Element,
	Property,
}

struct FlatWriter<'a> {
	options: &'a RenderOptions,
	visiting: &'a mut VisitSet,
	out: &'a mut String,
}

impl FlatWriter<'_> {
	fn emit(&mut self, args: fmt::Arguments<'_>) -> i64 {
		let before = self.out.len();
		let _ = self.out.write_fmt(args);
		i64::try_from(self.out.len() - before).unwrap_or(i64::MAX)
	}

	fn value(&mut self, value: &Value, len: i64) -> i64 {
		let spent = match value {
			Value::Null => self.emit(format_args!("null")),
			Value::Bool(flag) => self.emit(format_args!("bool({flag})")),
			Value::Int(number) => self.emit(format_args!("int({number})")),
			Value::Float(number) => {
				let text = format_float(*number, self.options.precision);
				self.emit(format_args!("float({text})"))
			}
			Value::Str(bytes) => return self.string(bytes, len),
			Value::Array(table) => return self.array(table, len),
			Value::Object(object) => return self.object(object, len),
			Value::Resource(Resource { id, type_name }) => {
				let type_name = type_name.as_deref().unwrap_or("unknown");
				self.emit(format_args!("resource(#{id}) \"{type_name}\""))
			}
		};
		len.saturating_sub(spent)
	}

	fn string(&mut self, bytes: &[u8], len: i64) -> i64 {
		let total = i64::try_from(bytes.len()).unwrap_or(i64::MAX);
		let (shown, tail) = if total > len.saturating_add(3) {
			let keep = usize::try_from(len.max(3)).unwrap_or(usize::MAX);
			(&bytes[..keep.min(bytes.len())], ELLIPSIS)
		} else {
			(bytes, "")
		};

		let text = String::from_utf8_lossy(shown);
		len.saturating_sub(self.emit(format_args!("string({total}) \"{text}{tail}\"")))
	}

	fn array(&mut self, table: &ArrayRef, len: i64) -> i64 {
		let id = array_identity(table);
		if !self.visiting.enter(id) {
			return len.saturating_sub(self.emit(format_args!("{RECURSION_MARKER}")));
		}

		let access = self.options.access;
		let len = match access.read(table, |entries| {
			let len = len.saturating_sub(self.emit(format_args!("array({}) [", entries.len())));
			let len = self.entries(entries, len, KeyStyle::Element);
			len.saturating_sub(self.emit(format_args!("]")))
		}) {
			Ok(len) => len,
			Err(_) => {
				tracing::warn!("array table unreadable while rendering");
				len.saturating_sub(self.emit(format_args!("{FAULT_MARKER}")))
			}
		};

		self.visiting.leave(id);
		len
	}

	fn object(&mut self, object: &ObjectRef, len: i64) -> i64 {
		let temporary = object.debug_table();
		if temporary.is_none() && object.properties.is_none() {
			let len = len.saturating_sub(self.object_head(object, 0));
			return len.saturating_sub(self.emit(format_args!("]")));
		}

		let id = object_identity(object);
		if !self.visiting.enter(id) {
			return len.saturating_sub(self.emit(format_args!("{RECURSION_MARKER}")));
		}

		let len = match (&temporary, &object.properties) {
			(Some(table), _) => self.object_body(object, table, len),
			(None, Some(shared)) => {
				let access = self.options.access;
				match access.read(shared, |table| self.object_body(object, table, len)) {
					Ok(len) => len,
					Err(_) => {
						tracing::warn!(handle = object.handle, "object properties unreadable while rendering");
						len.saturating_sub(self.emit(format_args!("{FAULT_MARKER}")))
					}
				}
			}
			(None, None) => len,
		};

		self.visiting.leave(id);
		len
	}

	fn object_body(&mut self, object: &ObjectRef, table: &Table, len: i64) -> i64 {
		let len = len.saturating_sub(self.object_head(object, table.len()));
		let len = self.entries(table, len, KeyStyle::Property);
		len.saturating_sub(self.emit(format_args!("]")))
	}

	fn object_head(&mut self, object: &ObjectRef, count: usize) -> i64 {
		match object.class_name.as_deref() {
			Some(class) => self.emit(format_args!("{class}#{} ({count}) [", object.handle)),
			None => self.emit(format_args!("Unknown class#{} ({count}) [", object.handle)),
		}
	}

	fn entries(&mut self, table: &Table, mut len: i64, style: KeyStyle) -> i64 {
		for (position, (key, value)) in table.iter().enumerate() {
			if position > 0 {
				len = len.saturating_sub(self.emit(format_args!(", ")));
			}
			if len < 0 {
				self.emit(format_args!("{ELLIPSIS}"));
				break;
			}

			len = len.saturating_sub(self.key(key, style));
			len = self.value(value, len);
		}
		len
	}

	fn key(&mut self, key: &Key, style: KeyStyle) -> i64 {
		match (key, style) {
			(Key::Index(index), _) => self.emit(format_args!("{index} => ")),
			(Key::Name(name), KeyStyle::Element) => self.emit(format_args!("\"{name}\" => ")),
			(Key::Name(name), KeyStyle::Property) => {
				let field = unmangle(name);
				match (field.visibility, field.class) {
					(Visibility::Private, Some(class)) => self.emit(format_args!("\"{class}:{}\" => ", field.name)),
					_ => self.emit(format_args!("\"{}\" => ", field.name)),
				}
			}
		}
	}
}
