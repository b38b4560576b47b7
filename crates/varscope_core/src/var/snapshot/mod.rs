use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;
use serde_json::{Map, Value as Json};

use crate::var::{ArrayRef, Key, Object, Resource, Result, Table, Value, VarError};

mod compression;

pub use compression::{Compression, ZSTD_MAGIC, decode_bytes};

const TAG_REF: &str = "$ref";
const TAG_ARRAY: &str = "$array";
const TAG_OBJECT: &str = "$object";
const TAG_RESOURCE: &str = "$resource";
const TAG_ANCHOR: &str = "$anchor";
const TAG_ID: &str = "$id";
const TAG_PROPS: &str = "$props";

#[derive(Deserialize)]
struct Document {
	#[serde(default)]
	precision: Option<usize>,
	#[serde(default)]
	vars: Map<String, Json>,
}

/// Variable table loaded from a JSON snapshot document.
///
/// Plain JSON maps to scalars and arrays. Tagged nodes describe objects, resources and
/// shared or cyclic references:
///
/// ```json
/// { "$array": [1, 2], "$anchor": "list" }
/// { "$object": "User", "$id": 3, "$props": { "name": "ada" } }
/// { "$resource": "stream", "$id": 5 }
/// { "$ref": "list" }
/// ```
#[derive(Debug)]
pub struct Snapshot {
	/// Compression mode detected for the source bytes.
	pub compression: Compression,
	/// Display precision recorded by the producer, if any.
	pub precision: Option<usize>,
	vars: ArrayRef,
}

impl Snapshot {
	/// Read and decode a snapshot file from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let raw = fs::read(path)?;
		Self::from_bytes(raw)
	}

	/// Decode a snapshot from raw, possibly compressed, bytes.
	pub fn from_bytes(raw: Vec<u8>) -> Result<Self> {
		let (compression, bytes) = decode_bytes(raw)?;
		let document: Document = serde_json::from_slice(&bytes)?;
		let vars = build_vars(&document.vars)?;

		tracing::debug!(
			compression = compression.as_str(),
			vars = document.vars.len(),
			precision = document.precision,
			"snapshot loaded"
		);

		Ok(Self {
			compression,
			precision: document.precision,
			vars,
		})
	}

	/// Root variable table.
	pub fn vars(&self) -> &ArrayRef {
		&self.vars
	}

	/// Look up a root variable by name.
	pub fn get(&self, name: &str) -> Option<Value> {
		self.vars.borrow().get(&Key::name(name)).cloned()
	}
}

fn build_vars(vars: &Map<String, Json>) -> Result<ArrayRef> {
	let mut anchors = Anchors::default();
	for (name, node) in vars {
		anchors.collect(node, &format!("/vars/{name}"))?;
	}

	let mut table = Table::new();
	for (name, node) in vars {
		let value = anchors.build(node, &format!("/vars/{name}"))?;
		table.insert(Key::name(name.as_str()), value);
	}
	Ok(Rc::new(RefCell::new(table)))
}

/// Anchored containers, created empty before any node is built so references can point
/// forward or at an ancestor.
#[derive(Default)]
struct Anchors {
	shells: HashMap<String, Value>,
}

impl Anchors {
	fn collect(&mut self, node: &Json, at: &str) -> Result<()> {
		match node {
			Json::Array(items) => {
				for (idx, item) in items.iter().enumerate() {
					self.collect(item, &format!("{at}/{idx}"))?;
				}
			}
			Json::Object(map) => {
				if let Some(name) = anchor_name(map, at)? {
					let shell = shell(map, at)?;
					if self.shells.insert(name.to_owned(), shell).is_some() {
						return Err(VarError::DuplicateAnchor { name: name.to_owned() });
					}
				}
				for (key, child) in map {
					self.collect(child, &format!("{at}/{key}"))?;
				}
			}
			_ => {}
		}
		Ok(())
	}

	fn build(&self, node: &Json, at: &str) -> Result<Value> {
		match node {
			Json::Null => Ok(Value::Null),
			Json::Bool(flag) => Ok(Value::Bool(*flag)),
			Json::Number(number) => Ok(match number.as_i64() {
				Some(int) => Value::Int(int),
				None => Value::Float(number.as_f64().unwrap_or(f64::NAN)),
			}),
			Json::String(text) => Ok(Value::str(text)),
			Json::Array(_) => Ok(Value::array(self.table(node, at)?)),
			Json::Object(map) => self.build_tagged(map, at),
		}
	}

	fn build_tagged(&self, map: &Map<String, Json>, at: &str) -> Result<Value> {
		if let Some(target) = map.get(TAG_REF) {
			let Json::String(name) = target else {
				return Err(shape(at, "$ref must name an anchor"));
			};
			return self.shells.get(name).cloned().ok_or_else(|| VarError::UnknownAnchor { name: name.clone() });
		}

		if let Some(entries) = map.get(TAG_ARRAY) {
			let table = self.table(entries, &format!("{at}/{TAG_ARRAY}"))?;
			return Ok(match self.anchored(map, at)? {
				Some(Value::Array(shell)) => {
					*shell.borrow_mut() = table;
					Value::Array(shell)
				}
				_ => Value::array(table),
			});
		}

		if map.contains_key(TAG_OBJECT) {
			let props = match map.get(TAG_PROPS) {
				Some(props) => Some(self.table(props, &format!("{at}/{TAG_PROPS}"))?),
				None => None,
			};

			if let Some(Value::Object(shell)) = self.anchored(map, at)? {
				if let (Some(shared), Some(props)) = (&shell.properties, props) {
					*shared.borrow_mut() = props;
				}
				return Ok(Value::Object(shell));
			}

			let (class_name, handle) = object_header(map, at)?;
			return Ok(Value::object(match props {
				Some(props) => Object::new(class_name, handle, props),
				None => Object::opaque(class_name, handle),
			}));
		}

		if let Some(kind) = map.get(TAG_RESOURCE) {
			let type_name = optional_str(kind).ok_or_else(|| shape(at, "$resource must be a string or null"))?;
			let id = match map.get(TAG_ID) {
				Some(id) => id.as_i64().ok_or_else(|| shape(at, "$id must be an integer"))?,
				None => 0,
			};
			return Ok(Value::Resource(Resource::new(id, type_name)));
		}

		Ok(Value::array(self.entries(map, at)?))
	}

	fn table(&self, node: &Json, at: &str) -> Result<Table> {
		match node {
			Json::Array(items) => {
				let mut table = Table::new();
				for (idx, item) in items.iter().enumerate() {
					table.push(self.build(item, &format!("{at}/{idx}"))?);
				}
				Ok(table)
			}
			Json::Object(map) => self.entries(map, at),
			_ => Err(shape(at, "expected a json array or object")),
		}
	}

	fn entries(&self, map: &Map<String, Json>, at: &str) -> Result<Table> {
		let mut table = Table::new();
		for (key, child) in map {
			table.insert(Key::from_literal(key), self.build(child, &format!("{at}/{key}"))?);
		}
		Ok(table)
	}

	fn anchored(&self, map: &Map<String, Json>, at: &str) -> Result<Option<Value>> {
		Ok(anchor_name(map, at)?.and_then(|name| self.shells.get(name).cloned()))
	}
}

fn anchor_name<'a>(map: &'a Map<String, Json>, at: &str) -> Result<Option<&'a str>> {
	match map.get(TAG_ANCHOR) {
		None => Ok(None),
		Some(Json::String(name)) => Ok(Some(name.as_str())),
		Some(_) => Err(shape(at, "$anchor must be a string")),
	}
}

fn shell(map: &Map<String, Json>, at: &str) -> Result<Value> {
	if map.contains_key(TAG_ARRAY) {
		return Ok(Value::array(Table::new()));
	}

	if map.contains_key(TAG_OBJECT) {
		let (class_name, handle) = object_header(map, at)?;
		let object = if map.contains_key(TAG_PROPS) {
			Object::with_shared_properties(class_name, handle, Rc::new(RefCell::new(Table::new())))
		} else {
			Object::opaque(class_name, handle)
		};
		return Ok(Value::object(object));
	}

	Err(shape(at, "only $array and $object nodes may carry an $anchor"))
}

fn object_header<'a>(map: &'a Map<String, Json>, at: &str) -> Result<(Option<&'a str>, u32)> {
	let class_name = map
		.get(TAG_OBJECT)
		.and_then(optional_str)
		.ok_or_else(|| shape(at, "$object must be a class name or null"))?;
	let handle = match map.get(TAG_ID) {
		Some(id) => id
			.as_u64()
			.and_then(|id| u32::try_from(id).ok())
			.ok_or_else(|| shape(at, "$id must be an unsigned 32-bit integer"))?,
		None => 0,
	};
	Ok((class_name, handle))
}

fn optional_str(node: &Json) -> Option<Option<&str>> {
	match node {
		Json::String(text) => Some(Some(text.as_str())),
		Json::Null => Some(None),
		_ => None,
	}
}

fn shape(at: &str, reason: &str) -> VarError {
	VarError::SnapshotShape {
		at: at.to_owned(),
		reason: reason.to_owned(),
	}
}
