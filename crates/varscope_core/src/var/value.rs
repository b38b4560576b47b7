use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::var::Key;

/// Shared, aliasable handle to an array table.
pub type ArrayRef = Rc<RefCell<Table>>;
/// Shared handle to an object record.
pub type ObjectRef = Rc<Object>;
/// On-demand provider of an object's temporary debug table.
pub type DebugInfoFn = Box<dyn Fn(&Object) -> Table>;

/// One runtime value in the variable store.
#[derive(Debug, Clone)]
pub enum Value {
	/// Absent value.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Integer scalar.
	Int(i64),
	/// Floating-point scalar.
	Float(f64),
	/// Binary-safe string.
	Str(Box<[u8]>),
	/// Ordered key/value container.
	Array(ArrayRef),
	/// Record with named fields.
	Object(ObjectRef),
	/// Opaque resource handle.
	Resource(Resource),
}

impl Value {
	/// Build a string value from text.
	pub fn str(text: &str) -> Self {
		Self::Str(text.as_bytes().into())
	}

	/// Wrap a table in a fresh shared array.
	pub fn array(table: Table) -> Self {
		Self::Array(Rc::new(RefCell::new(table)))
	}

	/// Wrap an object in a fresh shared handle.
	pub fn object(object: Object) -> Self {
		Self::Object(Rc::new(object))
	}

	/// Stable lowercase kind label.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Float(_) => "float",
			Self::Str(_) => "string",
			Self::Array(_) => "array",
			Self::Object(_) => "object",
			Self::Resource(_) => "resource",
		}
	}

	/// Child table used when a path descends through this value.
	///
	/// Objects without properties yield `None`, as do scalars and resources.
	pub fn child_table(&self) -> Option<&ArrayRef> {
		match self {
			Self::Array(table) => Some(table),
			Self::Object(object) => object.properties.as_ref(),
			_ => None,
		}
	}

	/// Whether a path may descend through this value.
	pub fn is_container(&self) -> bool {
		matches!(self, Self::Array(_) | Self::Object(_))
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::str(value)
	}
}

/// Insertion-ordered key/value table with point lookup.
#[derive(Debug, Clone, Default)]
pub struct Table {
	entries: Vec<(Key, Value)>,
	index: HashMap<Key, usize>,
	next_index: i64,
}

impl Table {
	/// Create an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or replace a value; replacement keeps the original position.
	pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
		let key = key.into();
		let value = value.into();
		if let Key::Index(index) = key
			&& index >= self.next_index
		{
			self.next_index = index.saturating_add(1);
		}

		if let Some(&slot) = self.index.get(&key) {
			self.entries[slot].1 = value;
			return;
		}

		self.index.insert(key.clone(), self.entries.len());
		self.entries.push((key, value));
	}

	/// Append a value under the next free integer index.
	pub fn push(&mut self, value: impl Into<Value>) {
		let key = Key::Index(self.next_index);
		self.insert(key, value);
	}

	/// Look up a value by exact key.
	pub fn get(&self, key: &Key) -> Option<&Value> {
		self.index.get(key).map(|&slot| &self.entries[slot].1)
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the table has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
		self.entries.iter().map(|(key, value)| (key, value))
	}

	/// Iterate keys in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &Key> {
		self.entries.iter().map(|(key, _)| key)
	}
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Table {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut table = Self::new();
		for (key, value) in iter {
			table.insert(key, value);
		}
		table
	}
}

/// Record value with a class, a handle, and optional introspectable state.
pub struct Object {
	/// Declared class name, when known.
	pub class_name: Option<Box<str>>,
	/// Interpreter object handle.
	pub handle: u32,
	/// Property table used for path resolution and default rendering.
	pub properties: Option<ArrayRef>,
	debug_info: Option<DebugInfoFn>,
}

impl Object {
	/// Create an object with a property table.
	pub fn new(class_name: Option<&str>, handle: u32, properties: Table) -> Self {
		Self {
			class_name: class_name.map(Into::into),
			handle,
			properties: Some(Rc::new(RefCell::new(properties))),
			debug_info: None,
		}
	}

	/// Create an object sharing an existing property table.
	pub fn with_shared_properties(class_name: Option<&str>, handle: u32, properties: ArrayRef) -> Self {
		Self {
			class_name: class_name.map(Into::into),
			handle,
			properties: Some(properties),
			debug_info: None,
		}
	}

	/// Create an object without introspectable state.
	pub fn opaque(class_name: Option<&str>, handle: u32) -> Self {
		Self {
			class_name: class_name.map(Into::into),
			handle,
			properties: None,
			debug_info: None,
		}
	}

	/// Attach a provider that synthesizes the table shown when rendering.
	pub fn with_debug_info(mut self, provider: impl Fn(&Object) -> Table + 'static) -> Self {
		self.debug_info = Some(Box::new(provider));
		self
	}

	/// Build the temporary debug table, if a provider is attached.
	pub fn debug_table(&self) -> Option<Table> {
		self.debug_info.as_ref().map(|provider| provider(self))
	}
}

impl fmt::Debug for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Object")
			.field("class_name", &self.class_name)
			.field("handle", &self.handle)
			.field("properties", &self.properties.as_ref().map(Rc::as_ptr))
			.field("debug_info", &self.debug_info.is_some())
			.finish()
	}
}

/// Opaque resource handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
	/// Numeric resource identifier.
	pub id: i64,
	/// Registered resource type, when known.
	pub type_name: Option<Box<str>>,
}

impl Resource {
	/// Create a resource handle.
	pub fn new(id: i64, type_name: Option<&str>) -> Self {
		Self {
			id,
			type_name: type_name.map(Into::into),
		}
	}
}
