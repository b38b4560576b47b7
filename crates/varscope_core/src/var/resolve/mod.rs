use std::cell::RefCell;

use crate::var::{AccessMode, ArrayRef, Key, PathStep, Result, Segment, Table, Value, VarError, VarPath, property_key};

/// Runtime switches for path resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
	/// Suppress `Undefined` reports for missing keys.
	pub silent: bool,
	/// Container read discipline.
	pub access: AccessMode,
}

/// One resolved value handed to the leaf handler.
#[derive(Debug, Clone, Copy)]
pub struct Leaf<'a> {
	/// Concrete path with every wildcard replaced by the visited key.
	pub path: &'a str,
	/// Key under which `value` is stored in `owner`.
	pub key: &'a Key,
	/// Container holding the value.
	pub owner: &'a Table,
	/// Resolved value.
	pub value: &'a Value,
}

/// Outcome of one resolve call.
#[derive(Debug)]
pub struct Resolution {
	/// Expression that was resolved.
	pub path: String,
	/// Number of leaves handed to the handler.
	pub leaves: usize,
	/// Number of leaves the handler accepted.
	pub succeeded: usize,
	/// Diagnostics collected from failed branches, in visit order.
	pub reports: Vec<VarError>,
}

impl Resolution {
	fn new(path: &str) -> Self {
		Self {
			path: path.to_owned(),
			leaves: 0,
			succeeded: 0,
			reports: Vec::new(),
		}
	}

	/// Whether any branch succeeded.
	pub fn is_success(&self) -> bool {
		self.succeeded > 0
	}

	/// Convert to a result: the success count, or the first report, or `NoMatch`.
	pub fn into_result(self) -> Result<usize> {
		if self.is_success() {
			return Ok(self.succeeded);
		}
		match self.reports.into_iter().next() {
			Some(err) => Err(err),
			None => Err(VarError::NoMatch { path: self.path }),
		}
	}
}

/// Parse `input` and resolve it against `root`.
///
/// Only grammar violations are returned as `Err`; lookup failures land in
/// [`Resolution::reports`].
pub fn parse_variable<F>(input: &str, root: &ArrayRef, options: &ResolveOptions, handler: F) -> Result<Resolution>
where
	F: FnMut(&Leaf<'_>) -> Result<()>,
{
	let path = VarPath::parse(input)?;
	Ok(resolve(&path, root, options, handler))
}

/// Walk `path` from the variable table `root`, calling `handler` for every leaf.
///
/// Wildcards fan out over every entry of the container at that level. Branch failures do
/// not stop sibling branches; the call succeeds when any leaf is accepted.
pub fn resolve<F>(path: &VarPath, root: &ArrayRef, options: &ResolveOptions, mut handler: F) -> Resolution
where
	F: FnMut(&Leaf<'_>) -> Result<()>,
{
	tracing::debug!(path = path.as_str(), access = options.access.as_str(), silent = options.silent, "resolving variable path");

	let mut walk = Walk {
		path,
		options,
		handler: &mut handler,
		resolution: Resolution::new(path.as_str()),
	};
	walk.step(root, 0, "");

	let resolution = walk.resolution;
	tracing::debug!(
		path = path.as_str(),
		leaves = resolution.leaves,
		succeeded = resolution.succeeded,
		reports = resolution.reports.len(),
		"resolved variable path"
	);
	resolution
}

struct Walk<'a> {
	path: &'a VarPath,
	options: &'a ResolveOptions,
	handler: &'a mut dyn FnMut(&Leaf<'_>) -> Result<()>,
	resolution: Resolution,
}

impl Walk<'_> {
	fn step(&mut self, container: &RefCell<Table>, index: usize, prefix: &str) -> bool {
		let segment = self.path.segments()[index];
		let last = index + 1 == self.path.segments().len();

		let access = self.options.access;
		let read = access.read(container, |table| match segment.step {
			PathStep::Wildcard => self.fan_out(table, segment, index, prefix, last),
			PathStep::Root | PathStep::Index | PathStep::Property => self.lookup(table, segment, index, prefix, last),
		});

		read.unwrap_or_else(|_| {
			let path = if prefix.is_empty() { self.path.as_str() } else { prefix };
			tracing::warn!(path, "container unreadable while resolving");
			self.report(VarError::AccessFault { path: path.to_owned() });
			false
		})
	}

	fn lookup(&mut self, table: &Table, segment: Segment, index: usize, prefix: &str, last: bool) -> bool {
		let var_path = self.path;
		let literal = var_path.literal(&segment);
		let path = format!("{prefix}{}", var_path.text(&segment));

		let key = match segment.step {
			PathStep::Root => Key::name(literal),
			_ => Key::from_literal(literal),
		};
		let found = match table.get(&key) {
			Some(value) => Some((key, value)),
			None if segment.step == PathStep::Property => find_field(table, literal),
			None => None,
		};

		let Some((key, value)) = found else {
			tracing::debug!(path = path.as_str(), "key not found");
			if !self.options.silent {
				self.report(VarError::Undefined { path });
			}
			return false;
		};

		self.arrive(table, &key, value, index, &path, last)
	}

	fn fan_out(&mut self, table: &Table, segment: Segment, index: usize, prefix: &str, last: bool) -> bool {
		let mut any = false;
		for (key, value) in table.iter() {
			let path = format!("{prefix}{}{}{}", segment.opener.prefix(), key.path_label(), segment.opener.suffix());
			let ok = if !last && !value.is_container() {
				tracing::trace!(path = path.as_str(), kind = value.kind(), "wildcard skips non-container");
				false
			} else {
				self.arrive(table, key, value, index, &path, last)
			};
			any |= ok;
		}
		any
	}

	fn arrive(&mut self, owner: &Table, key: &Key, value: &Value, index: usize, path: &str, last: bool) -> bool {
		if last {
			return self.leaf(path, key, owner, value);
		}

		match value.child_table() {
			Some(child) => self.step(child, index + 1, path),
			None if value.is_container() => self.step(&RefCell::new(Table::new()), index + 1, path),
			None => {
				self.report(VarError::NotIterable { path: path.to_owned() });
				false
			}
		}
	}

	fn leaf(&mut self, path: &str, key: &Key, owner: &Table, value: &Value) -> bool {
		self.resolution.leaves += 1;
		tracing::trace!(path, kind = value.kind(), "leaf");

		match (self.handler)(&Leaf { path, key, owner, value }) {
			Ok(()) => {
				self.resolution.succeeded += 1;
				true
			}
			Err(err) => {
				self.report(err);
				false
			}
		}
	}

	fn report(&mut self, err: VarError) {
		self.resolution.reports.push(err);
	}
}

/// Find a property stored under a mangled key by its plain field name.
fn find_field<'t>(table: &'t Table, name: &str) -> Option<(Key, &'t Value)> {
	table.iter().find_map(|(key, value)| match key {
		Key::Name(raw) if property_key(raw) == name => Some((key.clone(), value)),
		_ => None,
	})
}
