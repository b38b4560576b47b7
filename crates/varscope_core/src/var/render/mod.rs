use std::collections::HashSet;
use std::rc::Rc;

use crate::var::{AccessMode, ArrayRef, ObjectRef, Value};

mod flat;
mod markup;

pub use flat::render_flat;
pub use markup::{escape_attr, render_markup};

/// Marker written where rendering re-enters a container already on the stack.
pub const RECURSION_MARKER: &str = "** RECURSION **";
/// Marker written for a node whose table could not be read.
pub const FAULT_MARKER: &str = "???";
/// Marker written where the flat budget ran out.
pub const ELLIPSIS: &str = "...";
/// Largest number of significant float digits honored by [`format_float`].
pub const MAX_FLOAT_PRECISION: usize = 500;

/// Rendering limits and formatting settings.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
	/// Significant digits for floats.
	pub precision: usize,
	/// Flat-mode output budget in bytes.
	pub budget: i64,
	/// Container read discipline.
	pub access: AccessMode,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			precision: 14,
			budget: 4096,
			access: AccessMode::Normal,
		}
	}
}

impl RenderOptions {
	/// Preset that fits a flat preview on one terminal line.
	pub fn for_terminal(width: usize) -> Self {
		Self {
			budget: i64::try_from(width).unwrap_or(i64::MAX),
			..Self::default()
		}
	}
}

/// Identities of containers currently being rendered.
///
/// Entries are added when a container is entered and removed when it is left, so the set
/// is empty again after every top-level render.
#[derive(Debug, Default)]
pub struct VisitSet {
	active: HashSet<usize>,
}

impl VisitSet {
	/// Create an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of containers currently on the render stack.
	pub fn len(&self) -> usize {
		self.active.len()
	}

	/// Whether no container is on the render stack.
	pub fn is_empty(&self) -> bool {
		self.active.is_empty()
	}

	fn enter(&mut self, id: usize) -> bool {
		self.active.insert(id)
	}

	fn leave(&mut self, id: usize) {
		self.active.remove(&id);
	}
}

fn array_identity(table: &ArrayRef) -> usize {
	Rc::as_ptr(table) as *const () as usize
}

fn object_identity(object: &ObjectRef) -> usize {
	Rc::as_ptr(object) as *const () as usize
}

/// Owns options and a visit set for repeated renders.
#[derive(Debug, Default)]
pub struct Renderer {
	/// Options applied to every render.
	pub options: RenderOptions,
	visiting: VisitSet,
}

impl Renderer {
	/// Create a renderer.
	pub fn new(options: RenderOptions) -> Self {
		Self {
			options,
			visiting: VisitSet::new(),
		}
	}

	/// Render a value in flat mode.
	pub fn flat(&mut self, value: &Value) -> String {
		let mut out = String::new();
		render_flat(value, &self.options, &mut self.visiting, &mut out);
		out
	}

	/// Render a value in structured markup mode.
	pub fn markup(&mut self, value: &Value) -> String {
		let mut out = String::new();
		render_markup(value, &self.options, &mut self.visiting, &mut out);
		out
	}

	/// Containers still marked as being rendered.
	pub fn visiting(&self) -> &VisitSet {
		&self.visiting
	}
}

/// Format a float with `%G`-style significant digits.
///
/// Uses fixed notation unless the decimal exponent is below -4 or at least `precision`,
/// strips trailing zeros, and keeps one fractional digit in the exponent form (`1.0E+25`).
/// Precision is clamped to `1..=MAX_FLOAT_PRECISION`.
pub fn format_float(value: f64, precision: usize) -> String {
	if value.is_nan() {
		return "NAN".to_owned();
	}
	if value.is_infinite() {
		return if value > 0.0 { "INF" } else { "-INF" }.to_owned();
	}
	if value == 0.0 {
		return if value.is_sign_negative() { "-0" } else { "0" }.to_owned();
	}

	let precision = precision.clamp(1, MAX_FLOAT_PRECISION);
	let scientific = format!("{:.*e}", precision - 1, value);
	let Some((mantissa, exponent)) = scientific.split_once('e') else {
		return scientific;
	};
	let exponent = exponent.parse::<i64>().unwrap_or(0);
	let digits = i64::try_from(precision).unwrap_or(i64::MAX);

	if exponent < -4 || exponent >= digits {
		let mut mantissa = trim_fraction(mantissa).to_owned();
		if !mantissa.contains('.') {
			mantissa.push_str(".0");
		}
		let sign = if exponent < 0 { '-' } else { '+' };
		return format!("{mantissa}E{sign}{}", exponent.unsigned_abs());
	}

	let decimals = usize::try_from(digits - 1 - exponent).unwrap_or(0);
	trim_fraction(&format!("{value:.decimals$}")).to_owned()
}

fn trim_fraction(text: &str) -> &str {
	if text.contains('.') {
		text.trim_end_matches('0').trim_end_matches('.')
	} else {
		text
	}
}

#[cfg(test)]
mod tests;
