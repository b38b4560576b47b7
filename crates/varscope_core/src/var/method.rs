use crate::var::{Result, VarError};

const NAMESPACE_ROOT: char = '\\';

/// Parsed `Class::method` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMethod {
	/// Class name without a leading namespace-root separator.
	pub class: String,
	/// Method name.
	pub method: String,
}

impl ClassMethod {
	/// Parse `Class::method`, splitting at the first `::`.
	///
	/// Input containing `#` or a space is reserved for other command syntax and rejected,
	/// as are an empty class or an empty method.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || VarError::InvalidClassMethod { input: input.to_owned() };

		if input.contains('#') || input.contains(' ') {
			return Err(invalid());
		}

		let (class, method) = input.split_once("::").ok_or_else(invalid)?;
		let class = class.strip_prefix(NAMESPACE_ROOT).unwrap_or(class);
		if class.is_empty() || method.is_empty() {
			return Err(invalid());
		}

		Ok(Self {
			class: class.to_owned(),
			method: method.to_owned(),
		})
	}
}

#[cfg(test)]
mod tests;
