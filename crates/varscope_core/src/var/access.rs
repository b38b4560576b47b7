use std::cell::RefCell;

use crate::var::Table;

/// How container reads are performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessMode {
	/// Unguarded reads for a quiescent store.
	#[default]
	Normal,
	/// Guarded reads for inspection from a re-entrant context, where a table may be
	/// mid-update; unreadable tables become [`AccessFault`]s.
	FaultTolerant,
}

/// A guarded read could not obtain the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessFault;

impl AccessMode {
	/// Run `read` against a borrowed table.
	///
	/// The borrow only lives for the duration of `read`.
	///
	/// # Panics
	///
	/// In [`AccessMode::Normal`], panics if the table is mutably borrowed elsewhere.
	pub fn read<T>(self, table: &RefCell<Table>, read: impl FnOnce(&Table) -> T) -> Result<T, AccessFault> {
		match self {
			Self::Normal => Ok(read(&table.borrow())),
			Self::FaultTolerant => match table.try_borrow() {
				Ok(guard) => Ok(read(&guard)),
				Err(_) => Err(AccessFault),
			},
		}
	}

	/// Render mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Normal => "normal",
			Self::FaultTolerant => "fault-tolerant",
		}
	}
}

#[cfg(test)]
mod tests;
