use serde::Serialize;
use varscope::var::{AccessMode, RenderOptions, Snapshot, VarError};

/// Build render options from snapshot defaults and command-line overrides.
pub(crate) fn render_options(snapshot: &Snapshot, base: RenderOptions, precision: Option<usize>, budget: Option<i64>) -> RenderOptions {
	RenderOptions {
		precision: precision.or(snapshot.precision).unwrap_or(base.precision),
		budget: budget.unwrap_or(base.budget),
		..base
	}
}

/// Map the `--fault-tolerant` flag onto an access mode.
pub(crate) fn access_mode(fault_tolerant: bool) -> AccessMode {
	if fault_tolerant { AccessMode::FaultTolerant } else { AccessMode::Normal }
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => tracing::error!(%err, "failed to serialize json output"),
	}
}

/// JSON row for one diagnostic.
#[derive(Serialize)]
pub(crate) struct ReportJson {
	kind: &'static str,
	path: Option<String>,
	message: String,
}

impl From<&VarError> for ReportJson {
	fn from(err: &VarError) -> Self {
		Self {
			kind: err.kind(),
			path: err.path().map(str::to_owned),
			message: err.to_string(),
		}
	}
}
