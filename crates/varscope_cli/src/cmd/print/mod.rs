use std::path::PathBuf;

use serde::Serialize;
use varscope::var::{RenderOptions, Renderer, ResolveOptions, Snapshot, parse_variable};

use crate::cmd::util::{ReportJson, access_mode, emit_json, render_options};

#[derive(clap::Args)]
pub struct Args {
	pub snapshot: PathBuf,
	pub expr: String,
	#[arg(long)]
	pub budget: Option<i64>,
	#[arg(long)]
	pub precision: Option<usize>,
	#[arg(long)]
	pub silent: bool,
	#[arg(long = "fault-tolerant")]
	pub fault_tolerant: bool,
	#[arg(long)]
	pub json: bool,
}

/// Resolve a path expression and print every leaf as `path = value`.
pub fn run(args: Args) -> varscope::var::Result<()> {
	let Args {
		snapshot: path,
		expr,
		budget,
		precision,
		silent,
		fault_tolerant,
		json,
	} = args;

	let snapshot = Snapshot::open(&path)?;
	let access = access_mode(fault_tolerant);
	let options = render_options(&snapshot, RenderOptions { access, ..RenderOptions::default() }, precision, budget);
	let mut renderer = Renderer::new(options);

	let mut leaves = Vec::new();
	let resolution = parse_variable(&expr, snapshot.vars(), &ResolveOptions { silent, access }, |leaf| {
		leaves.push(LeafJson {
			path: leaf.path.to_owned(),
			key: leaf.key.path_label(),
			kind: leaf.value.kind(),
			value: renderer.flat(leaf.value),
		});
		Ok(())
	})?;

	if json {
		emit_json(&PrintJson {
			expr: expr.clone(),
			leaves: &leaves,
			succeeded: resolution.succeeded,
			reports: resolution.reports.iter().map(ReportJson::from).collect(),
		});
	} else {
		for leaf in &leaves {
			println!("{} = {}", leaf.path, leaf.value);
		}
	}

	let failed = !resolution.is_success();
	for report in resolution.reports.iter().skip(usize::from(failed)) {
		eprintln!("warning: {report}");
	}
	resolution.into_result().map(|_| ())
}

#[derive(Serialize)]
struct LeafJson {
	path: String,
	key: String,
	kind: &'static str,
	value: String,
}

#[derive(Serialize)]
struct PrintJson<'a> {
	expr: String,
	leaves: &'a [LeafJson],
	succeeded: usize,
	reports: Vec<ReportJson>,
}
