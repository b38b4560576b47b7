use std::path::PathBuf;

use serde::Serialize;
use varscope::var::{RenderOptions, Renderer, Snapshot};

use crate::cmd::util::{emit_json, render_options};

const PREVIEW_WIDTH: usize = 80;

#[derive(clap::Args)]
pub struct Args {
	pub snapshot: PathBuf,
	#[arg(long)]
	pub budget: Option<i64>,
	#[arg(long)]
	pub precision: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

/// List root variables with their kind and a flat preview.
pub fn run(args: Args) -> varscope::var::Result<()> {
	let Args {
		snapshot: path,
		budget,
		precision,
		json,
	} = args;

	let snapshot = Snapshot::open(&path)?;
	let options = render_options(&snapshot, RenderOptions::for_terminal(PREVIEW_WIDTH), precision, budget);
	let mut renderer = Renderer::new(options);

	let rows: Vec<VarJson> = snapshot
		.vars()
		.borrow()
		.iter()
		.map(|(name, value)| VarJson {
			name: name.to_string(),
			kind: value.kind(),
			preview: renderer.flat(value),
		})
		.collect();

	if json {
		emit_json(&VarsJson {
			path: path.display().to_string(),
			compression: snapshot.compression.as_str(),
			count: rows.len(),
			vars: rows,
		});
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("variables: {}", rows.len());
	for row in &rows {
		println!("{:<10} ${:<16} {}", row.kind, row.name, row.preview);
	}

	Ok(())
}

#[derive(Serialize)]
struct VarJson {
	name: String,
	kind: &'static str,
	preview: String,
}

#[derive(Serialize)]
struct VarsJson {
	path: String,
	compression: &'static str,
	count: usize,
	vars: Vec<VarJson>,
}
