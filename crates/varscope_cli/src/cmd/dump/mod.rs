use std::path::PathBuf;

use varscope::var::{RenderOptions, Renderer, ResolveOptions, Snapshot, escape_attr, parse_variable};

use crate::cmd::util::{access_mode, render_options};

#[derive(clap::Args)]
pub struct Args {
	pub snapshot: PathBuf,
	pub expr: String,
	#[arg(long)]
	pub precision: Option<usize>,
	#[arg(long)]
	pub silent: bool,
	#[arg(long = "fault-tolerant")]
	pub fault_tolerant: bool,
}

/// Resolve a path expression and dump every leaf as a markup element.
pub fn run(args: Args) -> varscope::var::Result<()> {
	let Args {
		snapshot: path,
		expr,
		precision,
		silent,
		fault_tolerant,
	} = args;

	let snapshot = Snapshot::open(&path)?;
	let access = access_mode(fault_tolerant);
	let options = render_options(&snapshot, RenderOptions { access, ..RenderOptions::default() }, precision, None);
	let mut renderer = Renderer::new(options);

	let resolution = parse_variable(&expr, snapshot.vars(), &ResolveOptions { silent, access }, |leaf| {
		println!("<variable name=\"{}\">{}</variable>", escape_attr(leaf.path), renderer.markup(leaf.value));
		Ok(())
	})?;

	let failed = !resolution.is_success();
	for report in resolution.reports.iter().skip(usize::from(failed)) {
		eprintln!("warning: {report}");
	}
	resolution.into_result().map(|_| ())
}
