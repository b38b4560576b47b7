#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cmd;

#[derive(Parser)]
#[command(name = "varscope", about = "Inspect variable snapshots with debugger path expressions")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Resolve a path and print every leaf on one line.
	Print(cmd::print::Args),
	/// Resolve a path and dump every leaf as markup.
	Dump(cmd::dump::Args),
	/// List root variables with a short preview.
	Vars(cmd::vars::Args),
	/// Check a `Class::method` expression.
	Method(cmd::method::Args),
}

fn main() {
	init_tracing();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_env("VARSCOPE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();
}

fn run() -> varscope::var::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Print(args) => cmd::print::run(args),
		Commands::Dump(args) => cmd::dump::run(args),
		Commands::Vars(args) => cmd::vars::run(args),
		Commands::Method(args) => cmd::method::run(args),
	}
}
