use serde::Serialize;
use varscope::var::ClassMethod;

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub expr: String,
	#[arg(long)]
	pub json: bool,
}

/// Parse a `Class::method` expression and print its parts.
pub fn run(args: Args) -> varscope::var::Result<()> {
	let Args { expr, json } = args;
	let parsed = ClassMethod::parse(&expr)?;

	if json {
		emit_json(&MethodJson {
			class: &parsed.class,
			method: &parsed.method,
		});
		return Ok(());
	}

	println!("class: {}", parsed.class);
	println!("method: {}", parsed.method);
	Ok(())
}

#[derive(Serialize)]
struct MethodJson<'a> {
	class: &'a str,
	method: &'a str,
}

#[cfg(test)]
mod tests;
