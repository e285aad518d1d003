use std::path::PathBuf;

use palc::{Parser, Subcommand};

/// CLI arguments
#[derive(Parser)]
#[command(name = "monker", after_long_help = "A tree-walking interpreter for the monker language.")]
pub struct Cli {
	/// Program mode
	#[command(subcommand)]
	pub mode: Mode,
}

/// Program mode
#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Run a script file
	File { path: PathBuf },
	/// Interactive prompt
	Repl,
}
