use monker::cli::*;
use palc::Parser;

fn main() {
	let monker = monker::Monker::new();

	match Cli::parse().mode {
		Mode::File { path } => {
			if let Err(e) = monker.run_file(&path) {
				eprintln!("Failed run file: {e}");
			}
		}
		Mode::Repl => monker.run_prompt(),
	}
}
