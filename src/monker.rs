use std::{fs::read_to_string, io::Write, path::Path};

use anyhow::Context;

use crate::{
	MonkerError, environment::Environment, evaluator::Evaluator, lexer::Lexer, parser::Parser,
	utils::RcCell,
};

/// The interpreter driver: one evaluator and one root environment, shared by
/// every line of a REPL session or every statement of a script file.
pub struct Monker {
	evaluator:   Evaluator,
	environment: RcCell<Environment>,
}

impl Monker {
	pub fn new() -> Self {
		Self { evaluator: Evaluator::new(), environment: RcCell::new(Environment::new()) }
	}

	pub fn run_file(&self, path: &Path) -> crate::Result<()> {
		let source = read_to_string(path).context("Failed open source file")?;
		self.run(&source)
	}

	pub fn run_prompt(&self) {
		let mut input = String::new();
		let stdin = std::io::stdin();
		loop {
			input.clear();
			print!(">> ");
			if let Err(e) = std::io::stdout().flush() {
				eprintln!("Failed flush: {e}");
			}
			match stdin.read_line(&mut input) {
				Ok(0) => {
					println!("\nExited monker repl");
					break;
				}
				Ok(_) => {}
				Err(e) => {
					eprintln!("Failed read line: {e}");
					continue;
				}
			}
			if let Err(e) = self.run(input.trim()) {
				eprintln!("Failed run prompt: {e}");
			}
		}
	}

	/// Lex, parse and evaluate one source string against the shared root
	/// environment, printing the result's display form. Parse errors are
	/// listed instead and nothing is evaluated.
	pub fn run(&self, source: &str) -> crate::Result<()> {
		let mut parser = Parser::new(Lexer::new(source));
		let program = parser.parse_program();

		let errors = parser.errors();
		if !errors.is_empty() {
			for error in errors {
				eprintln!("Parse error: {error}");
			}
			return Err(MonkerError::ParserErrors(errors.len()));
		}

		match self.evaluator.eval_program(&program, &self.environment) {
			Ok(value) => println!("{value}"),
			Err(error) => println!("ERROR: {error}"),
		}
		Ok(())
	}
}

impl Default for Monker {
	fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn run_string() {
		let monker = Monker::new();
		assert!(monker.run("").is_ok());
		assert!(monker.run("1 + 2;").is_ok());
		// Runtime errors are printed, not surfaced as driver failures.
		assert!(monker.run("missing").is_ok());
		// Parse errors are.
		assert!(matches!(monker.run("let x 5;"), Err(MonkerError::ParserErrors(1))));
	}

	#[test]
	fn bindings_persist_across_runs() {
		let monker = Monker::new();
		assert!(monker.run("let x = 40;").is_ok());
		assert!(monker.run("x + 2;").is_ok());
	}
}
