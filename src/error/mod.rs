pub mod evaluator;

pub use evaluator::{EvaluatorError, RuntimeError};

/// MonkerError is the top-level error type for the interpreter driver.
#[derive(thiserror::Error, Debug)]
pub enum MonkerError {
	/// Internal interpreter error, should never happen
	#[error("InternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	#[error("Generated {0} parser errors")]
	ParserErrors(usize),
}
