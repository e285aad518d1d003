use std::rc::Rc;

use crate::evaluator::value::Value;

/// Everything that can interrupt evaluation. `?` carries both variants
/// outward through nested blocks; only a function-call boundary (or the
/// program root) looks inside.
#[derive(thiserror::Error, Debug)]
pub enum EvaluatorError {
	/// A runtime error on its way out of the whole evaluation.
	#[error(transparent)]
	Runtime(#[from] RuntimeError),
	/// Not a failure: carries a `return` value up through nested blocks
	/// until the nearest function-call boundary unwraps it.
	#[error("return outside of a function body")]
	Return(Rc<Value>),
}

/// A runtime error produced by evaluating a program. The `Display` forms are
/// stable: they are what the user sees after `ERROR: ` and what the tests
/// assert on.
#[derive(thiserror::Error, Debug)]
pub enum RuntimeError {
	#[error("identifier not found: {0}")]
	IdentifierNotFound(String),
	#[error("unknown operator: {operator}{right}")]
	UnknownPrefixOperator { operator: String, right: &'static str },
	/// Infix operands of two different types never combine.
	#[error("type mismatch: {left} {operator} {right}")]
	TypeMismatch { left: &'static str, operator: String, right: &'static str },
	/// Same-typed operands with no rule for the operator.
	#[error("unknown operator: {left} {operator} {right}")]
	UnknownInfixOperator { left: &'static str, operator: String, right: &'static str },
	#[error("division by zero")]
	DivisionByZero,
	#[error("index operator not supported: {0}")]
	IndexNotSupported(&'static str),
	/// A non-hashable dict index.
	#[error("unusable as hash key: {0}")]
	UnusableAsHashKey(&'static str),
	/// A non-hashable key expression in a dict literal.
	#[error("unusable hash key: {0}")]
	UnusableHashKey(&'static str),
	#[error("not a function: {0}")]
	NotAFunction(&'static str),
	#[error("wrong number of arguments. got={got}, want={want}")]
	WrongArgumentCount { got: usize, want: usize },
	#[error("argument to `len` not supported, got {0}")]
	UnsupportedLenArgument(&'static str),
	#[error("argument to `{name}` must be ARRAY, got {got}")]
	ArgumentNotArray { name: &'static str, got: &'static str },
}
