//! Native functions exposed to user code under fixed names.
//!
//! Built-ins resolve as a fallback after environment lookup fails, so a user
//! binding named `len` shadows the native one. Each built-in validates its
//! own arguments and reports its own runtime errors; the call machinery
//! passes the argument values through untouched.

use std::rc::Rc;

use crate::{error::RuntimeError, evaluator::{Evaluator, value::Value}};

/// Signature of a native built-in. The evaluator reference grants access to
/// the canonical singletons, so a built-in's `null` is *the* null.
pub type BuiltInFunction = fn(&Evaluator, &[Rc<Value>]) -> Result<Rc<Value>, RuntimeError>;

/// Every built-in and the name user code reaches it by
pub fn all() -> Vec<(&'static str, BuiltInFunction)> {
	vec![("len", len), ("first", first), ("last", last), ("rest", rest), ("push", push), ("puts", puts)]
}

/// Number of bytes in a string, or of elements in an array
fn len(_evaluator: &Evaluator, arguments: &[Rc<Value>]) -> Result<Rc<Value>, RuntimeError> {
	if arguments.len() != 1 {
		return Err(RuntimeError::WrongArgumentCount { got: arguments.len(), want: 1 });
	}

	match &*arguments[0] {
		Value::Str(value) => Ok(Rc::new(Value::Integer(value.len() as i64))),
		Value::Array(elements) => Ok(Rc::new(Value::Integer(elements.len() as i64))),
		other => Err(RuntimeError::UnsupportedLenArgument(other.type_name())),
	}
}

/// First element of an array, or null when it is empty
fn first(evaluator: &Evaluator, arguments: &[Rc<Value>]) -> Result<Rc<Value>, RuntimeError> {
	let elements = array_argument("first", arguments)?;
	Ok(elements.first().cloned().unwrap_or_else(|| evaluator.null()))
}

/// Last element of an array, or null when it is empty
fn last(evaluator: &Evaluator, arguments: &[Rc<Value>]) -> Result<Rc<Value>, RuntimeError> {
	let elements = array_argument("last", arguments)?;
	Ok(elements.last().cloned().unwrap_or_else(|| evaluator.null()))
}

/// A new array holding everything but the first element, or null when the
/// array is empty
fn rest(evaluator: &Evaluator, arguments: &[Rc<Value>]) -> Result<Rc<Value>, RuntimeError> {
	let elements = array_argument("rest", arguments)?;
	if elements.is_empty() {
		return Ok(evaluator.null());
	}
	Ok(Rc::new(Value::Array(elements[1..].to_vec())))
}

/// A new array with the second argument appended. The original is unchanged
fn push(_evaluator: &Evaluator, arguments: &[Rc<Value>]) -> Result<Rc<Value>, RuntimeError> {
	if arguments.len() != 2 {
		return Err(RuntimeError::WrongArgumentCount { got: arguments.len(), want: 2 });
	}

	match &*arguments[0] {
		Value::Array(elements) => {
			let mut elements = elements.clone();
			elements.push(arguments[1].clone());
			Ok(Rc::new(Value::Array(elements)))
		}
		other => Err(RuntimeError::ArgumentNotArray { name: "push", got: other.type_name() }),
	}
}

/// Prints each argument's display form on its own line, returns null
fn puts(evaluator: &Evaluator, arguments: &[Rc<Value>]) -> Result<Rc<Value>, RuntimeError> {
	for argument in arguments {
		println!("{argument}");
	}
	Ok(evaluator.null())
}

/// The single-ARRAY-argument contract shared by `first`, `last` and `rest`
fn array_argument<'a>(
	name: &'static str,
	arguments: &'a [Rc<Value>],
) -> Result<&'a [Rc<Value>], RuntimeError> {
	if arguments.len() != 1 {
		return Err(RuntimeError::WrongArgumentCount { got: arguments.len(), want: 1 });
	}

	match &*arguments[0] {
		Value::Array(elements) => Ok(elements),
		other => Err(RuntimeError::ArgumentNotArray { name, got: other.type_name() }),
	}
}
