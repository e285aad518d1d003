//! The runtime value domain: a closed tagged union the evaluator pattern
//! matches on exhaustively. Values are immutable once constructed (the only
//! mutable state in the interpreter is an environment's local frame), so
//! they are shared freely behind `Rc`.

use std::{collections::HashMap, fmt::{Debug, Display}, rc::Rc};

use crate::{ast::Block, environment::Environment, evaluator::builtin::BuiltInFunction, utils::RcCell};

/// A runtime value in the monker language.
pub enum Value {
	Integer(i64),
	Str(String),
	Boolean(bool),
	Null,
	Array(Vec<Rc<Value>>),
	/// Keyed by [`HashKey`]; each entry also keeps the original key value for
	/// display. Iteration order is not observable.
	Dict(HashMap<HashKey, DictEntry>),
	/// A closure: the parameters and body of a function literal together
	/// with the environment captured at its construction site.
	Function {
		parameters:  Rc<Vec<String>>,
		body:        Rc<Block>,
		environment: RcCell<Environment>,
	},
	BuiltIn(BuiltInFunction),
}

/// A dict entry: the key value as written plus the stored value.
#[derive(Clone)]
pub struct DictEntry {
	pub key:   Rc<Value>,
	pub value: Rc<Value>,
}

/// The key domain of dicts. Exactly integers, strings and booleans hash: two
/// keys of the same variant are equal iff their payloads are, and distinct
/// variants never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
	Integer(i64),
	Str(String),
	Boolean(bool),
}

impl Value {
	/// The value's type tag, as it appears in runtime error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Integer(_) => "INTEGER",
			Value::Str(_) => "STRING",
			Value::Boolean(_) => "BOOLEAN",
			Value::Null => "NULL",
			Value::Array(_) => "ARRAY",
			Value::Dict(_) => "DICT",
			Value::Function { .. } => "FUNCTION",
			Value::BuiltIn(_) => "BUILTIN",
		}
	}

	/// Determines if the value is considered "true" in a boolean context.
	/// Only `false` and `null` are falsy; integer zero and the empty string
	/// are truthy.
	pub fn is_truthy(&self) -> bool { !matches!(self, Value::Boolean(false) | Value::Null) }

	/// The dict key for this value, or `None` for the variants that cannot
	/// be used as keys.
	pub fn hash_key(&self) -> Option<HashKey> {
		match self {
			Value::Integer(value) => Some(HashKey::Integer(*value)),
			Value::Str(value) => Some(HashKey::Str(value.clone())),
			Value::Boolean(value) => Some(HashKey::Boolean(*value)),
			_ => None,
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Integer(value) => write!(f, "{value}"),
			Value::Str(value) => write!(f, "{value}"),
			Value::Boolean(value) => write!(f, "{value}"),
			Value::Null => write!(f, "null"),
			Value::Array(elements) => {
				let elements: Vec<String> = elements.iter().map(ToString::to_string).collect();
				write!(f, "[{}]", elements.join(", "))
			}
			Value::Dict(entries) => {
				let entries: Vec<String> =
					entries.values().map(|entry| format!("{}: {}", entry.key, entry.value)).collect();
				write!(f, "{{{}}}", entries.join(", "))
			}
			Value::Function { parameters, body, .. } => {
				write!(f, "fn({}) {{\n{body}\n}}", parameters.join(", "))
			}
			Value::BuiltIn(_) => write!(f, "builtin function"),
		}
	}
}

/// Hand-written: a closure's captured environment can reach the closure
/// again, so a derived impl could print forever.
impl Debug for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Integer(value) => f.debug_tuple("Integer").field(value).finish(),
			Value::Str(value) => f.debug_tuple("Str").field(value).finish(),
			Value::Boolean(value) => f.debug_tuple("Boolean").field(value).finish(),
			Value::Null => write!(f, "Null"),
			Value::Array(elements) => f.debug_tuple("Array").field(elements).finish(),
			Value::Dict(entries) => f.debug_tuple("Dict").field(entries).finish(),
			Value::Function { parameters, .. } => {
				f.debug_struct("Function").field("parameters", parameters).finish_non_exhaustive()
			}
			Value::BuiltIn(_) => f.debug_tuple("BuiltIn").field(&"native function").finish(),
		}
	}
}

impl Debug for DictEntry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DictEntry").field("key", &self.key).field("value", &self.value).finish()
	}
}
