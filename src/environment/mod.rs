use std::{collections::HashMap, rc::Rc};

use crate::{evaluator::value::Value, utils::RcCell};

/// A mapping from identifier name to value, optionally chained to the
/// environment of the enclosing scope.
///
/// Environments are shared: a function value holds on to the environment
/// that was current when its literal was evaluated, and that capture may
/// outlive the scope that created it. Everything that shares a frame does so
/// through [`RcCell`].
#[derive(Default)]
pub struct Environment {
	variables: HashMap<String, Rc<Value>>,
	outer:     Option<RcCell<Environment>>,
}

impl Environment {
	pub fn new() -> Self { Self::default() }

	/// A fresh frame whose lookups fall through to `outer`
	pub fn new_enclosed(outer: RcCell<Environment>) -> Self {
		Self { variables: HashMap::new(), outer: Some(outer) }
	}

	/// Look up a name, walking outward through the enclosing environments
	pub fn get(&self, name: &str) -> Option<Rc<Value>> {
		match self.variables.get(name) {
			Some(value) => Some(value.clone()),
			None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
		}
	}

	/// Bind a name in the local frame. A let binding doesn't just define a
	/// new variable, it can also rebind an existing one.
	pub fn define(&mut self, name: impl Into<String>, value: Rc<Value>) {
		self.variables.insert(name.into(), value);
	}
}
