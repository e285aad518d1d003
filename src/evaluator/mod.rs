//! The tree-walking evaluator.
//!
//! Evaluation is a recursive walk over the AST: every node variant maps to a
//! value, and every recursive call propagates failures with `?`. That one
//! operator is the whole error-handling story: a runtime error anywhere in
//! a subexpression short-circuits the expression, the statement, the block
//! and the program around it.
//!
//! `return` rides the same channel. [`EvaluatorError::Return`] carries the
//! returned value outward through arbitrarily nested blocks; the function
//! call that evaluated the body catches it and unwraps exactly once, so an
//! inner block can never consume an outer function's return.
//!
//! Booleans and null are canonical: the evaluator allocates one `true`, one
//! `false` and one `null` up front and hands out clones of those `Rc`s, so
//! equality on them is pointer identity.

pub mod builtin;
pub mod value;

use std::{collections::HashMap, rc::Rc};

use value::{DictEntry, Value};

use crate::{
	ast::{Block, Expression, Program, Statement},
	environment::Environment,
	error::{EvaluatorError, RuntimeError},
	lexer::{Token, TokenType},
	utils::RcCell,
};

/// Evaluates programs against an environment. Owns the canonical singletons
/// and the built-in registry; all per-run state lives in the environment the
/// caller passes in.
pub struct Evaluator {
	true_value:  Rc<Value>,
	false_value: Rc<Value>,
	null_value:  Rc<Value>,
	builtins:    HashMap<&'static str, Rc<Value>>,
}

impl Evaluator {
	pub fn new() -> Self {
		let builtins = builtin::all()
			.into_iter()
			.map(|(name, function)| (name, Rc::new(Value::BuiltIn(function))))
			.collect();

		Self {
			true_value: Rc::new(Value::Boolean(true)),
			false_value: Rc::new(Value::Boolean(false)),
			null_value: Rc::new(Value::Null),
			builtins,
		}
	}

	/// The canonical null value
	pub fn null(&self) -> Rc<Value> { self.null_value.clone() }

	/// The canonical boolean for `value`
	pub fn boolean(&self, value: bool) -> Rc<Value> {
		if value { self.true_value.clone() } else { self.false_value.clone() }
	}

	/// Evaluate a whole program. A `return` reaching the root is unwrapped;
	/// a runtime error is handed to the caller, who renders it as
	/// `ERROR: <message>`.
	pub fn eval_program(
		&self,
		program: &Program,
		environment: &RcCell<Environment>,
	) -> Result<Rc<Value>, RuntimeError> {
		let mut result = self.null();
		for statement in &program.statements {
			match self.eval_statement(statement, environment) {
				Ok(value) => result = value,
				Err(EvaluatorError::Return(value)) => return Ok(value),
				Err(EvaluatorError::Runtime(error)) => return Err(error),
			}
		}
		Ok(result)
	}

	fn eval_statement(
		&self,
		statement: &Statement,
		environment: &RcCell<Environment>,
	) -> Result<Rc<Value>, EvaluatorError> {
		match statement {
			Statement::Let { name_token, value } => {
				let value = self.eval_expression(value, environment)?;
				environment.borrow_mut().define(name_token.literal.clone(), value);
				Ok(self.null())
			}
			Statement::Return(value) => {
				let value = self.eval_expression(value, environment)?;
				Err(EvaluatorError::Return(value))
			}
			Statement::Expression(expression) => self.eval_expression(expression, environment),
		}
	}

	/// Evaluate a block to its last statement's value. Unlike the program
	/// root this does not unwrap `Return`: `?` lets it travel outward so
	/// only the enclosing function call consumes it.
	fn eval_block(
		&self,
		block: &Block,
		environment: &RcCell<Environment>,
	) -> Result<Rc<Value>, EvaluatorError> {
		let mut result = self.null();
		for statement in &block.statements {
			result = self.eval_statement(statement, environment)?;
		}
		Ok(result)
	}

	fn eval_expression(
		&self,
		expression: &Expression,
		environment: &RcCell<Environment>,
	) -> Result<Rc<Value>, EvaluatorError> {
		match expression {
			Expression::Identifier(name) => self.eval_identifier(name, environment),
			Expression::IntegerLiteral(value) => Ok(Rc::new(Value::Integer(*value))),
			Expression::StringLiteral(value) => Ok(Rc::new(Value::Str(value.clone()))),
			Expression::Boolean(value) => Ok(self.boolean(*value)),
			Expression::Prefix { operator, right } => {
				let right = self.eval_expression(right, environment)?;
				self.eval_prefix(operator, right)
			}
			Expression::Infix { left, operator, right } => {
				let left = self.eval_expression(left, environment)?;
				let right = self.eval_expression(right, environment)?;
				self.eval_infix(operator, left, right)
			}
			Expression::If { condition, consequence, alternative } => {
				let condition = self.eval_expression(condition, environment)?;
				if condition.is_truthy() {
					self.eval_block(consequence, environment)
				} else if let Some(alternative) = alternative {
					self.eval_block(alternative, environment)
				} else {
					Ok(self.null())
				}
			}
			Expression::FunctionLiteral { parameters, body } => Ok(Rc::new(Value::Function {
				parameters:  parameters.clone(),
				body:        body.clone(),
				environment: environment.clone(),
			})),
			Expression::Call { callee, arguments } => {
				let callee = self.eval_expression(callee, environment)?;
				let arguments = self.eval_expressions(arguments, environment)?;
				self.call(callee, &arguments)
			}
			Expression::ArrayLiteral(elements) => {
				Ok(Rc::new(Value::Array(self.eval_expressions(elements, environment)?)))
			}
			Expression::Index { left, index } => {
				let left = self.eval_expression(left, environment)?;
				let index = self.eval_expression(index, environment)?;
				self.eval_index(left, index)
			}
			Expression::DictLiteral(entries) => self.eval_dict_literal(entries, environment),
		}
	}

	/// Environment chain first, built-in registry second
	fn eval_identifier(
		&self,
		name: &str,
		environment: &RcCell<Environment>,
	) -> Result<Rc<Value>, EvaluatorError> {
		if let Some(value) = environment.borrow().get(name) {
			return Ok(value);
		}
		if let Some(builtin) = self.builtins.get(name) {
			return Ok(builtin.clone());
		}
		Err(RuntimeError::IdentifierNotFound(name.to_string()).into())
	}

	fn eval_prefix(&self, operator: &Token, right: Rc<Value>) -> Result<Rc<Value>, EvaluatorError> {
		match (operator.r#type, &*right) {
			(TokenType::Bang, _) => Ok(self.boolean(!right.is_truthy())),
			(TokenType::Minus, Value::Integer(value)) => Ok(Rc::new(Value::Integer(-value))),
			_ => Err(RuntimeError::UnknownPrefixOperator {
				operator: operator.literal.clone(),
				right:    right.type_name(),
			}
			.into()),
		}
	}

	fn eval_infix(
		&self,
		operator: &Token,
		left: Rc<Value>,
		right: Rc<Value>,
	) -> Result<Rc<Value>, EvaluatorError> {
		match (&*left, &*right) {
			(Value::Integer(l), Value::Integer(r)) => self.eval_integer_infix(operator, *l, *r),
			(Value::Str(l), Value::Str(r)) => self.eval_string_infix(operator, l, r),
			_ if left.type_name() != right.type_name() => Err(RuntimeError::TypeMismatch {
				left:     left.type_name(),
				operator: operator.literal.clone(),
				right:    right.type_name(),
			}
			.into()),
			// Everything non-primitive compares by identity. Booleans and
			// null are canonical singletons, so this is exactly payload
			// equality for them.
			_ => match operator.r#type {
				TokenType::EqualEqual => Ok(self.boolean(Rc::ptr_eq(&left, &right))),
				TokenType::BangEqual => Ok(self.boolean(!Rc::ptr_eq(&left, &right))),
				_ => Err(RuntimeError::UnknownInfixOperator {
					left:     left.type_name(),
					operator: operator.literal.clone(),
					right:    right.type_name(),
				}
				.into()),
			},
		}
	}

	fn eval_integer_infix(
		&self,
		operator: &Token,
		left: i64,
		right: i64,
	) -> Result<Rc<Value>, EvaluatorError> {
		let value = match operator.r#type {
			TokenType::Plus => left + right,
			TokenType::Minus => left - right,
			TokenType::Star => left * right,
			TokenType::Slash => {
				if right == 0 {
					return Err(RuntimeError::DivisionByZero.into());
				}
				left / right
			}
			TokenType::Less => return Ok(self.boolean(left < right)),
			TokenType::Greater => return Ok(self.boolean(left > right)),
			TokenType::EqualEqual => return Ok(self.boolean(left == right)),
			TokenType::BangEqual => return Ok(self.boolean(left != right)),
			_ => {
				return Err(RuntimeError::UnknownInfixOperator {
					left:     "INTEGER",
					operator: operator.literal.clone(),
					right:    "INTEGER",
				}
				.into());
			}
		};
		Ok(Rc::new(Value::Integer(value)))
	}

	/// Strings only concatenate; every other operator on two strings is
	/// unknown, including `==`.
	fn eval_string_infix(
		&self,
		operator: &Token,
		left: &str,
		right: &str,
	) -> Result<Rc<Value>, EvaluatorError> {
		if operator.r#type != TokenType::Plus {
			return Err(RuntimeError::UnknownInfixOperator {
				left:     "STRING",
				operator: operator.literal.clone(),
				right:    "STRING",
			}
			.into());
		}
		Ok(Rc::new(Value::Str(format!("{left}{right}"))))
	}

	/// Evaluate argument and element lists left to right; `?` aborts on the
	/// first failure, so later expressions are never evaluated.
	fn eval_expressions(
		&self,
		expressions: &[Expression],
		environment: &RcCell<Environment>,
	) -> Result<Vec<Rc<Value>>, EvaluatorError> {
		expressions.iter().map(|expression| self.eval_expression(expression, environment)).collect()
	}

	fn call(&self, callee: Rc<Value>, arguments: &[Rc<Value>]) -> Result<Rc<Value>, EvaluatorError> {
		match &*callee {
			Value::Function { parameters, body, environment } => {
				// A fresh frame over the environment captured at the
				// literal, not over the caller's.
				let mut frame = Environment::new_enclosed(environment.clone());
				// Positional binding. Extra arguments are dropped; a missing
				// one leaves the parameter unbound, and using it reports
				// `identifier not found`.
				for (parameter, argument) in parameters.iter().zip(arguments) {
					frame.define(parameter.clone(), argument.clone());
				}

				match self.eval_block(body, &RcCell::new(frame)) {
					Err(EvaluatorError::Return(value)) => Ok(value),
					other => other,
				}
			}
			Value::BuiltIn(function) => Ok(function(self, arguments)?),
			_ => Err(RuntimeError::NotAFunction(callee.type_name()).into()),
		}
	}

	fn eval_index(&self, left: Rc<Value>, index: Rc<Value>) -> Result<Rc<Value>, EvaluatorError> {
		match (&*left, &*index) {
			(Value::Array(elements), Value::Integer(i)) => {
				// Negative indices are out of range, not wrap-around.
				let element = usize::try_from(*i).ok().and_then(|i| elements.get(i));
				Ok(element.cloned().unwrap_or_else(|| self.null()))
			}
			(Value::Dict(entries), _) => {
				let key = index.hash_key().ok_or(RuntimeError::UnusableAsHashKey(index.type_name()))?;
				Ok(entries.get(&key).map(|entry| entry.value.clone()).unwrap_or_else(|| self.null()))
			}
			_ => Err(RuntimeError::IndexNotSupported(left.type_name()).into()),
		}
	}

	fn eval_dict_literal(
		&self,
		entries: &[(Expression, Expression)],
		environment: &RcCell<Environment>,
	) -> Result<Rc<Value>, EvaluatorError> {
		let mut elements = HashMap::new();
		for (key_expression, value_expression) in entries {
			let key = self.eval_expression(key_expression, environment)?;
			let hash_key = key.hash_key().ok_or(RuntimeError::UnusableHashKey(key.type_name()))?;
			let value = self.eval_expression(value_expression, environment)?;
			elements.insert(hash_key, DictEntry { key, value });
		}
		Ok(Rc::new(Value::Dict(elements)))
	}
}

impl Default for Evaluator {
	fn default() -> Self { Self::new() }
}
