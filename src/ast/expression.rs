use std::rc::Rc;

use Expression::*;

use crate::{ast::statement::Block, lexer::Token};

/// An expression in the monker language. Everything that produces a value
/// lives here, including `if` and function literals.
#[derive(Debug, Clone)]
pub enum Expression {
	Identifier(String),
	IntegerLiteral(i64),
	StringLiteral(String),
	Boolean(bool),
	/// A unary operator application, `!x` or `-x`.
	Prefix { operator: Token, right: Box<Expression> },
	/// A binary operator application. The operator token keeps the lexeme for
	/// display and error messages.
	Infix { left: Box<Expression>, operator: Token, right: Box<Expression> },
	If { condition: Box<Expression>, consequence: Block, alternative: Option<Block> },
	/// Parameters and body are shared with every function value constructed
	/// from this literal, so the clone at evaluation time is cheap.
	FunctionLiteral { parameters: Rc<Vec<String>>, body: Rc<Block> },
	Call { callee: Box<Expression>, arguments: Vec<Expression> },
	ArrayLiteral(Vec<Expression>),
	Index { left: Box<Expression>, index: Box<Expression> },
	/// Entries in source order; the runtime dict is unordered.
	DictLiteral(Vec<(Expression, Expression)>),
}

impl Expression {
	pub fn boxed(self) -> Box<Self> { Box::new(self) }
}

fn join(f: &mut std::fmt::Formatter<'_>, items: impl IntoIterator<Item = String>) -> std::fmt::Result {
	let mut first = true;
	for item in items {
		if !first {
			write!(f, ", ")?;
		}
		first = false;
		write!(f, "{item}")?;
	}
	Ok(())
}

impl std::fmt::Display for Expression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Identifier(name) => write!(f, "{name}"),
			IntegerLiteral(value) => write!(f, "{value}"),
			StringLiteral(value) => write!(f, "{value}"),
			Boolean(value) => write!(f, "{value}"),
			Prefix { operator, right } => write!(f, "({}{right})", operator.literal),
			Infix { left, operator, right } => write!(f, "({left} {} {right})", operator.literal),
			If { condition, consequence, alternative } => {
				write!(f, "if {condition} {consequence}")?;
				if let Some(alternative) = alternative {
					write!(f, " else {alternative}")?;
				}
				Ok(())
			}
			FunctionLiteral { parameters, body } => {
				write!(f, "fn(")?;
				join(f, parameters.iter().cloned())?;
				write!(f, ") {body}")
			}
			Call { callee, arguments } => {
				write!(f, "{callee}(")?;
				join(f, arguments.iter().map(ToString::to_string))?;
				write!(f, ")")
			}
			ArrayLiteral(elements) => {
				write!(f, "[")?;
				join(f, elements.iter().map(ToString::to_string))?;
				write!(f, "]")
			}
			Index { left, index } => write!(f, "({left}[{index}])"),
			DictLiteral(entries) => {
				write!(f, "{{")?;
				join(f, entries.iter().map(|(key, value)| format!("{key}: {value}")))?;
				write!(f, "}}")
			}
		}
	}
}
