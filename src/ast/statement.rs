use crate::{ast::expression::Expression, lexer::Token};

/// A statement in the monker language.
#[derive(Debug, Clone)]
pub enum Statement {
	/// A `let` binding. The bound name travels in the token's literal.
	Let { name_token: Token, value: Expression },
	/// A `return` statement.
	Return(Expression),
	/// An expression used as a statement.
	Expression(Expression),
}

/// A brace-delimited ordered sequence of statements sharing a lexical scope.
///
/// Blocks only appear as the body of `if` arms and function literals; a `{`
/// in expression position starts a dict literal instead.
#[derive(Debug, Clone)]
pub struct Block {
	pub statements: Vec<Statement>,
}

impl std::fmt::Display for Statement {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Statement::Let { name_token, value } => write!(f, "let {} = {value};", name_token.literal),
			Statement::Return(value) => write!(f, "return {value};"),
			Statement::Expression(expression) => write!(f, "{expression}"),
		}
	}
}

impl std::fmt::Display for Block {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for statement in &self.statements {
			write!(f, "{statement}")?;
		}
		Ok(())
	}
}
