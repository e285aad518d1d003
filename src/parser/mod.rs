//! The parser builds an abstract syntax tree out of the lexer's tokens and
//! reports syntax errors.
//!
//! Expressions are parsed with Pratt's top-down operator-precedence scheme:
//! every token kind may have a prefix parse rule (it can start an
//! expression) and an infix parse rule (it can continue one), and each infix
//! token carries a binding power. `parse_expression` keeps absorbing infix
//! tokens for as long as the next one binds tighter than the caller's level.
//!
//! |Level|Name|Operators
//! --|--|--
//! 1|Lowest|
//! 2|Equals|`==` `!=`
//! 3|LessGreater|`<` `>`
//! 4|Sum|`+` `-`
//! 5|Product|`*` `/`
//! 6|Prefix|unary `-` `!`
//! 7|Call|`(`
//! 8|Index|`[`
//!
//! The parser never panics and never stops at the first problem: errors
//! accumulate in an ordered list, the broken statement is abandoned, and the
//! caller inspects `errors()` before evaluating anything.

use std::rc::Rc;

use TokenType::*;

use crate::{
	ast::{Block, Expression, Program, Statement},
	lexer::{Lexer, Token, TokenType},
};

/// Binding power of each operator, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Lowest,
	/// `==` and `!=`
	Equals,
	/// `<` and `>`
	LessGreater,
	/// `+` and `-`
	Sum,
	/// `*` and `/`
	Product,
	/// Unary `-` and `!`
	Prefix,
	/// `(` as a call
	Call,
	/// `[` as an index
	Index,
}

/// The binding power a token has in infix position. Tokens that cannot
/// continue an expression sit at `Lowest`, which ends the Pratt loop.
fn precedence_of(r#type: TokenType) -> Precedence {
	match r#type {
		EqualEqual | BangEqual => Precedence::Equals,
		Less | Greater => Precedence::LessGreater,
		Plus | Minus => Precedence::Sum,
		Star | Slash => Precedence::Product,
		LeftParen => Precedence::Call,
		LeftBracket => Precedence::Index,
		_ => Precedence::Lowest,
	}
}

pub struct Parser<'a> {
	/// Token source, pulled one token at a time.
	lexer:         Lexer<'a>,
	/// The token under consideration.
	current_token: Token,
	/// One token of lookahead.
	peek_token:    Token,
	/// Accumulated parse errors, in source order.
	errors:        Vec<String>,
}

impl<'a> Parser<'a> {
	pub fn new(mut lexer: Lexer<'a>) -> Self {
		// Read two tokens so current and peek are both primed.
		let current_token = lexer.next_token();
		let peek_token = lexer.next_token();

		Self { lexer, current_token, peek_token, errors: Vec::new() }
	}

	/// Parse the whole input. Statements that fail to parse are dropped from
	/// the program; the corresponding messages land in `errors()`.
	pub fn parse_program(&mut self) -> Program {
		let mut program = Program::default();

		while !self.current_is(Eof) {
			if let Some(statement) = self.parse_statement() {
				program.statements.push(statement);
			}
			self.advance();
		}

		program
	}

	/// The parse errors recorded so far, in the order they were hit.
	pub fn errors(&self) -> &[String] { &self.errors }

	fn parse_statement(&mut self) -> Option<Statement> {
		match self.current_token.r#type {
			Let => self.parse_let_statement(),
			Return => self.parse_return_statement(),
			_ => self.parse_expression_statement(),
		}
	}

	/// `let <identifier> = <expression> ;`
	fn parse_let_statement(&mut self) -> Option<Statement> {
		self.expect_peek(Identifier)?;
		let name_token = self.current_token.clone();

		self.expect_peek(Equal)?;
		self.advance();

		let value = self.parse_expression(Precedence::Lowest)?;
		self.skip_to_semicolon();

		Some(Statement::Let { name_token, value })
	}

	/// `return <expression> ;`
	fn parse_return_statement(&mut self) -> Option<Statement> {
		self.advance();

		let value = self.parse_expression(Precedence::Lowest)?;
		self.skip_to_semicolon();

		Some(Statement::Return(value))
	}

	fn parse_expression_statement(&mut self) -> Option<Statement> {
		let expression = self.parse_expression(Precedence::Lowest)?;

		if self.peek_is(Semicolon) {
			self.advance();
		}

		Some(Statement::Expression(expression))
	}

	/// The Pratt loop: a prefix rule produces the left arm, then every peek
	/// token binding tighter than `precedence` extends it.
	fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
		let mut left = self.parse_prefix()?;

		while !self.peek_is(Semicolon) && precedence < precedence_of(self.peek_token.r#type) {
			self.advance();
			left = self.parse_infix(left)?;
		}

		Some(left)
	}

	/// Prefix dispatch, keyed by the current token kind.
	fn parse_prefix(&mut self) -> Option<Expression> {
		match self.current_token.r#type {
			Identifier => Some(Expression::Identifier(self.current_token.literal.clone())),
			IntegerLiteral => self.parse_integer_literal(),
			StringLiteral => Some(Expression::StringLiteral(self.current_token.literal.clone())),
			True | False => Some(Expression::Boolean(self.current_is(True))),
			Bang | Minus => self.parse_prefix_expression(),
			LeftParen => self.parse_grouped_expression(),
			If => self.parse_if_expression(),
			Function => self.parse_function_literal(),
			LeftBracket => self.parse_array_literal(),
			LeftBrace => self.parse_dict_literal(),
			other => {
				self.errors.push(format!("no prefix parse function for {other}"));
				None
			}
		}
	}

	/// Infix dispatch, keyed by the current token kind. Only tokens whose
	/// precedence is above `Lowest` ever arrive here.
	fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
		match self.current_token.r#type {
			LeftParen => self.parse_call_expression(left),
			LeftBracket => self.parse_index_expression(left),
			_ => self.parse_infix_expression(left),
		}
	}

	fn parse_integer_literal(&mut self) -> Option<Expression> {
		match self.current_token.literal.parse() {
			Ok(value) => Some(Expression::IntegerLiteral(value)),
			Err(_) => {
				self.errors.push(format!("could not parse {:?} as integer", self.current_token.literal));
				None
			}
		}
	}

	fn parse_prefix_expression(&mut self) -> Option<Expression> {
		let operator = self.current_token.clone();
		self.advance();
		let right = self.parse_expression(Precedence::Prefix)?.boxed();

		Some(Expression::Prefix { operator, right })
	}

	fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
		let operator = self.current_token.clone();
		let precedence = precedence_of(operator.r#type);
		self.advance();
		let right = self.parse_expression(precedence)?.boxed();

		Some(Expression::Infix { left: left.boxed(), operator, right })
	}

	/// `( <expression> )`
	fn parse_grouped_expression(&mut self) -> Option<Expression> {
		self.advance();

		let expression = self.parse_expression(Precedence::Lowest)?;
		self.expect_peek(RightParen)?;

		Some(expression)
	}

	/// `if ( <condition> ) { <block> }` with an optional `else { <block> }`
	fn parse_if_expression(&mut self) -> Option<Expression> {
		self.expect_peek(LeftParen)?;
		self.advance();

		let condition = self.parse_expression(Precedence::Lowest)?.boxed();
		self.expect_peek(RightParen)?;
		self.expect_peek(LeftBrace)?;

		let consequence = self.parse_block();

		let alternative = if self.peek_is(Else) {
			self.advance();
			self.expect_peek(LeftBrace)?;
			Some(self.parse_block())
		} else {
			None
		};

		Some(Expression::If { condition, consequence, alternative })
	}

	/// Entered with the current token on `{`; leaves it on the matching `}`.
	fn parse_block(&mut self) -> Block {
		let mut statements = Vec::new();

		self.advance();
		while !self.current_is(RightBrace) && !self.current_is(Eof) {
			if let Some(statement) = self.parse_statement() {
				statements.push(statement);
			}
			self.advance();
		}

		Block { statements }
	}

	/// `fn ( <parameters> ) { <block> }`
	fn parse_function_literal(&mut self) -> Option<Expression> {
		self.expect_peek(LeftParen)?;
		let parameters = Rc::new(self.parse_function_parameters()?);

		self.expect_peek(LeftBrace)?;
		let body = Rc::new(self.parse_block());

		Some(Expression::FunctionLiteral { parameters, body })
	}

	/// Comma-separated identifiers; the empty list is permitted.
	fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
		let mut parameters = Vec::new();

		if self.peek_is(RightParen) {
			self.advance();
			return Some(parameters);
		}

		self.advance();
		parameters.push(self.current_token.literal.clone());

		while self.peek_is(Comma) {
			self.advance();
			self.advance();
			parameters.push(self.current_token.literal.clone());
		}

		self.expect_peek(RightParen)?;

		Some(parameters)
	}

	fn parse_call_expression(&mut self, callee: Expression) -> Option<Expression> {
		let arguments = self.parse_expression_list(RightParen)?;

		Some(Expression::Call { callee: callee.boxed(), arguments })
	}

	/// `<left> [ <index> ]`
	fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
		self.advance();

		let index = self.parse_expression(Precedence::Lowest)?.boxed();
		self.expect_peek(RightBracket)?;

		Some(Expression::Index { left: left.boxed(), index })
	}

	fn parse_array_literal(&mut self) -> Option<Expression> {
		Some(Expression::ArrayLiteral(self.parse_expression_list(RightBracket)?))
	}

	/// `{` zero or more `<key> : <value>` pairs separated by `,` `}`
	fn parse_dict_literal(&mut self) -> Option<Expression> {
		let mut entries = Vec::new();

		while !self.peek_is(RightBrace) {
			self.advance();
			let key = self.parse_expression(Precedence::Lowest)?;

			self.expect_peek(Colon)?;
			self.advance();
			let value = self.parse_expression(Precedence::Lowest)?;

			entries.push((key, value));

			if !self.peek_is(RightBrace) {
				self.expect_peek(Comma)?;
			}
		}

		self.expect_peek(RightBrace)?;

		Some(Expression::DictLiteral(entries))
	}

	/// Expression lists for calls and array literals: empty when the closing
	/// token is peeked immediately, otherwise `Lowest`-level expressions
	/// separated by commas, then the required closing token.
	fn parse_expression_list(&mut self, end: TokenType) -> Option<Vec<Expression>> {
		let mut list = Vec::new();

		if self.peek_is(end) {
			self.advance();
			return Some(list);
		}

		self.advance();
		list.push(self.parse_expression(Precedence::Lowest)?);

		while self.peek_is(Comma) {
			self.advance();
			self.advance();
			list.push(self.parse_expression(Precedence::Lowest)?);
		}

		self.expect_peek(end)?;

		Some(list)
	}

	/// Advance to the next token.
	fn advance(&mut self) {
		self.current_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
	}

	fn current_is(&self, r#type: TokenType) -> bool { self.current_token.r#type == r#type }

	fn peek_is(&self, r#type: TokenType) -> bool { self.peek_token.r#type == r#type }

	/// Advance when the peek token is the expected kind, otherwise record a
	/// peek error and abandon the statement.
	fn expect_peek(&mut self, r#type: TokenType) -> Option<()> {
		if self.peek_is(r#type) {
			self.advance();
			Some(())
		} else {
			self.errors.push(format!(
				"line {}: expected next token to be {}, got {} instead",
				self.peek_token.line, r#type, self.peek_token.r#type
			));
			None
		}
	}

	/// Terminator discipline for `let` and `return`: skip ahead to the `;`.
	/// Stops at `Eof` so a missing terminator cannot spin forever.
	fn skip_to_semicolon(&mut self) {
		while !self.current_is(Semicolon) && !self.current_is(Eof) {
			self.advance();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(input: &str) -> Program {
		let mut parser = Parser::new(Lexer::new(input));
		let program = parser.parse_program();
		assert_eq!(parser.errors(), &[] as &[String], "unexpected parse errors for {input:?}");
		program
	}

	fn parse_display(input: &str, expected: &str) { assert_eq!(parse(input).to_string(), expected); }

	fn parse_errors(input: &str) -> Vec<String> {
		let mut parser = Parser::new(Lexer::new(input));
		parser.parse_program();
		parser.errors().to_vec()
	}

	#[test]
	fn parse_let_statements() {
		let program = parse("let x = 5; let y = true; let foobar = y;");
		assert_eq!(program.statements.len(), 3);

		let names: Vec<_> = program
			.statements
			.iter()
			.map(|statement| match statement {
				Statement::Let { name_token, .. } => name_token.literal.as_str(),
				other => panic!("expected let statement, got {other}"),
			})
			.collect();
		assert_eq!(names, ["x", "y", "foobar"]);

		parse_display("let x = 5;", "let x = 5;");
		parse_display("let y = 1 + 2;", "let y = (1 + 2);");
	}

	#[test]
	fn parse_return_statements() {
		let program = parse("return 5; return add(1, 2);");
		assert_eq!(program.statements.len(), 2);
		assert!(program.statements.iter().all(|statement| matches!(statement, Statement::Return(_))));
		parse_display("return 2 * 3;", "return (2 * 3);");
	}

	#[test]
	fn parse_literals() {
		parse_display("foobar;", "foobar");
		parse_display("5;", "5");
		parse_display("true;", "true");
		parse_display("false;", "false");
		parse_display(r#""hello world";"#, "hello world");
	}

	#[test]
	fn parse_prefix_expressions() {
		parse_display("!5;", "(!5)");
		parse_display("-15;", "(-15)");
		parse_display("!true;", "(!true)");
		parse_display("!!false;", "(!(!false))");
	}

	#[test]
	fn parse_infix_expressions() {
		for operator in ["+", "-", "*", "/", ">", "<", "==", "!="] {
			parse_display(&format!("5 {operator} 5;"), &format!("(5 {operator} 5)"));
		}
	}

	#[test]
	fn parse_operator_precedence() {
		let tests = [
			("-a * b", "((-a) * b)"),
			("!-a", "(!(-a))"),
			("a + b + c", "((a + b) + c)"),
			("a + b - c", "((a + b) - c)"),
			("a * b * c", "((a * b) * c)"),
			("a * b / c", "((a * b) / c)"),
			("a + b / c", "(a + (b / c))"),
			("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
			("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
			("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
			("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
			("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
			("3 > 5 == false", "((3 > 5) == false)"),
			("(5 + 5) * 2", "((5 + 5) * 2)"),
			("2 / (5 + 5)", "(2 / (5 + 5))"),
			("-(5 + 5)", "(-(5 + 5))"),
			("!(true == true)", "(!(true == true))"),
			("a + add(b * c) + d", "((a + add((b * c))) + d)"),
			("add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))", "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))"),
			("a * [1, 2, 3, 4][b * c] * d", "((a * ([1, 2, 3, 4][(b * c)])) * d)"),
			("add(a * b[2], b[1], 2 * [1, 2][1])", "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))"),
		];

		for (input, expected) in tests {
			parse_display(input, expected);
		}
	}

	#[test]
	fn parse_if_expressions() {
		parse_display("if (x < y) { x }", "if (x < y) x");
		parse_display("if (x < y) { x } else { y }", "if (x < y) x else y");

		let program = parse("if (x < y) { x }");
		let Statement::Expression(Expression::If { alternative, .. }) = &program.statements[0] else {
			panic!("expected if expression");
		};
		assert!(alternative.is_none());
	}

	#[test]
	fn parse_function_literals() {
		parse_display("fn(x, y) { x + y; }", "fn(x, y) (x + y)");
		parse_display("fn() {};", "fn() ");
		parse_display("fn(x) { x };", "fn(x) x");

		let program = parse("fn(x, y, z) {};");
		let Statement::Expression(Expression::FunctionLiteral { parameters, .. }) = &program.statements[0]
		else {
			panic!("expected function literal");
		};
		assert_eq!(**parameters, ["x", "y", "z"]);
	}

	#[test]
	fn parse_call_expressions() {
		parse_display("add(1, 2 * 3, 4 + 5);", "add(1, (2 * 3), (4 + 5))");
		parse_display("empty();", "empty()");
		parse_display("fn(x) { x; }(5)", "fn(x) x(5)");
	}

	#[test]
	fn parse_array_literals() {
		parse_display("[1, 2 * 2, 3 + 3]", "[1, (2 * 2), (3 + 3)]");
		parse_display("[]", "[]");
		parse_display("myArray[1 + 1]", "(myArray[(1 + 1)])");
	}

	#[test]
	fn parse_dict_literals() {
		parse_display(r#"{"one": 1, "two": 2}"#, "{one: 1, two: 2}");
		parse_display("{}", "{}");
		parse_display("{1: 1, true: 2}", "{1: 1, true: 2}");
		parse_display(r#"{"a": 0 + 1, "b": 10 - 8}"#, "{a: (0 + 1), b: (10 - 8)}");
	}

	#[test]
	fn parse_error_recording() {
		let errors = parse_errors("let x 5;");
		assert_eq!(errors.len(), 1);
		assert!(errors[0].contains("expected next token to be =, got INT instead"), "got {errors:?}");

		let errors = parse_errors("let = 10;");
		assert!(errors[0].contains("expected next token to be IDENT"), "got {errors:?}");

		let errors = parse_errors("]");
		assert_eq!(errors, ["no prefix parse function for ]"]);

		// One bad statement does not hide the next one.
		let errors = parse_errors("let x 5; let y = 10;");
		assert_eq!(errors.len(), 1);
	}

	#[test]
	fn parse_statement_without_trailing_semicolon() {
		let program = parse("let x = 5");
		assert_eq!(program.statements.len(), 1);
		assert_eq!(program.to_string(), "let x = 5;");
	}
}
