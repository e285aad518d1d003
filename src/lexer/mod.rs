//! Lexical analysis for monker source code.
//!
//! The lexer takes in characters and converts them into tokens: single
//! characters `(`, `,`, numbers `123`, string literals `"hi!"`, identifiers
//! `min` are all tokens. Whitespace separates lexemes and is otherwise
//! ignored.
//!
//! We can't easily detect a reserved word until we've reached the end of what
//! might instead be an identifier, this is `maximal munch`: the lexeme is
//! consumed in full and only then matched against the keyword table.
//!
//! The lexer never fails. A character that fits no rule becomes an `Illegal`
//! token carrying that character, and the parser rejects it like any other
//! unexpected token.

mod token;

use std::{iter::Peekable, str::CharIndices};

use TokenType::*;
pub use token::*;

/// A lexer for monker source code
pub struct Lexer<'a> {
	/// User input source code
	source:      &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:       usize,
	/// Points at the character currently being considered
	cursor:      usize,
	/// Tracks what source line `cursor` is on so we can produce tokens that
	/// know their location.
	line:        usize,
	/// Set once `Eof` has been handed out, so the `Iterator` impl can stop.
	reached_eof: bool,
}

impl<'a> Lexer<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0, line: 1, reached_eof: false }
	}

	/// Scan the next token from the source code. Once the input is exhausted
	/// this returns `Eof` tokens indefinitely.
	pub fn next_token(&mut self) -> Token {
		self.skip_whitespace();
		match self.source_iter.peek() {
			None => Token::new(Eof, "", self.line),
			Some(&(index, _)) => {
				// We are at the beginning of the next lexeme.
				self.start = index;
				self.cursor = index;
				self.scan_token()
			}
		}
	}

	/// Scan a single token from the source code
	fn scan_token(&mut self) -> Token {
		let Some(next_char) = self.advance() else {
			return Token::new(Eof, "", self.line);
		};
		#[rustfmt::skip]
		let r#type = match next_char {
			'=' => if self.match_next('=') { EqualEqual } else { Equal },
			'!' => if self.match_next('=') { BangEqual } else { Bang },
			'+' => Plus,
			'-' => Minus,
			'*' => Star,
			'/' => Slash,
			'<' => Less,
			'>' => Greater,
			',' => Comma,
			';' => Semicolon,
			':' => Colon,
			'(' => LeftParen,
			')' => RightParen,
			'{' => LeftBrace,
			'}' => RightBrace,
			'[' => LeftBracket,
			']' => RightBracket,
			'"' => return self.string(),
			c if c.is_ascii_digit() => return self.number(),
			c if c.is_ascii_alphabetic() || c == '_' => return self.identifier(),
			_ => Illegal,
		};

		let lexeme = &self.source[self.start..self.cursor];
		Token::new(r#type, lexeme, self.line)
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Skip whitespace between lexemes, counting lines
	fn skip_whitespace(&mut self) {
		while let Some(c) = self.peek() {
			match c {
				' ' | '\t' | '\r' => {
					self.advance();
				}
				'\n' => {
					self.line += 1;
					self.advance();
				}
				_ => break,
			}
		}
	}

	/// Scan a string literal. The payload is the raw text between the quotes,
	/// no escape processing. An unterminated string simply ends at the end of
	/// input.
	fn string(&mut self) -> Token {
		while let Some(c) = self.peek() {
			if c == '"' {
				break;
			}
			if c == '\n' {
				self.line += 1;
			}
			self.advance();
		}

		let value = &self.source[self.start + 1..self.cursor];
		if self.peek().is_some() {
			self.advance(); // The closing "
		}
		Token::new(StringLiteral, value, self.line)
	}

	/// Scan an integer literal
	fn number(&mut self) -> Token {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}

		Token::new(IntegerLiteral, &self.source[self.start..self.cursor], self.line)
	}

	/// Scan an identifier or keyword
	fn identifier(&mut self) -> Token {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		let text = &self.source[self.start..self.cursor];
		Token::new(TokenType::keyword_or_identifier(text), text, self.line)
	}
}

impl Iterator for Lexer<'_> {
	type Item = Token;

	/// Yields every token through the first `Eof`, then stops.
	fn next(&mut self) -> Option<Token> {
		if self.reached_eof {
			return None;
		}
		let token = self.next_token();
		if token.r#type == Eof {
			self.reached_eof = true;
		}
		Some(token)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lex(input: &str, expected: &[(TokenType, &str)]) {
		let mut lexer = Lexer::new(input);
		for &(r#type, literal) in expected {
			let token = lexer.next_token();
			assert_eq!(token.r#type, r#type, "wrong kind for {literal:?} in {input:?}");
			assert_eq!(token.literal, literal, "wrong literal in {input:?}");
		}
		assert_eq!(lexer.next_token().r#type, Eof);
		assert_eq!(lexer.next_token().r#type, Eof, "Eof must repeat indefinitely");
	}

	#[test]
	fn lex_operators_and_punctuation() {
		lex("=+-*/!<>", &[
			(Equal, "="),
			(Plus, "+"),
			(Minus, "-"),
			(Star, "*"),
			(Slash, "/"),
			(Bang, "!"),
			(Less, "<"),
			(Greater, ">"),
		]);
		lex(",;:(){}[]", &[
			(Comma, ","),
			(Semicolon, ";"),
			(Colon, ":"),
			(LeftParen, "("),
			(RightParen, ")"),
			(LeftBrace, "{"),
			(RightBrace, "}"),
			(LeftBracket, "["),
			(RightBracket, "]"),
		]);
	}

	#[test]
	fn lex_two_character_operators() {
		lex("== != = !", &[(EqualEqual, "=="), (BangEqual, "!="), (Equal, "="), (Bang, "!")]);
		lex("10 == 10; 10 != 9;", &[
			(IntegerLiteral, "10"),
			(EqualEqual, "=="),
			(IntegerLiteral, "10"),
			(Semicolon, ";"),
			(IntegerLiteral, "10"),
			(BangEqual, "!="),
			(IntegerLiteral, "9"),
			(Semicolon, ";"),
		]);
	}

	#[test]
	fn lex_keywords_and_identifiers() {
		lex("let fn if else return true false", &[
			(Let, "let"),
			(Function, "fn"),
			(If, "if"),
			(Else, "else"),
			(Return, "return"),
			(True, "true"),
			(False, "false"),
		]);
		lex("foo _bar baz9 letter fnord", &[
			(Identifier, "foo"),
			(Identifier, "_bar"),
			(Identifier, "baz9"),
			(Identifier, "letter"),
			(Identifier, "fnord"),
		]);
	}

	#[test]
	fn lex_strings() {
		lex(r#""hello world""#, &[(StringLiteral, "hello world")]);
		lex(r#""" "a""#, &[(StringLiteral, ""), (StringLiteral, "a")]);
		// No escape processing: the backslash is part of the payload.
		lex(r#""a\nb""#, &[(StringLiteral, r"a\nb")]);
		// Unterminated strings end at the end of input.
		lex(r#""runs off"#, &[(StringLiteral, "runs off")]);
	}

	#[test]
	fn lex_illegal_characters() {
		lex("@", &[(Illegal, "@")]);
		lex("1 @ 2", &[(IntegerLiteral, "1"), (Illegal, "@"), (IntegerLiteral, "2")]);
	}

	#[test]
	fn lex_statement() {
		lex("let add = fn(x, y) { x + y; };", &[
			(Let, "let"),
			(Identifier, "add"),
			(Equal, "="),
			(Function, "fn"),
			(LeftParen, "("),
			(Identifier, "x"),
			(Comma, ","),
			(Identifier, "y"),
			(RightParen, ")"),
			(LeftBrace, "{"),
			(Identifier, "x"),
			(Plus, "+"),
			(Identifier, "y"),
			(Semicolon, ";"),
			(RightBrace, "}"),
			(Semicolon, ";"),
		]);
	}

	#[test]
	fn lex_collections() {
		lex(r#"[1, 2]; {"key": 5}"#, &[
			(LeftBracket, "["),
			(IntegerLiteral, "1"),
			(Comma, ","),
			(IntegerLiteral, "2"),
			(RightBracket, "]"),
			(Semicolon, ";"),
			(LeftBrace, "{"),
			(StringLiteral, "key"),
			(Colon, ":"),
			(IntegerLiteral, "5"),
			(RightBrace, "}"),
		]);
	}

	#[test]
	fn lex_tracks_lines() {
		let mut last_line = 0;
		for token in Lexer::new("let x = 5;\nlet y = 10;") {
			last_line = token.line;
		}
		assert_eq!(last_line, 2);
	}

	#[test]
	fn lexer_is_an_iterator() {
		let tokens: Vec<Token> = Lexer::new("1 + 2").collect();
		assert_eq!(tokens.len(), 4);
		assert_eq!(tokens[3].r#type, Eof);
	}
}
