//! # How bare text becomes a running value
//!
//! User's source code: `let addTwo = fn(x) { x + 2 };`

//! ## Lexing
//!
//! The lexer takes in the characters and converts them into tokens. Single
//! characters `(`, `,`, numbers `123`, string literals `"hi!"`, identifiers
//! `addTwo` are all tokens. Whitespace is skipped, so the tokens are
//! `["let", "addTwo", "=", "fn", "(", "x", ")", "{", "x", "+", "2", "}", ";"]`.
//!
//! A character that fits no rule becomes an `Illegal` token; the lexer
//! itself never fails, the parser rejects the garbage later.

//! ## Parsing
//!
//! The parser builds a tree structure out of the tokens -- the `abstract
//! syntax tree` or `AST` -- and reports syntax errors. Statements are parsed
//! by recursive descent; expressions use Pratt's operator-precedence scheme,
//! where each token kind knows how to start an expression (prefix position)
//! and how to continue one (infix position), and a precedence table decides
//! who binds tighter.
//!
//! ``` markdown
//! addTwo (Statement::Let)
//! └── fn(x) (Expression::FunctionLiteral)
//!     └── + (Expression::Infix)
//!         ├── x (Expression::Identifier)
//!         └── 2 (Expression::IntegerLiteral)
//! ```

//! ## Evaluation
//!
//! This is a tree-walk interpreter: it executes the AST directly, no
//! bytecode, no virtual machine. Evaluation happens against an
//! [`environment::Environment`] -- a chain of name-to-value frames that
//! gives the language lexical scope and, because function values keep a
//! handle to the frame they were born in, real closures.
//!
//! Runtime errors are values with a message, not host panics: they
//! short-circuit outward through every enclosing expression until the driver
//! prints them as `ERROR: <message>`. A `return` travels the same road but
//! stops at the function-call boundary that spawned the body.

pub mod ast;
pub mod cli;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
mod monker;
pub mod parser;
mod utils;

pub use error::{EvaluatorError, MonkerError, RuntimeError};
pub use monker::Monker;
pub use utils::RcCell;

/// Crate-wide result alias for driver-level failures.
pub type Result<T> = std::result::Result<T, MonkerError>;
