//! jsontree - a minimal JSON parser producing an in-memory value tree.
//!
//! The crate converts a complete JSON document held in memory into a
//! [`Value`] tree, or reports the first grammar violation it encounters.
//! Tokenization and parsing are separate passes: the tokenizer materializes
//! the full token sequence, then the parser walks it with a single forward
//! cursor.
//!
//! # Architecture
//!
//! - [`lexer`] - Tokenizer producing the flat token sequence
//! - [`parser`] - Recursive descent parser over that sequence
//! - [`types`] - The JSON value tree
//! - [`limits`] - Nesting depth bound
//! - [`writer`] - Compact rendering of a value tree back to text
//! - [`error`] - Error kinds for grammar violations
//!
//! # Example
//!
//! ```
//! use jsontree::parse;
//!
//! let value = parse(r#"{"a": [1, 2], "b": true}"#).unwrap();
//! let second = value.get("a").and_then(|a| a.get_index(1));
//! assert_eq!(second.and_then(|v| v.as_f64()), Some(2.0));
//! ```
//!
//! The grammar is deliberately restricted: the top-level value must be an
//! object or an array, and numbers are decimal (no exponent notation).

// Library code must avoid unwrap/expect/panic; failures are returned values.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod error;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod types;
pub mod writer;

// Re-export commonly used items
pub use error::{ParseError, ParseResult};
pub use lexer::{Token, TokenKind, Tokenizer};
pub use limits::Limits;
pub use parser::{parse, parse_with_limits, Parser};
pub use types::Value;
pub use writer::render;
