//! Recursive descent JSON parser.
//!
//! The parser drives a [`Tokenizer`] to exhaustion when constructed,
//! materializing the whole token sequence, and then walks that sequence
//! with a single forward cursor. Nested objects and arrays are parsed by
//! direct recursion, bounded by [`Limits::max_depth`].
//!
//! The accepted grammar is deliberately restricted: the top-level value
//! must be an object or an array, and nothing may follow it.

use std::collections::BTreeMap;

use crate::error::{ParseError, ParseResult};
use crate::lexer::{Token, TokenKind, Tokenizer};
use crate::limits::Limits;
use crate::types::Value;

/// JSON parser over a materialized token sequence.
pub struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    limits: Limits,
    depth: u64,
}

impl Parser {
    /// Create a parser for the given input with standard limits.
    pub fn new(input: &str) -> Self {
        Self::with_limits(input, Limits::standard())
    }

    /// Create a parser for the given input with custom limits.
    ///
    /// The tokenizer runs to exhaustion here; parsing itself never touches
    /// the raw text again. The sequence always ends with an `Eof` sentinel.
    pub fn with_limits(input: &str, limits: Limits) -> Self {
        let mut tokenizer = Tokenizer::new(input);
        let mut tokens = Vec::new();
        loop {
            let token = tokenizer.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        Self {
            tokens,
            cursor: 0,
            limits,
            depth: 0,
        }
    }

    /// Parse the input and return the root value.
    ///
    /// The root must be an object or an array; a bare scalar at the top
    /// level fails with `UnexpectedToken`.
    pub fn parse(&mut self) -> ParseResult<Value> {
        let root = match self.current()?.kind {
            TokenKind::Eof => return Err(ParseError::UnexpectedEof),
            TokenKind::LeftBrace => self.parse_object()?,
            TokenKind::LeftBracket => self.parse_array()?,
            _ => return Err(ParseError::UnexpectedToken(self.found())),
        };

        // Nothing may follow the root value
        if self.current()?.kind != TokenKind::Eof {
            return Err(ParseError::UnexpectedToken(self.found()));
        }

        Ok(root)
    }

    /// Token at the cursor. Out-of-range access reports `UnexpectedEof`,
    /// never panics; the `Eof` sentinel keeps the cursor in range in
    /// practice.
    fn current(&self) -> ParseResult<&Token> {
        self.tokens.get(self.cursor).ok_or(ParseError::UnexpectedEof)
    }

    /// Description of the current token for error messages.
    fn found(&self) -> String {
        match self.tokens.get(self.cursor) {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        }
    }

    /// Advance past the current token iff it has the given kind.
    fn consume(&mut self, kind: TokenKind) -> bool {
        match self.tokens.get(self.cursor) {
            Some(token) if token.kind == kind => {
                self.cursor += 1;
                true
            }
            _ => false,
        }
    }

    /// Consume a token of the given kind, returning it, or fail with
    /// `UnexpectedToken`.
    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.consume(kind) {
            // consume() just advanced past a matching token
            Ok(self.tokens[self.cursor - 1].clone())
        } else {
            Err(ParseError::UnexpectedToken(self.found()))
        }
    }

    /// Parse a value in element position (array element, or the value after
    /// `:` in an object).
    ///
    /// A token that cannot start a value fails with `ExpectedValue` here;
    /// errors from deeper in the tree propagate unchanged.
    fn parse_element(&mut self) -> ParseResult<Value> {
        if !self.current()?.kind.starts_value() {
            return Err(ParseError::ExpectedValue(self.found()));
        }
        self.parse_value()
    }

    /// Parse a single JSON value.
    fn parse_value(&mut self) -> ParseResult<Value> {
        let token = self.current()?.clone();
        match token.kind {
            TokenKind::String => {
                self.cursor += 1;
                Ok(Value::String(token.text))
            }
            TokenKind::Number => {
                self.cursor += 1;
                // The tokenizer already validated the lexeme
                let number = token
                    .text
                    .parse::<f64>()
                    .map_err(|_| ParseError::UnexpectedToken(token.text.clone()))?;
                Ok(Value::Number(number))
            }
            TokenKind::Boolean => {
                self.cursor += 1;
                let flag = token
                    .text
                    .parse::<bool>()
                    .map_err(|_| ParseError::UnexpectedToken(token.text.clone()))?;
                Ok(Value::Bool(flag))
            }
            TokenKind::Null => {
                self.cursor += 1;
                Ok(Value::Null)
            }
            TokenKind::LeftBrace => self.parse_object(),
            TokenKind::LeftBracket => self.parse_array(),
            _ => Err(ParseError::UnexpectedToken(self.found())),
        }
    }

    /// Parse a JSON object: `{` ( string `:` value ( `,` string `:` value )* )? `}`.
    fn parse_object(&mut self) -> ParseResult<Value> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(ParseError::MaxDepthExceeded(
                self.depth,
                self.limits.max_depth,
            ));
        }

        self.expect(TokenKind::LeftBrace)?;

        let mut map = BTreeMap::new();

        // Empty object
        if self.consume(TokenKind::RightBrace) {
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            let key = match self.expect(TokenKind::String) {
                Ok(token) => token.text,
                Err(_) => return Err(ParseError::ExpectedString(self.found())),
            };

            if !self.consume(TokenKind::Colon) {
                return Err(ParseError::ExpectedColon(self.found()));
            }

            let value = self.parse_element()?;
            // A duplicate key overwrites the earlier entry; last one wins.
            map.insert(key, value);

            // A comma commits the next iteration to a key, so `,}` fails
            // with ExpectedString rather than closing the object.
            if self.consume(TokenKind::Comma) {
                continue;
            }
            if self.consume(TokenKind::RightBrace) {
                break;
            }
            return Err(ParseError::ExpectedComma(self.found()));
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    /// Parse a JSON array: `[` ( value ( `,` value )* )? `]`.
    fn parse_array(&mut self) -> ParseResult<Value> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(ParseError::MaxDepthExceeded(
                self.depth,
                self.limits.max_depth,
            ));
        }

        self.expect(TokenKind::LeftBracket)?;

        let mut items = Vec::new();

        // Empty array
        if self.consume(TokenKind::RightBracket) {
            self.depth -= 1;
            return Ok(Value::Array(items));
        }

        loop {
            let value = self.parse_element()?;
            items.push(value);

            if self.consume(TokenKind::Comma) {
                continue;
            }
            if self.consume(TokenKind::RightBracket) {
                break;
            }
            return Err(ParseError::ExpectedComma(self.found()));
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }
}

/// Parse a JSON document with standard limits.
pub fn parse(input: &str) -> ParseResult<Value> {
    parse_with_limits(input, Limits::standard())
}

/// Parse a JSON document with custom limits.
pub fn parse_with_limits(input: &str, limits: Limits) -> ParseResult<Value> {
    Parser::with_limits(input, limits).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_object() {
        let result = parse("{}").unwrap();
        assert_eq!(result, Value::Object(BTreeMap::new()));
    }

    #[test]
    fn test_parse_empty_array() {
        let result = parse("[]").unwrap();
        assert_eq!(result, Value::Array(vec![]));
    }

    #[test]
    fn test_parse_simple_object() {
        let result = parse(r#"{"a": 1, "b": 2}"#).unwrap();
        let mut expected = BTreeMap::new();
        expected.insert("a".to_string(), Value::Number(1.0));
        expected.insert("b".to_string(), Value::Number(2.0));
        assert_eq!(result, Value::Object(expected));
    }

    #[test]
    fn test_parse_simple_array() {
        let result = parse("[1, 2, 3]").unwrap();
        assert_eq!(
            result,
            Value::Array(vec![
                Value::Number(1.0),
                Value::Number(2.0),
                Value::Number(3.0),
            ])
        );
    }

    #[test]
    fn test_parse_nested() {
        let result = parse(r#"{"arr": [1, {"nested": true}], "num": -4.5}"#).unwrap();
        let arr = result.get("arr").unwrap();
        assert!(arr.is_array());
        let inner = arr.get_index(1).unwrap();
        assert_eq!(inner.get("nested").unwrap(), &Value::Bool(true));
        assert_eq!(result.get("num").unwrap(), &Value::Number(-4.5));
    }

    #[test]
    fn test_all_scalar_kinds() {
        let result = parse(r#"["s", 1.5, true, false, null]"#).unwrap();
        assert_eq!(
            result,
            Value::Array(vec![
                Value::String("s".to_string()),
                Value::Number(1.5),
                Value::Bool(true),
                Value::Bool(false),
                Value::Null,
            ])
        );
    }

    #[test]
    fn test_empty_input_is_unexpected_eof() {
        assert_eq!(parse(""), Err(ParseError::UnexpectedEof));
        assert_eq!(parse("   \n\t "), Err(ParseError::UnexpectedEof));
    }

    #[test]
    fn test_top_level_scalar_rejected() {
        assert_eq!(parse("42").unwrap_err().code(), 101);
        assert_eq!(parse(r#""x""#).unwrap_err().code(), 101);
        assert_eq!(parse("true").unwrap_err().code(), 101);
        assert_eq!(parse("null").unwrap_err().code(), 101);
    }

    #[test]
    fn test_missing_comma() {
        let err = parse(r#"{"a": 1 "b": 2}"#).unwrap_err();
        assert_eq!(err.code(), 105); // ExpectedComma

        let err = parse("[1 2]").unwrap_err();
        assert_eq!(err.code(), 105);
    }

    #[test]
    fn test_missing_colon() {
        let err = parse(r#"{"a" 1}"#).unwrap_err();
        assert_eq!(err.code(), 103); // ExpectedColon
    }

    #[test]
    fn test_non_string_key() {
        let err = parse(r#"{1: 2}"#).unwrap_err();
        assert_eq!(err.code(), 102); // ExpectedString
    }

    #[test]
    fn test_missing_value_after_colon() {
        let err = parse(r#"{"a": }"#).unwrap_err();
        assert_eq!(err.code(), 104); // ExpectedValue
    }

    #[test]
    fn test_trailing_comma_in_object() {
        // The comma commits the next iteration to a key
        let err = parse(r#"{"a": 1,}"#).unwrap_err();
        assert_eq!(err.code(), 102); // ExpectedString
    }

    #[test]
    fn test_trailing_comma_in_array() {
        let err = parse("[1, 2,]").unwrap_err();
        assert_eq!(err.code(), 104); // ExpectedValue
    }

    #[test]
    fn test_unterminated_string_value() {
        let err = parse(r#"{"a": "unterminated"#).unwrap_err();
        assert_eq!(err.code(), 104); // ExpectedValue at the invalid token
    }

    #[test]
    fn test_unclosed_object() {
        let err = parse(r#"{"a": 1"#).unwrap_err();
        assert_eq!(err.code(), 105); // neither comma nor brace, found eof
    }

    #[test]
    fn test_trailing_content_rejected() {
        let err = parse("[] []").unwrap_err();
        assert_eq!(err.code(), 101);

        let err = parse("{} x").unwrap_err();
        assert_eq!(err.code(), 101);
    }

    #[test]
    fn test_first_error_propagates_from_nested() {
        // The array's missing comma surfaces, not a masked ExpectedValue
        let err = parse(r#"{"a": [1 2]}"#).unwrap_err();
        assert_eq!(err.code(), 105); // ExpectedComma
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let result = parse(r#"{"a": 1, "a": 2}"#).unwrap();
        assert_eq!(result.get("a").unwrap(), &Value::Number(2.0));
        assert_eq!(result.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_depth_limit() {
        let mut limits = Limits::standard();
        limits.max_depth = 2;

        assert!(parse_with_limits("[[1]]", limits).is_ok());

        let err = parse_with_limits("[[[1]]]", limits).unwrap_err();
        assert_eq!(err, ParseError::MaxDepthExceeded(3, 2));
    }

    #[test]
    fn test_depth_resets_between_siblings() {
        let mut limits = Limits::standard();
        limits.max_depth = 2;

        // Two depth-2 containers side by side stay within the limit
        let result = parse_with_limits("[[1], [2], {}]", limits);
        assert!(result.is_ok());
    }

    #[test]
    fn test_default_depth_accepts_reasonable_nesting() {
        let doc = format!("{}1{}", "[".repeat(64), "]".repeat(64));
        assert!(parse(&doc).is_ok());
    }

    #[test]
    fn test_escaped_key() {
        let result = parse(r#"{"a\tb": 1}"#).unwrap();
        assert_eq!(result.get("a\tb").unwrap(), &Value::Number(1.0));
    }
}
