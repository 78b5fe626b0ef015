//! Utility macros for the front end.
//!
//! This module defines helper macros used by the scanner:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed-text tokens
//!
//! These macros reduce boilerplate in the pattern table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$lexeme` - The token's source text
/// * `$line` - The 1-based source line
/// * `$column` - The 1-based character column
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), 3, 9);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $lexeme:expr, $line:expr, $column:expr) => {
        Token {
            kind: $kind,
            lexeme: $lexeme,
            line: $line,
            column: $column,
        }
    };
}

/// Creates a default lexer handler for operators and delimiters.
///
/// Generates a handler function that pushes a token with the given kind
/// and advances the lexer past the matched text.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
/// * `$value` - The literal string value (used for the lexeme and length)
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _matched: &str| {
            let (line, column) = (lexer.line, lexer.column());
            lexer.push(MK_TOKEN!($kind, String::from($value), line, column));
            lexer.advance_n($value.len());
        }
    };
}
