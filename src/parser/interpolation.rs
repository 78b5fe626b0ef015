//! String interpolation.
//!
//! A string lexeme such as `total: {a + b}!` is split into literal text
//! fragments and embedded expressions. Each embedded expression is scanned
//! and parsed on its own with the regular expression grammar. `\{` stands
//! for a literal brace; braces do not nest.

use crate::{
    ast::ast::{NodeId, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::tokenize_at_line,
        tokens::{Token, TokenKind},
    },
};

use super::{expr::parse_expr, parser::Parser};

/// Builds a StringInterpolation node for `literal`.
///
/// Never fails: an unclosed `{` and embedded expressions that do not parse
/// are reported, and scanning of the string carries on.
pub fn parse_interpolation(parser: &mut Parser, literal: &Token) -> NodeId {
    let line = literal.line;
    let lexeme = literal.lexeme.as_str();
    let mut fragments = vec![];
    let mut text = String::new();
    let mut rest = lexeme;

    while let Some(open) = rest.find('{') {
        let before = &rest[..open];

        if let Some(escaped) = before.strip_suffix('\\') {
            text.push_str(escaped);
            text.push('{');
            rest = &rest[open + 1..];
            continue;
        }

        text.push_str(before);
        if !text.is_empty() {
            fragments.push(text_fragment(parser, std::mem::take(&mut text), line));
        }

        let inner = &rest[open + 1..];
        match inner.find('}') {
            Some(close) => {
                let column = embedded_column(literal, &lexeme[..lexeme.len() - inner.len()]);
                fragments.push(parse_embedded_expr(parser, &inner[..close], line, column));
                rest = &inner[close + 1..];
            }
            None => {
                let remainder = &rest[open..];
                parser.report(&Error::new(ErrorImpl::UnclosedInterpolation, line, remainder));
                fragments.push(text_fragment(parser, remainder.to_string(), line));
                rest = "";
                break;
            }
        }
    }

    text.push_str(rest);
    if !text.is_empty() {
        fragments.push(text_fragment(parser, text, line));
    }

    parser.node_with(literal.clone(), NodeKind::StringInterpolation, fragments)
}

fn text_fragment(parser: &mut Parser, text: String, line: u32) -> NodeId {
    parser.node(Token::new(TokenKind::String, text, line), NodeKind::InterpolationText)
}

/// Column of the first character after `prefix` inside `literal`, or 0
/// when the literal's own column is unknown.
fn embedded_column(literal: &Token, prefix: &str) -> u32 {
    if literal.column == 0 {
        return 0;
    }
    // One for the opening quote.
    literal.column + 1 + prefix.chars().count() as u32
}

/// Parses `source` as one complete expression. On failure the error is
/// reported and an error-marker fragment holding `source` stands in.
fn parse_embedded_expr(parser: &mut Parser, source: &str, line: u32, column: u32) -> NodeId {
    let tokens = tokenize_at_line(source, line)
        .into_iter()
        .map(|mut token| {
            token.column = if column == 0 { 0 } else { column + token.column - 1 };
            token
        })
        .collect();

    let result = parser.with_token_stream(tokens, |parser: &mut Parser| -> Result<NodeId, Error> {
        let expr = parse_expr(parser)?;
        if parser.has_tokens() {
            return Err(Error::unexpected(parser.current_token()));
        }
        Ok(expr)
    });

    match result {
        Ok(expr) => expr,
        Err(error) => {
            parser.report(&error);
            parser.node(
                Token::new(TokenKind::Error, source, line),
                NodeKind::InterpolationText,
            )
        }
    }
}
