//! Lexical analysis module for the front end.
//!
//! This module contains the scanner (tokenizer) that converts source text
//! into a flat stream of tokens for parsing. It handles:
//!
//! - Table-driven tokenization using anchored regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Line tracking for diagnostics
//! - Comments and whitespace handling
//!
//! Scanning is total: malformed input becomes an error-kind token that the
//! parser turns into a diagnostic.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
