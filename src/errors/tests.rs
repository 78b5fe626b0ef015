//! Unit tests for error handling.
//!
//! This module contains tests for error types and the diagnostics collector.

use crate::errors::{
    diagnostics::{Diagnostic, Diagnostics},
    errors::{Error, ErrorImpl, ErrorTip},
};
use crate::lexer::tokens::{Token, TokenKind, UNTERMINATED_STRING};

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        10,
        "@",
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_line(), 10);
    assert_eq!(error.get_context(), "@");
    assert_eq!(error.message(), "unrecognised character `@`");
    assert_eq!(error.to_string(), "line 10: unrecognised character `@`");
}

#[test]
fn test_error_at_token() {
    let token = Token::new(TokenKind::Identifier, "x", 42);
    let error = Error::at_token(
        ErrorImpl::UnexpectedToken {
            token: "x".to_string(),
        },
        &token,
    );

    assert_eq!(error.get_line(), 42);
    assert_eq!(error.get_column(), 0);
    assert_eq!(error.get_context(), "x");
    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_expected_error() {
    let found = Token::new(TokenKind::Semicolon, ";", 3);
    let error = Error::expected("expression", &found);

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::ExpectedToken {
            expected: "expression".to_string(),
            found: "`;`".to_string(),
        }
    );
    assert_eq!(error.message(), "expected expression, found `;`");
    assert_eq!(error.get_line(), 3);
}

#[test]
fn test_expected_at_end_of_input() {
    let eof = Token::new(TokenKind::EOF, "", 9);
    let error = Error::expected("`}` to close block", &eof);

    assert_eq!(error.message(), "expected `}` to close block, found end of input");
    assert_eq!(error.get_context(), "");
    assert_eq!(error.get_line(), 9);
}

#[test]
fn test_expected_defers_to_scanner_errors() {
    let bad = Token::new(TokenKind::Error, "#", 1);
    assert_eq!(Error::expected("expression", &bad).get_error_name(), "UnrecognisedToken");

    let unterminated = Token::new(TokenKind::Error, UNTERMINATED_STRING, 2);
    assert_eq!(
        Error::unexpected(&unterminated).get_kind(),
        &ErrorImpl::UnterminatedString
    );
}

#[test]
fn test_from_error_token() {
    let unterminated = Token::new(TokenKind::Error, UNTERMINATED_STRING, 5);
    let error = Error::from_error_token(&unterminated);
    assert_eq!(error.get_error_name(), "UnterminatedString");
    assert_eq!(error.message(), "unterminated string");

    let stray = Token::new(TokenKind::Error, "&", 5);
    let error = Error::from_error_token(&stray);
    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UnrecognisedToken {
            token: "&".to_string()
        }
    );
}

#[test]
fn test_unexpected_error() {
    let token = Token::new(TokenKind::Number, "2", 1);
    let error = Error::unexpected(&token);

    assert_eq!(error.message(), "unexpected token `2`");
}

#[test]
fn test_duplicate_identifier_error() {
    let error = Error::new(
        ErrorImpl::DuplicateIdentifier {
            name: "f".to_string(),
            scope: "M".to_string(),
        },
        2,
        "f",
    );

    assert_eq!(error.get_error_name(), "DuplicateIdentifier");
    assert_eq!(error.message(), "duplicate identifier in scope `M`: `f`");
}

#[test]
fn test_error_tips() {
    let with_tip = Error::new(ErrorImpl::UnclosedInterpolation, 1, "{x");
    match with_tip.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("\\{")),
        ErrorTip::None => panic!("expected a suggestion"),
    }

    let without_tip = Error::new(
        ErrorImpl::UnsupportedStatement {
            keyword: "for".to_string(),
        },
        1,
        "for",
    );
    assert!(matches!(without_tip.get_tip(), ErrorTip::None));
    assert_eq!(without_tip.get_tip().to_string(), "");
    assert_eq!(without_tip.message(), "`for` statements are not supported yet");
}

#[test]
fn test_diagnostics_report() {
    let mut diagnostics = Diagnostics::new();
    assert!(!diagnostics.has_errors());
    assert!(diagnostics.is_empty());

    let recorded = diagnostics.report(4, "bad thing", "x").clone();
    assert_eq!(
        recorded,
        Diagnostic {
            line: 4,
            message: "bad thing".to_string(),
            context: "x".to_string(),
            ..Diagnostic::default()
        }
    );

    diagnostics.report_error(&Error::new(ErrorImpl::InvalidAssignmentTarget, 7, "1"));

    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.list()[1].line, 7);
    assert_eq!(diagnostics.list()[1].message, "invalid assignment target");
}

#[test]
fn test_report_error_keeps_position_name_and_tip() {
    let mut token = Token::new(TokenKind::Semicolon, ";", 6);
    token.column = 14;

    let mut diagnostics = Diagnostics::new();
    let recorded = diagnostics
        .report_error(&Error::expected("expression", &token))
        .clone();

    assert_eq!(recorded.line, 6);
    assert_eq!(recorded.column, 14);
    assert_eq!(recorded.name, "ExpectedToken");
    assert_eq!(recorded.tip.as_deref(), Some("insert expression here"));

    let recorded = diagnostics
        .report_error(&Error::new(
            ErrorImpl::UnsupportedStatement {
                keyword: "for".to_string(),
            },
            2,
            "for",
        ))
        .clone();
    assert_eq!(recorded.column, 0);
    assert_eq!(recorded.tip, None);
}

#[test]
fn test_diagnostics_keep_report_order() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(9, "late line first", "");
    diagnostics.report(1, "early line second", "");

    let lines: Vec<u32> = (&diagnostics).into_iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![9, 1]);
}

#[test]
fn test_diagnostics_clear() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(1, "one", "");
    diagnostics.clear();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.list().is_empty());
}

#[test]
fn test_diagnostic_display() {
    let with_context = Diagnostic {
        line: 3,
        message: "unrecognised character `@`".to_string(),
        context: "@".to_string(),
        ..Diagnostic::default()
    };
    let without_context = Diagnostic {
        line: 8,
        message: "unterminated string".to_string(),
        ..Diagnostic::default()
    };

    assert_eq!(
        with_context.to_string(),
        "[line 3] unrecognised character `@` (at `@`)"
    );
    assert_eq!(without_context.to_string(), "[line 8] unterminated string");
}
