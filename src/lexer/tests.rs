//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers and floats)
//! - String literals, kept verbatim
//! - Operators and punctuation
//! - Comments and line tracking
//! - Error tokens

use super::{
    lexer::{tokenize, tokenize_at_line},
    tokens::{TokenKind, UNTERMINATED_STRING},
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "if else while for return var val true false constructor struct interface impl func module import operator this provider private public";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Return,
            TokenKind::Var,
            TokenKind::Val,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Constructor,
            TokenKind::Struct,
            TokenKind::Interface,
            TokenKind::Impl,
            TokenKind::Func,
            TokenKind::Module,
            TokenKind::Import,
            TokenKind::Operator,
            TokenKind::This,
            TokenKind::Provider,
            TokenKind::Private,
            TokenKind::Public,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar baz_123 _underscore CamelCase print Func");

    let expected = ["foo", "bar", "baz_123", "_underscore", "CamelCase", "print", "Func"];
    for (token, lexeme) in tokens.iter().zip(expected) {
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.lexeme, lexeme);
    }
    assert_eq!(tokens[7].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 100.5 7.");

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].lexeme, "42");
    assert_eq!(tokens[1].lexeme, "3.14");
    assert_eq!(tokens[2].lexeme, "0");
    assert_eq!(tokens[3].lexeme, "100.5");
    assert_eq!(tokens[4].kind, TokenKind::Number);
    assert_eq!(tokens[4].lexeme, "7.");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_second_decimal_point_ends_number() {
    let tokens = tokenize("1.2.3");

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].lexeme, "1.2");
    assert_eq!(tokens[1].kind, TokenKind::Dot);
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].lexeme, "3");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" "world" "multiple words" """#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, "hello");
    assert_eq!(tokens[1].lexeme, "world");
    assert_eq!(tokens[2].lexeme, "multiple words");
    assert_eq!(tokens[3].kind, TokenKind::String);
    assert_eq!(tokens[3].lexeme, "");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_strings_are_kept_verbatim() {
    let tokens = tokenize(r#""sum {a + b} \{literal\n""#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, r"sum {a + b} \{literal\n");
}

#[test]
fn test_unterminated_string() {
    let tokens = tokenize("var s : string = \"abc\nvar t");

    assert_eq!(tokens[5].kind, TokenKind::Error);
    assert_eq!(tokens[5].lexeme, UNTERMINATED_STRING);
    assert_eq!(tokens[5].line, 2);
    assert_eq!(tokens[5].column, 0);
    assert_eq!(tokens[6].kind, TokenKind::EOF);
    assert_eq!(tokens.len(), 7);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / == != < > <= >= = && || ! ->"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::Arrow,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_two_character_operators_are_greedy() {
    let tokens = tokenize("a<=b==c->d");

    assert_eq!(tokens[1].kind, TokenKind::LessEquals);
    assert_eq!(tokens[1].lexeme, "<=");
    assert_eq!(tokens[3].kind, TokenKind::Equals);
    assert_eq!(tokens[5].kind, TokenKind::Arrow);
    assert_eq!(tokens.len(), 8);
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] . , ; : ~"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Tilde,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_lone_ampersand_and_pipe_are_errors() {
    let tokens = tokenize("a & b | c");

    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].lexeme, "&");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].kind, TokenKind::Error);
    assert_eq!(tokens[3].lexeme, "|");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_unrecognized_character() {
    let tokens = tokenize("var x : int = @;");

    assert_eq!(tokens[5].kind, TokenKind::Error);
    assert_eq!(tokens[5].lexeme, "@");
    assert_eq!(tokens[6].kind, TokenKind::Semicolon);
}

#[test]
fn test_non_ascii_character_is_one_error_token() {
    let tokens = tokenize("x é y");

    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].lexeme, "é");
    assert_eq!(tokens[2].lexeme, "y");
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("var x = 5 // this is a comment\nvar y /* inline */ = 10");

    assert_eq!(
        tokens.iter().map(|token| token.lexeme.as_str()).collect::<Vec<_>>(),
        vec!["var", "x", "=", "5", "var", "y", "=", "10", ""]
    );
}

#[test]
fn test_unterminated_block_comment_is_swallowed() {
    let tokens = tokenize("a /* never closed\n b c");

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].lexeme, "a");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
    assert_eq!(tokens[1].line, 2);
}

#[test]
fn test_line_numbers() {
    let tokens = tokenize("a\nb\r\n\n  c /* x\ny */ d\n\"s\nt\" e");

    let lines: Vec<(String, u32)> = tokens
        .iter()
        .map(|token| (token.lexeme.clone(), token.line))
        .collect();

    assert_eq!(
        lines,
        vec![
            (String::from("a"), 1),
            (String::from("b"), 2),
            (String::from("c"), 4),
            (String::from("d"), 5),
            (String::from("s\nt"), 7),
            (String::from("e"), 7),
            (String::new(), 7),
        ]
    );
}

#[test]
fn test_multiline_string_takes_its_last_line() {
    let tokens = tokenize("\"a\nb\" x\ny");

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].line, 2);
    assert_eq!(tokens[1].lexeme, "x");
    assert_eq!(tokens[1].line, 2);
    assert_eq!(tokens[2].line, 3);
}

#[test]
fn test_columns() {
    let tokens = tokenize("ab  cd\n  \u{e9} x \"s\"\n\"p\nq\" z");

    let columns: Vec<(String, u32)> = tokens
        .iter()
        .map(|token| (token.lexeme.clone(), token.column))
        .collect();

    assert_eq!(
        columns,
        vec![
            (String::from("ab"), 1),
            (String::from("cd"), 5),
            (String::from("\u{e9}"), 3),
            (String::from("x"), 5),
            (String::from("s"), 7),
            (String::from("p\nq"), 0),
            (String::from("z"), 4),
            (String::new(), 5),
        ]
    );
}

#[test]
fn test_tokenize_at_line() {
    let tokens = tokenize_at_line("x +\n y", 12);

    assert_eq!(tokens[0].line, 12);
    assert_eq!(tokens[1].line, 12);
    assert_eq!(tokens[2].line, 13);
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_empty_source() {
    let tokens = tokenize("");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert_eq!(tokens[0].line, 1);
}

#[test]
fn test_stream_shape() {
    let source = "module M {\n  func f(a: List<int>) -> bool { return !(a.len() >= 2) && true; }\n}\n@ \"x";
    let tokens = tokenize(source);

    assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::EOF).count(), 1);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EOF));

    for token in &tokens[..tokens.len() - 1] {
        assert!(token.line >= 1);
        if !token.kind.is_punctuation() {
            assert!(!token.lexeme.is_empty(), "empty lexeme for {}", token);
        }
    }
}

#[test]
fn test_tokenize_mixed_expression() {
    assert_eq!(
        kinds("x + 5 * (y - 3)"),
        vec![
            TokenKind::Identifier,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::Star,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::Dash,
            TokenKind::Number,
            TokenKind::CloseParen,
            TokenKind::EOF,
        ]
    );
}
