//! Expression grammar.
//!
//! One function per precedence level, loosest first. Every binary level
//! parses the next tighter level and then folds operators of its own level
//! left-associatively; assignment alone recurses into itself for its
//! right-hand side.

use crate::{
    ast::ast::{NodeId, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{interpolation::parse_interpolation, lookups::Precedence, parser::Parser};

type LevelParser = fn(&mut Parser) -> Result<NodeId, Error>;

pub fn parse_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    parse_assignment_expr(parser)
}

/// Right-associative. A left operand that cannot be assigned to is
/// reported and returned as is; the right-hand side is dropped.
pub fn parse_assignment_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let left = parse_logical_or_expr(parser)?;

    if Precedence::of(parser.current_token_kind()) != Some(Precedence::Assignment) {
        return Ok(left);
    }

    let operator = parser.advance();
    let value = parse_assignment_expr(parser)?;

    if !parser.tree().kind(left).is_assignable() {
        let target = parser.tree().node(left).token.lexeme.clone();
        parser.report(&Error::new(
            ErrorImpl::InvalidAssignmentTarget,
            operator.line,
            target,
        ));
        return Ok(left);
    }

    Ok(parser.node_with(operator, NodeKind::Binary, [left, value]))
}

fn parse_binary_level(
    parser: &mut Parser,
    level: Precedence,
    next: LevelParser,
) -> Result<NodeId, Error> {
    let mut left = next(parser)?;

    while Precedence::of(parser.current_token_kind()) == Some(level) {
        let operator = parser.advance();
        let right = next(parser)?;
        left = parser.node_with(operator, NodeKind::Binary, [left, right]);
    }

    Ok(left)
}

pub fn parse_logical_or_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    parse_binary_level(parser, Precedence::Or, parse_logical_and_expr)
}

pub fn parse_logical_and_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    parse_binary_level(parser, Precedence::And, parse_equality_expr)
}

pub fn parse_equality_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    parse_binary_level(parser, Precedence::Equality, parse_relational_expr)
}

pub fn parse_relational_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    parse_binary_level(parser, Precedence::Relational, parse_additive_expr)
}

pub fn parse_additive_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    parse_binary_level(parser, Precedence::Additive, parse_multiplicative_expr)
}

pub fn parse_multiplicative_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    parse_binary_level(parser, Precedence::Multiplicative, parse_unary_expr)
}

/// `!x`, `-x`, nesting to the right.
pub fn parse_unary_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    if Precedence::of_prefix(parser.current_token_kind()) == Some(Precedence::Unary) {
        let operator = parser.advance();
        let operand = parse_unary_expr(parser)?;
        return Ok(parser.node_with(operator, NodeKind::Unary, [operand]));
    }

    parse_postfix_expr(parser)
}

/// Calls, member accesses and indexing, chained left to right.
pub fn parse_postfix_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let mut expr = parse_primary_expr(parser)?;

    loop {
        match parser.current_token_kind() {
            TokenKind::OpenParen => expr = parse_call_expr(parser, expr)?,
            TokenKind::Dot => {
                parser.advance();
                let member = parser.expect(TokenKind::Identifier, "member name after `.`")?;
                expr = parser.node_with(member, NodeKind::MemberAccess, [expr]);
            }
            TokenKind::OpenBracket => {
                let open = parser.advance();
                let index = parse_expr(parser)?;
                parser.expect(TokenKind::CloseBracket, "`]` after index")?;
                expr = parser.node_with(open, NodeKind::ArrayAccess, [expr, index]);
            }
            _ => break,
        }
    }

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, callee: NodeId) -> Result<NodeId, Error> {
    let open = parser.advance();

    let mut arguments = vec![callee];
    while parser.has_tokens() && !parser.check(TokenKind::CloseParen) {
        arguments.push(parse_expr(parser)?);

        if !parser.matches(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen, "`)` after arguments")?;

    Ok(parser.node_with(open, NodeKind::Call, arguments))
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    match parser.current_token_kind() {
        TokenKind::Number | TokenKind::True | TokenKind::False => {
            let literal = parser.advance();
            Ok(parser.node(literal, NodeKind::Literal))
        }
        TokenKind::String => {
            let literal = parser.advance();
            if literal.lexeme.contains('{') {
                Ok(parse_interpolation(parser, &literal))
            } else {
                Ok(parser.node(literal, NodeKind::Literal))
            }
        }
        TokenKind::This => {
            let this = parser.advance();
            Ok(parser.node(this, NodeKind::This))
        }
        TokenKind::Identifier => {
            let identifier = parser.advance();
            Ok(parser.node(identifier, NodeKind::Identifier))
        }
        TokenKind::OpenParen => parse_grouping_expr(parser),
        TokenKind::Error => Err(Error::from_error_token(parser.current_token())),
        _ => Err(Error::expected("expression", parser.current_token())),
    }
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let open = parser.advance();
    let inner = parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen, "`)` after expression")?;

    Ok(parser.node_with(open, NodeKind::Grouping, [inner]))
}

/// `start ~ end [, step]`, the step defaulting to the literal `1`.
pub fn parse_range_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let start = parse_expr(parser)?;
    let tilde = parser.expect(TokenKind::Tilde, "`~` in range")?;
    let end = parse_expr(parser)?;

    let step = if parser.matches(TokenKind::Comma) {
        parse_expr(parser)?
    } else {
        let one = Token::new(TokenKind::Number, "1", tilde.line);
        parser.node(one, NodeKind::Literal)
    };

    Ok(parser.node_with(tilde, NodeKind::Range, [start, end, step]))
}
