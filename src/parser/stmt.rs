use crate::{
    ast::ast::{NodeId, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{expr::parse_expr, parser::Parser, types::parse_type_ref};

/// `print` is an ordinary identifier that only acts as a statement keyword
/// when it is called.
const PRINT: &str = "print";

pub fn parse_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let kind = parser.current_token_kind();
    if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        return handler(parser);
    }

    if kind == TokenKind::Identifier
        && parser.current_token().lexeme == PRINT
        && parser.peek_kind(1) == TokenKind::OpenParen
    {
        return parse_print_stmt(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let expr = parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon, "`;` after expression")?;

    let token = parser.tree().node(expr).token.clone();
    Ok(parser.node_with(token, NodeKind::Expression, [expr]))
}

/// A lone `;`: an expression statement with no expression.
pub fn parse_empty_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let semicolon = parser.advance();
    Ok(parser.node(semicolon, NodeKind::Expression))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let keyword = parser.advance();

    parser.expect(TokenKind::OpenParen, "`(` after `print`")?;
    let value = parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen, "`)` after printed expression")?;
    parser.expect(TokenKind::Semicolon, "`;` after print statement")?;

    Ok(parser.node_with(keyword, NodeKind::Print, [value]))
}

/// `var name : Type [= expr];` (`val` is accepted in place of `var`)
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let keyword = parser.advance();

    let name = parser.expect(
        TokenKind::Identifier,
        &format!("variable name after `{}`", keyword.lexeme),
    )?;
    parser.expect(TokenKind::Colon, "`:` after variable name")?;
    let explicit_type = parse_type_ref(parser)?;

    let mut children = vec![explicit_type];
    if parser.matches(TokenKind::Assignment) {
        children.push(parse_expr(parser)?);
    }

    parser.expect(TokenKind::Semicolon, "`;` after variable declaration")?;

    let variable = parser.node_with(name.clone(), NodeKind::Variable, children);
    parser.declare(&name, variable);
    Ok(variable)
}

/// `if cond stmt [else stmt]`
pub fn parse_if_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let keyword = parser.advance();

    let condition = parse_expr(parser)?;
    let then_body = parse_stmt(parser)?;

    let mut children = vec![condition, then_body];
    if parser.matches(TokenKind::Else) {
        children.push(parse_stmt(parser)?);
    }

    Ok(parser.node_with(keyword, NodeKind::If, children))
}

/// `while cond stmt`
pub fn parse_while_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let keyword = parser.advance();

    let condition = parse_expr(parser)?;
    let body = parse_stmt(parser)?;

    Ok(parser.node_with(keyword, NodeKind::While, [condition, body]))
}

// TODO: bind a loop variable to a range expression once the iteration
// semantics are settled; until then `for` is rejected explicitly.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let keyword = parser.current_token().clone();
    Err(Error::at_token(
        ErrorImpl::UnsupportedStatement {
            keyword: keyword.lexeme.clone(),
        },
        &keyword,
    ))
}

/// `return [expr];`
pub fn parse_return_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let keyword = parser.advance();

    let mut children = vec![];
    if !parser.check(TokenKind::Semicolon) {
        children.push(parse_expr(parser)?);
    }

    parser.expect(TokenKind::Semicolon, "`;` after return")?;

    Ok(parser.node_with(keyword, NodeKind::Return, children))
}

/// `{ stmt* }` in a scope of its own.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let open = parser.advance();

    parser.enter_scope("block");
    let block = parse_block_body(parser, open)?;
    parser.exit_scope();

    Ok(block)
}

/// Statements up to and including the closing `}`; the `{` has already
/// been consumed. Runs in whatever scope the caller set up.
///
/// A failing statement is reported and skipped without leaving the block.
pub fn parse_block_body(parser: &mut Parser, open: Token) -> Result<NodeId, Error> {
    let mut statements = vec![];
    while parser.has_tokens() && !parser.check(TokenKind::CloseCurly) {
        let checkpoint = parser.checkpoint();

        match parse_stmt(parser) {
            Ok(statement) => statements.push(statement),
            Err(error) => parser.recover(&error, checkpoint, TokenKind::CloseCurly),
        }
    }

    parser.expect(TokenKind::CloseCurly, "`}` to close block")?;

    Ok(parser.node_with(open, NodeKind::Block, statements))
}
