use std::collections::HashMap;

use crate::{ast::ast::NodeId, errors::errors::Error, lexer::tokens::TokenKind};

use super::{decl::*, parser::Parser, stmt::*};

/// Binding power of each expression level, loosest first.
///
/// The expression grammar is a cascade of one function per level; this
/// table is what each level consults to decide whether the current token
/// belongs to it.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum Precedence {
    Assignment = 10,
    Or = 20,
    And = 30,
    Equality = 40,
    Relational = 50,
    Additive = 60,
    Multiplicative = 70,
    Unary = 80,
    Postfix = 90,
}

impl Precedence {
    /// Level of `kind` when it follows an operand.
    pub fn of(kind: TokenKind) -> Option<Precedence> {
        match kind {
            TokenKind::Assignment => Some(Precedence::Assignment),
            TokenKind::Or => Some(Precedence::Or),
            TokenKind::And => Some(Precedence::And),
            TokenKind::Equals | TokenKind::NotEquals => Some(Precedence::Equality),
            TokenKind::Less
            | TokenKind::LessEquals
            | TokenKind::Greater
            | TokenKind::GreaterEquals => Some(Precedence::Relational),
            TokenKind::Plus | TokenKind::Dash => Some(Precedence::Additive),
            TokenKind::Star | TokenKind::Slash => Some(Precedence::Multiplicative),
            TokenKind::OpenParen | TokenKind::Dot | TokenKind::OpenBracket => {
                Some(Precedence::Postfix)
            }
            _ => None,
        }
    }

    /// Level of `kind` when it starts an operand.
    pub fn of_prefix(kind: TokenKind) -> Option<Precedence> {
        match kind {
            TokenKind::Not | TokenKind::Dash => Some(Precedence::Unary),
            _ => None,
        }
    }
}

pub type DeclHandler = fn(&mut Parser) -> Result<NodeId, Error>;
pub type StmtHandler = fn(&mut Parser) -> Result<NodeId, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Declarations
    parser.decl(TokenKind::Module, parse_module_decl);
    parser.decl(TokenKind::Func, parse_function_decl);
    parser.decl(TokenKind::Import, parse_import_decl);
    parser.decl(TokenKind::Struct, parse_struct_decl);
    parser.decl(TokenKind::Interface, parse_interface_decl);
    parser.decl(TokenKind::Impl, parse_impl_decl);
    parser.decl(TokenKind::Constructor, parse_constructor_decl);
    parser.decl(TokenKind::Operator, parse_operator_decl);

    // Statements
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::Var, parse_var_decl_stmt);
    parser.stmt(TokenKind::Val, parse_var_decl_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
    parser.stmt(TokenKind::Semicolon, parse_empty_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type DeclLookup = HashMap<TokenKind, DeclHandler>;
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
