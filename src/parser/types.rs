//! Type reference parsing.
//!
//! Handles plain names and generic applications such as
//! `Map<string, List<int>>`, recursively.

use crate::{
    ast::{
        ast::{NodeId, NodeKind},
        types::TypeInfo,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// `Name [< Type (, Type)* >]`
///
/// The node's [`TypeInfo`] mirrors its TypeRef children.
pub fn parse_type_ref(parser: &mut Parser) -> Result<NodeId, Error> {
    let name = parser.expect(TokenKind::Identifier, "type name")?;

    let mut params = vec![];
    if parser.matches(TokenKind::Less) {
        loop {
            params.push(parse_type_ref(parser)?);
            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
        parser.expect(TokenKind::Greater, "`>` to close generic parameters")?;
    }

    let generic_params = params
        .iter()
        .map(|param| parser.tree().node(*param).type_info.clone())
        .collect();
    let type_info = TypeInfo::named(&name.lexeme).with_generic_params(generic_params);

    let type_ref = parser.node_with(name, NodeKind::TypeRef, params);
    parser.tree_mut().set_type_info(type_ref, type_info);
    Ok(type_ref)
}
