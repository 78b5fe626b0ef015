//! Declaration grammar.
//!
//! Named declarations bind their name in the enclosing scope before their
//! own scope is entered, so siblings and recursive references can see it.

use crate::{
    ast::ast::{NodeId, NodeKind},
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
};

use super::{parser::Parser, stmt::{parse_block_body, parse_stmt}, types::parse_type_ref};

/// Dispatches on the current token; anything that does not start a
/// declaration is parsed as a statement.
pub fn parse_declaration(parser: &mut Parser) -> Result<NodeId, Error> {
    let mut has_modifier = false;
    while parser.check(TokenKind::Public) || parser.check(TokenKind::Private) {
        parser.advance();
        has_modifier = true;
    }

    let kind = parser.current_token_kind();
    if let Some(handler) = parser.get_decl_lookup().get(&kind).copied() {
        return handler(parser);
    }

    if has_modifier {
        return Err(Error::expected("declaration after visibility modifier", parser.current_token()));
    }

    parse_stmt(parser)
}

/// `module Name { declaration* }`
pub fn parse_module_decl(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.advance();

    let name = parser.expect(TokenKind::Identifier, "module name after `module`")?;
    let module = parser.node(name.clone(), NodeKind::Module);
    parser.declare(&name, module);

    let open = parser.expect(TokenKind::OpenCurly, "`{` after module name")?;

    let enclosing = parser.enter_module(&name.lexeme);
    parser.enter_scope(&name.lexeme);
    let declarations = parser.parse_declarations_until(TokenKind::CloseCurly);
    parser.exit_scope();
    parser.restore_module(enclosing);

    parser.expect(TokenKind::CloseCurly, "`}` to close module")?;

    let body = parser.node_with(open, NodeKind::Block, declarations);
    parser.attach(module, body);
    Ok(module)
}

/// `func Name(params) [-> ReturnType] { body }`
pub fn parse_function_decl(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.advance();

    let name = parser.expect(TokenKind::Identifier, "function name after `func`")?;
    let function = parser.node(name.clone(), NodeKind::Function);
    parser.declare(&name, function);

    parser.enter_scope(&name.lexeme);
    parse_parameters(parser, function)?;
    parse_return_type(parser, function)?;
    let body = parse_function_body(parser)?;
    parser.exit_scope();

    parser.attach(function, body);
    Ok(function)
}

/// `constructor(params) { body }`
pub fn parse_constructor_decl(parser: &mut Parser) -> Result<NodeId, Error> {
    let keyword = parser.advance();
    let constructor = parser.node(keyword, NodeKind::Constructor);

    parser.enter_scope("constructor");
    parse_parameters(parser, constructor)?;
    let body = parse_function_body(parser)?;
    parser.exit_scope();

    parser.attach(constructor, body);
    Ok(constructor)
}

/// `operator OP (params) [-> ReturnType] { body }`
///
/// Overloads share a symbol, so operators are not declared in any scope.
pub fn parse_operator_decl(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.advance();

    if !parser.current_token_kind().is_overloadable() {
        return Err(Error::expected("overloadable operator after `operator`", parser.current_token()));
    }

    let mut symbol = parser.advance();
    if symbol.kind == TokenKind::OpenBracket {
        parser.expect(TokenKind::CloseBracket, "`]` in index operator")?;
        symbol.lexeme = String::from("[]");
    }

    let operator = parser.node(symbol.clone(), NodeKind::Operator);

    parser.enter_scope(&format!("operator {}", symbol.lexeme));
    parse_parameters(parser, operator)?;
    parse_return_type(parser, operator)?;
    let body = parse_function_body(parser)?;
    parser.exit_scope();

    parser.attach(operator, body);
    Ok(operator)
}

/// `import "name" [-> alias];` or `import Name [-> alias];`
pub fn parse_import_decl(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.advance();

    let name = if parser.check(TokenKind::String) {
        parser.advance()
    } else {
        parser.expect(TokenKind::Identifier, "module name after `import`")?
    };

    let import = parser.node(name.clone(), NodeKind::Import);

    if parser.matches(TokenKind::Arrow) {
        let alias = parser.expect(TokenKind::Identifier, "alias after `->`")?;
        let alias_node = parser.node(alias.clone(), NodeKind::Identifier);
        parser.attach(import, alias_node);
        parser.declare(&alias, import);
    } else if name.kind == TokenKind::Identifier {
        parser.declare(&name, import);
    }

    parser.expect(TokenKind::Semicolon, "`;` after import")?;
    Ok(import)
}

/// `struct Name { (field : Type [;|,] | constructor … | func …)* }`
pub fn parse_struct_decl(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.advance();

    let name = parser.expect(TokenKind::Identifier, "struct name after `struct`")?;
    let structure = parser.node(name.clone(), NodeKind::Struct);
    parser.declare(&name, structure);

    parser.expect(TokenKind::OpenCurly, "`{` after struct name")?;
    parser.enter_scope(&name.lexeme);

    while parser.has_tokens() && !parser.check(TokenKind::CloseCurly) {
        let member = match parser.current_token_kind() {
            TokenKind::Public | TokenKind::Private => {
                parser.advance();
                continue;
            }
            TokenKind::Func => parse_function_decl(parser)?,
            TokenKind::Constructor => parse_constructor_decl(parser)?,
            TokenKind::Var | TokenKind::Val => {
                parser.advance();
                parse_field(parser)?
            }
            TokenKind::Identifier => parse_field(parser)?,
            _ => {
                return Err(Error::expected(
                    "field, constructor or method",
                    parser.current_token(),
                ))
            }
        };
        parser.attach(structure, member);
    }

    parser.exit_scope();
    parser.expect(TokenKind::CloseCurly, "`}` to close struct")?;
    Ok(structure)
}

fn parse_field(parser: &mut Parser) -> Result<NodeId, Error> {
    let name = parser.expect(TokenKind::Identifier, "field name")?;
    parser.expect(TokenKind::Colon, "`:` after field name")?;
    let field_type = parse_type_ref(parser)?;

    if !parser.matches(TokenKind::Semicolon) {
        parser.matches(TokenKind::Comma);
    }

    let field = parser.node_with(name.clone(), NodeKind::Variable, [field_type]);
    parser.declare(&name, field);
    Ok(field)
}

/// `interface Name { (func name(params) [-> Type];)* }`
pub fn parse_interface_decl(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.advance();

    let name = parser.expect(TokenKind::Identifier, "interface name after `interface`")?;
    let interface = parser.node(name.clone(), NodeKind::Interface);
    parser.declare(&name, interface);

    parser.expect(TokenKind::OpenCurly, "`{` after interface name")?;
    parser.enter_scope(&name.lexeme);

    while parser.has_tokens() && !parser.check(TokenKind::CloseCurly) {
        parser.expect(TokenKind::Func, "method signature")?;
        let method_name = parser.expect(TokenKind::Identifier, "method name after `func`")?;
        let method = parser.node(method_name.clone(), NodeKind::Function);
        parser.declare(&method_name, method);

        parser.enter_scope(&method_name.lexeme);
        parse_parameters(parser, method)?;
        parse_return_type(parser, method)?;
        parser.exit_scope();

        parser.expect(TokenKind::Semicolon, "`;` after method signature")?;
        parser.attach(interface, method);
    }

    parser.exit_scope();
    parser.expect(TokenKind::CloseCurly, "`}` to close interface")?;
    Ok(interface)
}

/// `impl Target { (func … | constructor … | operator …)* }`
pub fn parse_impl_decl(parser: &mut Parser) -> Result<NodeId, Error> {
    let keyword = parser.advance();
    let implementation = parser.node(keyword, NodeKind::Impl);

    let target = parse_type_ref(parser)?;
    parser.attach(implementation, target);
    let scope_name = format!("impl {}", parser.tree().node(target).type_info);

    parser.expect(TokenKind::OpenCurly, "`{` after impl target")?;
    parser.enter_scope(&scope_name);

    while parser.has_tokens() && !parser.check(TokenKind::CloseCurly) {
        let member = match parser.current_token_kind() {
            TokenKind::Public | TokenKind::Private => {
                parser.advance();
                continue;
            }
            TokenKind::Func => parse_function_decl(parser)?,
            TokenKind::Constructor => parse_constructor_decl(parser)?,
            TokenKind::Operator => parse_operator_decl(parser)?,
            _ => {
                return Err(Error::expected(
                    "method, constructor or operator",
                    parser.current_token(),
                ))
            }
        };
        parser.attach(implementation, member);
    }

    parser.exit_scope();
    parser.expect(TokenKind::CloseCurly, "`}` to close impl")?;
    Ok(implementation)
}

/// `( [name : Type (, name : Type)*] )`, attaching one Parameter per entry.
fn parse_parameters(parser: &mut Parser, owner: NodeId) -> Result<(), Error> {
    parser.expect(TokenKind::OpenParen, "`(` before parameters")?;

    while parser.has_tokens() && !parser.check(TokenKind::CloseParen) {
        let name = parser.expect(TokenKind::Identifier, "parameter name")?;
        parser.expect(TokenKind::Colon, "`:` after parameter name")?;
        let parameter_type = parse_type_ref(parser)?;

        let parameter = parser.node_with(name.clone(), NodeKind::Parameter, [parameter_type]);
        parser.declare(&name, parameter);
        parser.attach(owner, parameter);

        if !parser.matches(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen, "`)` after parameters")?;
    Ok(())
}

fn parse_return_type(parser: &mut Parser, owner: NodeId) -> Result<(), Error> {
    if parser.matches(TokenKind::Arrow) {
        let return_type = parse_type_ref(parser)?;
        parser.attach(owner, return_type);
    }
    Ok(())
}

/// Function bodies share the scope holding the parameters.
fn parse_function_body(parser: &mut Parser) -> Result<NodeId, Error> {
    let open: Token = parser.expect(TokenKind::OpenCurly, "`{` before function body")?;
    parse_block_body(parser, open)
}
