//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct, its token-cursor helpers
//! and the entry points that drive a whole compilation unit.
//!
//! It maintains:
//! - Declaration and statement dispatch tables keyed by token kind
//! - The tree under construction
//! - The diagnostics collector for the unit
//! - The scope stack and the name of the module being parsed
//!
//! Errors inside a declaration are propagated with `?` up to the nearest
//! declaration list, recorded there, and followed by synchronization so the
//! next declaration can still be parsed.

use std::collections::HashMap;

use crate::{
    ast::ast::{AstTree, NodeId, NodeKind},
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    lexer::tokens::{Token, TokenKind},
};

use super::{
    decl::parse_declaration,
    lookups::{create_token_lookups, DeclHandler, DeclLookup, StmtHandler, StmtLookup},
    scope::ScopeStack,
};

/// Tokens that begin a new declaration or statement; recovery stops before them.
const SYNC_POINTS: [TokenKind; 10] = [
    TokenKind::Func,
    TokenKind::Module,
    TokenKind::Struct,
    TokenKind::Interface,
    TokenKind::Impl,
    TokenKind::Import,
    TokenKind::If,
    TokenKind::While,
    TokenKind::For,
    TokenKind::Return,
];

/// Parser state saved before a declaration or statement, restored when it fails.
pub struct Checkpoint {
    depth: usize,
    module: String,
    nodes: usize,
}

/// The main parser structure that maintains parsing state.
///
/// A parser is single-use: it is consumed by [`Parser::finish`].
pub struct Parser {
    /// The list of tokens to parse, always terminated by EOF
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Arena receiving every node built so far
    tree: AstTree,
    diagnostics: Diagnostics,
    scopes: ScopeStack,
    /// Name of the innermost module being parsed, empty outside modules
    current_module: String,
    /// Lookup table for declaration handlers
    decl_lookup: DeclLookup,
    /// Lookup table for statement handlers
    stmt_lookup: StmtLookup,
}

impl Parser {
    /// Creates a new Parser over `tokens`.
    ///
    /// A missing trailing EOF token is supplied.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let line = tokens.last().map(|token| token.line).unwrap_or(1);
            tokens.push(Token::new(TokenKind::EOF, "", line));
        }

        let mut parser = Parser {
            tokens,
            pos: 0,
            tree: AstTree::new(),
            diagnostics: Diagnostics::new(),
            scopes: ScopeStack::new(),
            current_module: String::new(),
            decl_lookup: HashMap::new(),
            stmt_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    /// Kind of the token `offset` places ahead, saturating at EOF.
    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        self.tokens[index].kind
    }

    /// The most recently consumed token.
    pub fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    /// Advances to the next token and returns the one just consumed.
    ///
    /// The cursor never moves past EOF.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        token
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_token_kind() == kind
    }

    /// Consumes the current token if it is of `kind`.
    pub fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a token of the specified kind.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `expected` - What was expected, phrased for the diagnostic
    ///
    /// # Returns
    ///
    /// The consumed token, or an error located at the token actually found.
    pub fn expect(&mut self, expected_kind: TokenKind, expected: &str) -> Result<Token, Error> {
        if self.check(expected_kind) {
            Ok(self.advance())
        } else {
            Err(Error::expected(expected, self.current_token()))
        }
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns a reference to the declaration lookup table.
    pub fn get_decl_lookup(&self) -> &DeclLookup {
        &self.decl_lookup
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers a declaration handler for a token.
    pub fn decl(&mut self, kind: TokenKind, decl_fn: DeclHandler) {
        self.decl_lookup.insert(kind, decl_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn tree(&self) -> &AstTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut AstTree {
        &mut self.tree
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Allocates a detached node.
    pub fn node(&mut self, token: Token, kind: NodeKind) -> NodeId {
        self.tree.add_node(token, kind)
    }

    /// Allocates a node and attaches `children` to it in order.
    pub fn node_with(
        &mut self,
        token: Token,
        kind: NodeKind,
        children: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        let id = self.tree.add_node(token, kind);
        self.tree.add_children(id, children);
        id
    }

    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.tree.add_child(parent, child);
    }

    pub fn report(&mut self, error: &Error) {
        self.diagnostics.report_error(error);
    }

    pub fn enter_scope(&mut self, name: &str) {
        self.scopes.enter(name);
    }

    pub fn exit_scope(&mut self) {
        self.scopes.exit();
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    /// Binds `name` to `node` in the innermost scope, reporting a duplicate.
    ///
    /// A duplicate is a soft error: the new node replaces the old binding
    /// and parsing continues.
    pub fn declare(&mut self, name: &Token, node: NodeId) {
        if self.scopes.declare(&name.lexeme, node).is_some() {
            let scope = self
                .scopes
                .innermost()
                .map(|frame| frame.name.clone())
                .unwrap_or_default();

            self.report(&Error::at_token(
                ErrorImpl::DuplicateIdentifier {
                    name: name.lexeme.clone(),
                    scope,
                },
                name,
            ));
        }
    }

    /// Looks `name` up from the innermost scope outward.
    pub fn resolve(&self, name: &str) -> Option<NodeId> {
        self.scopes.resolve(name)
    }

    pub fn current_module(&self) -> &str {
        &self.current_module
    }

    /// Makes `name` the current module, returning the enclosing one.
    pub fn enter_module(&mut self, name: &str) -> String {
        std::mem::replace(&mut self.current_module, name.to_string())
    }

    pub fn restore_module(&mut self, enclosing: String) {
        self.current_module = enclosing;
    }

    /// Skips tokens after a failed declaration or statement.
    ///
    /// Always consumes at least one token, then stops right after a `;` or
    /// right before a token that starts a declaration or statement.
    pub fn synchronize(&mut self) {
        self.synchronize_before(TokenKind::EOF);
    }

    /// Same as [`Parser::synchronize`], but never consumes the `end` token
    /// closing the enclosing construct. Braced groups met on the way are
    /// skipped whole.
    pub fn synchronize_before(&mut self, end: TokenKind) {
        if self.check(end) {
            return;
        }

        let mut nesting = 0usize;
        loop {
            let skipped = self.advance();
            match skipped.kind {
                TokenKind::OpenCurly => nesting += 1,
                TokenKind::CloseCurly => nesting = nesting.saturating_sub(1),
                _ => {}
            }

            if !self.has_tokens() {
                return;
            }
            if nesting > 0 {
                continue;
            }

            if skipped.kind == TokenKind::Semicolon
                || self.check(end)
                || SYNC_POINTS.contains(&self.current_token_kind())
            {
                return;
            }
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            depth: self.scopes.depth(),
            module: self.current_module.clone(),
            nodes: self.tree.len(),
        }
    }

    /// Reports `error`, rolls scopes, bindings and the current module back
    /// to `checkpoint`, then skips ahead to a restart point before `end`.
    pub fn recover(&mut self, error: &Error, checkpoint: Checkpoint, end: TokenKind) {
        self.report(error);
        self.scopes.unwind_to(checkpoint.depth);
        self.scopes.forget_from(checkpoint.nodes);
        self.current_module = checkpoint.module;
        self.synchronize_before(end);
    }

    /// Parses declarations until `end` (not consumed) or EOF.
    ///
    /// A failing declaration is reported and skipped; scope and module state
    /// are rolled back to what they were before it started.
    pub fn parse_declarations_until(&mut self, end: TokenKind) -> Vec<NodeId> {
        let mut declarations = vec![];

        while self.has_tokens() && !self.check(end) {
            let checkpoint = self.checkpoint();

            match parse_declaration(self) {
                Ok(declaration) => declarations.push(declaration),
                Err(error) => self.recover(&error, checkpoint, end),
            }
        }

        declarations
    }

    /// Runs `rule` over a separate token stream, sharing this parser's
    /// tree, diagnostics and scopes, then restores the original cursor.
    pub fn with_token_stream<T>(
        &mut self,
        tokens: Vec<Token>,
        rule: impl FnOnce(&mut Parser) -> T,
    ) -> T {
        let saved_tokens = std::mem::replace(&mut self.tokens, tokens);
        let saved_pos = std::mem::replace(&mut self.pos, 0);

        let result = rule(self);

        self.tokens = saved_tokens;
        self.pos = saved_pos;
        result
    }

    /// Consumes the parser, returning the tree rooted at `root` (holding
    /// only the reachable nodes) and the collected diagnostics.
    pub fn finish(mut self, root: Option<NodeId>) -> (AstTree, Diagnostics) {
        self.tree.set_root(root);
        (self.tree.compacted(), self.diagnostics)
    }
}

/// Parses a token stream into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. Every top-level declaration
/// that parses successfully becomes a child of a synthetic block root; the
/// others are reported and skipped.
///
/// # Returns
///
/// A tuple containing:
/// - The tree; its root is `None` only when the stream holds nothing but EOF
/// - The diagnostics, in report order
pub fn parse(tokens: Vec<Token>) -> (AstTree, Diagnostics) {
    let mut parser = Parser::new(tokens);

    if !parser.has_tokens() {
        return parser.finish(None);
    }

    parser.enter_scope("global");
    let declarations = parser.parse_declarations_until(TokenKind::EOF);
    parser.exit_scope();

    let root = parser.node_with(Token::new(TokenKind::Top, "", 0), NodeKind::Block, declarations);
    parser.finish(Some(root))
}

/// Parses a stream holding a single construct of the grammar, such as one
/// expression or one type reference.
///
/// Leftover tokens after the construct are reported. On failure the tree
/// is empty and the failure is the last diagnostic.
pub fn parse_fragment(
    tokens: Vec<Token>,
    rule: fn(&mut Parser) -> Result<NodeId, Error>,
) -> (AstTree, Diagnostics) {
    let mut parser = Parser::new(tokens);

    let root = match rule(&mut parser) {
        Ok(root) => {
            if parser.has_tokens() {
                let error = Error::unexpected(parser.current_token());
                parser.report(&error);
            }
            Some(root)
        }
        Err(error) => {
            parser.report(&error);
            None
        }
    };

    parser.finish(root)
}
