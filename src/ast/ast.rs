use std::{collections::VecDeque, fmt::Display};

use crate::lexer::tokens::{Token, TokenKind};

use super::types::TypeInfo;

/// Index of a node inside its [`AstTree`].
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Node Kinds
///
/// Closed set of node tags: declarations, statements, then expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Declarations
    Module,
    Function,
    Struct,
    Interface,
    Impl,
    Import,
    Constructor,
    Operator,
    Variable,

    // Statements
    Return,
    Print,
    Expression,
    Block,
    If,
    While,
    For,

    // Expressions
    Binary,
    Unary,
    Call,
    MemberAccess,
    Identifier,
    Literal,
    Grouping,
    Parameter,
    TypeRef,
    StringInterpolation,
    InterpolationText,
    ArrayAccess,
    This,
    Range,
}

impl NodeKind {
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            NodeKind::Module
                | NodeKind::Function
                | NodeKind::Struct
                | NodeKind::Interface
                | NodeKind::Impl
                | NodeKind::Import
                | NodeKind::Constructor
                | NodeKind::Operator
                | NodeKind::Variable
        )
    }

    /// Expression kinds that may appear on the left of `=`.
    pub fn is_assignable(&self) -> bool {
        matches!(
            self,
            NodeKind::Identifier | NodeKind::MemberAccess | NodeKind::ArrayAccess
        )
    }
}

#[derive(Debug, Clone)]
pub struct AstNode {
    /// The token the node originates from (operator, name, keyword, ...).
    pub token: Token,
    pub kind: NodeKind,
    /// Empty unless `kind` is [`NodeKind::TypeRef`].
    pub type_info: TypeInfo,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl AstNode {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Upward link only; the parent does not depend on it.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn lexeme(&self) -> &str {
        &self.token.lexeme
    }

    /// Short human-readable tag used by [`AstTree::sexpr`] and the outline.
    pub fn label(&self) -> String {
        let lexeme = &self.token.lexeme;
        match self.kind {
            NodeKind::Module => format!("module {}", lexeme),
            NodeKind::Function => format!("func {}", lexeme),
            NodeKind::Struct => format!("struct {}", lexeme),
            NodeKind::Interface => format!("interface {}", lexeme),
            NodeKind::Impl => String::from("impl"),
            NodeKind::Import => format!("import {}", lexeme),
            NodeKind::Constructor => String::from("constructor"),
            NodeKind::Operator => format!("operator {}", lexeme),
            NodeKind::Variable => format!("var {}", lexeme),
            NodeKind::Return => String::from("return"),
            NodeKind::Print => String::from("print"),
            NodeKind::Expression => String::from("expr"),
            NodeKind::Block => String::from("block"),
            NodeKind::If => String::from("if"),
            NodeKind::While => String::from("while"),
            NodeKind::For => String::from("for"),
            NodeKind::Binary | NodeKind::Unary => lexeme.clone(),
            NodeKind::Call => String::from("call"),
            NodeKind::MemberAccess => format!(".{}", lexeme),
            NodeKind::Identifier => lexeme.clone(),
            NodeKind::Literal if self.token.kind == TokenKind::String => {
                format!("\"{}\"", lexeme)
            }
            NodeKind::Literal => lexeme.clone(),
            NodeKind::Grouping => String::from("group"),
            NodeKind::Parameter => format!("param {}", lexeme),
            NodeKind::TypeRef => self.type_info.name.clone(),
            NodeKind::StringInterpolation => String::from("interp"),
            NodeKind::InterpolationText if self.token.kind == TokenKind::Error => {
                format!("<error {}>", lexeme)
            }
            NodeKind::InterpolationText => format!("\"{}\"", lexeme),
            NodeKind::ArrayAccess => String::from("index"),
            NodeKind::This => String::from("this"),
            NodeKind::Range => String::from("range"),
        }
    }
}

/// Owns every node of a parsed compilation unit.
///
/// Nodes live in an arena and refer to each other by [`NodeId`]. Each node
/// is owned by exactly one parent (or is the root); parent links are plain
/// indices and never keep anything alive.
#[derive(Debug, Clone, Default)]
pub struct AstTree {
    nodes: Vec<AstNode>,
    root: Option<NodeId>,
}

impl AstTree {
    pub fn new() -> Self {
        AstTree::default()
    }

    /// Allocates a detached node.
    pub fn add_node(&mut self, token: Token, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(AstNode {
            token,
            kind,
            type_info: TypeInfo::default(),
            children: vec![],
            parent: None,
        });
        id
    }

    /// Appends `child` to `parent`'s children and points its parent link back.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.nodes[child.0].parent.is_none(),
            "node {:?} is already attached",
            child
        );
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn add_children(&mut self, parent: NodeId, children: impl IntoIterator<Item = NodeId>) {
        for child in children {
            self.add_child(parent, child);
        }
    }

    pub fn set_type_info(&mut self, id: NodeId, type_info: TypeInfo) {
        self.nodes[id.0].type_info = type_info;
    }

    pub fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root_node(&self) -> Option<&AstNode> {
        self.root.map(|id| self.node(id))
    }

    pub fn node(&self, id: NodeId) -> &AstNode {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn children_of_kind(&self, id: NodeId, kind: NodeKind) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.kind(*child) == kind)
            .collect()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Number of allocated nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Visits every node reachable from the root, parents before children.
    pub fn traverse_pre_order<F: FnMut(NodeId, &AstNode)>(&self, mut visit: F) {
        let Some(root) = self.root else {
            return;
        };

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            visit(id, node);
            stack.extend(node.children.iter().rev());
        }
    }

    /// Visits every node reachable from the root, one depth level at a time.
    pub fn traverse_level_order<F: FnMut(NodeId, &AstNode)>(&self, mut visit: F) {
        let Some(root) = self.root else {
            return;
        };

        let mut queue = VecDeque::from([root]);
        while let Some(id) = queue.pop_front() {
            let node = self.node(id);
            visit(id, node);
            queue.extend(node.children.iter());
        }
    }

    /// Rebuilds the tree so that it holds exactly the nodes reachable from
    /// the root, numbered in pre-order.
    pub fn compacted(&self) -> AstTree {
        let mut out = AstTree::new();
        let Some(root) = self.root else {
            return out;
        };

        let mut stack: Vec<(NodeId, Option<NodeId>)> = vec![(root, None)];
        while let Some((old, new_parent)) = stack.pop() {
            let node = self.node(old);
            let new = out.add_node(node.token.clone(), node.kind);
            out.set_type_info(new, node.type_info.clone());

            match new_parent {
                Some(parent) => out.add_child(parent, new),
                None => out.root = Some(new),
            }

            for child in node.children.iter().rev() {
                stack.push((*child, Some(new)));
            }
        }

        out
    }

    /// Compact S-expression rendering of the subtree at `id`, e.g. `(+ 1 (* 2 3))`.
    pub fn sexpr(&self, id: NodeId) -> String {
        let node = self.node(id);
        if node.children.is_empty() {
            return node.label();
        }

        let mut out = format!("({}", node.label());
        for child in &node.children {
            out.push(' ');
            out.push_str(&self.sexpr(*child));
        }
        out.push(')');
        out
    }

    fn write_outline(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        id: NodeId,
        depth: usize,
    ) -> std::fmt::Result {
        let node = self.node(id);
        writeln!(
            f,
            "{}{:?} {} (line {})",
            "  ".repeat(depth),
            node.kind,
            node.label(),
            node.token.line
        )?;
        for child in &node.children {
            self.write_outline(f, *child, depth + 1)?;
        }
        Ok(())
    }
}

impl Display for AstTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.root {
            Some(root) => self.write_outline(f, root, 0),
            None => writeln!(f, "<empty>"),
        }
    }
}
