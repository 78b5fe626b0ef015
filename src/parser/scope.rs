//! Lexical scope tracking used while parsing.
//!
//! Frames mirror the nesting of modules, function bodies and blocks. The
//! stack exists to catch duplicate declarations and to answer name
//! lookups; it holds [`NodeId`]s and never owns nodes.

use std::collections::HashMap;

use crate::ast::ast::NodeId;

#[derive(Debug, Clone, Default)]
pub struct ScopeFrame {
    pub name: String,
    /// Every node bound to a name in this frame, latest last.
    symbols: HashMap<String, Vec<NodeId>>,
}

impl ScopeFrame {
    pub fn new(name: &str) -> Self {
        ScopeFrame {
            name: name.to_string(),
            symbols: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.symbols.get(name).and_then(|nodes| nodes.last().copied())
    }
}

/// Stack of frames, innermost last.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack::default()
    }

    pub fn enter(&mut self, name: &str) {
        self.frames.push(ScopeFrame::new(name));
    }

    /// Pops the innermost frame. Popping an empty stack does nothing.
    pub fn exit(&mut self) {
        self.frames.pop();
    }

    /// Binds `name` in the innermost frame.
    ///
    /// Returns the node previously bound to `name` in that same frame, if
    /// any; the new binding replaces it either way. Declaring into an empty
    /// stack is ignored.
    pub fn declare(&mut self, name: &str, node: NodeId) -> Option<NodeId> {
        let frame = self.frames.last_mut()?;
        let previous = frame.get(name);
        frame.symbols.entry(name.to_string()).or_default().push(node);
        previous
    }

    /// Looks `name` up from the innermost frame outward.
    pub fn resolve(&self, name: &str) -> Option<NodeId> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    pub fn innermost(&self) -> Option<&ScopeFrame> {
        self.frames.last()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Drops frames until at most `depth` remain.
    pub fn unwind_to(&mut self, depth: usize) {
        self.frames.truncate(depth);
    }

    /// Removes every binding to a node whose index is `first` or later,
    /// uncovering whatever those bindings had replaced.
    pub fn forget_from(&mut self, first: usize) {
        for frame in &mut self.frames {
            frame.symbols.retain(|_, nodes| {
                nodes.retain(|node| node.index() < first);
                !nodes.is_empty()
            });
        }
    }
}
