/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Node kinds, nodes and the arena-backed tree with its traversals
/// - types: Type information attached to type-reference nodes
pub mod ast;
pub mod types;
