//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms a
//! stream of tokens into an Abstract Syntax Tree. It handles:
//!
//! - Declaration parsing (modules, functions, structs, interfaces, impls)
//! - Statement parsing (variables, control flow, print, blocks)
//! - Expression parsing through a cascade of precedence levels
//! - Type references with nested generics
//! - String interpolation
//! - Scope tracking and error recovery

pub mod decl;
pub mod expr;
pub mod interpolation;
pub mod lookups;
pub mod parser;
pub mod scope;
pub mod stmt;
pub mod types;
