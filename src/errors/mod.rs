//! Error types and diagnostics collection for the front end.
//!
//! This module defines:
//!
//! - The crate error type, carrying the line and offending lexeme
//! - Specific error variants for each failure class
//! - The diagnostics collector every parsing layer reports into

pub mod diagnostics;
pub mod errors;

#[cfg(test)]
mod tests;
