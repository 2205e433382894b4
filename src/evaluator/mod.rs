//! Tree-walking evaluator.
//!
//! This module walks a parsed `Program` against an environment chain and
//! produces a runtime object. It handles:
//!
//! - Statement sequencing with early exit on errors and `slay`
//! - Prefix, infix, index and call expressions
//! - Closure creation and application
//! - Fallback to the builtin namespace for unresolved identifiers

pub mod evaluator;
pub mod expr;
pub mod stmt;

#[cfg(test)]
mod tests;
