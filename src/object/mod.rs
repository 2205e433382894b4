//! Runtime value model for the evaluator.
//!
//! This module contains:
//!
//! - `object`: the closed set of runtime values, the boolean/null
//!   singletons and hash keys
//! - `environment`: the lexical scope chain shared by closures
//! - `builtins`: the native function namespace consulted after the
//!   scope chain

pub mod builtins;
pub mod environment;
pub mod object;

#[cfg(test)]
mod tests;
