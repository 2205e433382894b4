//! Error types for the interpreter.
//!
//! This module defines the two error channels:
//!
//! - Positioned parse diagnostics, accumulated by the parser
//! - Runtime error kinds, whose messages become `Object::Error` values

pub mod errors;
