//! Lexical analysis module for the interpreter.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into tokens for parsing. It handles:
//!
//! - Pull-based tokenization driven by an ordered regex pattern table
//! - Recognition of keywords, identifiers, integer and string literals
//! - Two-character operators tried before their one-character forms
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;
