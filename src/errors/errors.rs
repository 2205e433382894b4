use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, object::object::ObjectKind, Position};

/// A parse diagnostic with the source position it was raised at.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NoPrefixRule { .. } => "NoPrefixRule",
            ErrorImpl::NoInfixRule { .. } => "NoInfixRule",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },
    #[error("no prefix parse function for {kind} found")]
    NoPrefixRule { kind: TokenKind },
    #[error("no infix parse function for {kind} found")]
    NoInfixRule { kind: TokenKind },
    #[error("could not parse {token:?} as integer")]
    NumberParseError { token: String },
}

/// Failures raised while evaluating.
///
/// These never unwind: the evaluator turns them into `Object::Error`
/// values through their `Display` text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("L + ratio + type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ObjectKind,
        operator: String,
        right: ObjectKind,
    },
    #[error("we don't do that here. unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: ObjectKind,
        operator: String,
        right: ObjectKind,
    },
    #[error("we don't do that here. unknown operator: {operator}{right}")]
    UnknownPrefixOperator { operator: String, right: ObjectKind },
    #[error("bruh moment! identifier not found: {name}")]
    IdentifierNotFound { name: String },
    #[error("nah fam {kind} cannot be used as a hash key")]
    UnusableAsHashKey { kind: ObjectKind },
    #[error("index operator not supported: {kind}")]
    IndexNotSupported { kind: ObjectKind },
    #[error("not a function: {kind}")]
    NotAFunction { kind: ObjectKind },
    #[error("wrong number of arguments. got={got}, want={want}")]
    WrongArgumentCount { got: usize, want: usize },
    #[error("argument to `{builtin}` not supported, got {kind}")]
    UnsupportedArgument {
        builtin: &'static str,
        kind: ObjectKind,
    },
    #[error("argument to `{builtin}` must be {expected}, got {kind}")]
    ArgumentMustBe {
        builtin: &'static str,
        expected: ObjectKind,
        kind: ObjectKind,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("could not write output: {message}")]
    Output { message: String },
}
