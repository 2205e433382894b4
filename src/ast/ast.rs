use std::fmt::{self, Display};

use crate::lexer::tokens::TokenKind;

use super::{
    expressions::{
        ArrayExpr, BinaryExpr, BooleanExpr, CallExpr, FnExpr, HashExpr, IfExpr, IndexExpr,
        IntegerExpr, PrefixExpr, StringExpr, SymbolExpr,
    },
    statements::{BlockStmt, ExpressionStmt, ReturnStmt, VarDeclStmt},
};

/// Root of a parsed source: its statements in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// Statement kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
}

impl Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::VarDecl(stmt) => write!(f, "{}", stmt),
            Stmt::Return(stmt) => write!(f, "{}", stmt),
            Stmt::Expression(stmt) => write!(f, "{}", stmt),
            Stmt::Block(stmt) => write!(f, "{}", stmt),
        }
    }
}

/// Expression kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Symbol(SymbolExpr),
    Integer(IntegerExpr),
    Boolean(BooleanExpr),
    String(StringExpr),
    Array(ArrayExpr),
    Hash(HashExpr),
    Prefix(PrefixExpr),
    Binary(BinaryExpr),
    If(IfExpr),
    Fn(FnExpr),
    Call(CallExpr),
    Index(IndexExpr),
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Symbol(expr) => write!(f, "{}", expr),
            Expr::Integer(expr) => write!(f, "{}", expr),
            Expr::Boolean(expr) => write!(f, "{}", expr),
            Expr::String(expr) => write!(f, "{}", expr),
            Expr::Array(expr) => write!(f, "{}", expr),
            Expr::Hash(expr) => write!(f, "{}", expr),
            Expr::Prefix(expr) => write!(f, "{}", expr),
            Expr::Binary(expr) => write!(f, "{}", expr),
            Expr::If(expr) => write!(f, "{}", expr),
            Expr::Fn(expr) => write!(f, "{}", expr),
            Expr::Call(expr) => write!(f, "{}", expr),
            Expr::Index(expr) => write!(f, "{}", expr),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Not,
    Negate,
}

impl PrefixOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Not => Some(PrefixOperator::Not),
            TokenKind::Dash => Some(PrefixOperator::Negate),
            _ => None,
        }
    }
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOperator::Not => write!(f, "!"),
            PrefixOperator::Negate => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Less,
    Greater,
    Equals,
    NotEquals,
}

impl InfixOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(InfixOperator::Plus),
            TokenKind::Dash => Some(InfixOperator::Minus),
            TokenKind::Star => Some(InfixOperator::Multiply),
            TokenKind::Slash => Some(InfixOperator::Divide),
            TokenKind::Less => Some(InfixOperator::Less),
            TokenKind::Greater => Some(InfixOperator::Greater),
            TokenKind::Equals => Some(InfixOperator::Equals),
            TokenKind::NotEquals => Some(InfixOperator::NotEquals),
            _ => None,
        }
    }
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::Less => "<",
            InfixOperator::Greater => ">",
            InfixOperator::Equals => "==",
            InfixOperator::NotEquals => "!=",
        };
        write!(f, "{}", symbol)
    }
}
