//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct. The parser pulls tokens
//! from the lexer one at a time and uses a Pratt parser approach with
//! NUD/LED handlers for expressions and statement handlers keyed by the
//! leading token.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// This struct owns the lexer and the current token, the diagnostics
/// collected so far, and the lookup tables for statements and expressions.
pub struct Parser {
    /// Source of tokens, pulled on demand
    lexer: Lexer,
    /// The token under the cursor
    current: Token,
    /// Diagnostics collected so far
    errors: Vec<Error>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser reading from `lexer`, with every handler registered.
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let mut parser = Parser {
            lexer,
            current,
            errors: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Parses statements until EOF.
    ///
    /// A statement that fails to parse records a diagnostic and is dropped;
    /// parsing resumes at the next statement boundary. Check [`Parser::errors`]
    /// afterwards, since the returned program may be partial.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];

        while self.has_tokens() {
            let start = self.current.span.start.0;

            match parse_stmt(self) {
                Ok(stmt) => statements.push(stmt),
                Err(error) => self.recover(error, start, false),
            }
        }

        Program { statements }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the binding power of the current token, `Default` if it has none.
    pub fn current_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.current.kind)
            .unwrap_or(&BindingPower::Default)
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    /// Consumes the current token if it has the expected kind.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise an
    /// `UnexpectedToken` error positioned at the current token.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current.kind != expected_kind {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: self.current.kind,
                },
                self.get_position(),
            ))
        } else {
            Ok(self.advance())
        }
    }

    /// Consumes the current token if it has the given kind; reports whether it did.
    pub fn skip_if(&mut self, kind: TokenKind) -> bool {
        if self.current.kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns true while the current token is not EOF.
    pub fn has_tokens(&self) -> bool {
        self.current.kind != TokenKind::EOF
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix registration leaves the binding power untouched, so a token
    /// such as `-` keeps the precedence of its infix form.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the start position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// Records `error` for the statement that began at `statement_start`
    /// and skips to the next statement boundary.
    pub(crate) fn recover(&mut self, error: Error, statement_start: u32, in_block: bool) {
        debug!(%error, position = error.get_position().0, in_block, "parse error");
        self.errors.push(error);
        self.synchronize(statement_start, in_block);
    }

    /// Skips to the next statement boundary after a failed statement.
    ///
    /// Stops just past a `;`, or before a `yeet`, `slay` or EOF. Nested
    /// `{ }` pairs are skipped whole. Inside a block the `}` closing it is
    /// left for the block to consume. At least one token is consumed when
    /// the failure happened on the statement's first token.
    fn synchronize(&mut self, statement_start: u32, in_block: bool) {
        let mut forced = self.current.span.start.0 == statement_start;
        let mut depth = 0usize;

        loop {
            if !forced {
                match self.current.kind {
                    TokenKind::EOF => return,
                    TokenKind::Let | TokenKind::Return if depth == 0 => return,
                    TokenKind::CloseCurly if depth == 0 && in_block => return,
                    _ => {}
                }
            }

            if !self.has_tokens() {
                return;
            }
            forced = false;

            match self.advance().kind {
                TokenKind::Semicolon if depth == 0 => return,
                TokenKind::OpenCurly => depth += 1,
                TokenKind::CloseCurly => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
    }
}

/// Parses source text into a program plus the diagnostics raised on the way.
pub fn parse(source: &str) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(Lexer::new(source, None));
    let program = parser.parse_program();

    (program, parser.errors)
}
