use crate::{
    ast::{
        ast::Stmt,
        statements::{BlockStmt, ExpressionStmt, ReturnStmt, VarDeclStmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()) {
        let handler = *handler;
        return handler(parser);
    }

    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.skip_if(TokenKind::Semicolon);

    Ok(Stmt::Expression(ExpressionStmt { expression }))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    // yeet name = value;
    parser.advance();

    let identifier = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Assignment)?;
    let assigned_value = parse_expr(parser, BindingPower::Default)?;

    parser.skip_if(TokenKind::Semicolon);

    Ok(Stmt::VarDecl(VarDeclStmt {
        identifier,
        assigned_value,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let value = if parser.current_token().is_one_of_many(&[
        TokenKind::Semicolon,
        TokenKind::CloseCurly,
        TokenKind::EOF,
    ]) {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    parser.skip_if(TokenKind::Semicolon);

    Ok(Stmt::Return(ReturnStmt { value }))
}

/// Parses `{ statements }`. A block left open at EOF ends there.
///
/// A statement that fails inside the block is recorded and skipped; the
/// block itself still parses.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut body = Vec::new();
    while !parser
        .current_token()
        .is_one_of_many(&[TokenKind::CloseCurly, TokenKind::EOF])
    {
        let start = parser.current_token().span.start.0;

        match parse_stmt(parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) => parser.recover(error, start, true),
        }
    }

    parser.skip_if(TokenKind::CloseCurly);

    Ok(BlockStmt { body })
}
