use std::rc::Rc;

use crate::{
    ast::{
        ast::{Expr, InfixOperator, PrefixOperator},
        expressions::{
            ArrayExpr, BinaryExpr, BooleanExpr, CallExpr, FnExpr, HashExpr, IfExpr, IndexExpr,
            IntegerExpr, PrefixExpr, StringExpr, SymbolExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => {
            return Err(Error::new(
                ErrorImpl::NoPrefixRule { kind: token_kind },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud(parser)?;

    // While the current token binds tighter than `bp`, fold it into lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => {
                return Err(Error::new(
                    ErrorImpl::NoInfixRule { kind: token_kind },
                    parser.get_position(),
                ))
            }
        };

        let led_bp = parser.current_binding_power();
        left = led(parser, left, led_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let position = parser.get_position();
    let token = parser.advance();

    match token.kind {
        TokenKind::Int => match token.value.parse::<i64>() {
            Ok(value) => Ok(Expr::Integer(IntegerExpr { value })),
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError { token: token.value },
                position,
            )),
        },
        TokenKind::Identifier => Ok(Expr::Symbol(SymbolExpr { value: token.value })),
        TokenKind::String => Ok(Expr::String(StringExpr { value: token.value })),
        TokenKind::True => Ok(Expr::Boolean(BooleanExpr { value: true })),
        TokenKind::False => Ok(Expr::Boolean(BooleanExpr { value: false })),
        kind => Err(Error::new(ErrorImpl::NoPrefixRule { kind }, position)),
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let position = parser.get_position();
    let operator_token = parser.advance();
    let operator = PrefixOperator::from_token_kind(operator_token.kind).ok_or(Error::new(
        ErrorImpl::NoPrefixRule {
            kind: operator_token.kind,
        },
        position,
    ))?;

    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator,
        right_expr: Box::new(rhs),
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let position = parser.get_position();
    let operator_token = parser.advance();
    let operator = InfixOperator::from_token_kind(operator_token.kind).ok_or(Error::new(
        ErrorImpl::NoInfixRule {
            kind: operator_token.kind,
        },
        position,
    ))?;

    // Same binding power on the right keeps the operator left-associative
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // fr (condition) { ... } sus { ... }
    parser.advance();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let consequence = parse_block_stmt(parser)?;

    let alternative = if parser.skip_if(TokenKind::Else) {
        Some(parse_block_stmt(parser)?)
    } else {
        None
    };

    Ok(Expr::If(IfExpr {
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

pub fn parse_fn_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // vibe(a, b) { ... }
    parser.advance();
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    if !parser.skip_if(TokenKind::CloseParen) {
        loop {
            let name = parser.expect(TokenKind::Identifier)?.value;
            parameters.push(SymbolExpr { value: name });

            if !parser.skip_if(TokenKind::Comma) {
                parser.expect(TokenKind::CloseParen)?;
                break;
            }
        }
    }

    let body = parse_block_stmt(parser)?;

    Ok(Expr::Fn(FnExpr {
        parameters,
        body: Rc::new(body),
    }))
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;

    Ok(Expr::Array(ArrayExpr { elements }))
}

pub fn parse_hash_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // {key: value, ...}
    parser.advance();

    let mut pairs = vec![];

    // Same shape as `parse_expr_list`: no trailing comma.
    if parser.skip_if(TokenKind::CloseCurly) {
        return Ok(Expr::Hash(HashExpr { pairs }));
    }

    loop {
        let key = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Colon)?;
        let value = parse_expr(parser, BindingPower::Default)?;

        pairs.push((key, value));

        if !parser.skip_if(TokenKind::Comma) {
            parser.expect(TokenKind::CloseCurly)?;
            return Ok(Expr::Hash(HashExpr { pairs }));
        }
    }
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        callee: Box::new(left),
        arguments,
    }))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::Index(IndexExpr {
        left: Box::new(left),
        index: Box::new(index),
    }))
}

/// Parses comma-separated expressions up to and including `end`.
fn parse_expr_list(parser: &mut Parser, end: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut list = vec![];

    if parser.skip_if(end) {
        return Ok(list);
    }

    loop {
        list.push(parse_expr(parser, BindingPower::Default)?);

        if !parser.skip_if(TokenKind::Comma) {
            parser.expect(end)?;
            return Ok(list);
        }
    }
}
