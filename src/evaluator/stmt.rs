use std::rc::Rc;

use crate::{
    ast::{ast::Stmt, statements::BlockStmt},
    object::{
        environment::Env,
        object::{null, Object},
    },
};

use super::{evaluator::EvalResult, expr::eval_expression};

pub fn eval_statement(env: &Env, statement: &Stmt) -> EvalResult {
    match statement {
        Stmt::Expression(expression_stmt) => eval_expression(env, &expression_stmt.expression),
        Stmt::VarDecl(var_decl_stmt) => {
            // Nothing is bound when the value fails.
            let value = eval_expression(env, &var_decl_stmt.assigned_value)?;
            env.borrow_mut()
                .set(var_decl_stmt.identifier.clone(), value);

            Ok(null())
        }
        Stmt::Return(return_stmt) => {
            let value = match &return_stmt.value {
                Some(expression) => eval_expression(env, expression)?,
                None => null(),
            };

            Err(Rc::new(Object::ReturnValue(value)))
        }
        Stmt::Block(block_stmt) => eval_block(env, block_stmt),
    }
}

/// Blocks share the scope they appear in; only calls open a new one.
pub fn eval_block(env: &Env, block: &BlockStmt) -> EvalResult {
    let mut result = null();

    for statement in block.iter() {
        result = eval_statement(env, statement)?;
    }

    Ok(result)
}
