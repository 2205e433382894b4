use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::{
    ast::{
        ast::{Expr, InfixOperator, PrefixOperator},
        expressions::{HashExpr, IfExpr},
    },
    errors::errors::RuntimeError,
    object::{
        builtins::BuiltinFunction,
        environment::Env,
        object::{native_bool, null, Function, HashPair, Object, ObjectKind},
    },
};

use super::{
    evaluator::{apply_function, raise, EvalResult},
    stmt::eval_block,
};

pub fn eval_expression(env: &Env, expression: &Expr) -> EvalResult {
    match expression {
        Expr::Integer(integer) => Ok(Rc::new(Object::Integer(integer.value))),
        Expr::Boolean(boolean) => Ok(native_bool(boolean.value)),
        Expr::String(string) => Ok(Rc::new(Object::String(string.value.clone()))),
        Expr::Symbol(symbol) => eval_identifier(env, &symbol.value),
        Expr::Prefix(prefix) => {
            let right = eval_expression(env, &prefix.right_expr)?;
            eval_prefix_expression(prefix.operator, &right)
        }
        Expr::Binary(binary) => {
            let left = eval_expression(env, &binary.left)?;
            let right = eval_expression(env, &binary.right)?;
            eval_infix_expression(binary.operator, &left, &right)
        }
        Expr::If(if_expr) => eval_if_expression(env, if_expr),
        Expr::Fn(fn_expr) => Ok(Rc::new(Object::Function(Function {
            parameters: fn_expr.parameters.clone(),
            body: Rc::clone(&fn_expr.body),
            env: Rc::clone(env),
        }))),
        Expr::Call(call) => {
            let callee = eval_expression(env, &call.callee)?;
            let args = eval_expressions(env, &call.arguments)?;
            apply_function(env, &callee, args)
        }
        Expr::Array(array) => Ok(Rc::new(Object::Array(eval_expressions(
            env,
            &array.elements,
        )?))),
        Expr::Index(index_expr) => {
            let left = eval_expression(env, &index_expr.left)?;
            let index = eval_expression(env, &index_expr.index)?;
            eval_index_expression(&left, &index)
        }
        Expr::Hash(hash) => eval_hash_literal(env, hash),
    }
}

/// Evaluates left to right, stopping at the first error.
fn eval_expressions(env: &Env, expressions: &[Expr]) -> Result<Vec<Rc<Object>>, Rc<Object>> {
    expressions
        .iter()
        .map(|expression| eval_expression(env, expression))
        .collect()
}

fn eval_identifier(env: &Env, name: &str) -> EvalResult {
    if let Some(value) = env.borrow().get(name) {
        return Ok(value);
    }

    match BuiltinFunction::look_up(name) {
        Some(builtin) => Ok(Rc::new(Object::Builtin(builtin))),
        None => raise(RuntimeError::IdentifierNotFound {
            name: name.to_string(),
        }),
    }
}

fn eval_prefix_expression(operator: PrefixOperator, right: &Rc<Object>) -> EvalResult {
    match operator {
        PrefixOperator::Not => Ok(native_bool(!right.is_truthy())),
        PrefixOperator::Negate => match &**right {
            Object::Integer(value) => Ok(Rc::new(Object::Integer(value.wrapping_neg()))),
            other => raise(RuntimeError::UnknownPrefixOperator {
                operator: operator.to_string(),
                right: other.kind(),
            }),
        },
    }
}

fn eval_infix_expression(
    operator: InfixOperator,
    left: &Rc<Object>,
    right: &Rc<Object>,
) -> EvalResult {
    match (&**left, &**right) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_expression(operator, *left, *right)
        }
        (Object::String(left), Object::String(right)) => {
            eval_string_infix_expression(operator, left, right)
        }
        // Booleans and null are singletons, so identity is equality here.
        _ if operator == InfixOperator::Equals => Ok(native_bool(Rc::ptr_eq(left, right))),
        _ if operator == InfixOperator::NotEquals => Ok(native_bool(!Rc::ptr_eq(left, right))),
        _ if left.kind() != right.kind() => raise(RuntimeError::TypeMismatch {
            left: left.kind(),
            operator: operator.to_string(),
            right: right.kind(),
        }),
        _ => raise(RuntimeError::UnknownInfixOperator {
            left: left.kind(),
            operator: operator.to_string(),
            right: right.kind(),
        }),
    }
}

fn eval_integer_infix_expression(operator: InfixOperator, left: i64, right: i64) -> EvalResult {
    let value = match operator {
        InfixOperator::Plus => Object::Integer(left.wrapping_add(right)),
        InfixOperator::Minus => Object::Integer(left.wrapping_sub(right)),
        InfixOperator::Multiply => Object::Integer(left.wrapping_mul(right)),
        InfixOperator::Divide => {
            if right == 0 {
                return raise(RuntimeError::DivisionByZero);
            }
            Object::Integer(left.wrapping_div(right))
        }
        InfixOperator::Less => return Ok(native_bool(left < right)),
        InfixOperator::Greater => return Ok(native_bool(left > right)),
        InfixOperator::Equals => return Ok(native_bool(left == right)),
        InfixOperator::NotEquals => return Ok(native_bool(left != right)),
    };

    Ok(Rc::new(value))
}

fn eval_string_infix_expression(operator: InfixOperator, left: &str, right: &str) -> EvalResult {
    match operator {
        InfixOperator::Plus => Ok(Rc::new(Object::String(format!("{}{}", left, right)))),
        _ => raise(RuntimeError::UnknownInfixOperator {
            left: ObjectKind::String,
            operator: operator.to_string(),
            right: ObjectKind::String,
        }),
    }
}

fn eval_if_expression(env: &Env, if_expr: &IfExpr) -> EvalResult {
    let condition = eval_expression(env, &if_expr.condition)?;

    if condition.is_truthy() {
        eval_block(env, &if_expr.consequence)
    } else if let Some(alternative) = &if_expr.alternative {
        eval_block(env, alternative)
    } else {
        Ok(null())
    }
}

fn eval_index_expression(left: &Rc<Object>, index: &Rc<Object>) -> EvalResult {
    match (&**left, &**index) {
        (Object::Array(elements), Object::Integer(i)) => {
            // Out of range, negative included, is null rather than an error.
            let element = usize::try_from(*i)
                .ok()
                .and_then(|i| elements.get(i))
                .cloned();
            Ok(element.unwrap_or_else(null))
        }
        (Object::Hash(pairs), _) => {
            let Some(key) = index.hash_key() else {
                return raise(RuntimeError::UnusableAsHashKey { kind: index.kind() });
            };
            Ok(pairs
                .get(&key)
                .map(|pair| Rc::clone(&pair.value))
                .unwrap_or_else(null))
        }
        _ => raise(RuntimeError::IndexNotSupported { kind: left.kind() }),
    }
}

fn eval_hash_literal(env: &Env, hash: &HashExpr) -> EvalResult {
    let mut pairs = FxHashMap::default();

    for (key_expr, value_expr) in &hash.pairs {
        let key = eval_expression(env, key_expr)?;
        let Some(hash_key) = key.hash_key() else {
            return raise(RuntimeError::UnusableAsHashKey { kind: key.kind() });
        };

        let value = eval_expression(env, value_expr)?;
        // Later duplicates overwrite earlier ones.
        pairs.insert(hash_key, HashPair { key, value });
    }

    Ok(Rc::new(Object::Hash(pairs)))
}
