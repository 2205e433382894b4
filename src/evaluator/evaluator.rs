use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::ast::Program,
    errors::errors::RuntimeError,
    object::{
        environment::{Env, Environment},
        object::{new_error, null, Object},
    },
};

use super::stmt::{eval_block, eval_statement};

/// Internal evaluation result. `Err` holds an `Object::Error` or an
/// `Object::ReturnValue`; both stop every enclosing sequence until a call
/// boundary or the program top level handles them.
pub type EvalResult = Result<Rc<Object>, Rc<Object>>;

pub(crate) fn raise(error: RuntimeError) -> EvalResult {
    Err(new_error(error))
}

/// Evaluates `program` against `env`, returning the value of the last
/// statement, the value of a top-level `slay`, or the first error raised.
#[tracing::instrument(level = "trace", skip_all)]
pub fn eval(program: &Program, env: &Env) -> Rc<Object> {
    let mut result = null();

    for stmt in &program.statements {
        match eval_statement(env, stmt) {
            Ok(value) => result = value,
            Err(signal) => return unwrap_return(signal),
        }
    }

    result
}

fn unwrap_return(signal: Rc<Object>) -> Rc<Object> {
    match &*signal {
        Object::ReturnValue(value) => Rc::clone(value),
        _ => signal,
    }
}

/// Calls `callee` with already evaluated arguments. `env` is the calling
/// scope; builtins take their output sink from it.
pub(crate) fn apply_function(env: &Env, callee: &Rc<Object>, args: Vec<Rc<Object>>) -> EvalResult {
    match &**callee {
        Object::Function(function) => {
            if args.len() != function.parameters.len() {
                return raise(RuntimeError::WrongArgumentCount {
                    got: args.len(),
                    want: function.parameters.len(),
                });
            }

            trace!(arguments = args.len(), "calling function");

            // Parameters live in a child of the captured scope, not the caller's.
            let call_env = Environment::new_enclosed(Rc::clone(&function.env));
            for (parameter, arg) in function.parameters.iter().zip(args) {
                call_env.borrow_mut().set(parameter.value.clone(), arg);
            }

            match eval_block(&call_env, &function.body) {
                Ok(value) => Ok(value),
                Err(signal) => match &*signal {
                    Object::ReturnValue(value) => Ok(Rc::clone(value)),
                    _ => Err(signal),
                },
            }
        }
        Object::Builtin(builtin) => {
            trace!(arguments = args.len(), "calling builtin {}", builtin.name);

            let output = env.borrow().output();
            let result = builtin.call(&args, &output);
            if result.is_error() {
                Err(result)
            } else {
                Ok(result)
            }
        }
        other => raise(RuntimeError::NotAFunction { kind: other.kind() }),
    }
}
