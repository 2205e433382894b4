use std::{
    collections::HashMap,
    fmt::{self, Debug},
    rc::Rc,
};

use lazy_static::lazy_static;

use crate::errors::errors::RuntimeError;

use super::{
    environment::Output,
    object::{new_error, null, Object, ObjectKind},
};

/// A native function. `puts` is the only one that touches the output sink.
pub type BuiltinFn = fn(&[Rc<Object>], &Output) -> Rc<Object>;

#[derive(Clone, Copy)]
pub struct BuiltinFunction {
    pub name: &'static str,
    func: BuiltinFn,
}

impl Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFunction({})", self.name)
    }
}

impl BuiltinFunction {
    /// Finds a builtin by name. Only consulted after the scope chain, so
    /// user bindings shadow these.
    pub fn look_up(name: &str) -> Option<BuiltinFunction> {
        BUILTINS.get(name).copied()
    }

    pub fn call(&self, args: &[Rc<Object>], output: &Output) -> Rc<Object> {
        (self.func)(args, output)
    }
}

lazy_static! {
    static ref BUILTINS: HashMap<&'static str, BuiltinFunction> = {
        let table: [(&'static str, BuiltinFn); 6] = [
            ("rizzLevel", rizz_level),
            ("first", first),
            ("last", last),
            ("rest", rest),
            ("push", push),
            ("puts", puts),
        ];

        table
            .into_iter()
            .map(|(name, func)| (name, BuiltinFunction { name, func }))
            .collect()
    };
}

fn check_arity(args: &[Rc<Object>], want: usize) -> Result<(), Rc<Object>> {
    if args.len() != want {
        return Err(new_error(RuntimeError::WrongArgumentCount {
            got: args.len(),
            want,
        }));
    }
    Ok(())
}

fn expect_array<'a>(
    builtin: &'static str,
    arg: &'a Object,
) -> Result<&'a [Rc<Object>], Rc<Object>> {
    match arg {
        Object::Array(elements) => Ok(elements),
        other => Err(new_error(RuntimeError::ArgumentMustBe {
            builtin,
            expected: ObjectKind::Array,
            kind: other.kind(),
        })),
    }
}

fn rizz_level(args: &[Rc<Object>], _output: &Output) -> Rc<Object> {
    if let Err(error) = check_arity(args, 1) {
        return error;
    }

    match &*args[0] {
        // Byte length, not character count.
        Object::String(value) => Rc::new(Object::Integer(value.len() as i64)),
        Object::Array(elements) => Rc::new(Object::Integer(elements.len() as i64)),
        other => new_error(RuntimeError::UnsupportedArgument {
            builtin: "rizzLevel",
            kind: other.kind(),
        }),
    }
}

fn first(args: &[Rc<Object>], _output: &Output) -> Rc<Object> {
    let elements = match check_arity(args, 1).and_then(|_| expect_array("first", &args[0])) {
        Ok(elements) => elements,
        Err(error) => return error,
    };

    elements.first().cloned().unwrap_or_else(null)
}

fn last(args: &[Rc<Object>], _output: &Output) -> Rc<Object> {
    let elements = match check_arity(args, 1).and_then(|_| expect_array("last", &args[0])) {
        Ok(elements) => elements,
        Err(error) => return error,
    };

    elements.last().cloned().unwrap_or_else(null)
}

fn rest(args: &[Rc<Object>], _output: &Output) -> Rc<Object> {
    let elements = match check_arity(args, 1).and_then(|_| expect_array("rest", &args[0])) {
        Ok(elements) => elements,
        Err(error) => return error,
    };

    match elements.split_first() {
        Some((_, tail)) => Rc::new(Object::Array(tail.to_vec())),
        None => null(),
    }
}

fn push(args: &[Rc<Object>], _output: &Output) -> Rc<Object> {
    let elements = match check_arity(args, 2).and_then(|_| expect_array("push", &args[0])) {
        Ok(elements) => elements,
        Err(error) => return error,
    };

    // Arrays are immutable; the argument is left untouched.
    let mut pushed = elements.to_vec();
    pushed.push(Rc::clone(&args[1]));
    Rc::new(Object::Array(pushed))
}

fn puts(args: &[Rc<Object>], output: &Output) -> Rc<Object> {
    for arg in args {
        if let Err(error) = output.write_line(&arg.to_string()) {
            return new_error(RuntimeError::Output {
                message: error.to_string(),
            });
        }
    }
    null()
}
