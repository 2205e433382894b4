use std::{
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
    rc::Rc,
};

use rustc_hash::{FxHashMap, FxHasher};

use crate::{
    ast::{
        expressions::{join, SymbolExpr},
        statements::BlockStmt,
    },
    errors::errors::RuntimeError,
};

use super::{builtins::BuiltinFunction, environment::Env};

thread_local! {
    static TRUE: Rc<Object> = Rc::new(Object::Boolean(true));
    static FALSE: Rc<Object> = Rc::new(Object::Boolean(false));
    static NULL: Rc<Object> = Rc::new(Object::Null);
}

/// Returns the shared `true` or `false` object.
pub fn native_bool(value: bool) -> Rc<Object> {
    if value {
        TRUE.with(Rc::clone)
    } else {
        FALSE.with(Rc::clone)
    }
}

/// Returns the shared null object.
pub fn null() -> Rc<Object> {
    NULL.with(Rc::clone)
}

pub fn new_error(error: RuntimeError) -> Rc<Object> {
    Rc::new(Object::Error(error.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Integer,
    Boolean,
    Null,
    String,
    Array,
    Hash,
    Function,
    Builtin,
    Error,
    ReturnValue,
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Integer => "INTEGER",
            ObjectKind::Boolean => "BOOLEAN",
            ObjectKind::Null => "NULL",
            ObjectKind::String => "STRING",
            ObjectKind::Array => "ARRAY",
            ObjectKind::Hash => "HASH",
            ObjectKind::Function => "FUNCTION",
            ObjectKind::Builtin => "BUILTIN",
            ObjectKind::Error => "ERROR",
            ObjectKind::ReturnValue => "RETURN_VALUE",
        };
        write!(f, "{}", name)
    }
}

/// Key of a hash object: the value's kind plus a hash of its value, so
/// equal text in two distinct strings gives equal keys and different
/// kinds never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: ObjectKind,
    pub value: u64,
}

#[derive(Debug, Clone)]
pub struct HashPair {
    pub key: Rc<Object>,
    pub value: Rc<Object>,
}

/// A closure: parameters and body plus the environment it was defined in.
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<SymbolExpr>,
    pub body: Rc<BlockStmt>,
    pub env: Env,
}

// The captured environment may hold this very function, so it is left out.
impl Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    String(String),
    Array(Vec<Rc<Object>>),
    Hash(FxHashMap<HashKey, HashPair>),
    Function(Function),
    Builtin(BuiltinFunction),
    Error(String),
    /// Carries a `slay` value out of nested blocks; unwrapped at the
    /// enclosing call (or program) boundary.
    ReturnValue(Rc<Object>),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Integer(_) => ObjectKind::Integer,
            Object::Boolean(_) => ObjectKind::Boolean,
            Object::Null => ObjectKind::Null,
            Object::String(_) => ObjectKind::String,
            Object::Array(_) => ObjectKind::Array,
            Object::Hash(_) => ObjectKind::Hash,
            Object::Function(_) => ObjectKind::Function,
            Object::Builtin(_) => ObjectKind::Builtin,
            Object::Error(_) => ObjectKind::Error,
            Object::ReturnValue(_) => ObjectKind::ReturnValue,
        }
    }

    /// Only integers, booleans and strings are hashable.
    pub fn hash_key(&self) -> Option<HashKey> {
        let value = match self {
            Object::Integer(value) => *value as u64,
            Object::Boolean(value) => u64::from(*value),
            Object::String(value) => {
                let mut hasher = FxHasher::default();
                value.hash(&mut hasher);
                hasher.finish()
            }
            _ => return None,
        };

        Some(HashKey {
            kind: self.kind(),
            value,
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Everything except `cap` and null is truthy, including `0`.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::String(value) => write!(f, "{}", value),
            Object::Array(elements) => write!(f, "[{}]", join(elements)),
            Object::Hash(pairs) => {
                let pairs = pairs
                    .values()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{}}}", pairs)
            }
            Object::Function(function) => write!(
                f,
                "vibe({}) {{\n{}\n}}",
                join(&function.parameters),
                function.body
            ),
            Object::Builtin(builtin) => write!(f, "builtin function {}", builtin.name),
            Object::Error(message) => write!(f, "ERROR: {}", message),
            Object::ReturnValue(value) => write!(f, "{}", value),
        }
    }
}
