//! Lexical scopes.
//!
//! A scope is shared through `Rc<RefCell<_>>`: closures keep the scope they
//! were defined in alive for as long as they exist, and several closures may
//! share one scope. Writes only ever touch the scope they are made on.

use std::{
    cell::RefCell,
    io::{self, Write},
    mem,
    rc::Rc,
};

use rustc_hash::FxHashMap;

use super::object::Object;

pub type Env = Rc<RefCell<Environment>>;

/// Where `puts` writes. Set on a root scope and found by walking outward.
#[derive(Debug, Clone, Default)]
pub enum Output {
    #[default]
    Stdout,
    /// Collects lines until [`Output::take`] drains them.
    Buffer(Rc<RefCell<Vec<u8>>>),
}

impl Output {
    pub fn buffer() -> Self {
        Output::Buffer(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn write_line(&self, line: &str) -> io::Result<()> {
        match self {
            Output::Stdout => writeln!(io::stdout().lock(), "{}", line),
            Output::Buffer(buffer) => {
                let mut buffer = buffer.borrow_mut();
                writeln!(buffer, "{}", line)
            }
        }
    }

    /// Returns and clears whatever was buffered. Always empty for stdout.
    pub fn take(&self) -> Vec<u8> {
        match self {
            Output::Stdout => Vec::new(),
            Output::Buffer(buffer) => mem::take(&mut *buffer.borrow_mut()),
        }
    }
}

#[derive(Debug, Default)]
pub struct Environment {
    store: FxHashMap<String, Rc<Object>>,
    outer: Option<Env>,
    output: Option<Output>,
}

impl Environment {
    /// Creates an empty root scope writing to stdout.
    pub fn new() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// Creates an empty root scope writing to `output`.
    pub fn with_output(output: Output) -> Env {
        Rc::new(RefCell::new(Environment {
            output: Some(output),
            ..Environment::default()
        }))
    }

    /// Creates an empty scope whose parent is `outer`.
    pub fn new_enclosed(outer: Env) -> Env {
        Rc::new(RefCell::new(Environment {
            outer: Some(outer),
            ..Environment::default()
        }))
    }

    /// Looks `name` up here, then in each enclosing scope.
    pub fn get(&self, name: &str) -> Option<Rc<Object>> {
        if let Some(value) = self.store.get(name) {
            return Some(Rc::clone(value));
        }
        match &self.outer {
            Some(outer) => outer.borrow().get(name),
            None => None,
        }
    }

    /// Binds `name` in this scope only, shadowing any outer binding.
    pub fn set(&mut self, name: String, value: Rc<Object>) {
        self.store.insert(name, value);
    }

    /// The nearest output sink up the chain, stdout if none was set.
    pub fn output(&self) -> Output {
        match (&self.output, &self.outer) {
            (Some(output), _) => output.clone(),
            (None, Some(outer)) => outer.borrow().output(),
            (None, None) => Output::default(),
        }
    }
}
