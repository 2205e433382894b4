use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::{
    builtins::BuiltinFunction,
    environment::{Environment, Output},
    object::{native_bool, null, HashKey, Object, ObjectKind},
};

fn string(value: &str) -> Rc<Object> {
    Rc::new(Object::String(value.to_string()))
}

fn array(values: &[i64]) -> Rc<Object> {
    Rc::new(Object::Array(
        values
            .iter()
            .map(|value| Rc::new(Object::Integer(*value)))
            .collect(),
    ))
}

#[test]
fn test_singletons_are_shared() {
    assert!(Rc::ptr_eq(&native_bool(true), &native_bool(true)));
    assert!(Rc::ptr_eq(&native_bool(false), &native_bool(false)));
    assert!(!Rc::ptr_eq(&native_bool(true), &native_bool(false)));
    assert!(Rc::ptr_eq(&null(), &null()));
}

#[test]
fn test_string_hash_key() {
    let hello1 = Object::String("Hello World".to_string());
    let hello2 = Object::String("Hello World".to_string());
    let diff1 = Object::String("My name is johnny".to_string());
    let diff2 = Object::String("My name is johnny".to_string());

    assert_eq!(hello1.hash_key(), hello2.hash_key());
    assert_eq!(diff1.hash_key(), diff2.hash_key());
    assert_ne!(hello1.hash_key(), diff1.hash_key());
}

#[test]
fn test_hash_key_includes_kind() {
    let one = Object::Integer(1).hash_key();
    let truthy = Object::Boolean(true).hash_key();

    assert_eq!(
        one,
        Some(HashKey {
            kind: ObjectKind::Integer,
            value: 1
        })
    );
    assert_ne!(one, truthy);
}

#[test]
fn test_unhashable_objects() {
    assert_eq!(Object::Null.hash_key(), None);
    assert_eq!(array(&[1]).hash_key(), None);
}

#[test]
fn test_truthiness() {
    assert!(Object::Integer(0).is_truthy());
    assert!(Object::String(String::new()).is_truthy());
    assert!(Object::Boolean(true).is_truthy());
    assert!(!Object::Boolean(false).is_truthy());
    assert!(!Object::Null.is_truthy());
}

#[test]
fn test_object_display() {
    assert_eq!(Object::Integer(-3).to_string(), "-3");
    assert_eq!(Object::Boolean(true).to_string(), "true");
    assert_eq!(Object::Null.to_string(), "null");
    assert_eq!(Object::String("sheesh".to_string()).to_string(), "sheesh");
    assert_eq!(array(&[1, 2, 3]).to_string(), "[1, 2, 3]");
    assert_eq!(
        Object::Error("division by zero".to_string()).to_string(),
        "ERROR: division by zero"
    );
    assert_eq!(
        Object::ReturnValue(Rc::new(Object::Integer(7))).to_string(),
        "7"
    );
}

#[test]
fn test_object_kind_names() {
    assert_eq!(ObjectKind::Integer.to_string(), "INTEGER");
    assert_eq!(ObjectKind::ReturnValue.to_string(), "RETURN_VALUE");
    assert_eq!(Object::Null.kind(), ObjectKind::Null);
    assert_eq!(array(&[]).kind(), ObjectKind::Array);
}

#[test]
fn test_environment_lookup_walks_outward() {
    let outer = Environment::new();
    outer
        .borrow_mut()
        .set("x".to_string(), Rc::new(Object::Integer(1)));

    let inner = Environment::new_enclosed(Rc::clone(&outer));
    inner
        .borrow_mut()
        .set("y".to_string(), Rc::new(Object::Integer(2)));

    assert_eq!(inner.borrow().get("x").map(|x| x.to_string()), Some("1".to_string()));
    assert_eq!(inner.borrow().get("y").map(|y| y.to_string()), Some("2".to_string()));
    assert!(outer.borrow().get("y").is_none());
    assert!(inner.borrow().get("z").is_none());
}

#[test]
fn test_environment_set_shadows_locally() {
    let outer = Environment::new();
    outer
        .borrow_mut()
        .set("x".to_string(), Rc::new(Object::Integer(1)));

    let inner = Environment::new_enclosed(Rc::clone(&outer));
    inner
        .borrow_mut()
        .set("x".to_string(), Rc::new(Object::Integer(2)));

    assert_eq!(inner.borrow().get("x").map(|x| x.to_string()), Some("2".to_string()));
    assert_eq!(outer.borrow().get("x").map(|x| x.to_string()), Some("1".to_string()));
}

fn call(name: &str, args: &[Rc<Object>]) -> String {
    match BuiltinFunction::look_up(name) {
        Some(builtin) => builtin.call(args, &Output::buffer()).to_string(),
        None => panic!("builtin {} not registered", name),
    }
}

#[test]
fn test_builtin_lookup() {
    for name in ["rizzLevel", "first", "last", "rest", "push", "puts"] {
        assert!(BuiltinFunction::look_up(name).is_some(), "missing {}", name);
    }
    assert!(BuiltinFunction::look_up("len").is_none());
}

#[test]
fn test_rizz_level() {
    assert_eq!(call("rizzLevel", &[string("")]), "0");
    assert_eq!(call("rizzLevel", &[string("four")]), "4");
    assert_eq!(call("rizzLevel", &[string("é")]), "2");
    assert_eq!(call("rizzLevel", &[array(&[1, 2, 3])]), "3");
    assert_eq!(
        call("rizzLevel", &[Rc::new(Object::Integer(1))]),
        "ERROR: argument to `rizzLevel` not supported, got INTEGER"
    );
    assert_eq!(
        call("rizzLevel", &[string("one"), string("two")]),
        "ERROR: wrong number of arguments. got=2, want=1"
    );
}

#[test]
fn test_array_builtins() {
    assert_eq!(call("first", &[array(&[1, 2, 3])]), "1");
    assert_eq!(call("first", &[array(&[])]), "null");
    assert_eq!(call("last", &[array(&[1, 2, 3])]), "3");
    assert_eq!(call("last", &[array(&[])]), "null");
    assert_eq!(call("rest", &[array(&[1, 2, 3])]), "[2, 3]");
    assert_eq!(call("rest", &[array(&[])]), "null");
    assert_eq!(
        call("push", &[array(&[1]), Rc::new(Object::Integer(2))]),
        "[1, 2]"
    );
    assert_eq!(
        call("first", &[Rc::new(Object::Integer(1))]),
        "ERROR: argument to `first` must be ARRAY, got INTEGER"
    );
    assert_eq!(
        call("push", &[array(&[1])]),
        "ERROR: wrong number of arguments. got=1, want=2"
    );
}

#[test]
fn test_push_leaves_input_untouched() {
    let input = array(&[1]);
    call("push", &[Rc::clone(&input), Rc::new(Object::Integer(2))]);
    assert_eq!(input.to_string(), "[1]");
}

#[test]
fn test_puts_writes_each_argument_to_output() {
    let output = Output::buffer();
    let puts = BuiltinFunction::look_up("puts").expect("puts is registered");

    let result = puts.call(&[string("hi"), Rc::new(Object::Integer(3))], &output);

    assert_eq!(result.to_string(), "null");
    assert_eq!(String::from_utf8(output.take()).unwrap(), "hi\n3\n");
    assert!(output.take().is_empty());
}

#[test]
fn test_output_is_inherited_from_root_scope() {
    let output = Output::buffer();
    let root = Environment::with_output(output.clone());
    let inner = Environment::new_enclosed(Environment::new_enclosed(root));

    inner.borrow().output().write_line("deep").unwrap();

    assert_eq!(String::from_utf8(output.take()).unwrap(), "deep\n");
    assert!(matches!(Environment::new().borrow().output(), Output::Stdout));
}
