//! Unit tests for the evaluator module.
//!
//! Programs are parsed from source and evaluated in a fresh environment.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::evaluator::eval;
use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::IntegerExpr,
        statements::{BlockStmt, ExpressionStmt, ReturnStmt},
    },
    object::{
        environment::{Environment, Output},
        object::{native_bool, null, Object},
    },
    parser::parser::parse,
};

fn test_eval(input: &str) -> Rc<Object> {
    let (program, _) = parse(input);
    eval(&program, &Environment::new())
}

fn assert_integer(input: &str, expected: i64) {
    match &*test_eval(input) {
        Object::Integer(value) => assert_eq!(*value, expected, "input: {}", input),
        other => panic!("expected integer for {:?}, got {:?}", input, other),
    }
}

fn assert_boolean(input: &str, expected: bool) {
    match &*test_eval(input) {
        Object::Boolean(value) => assert_eq!(*value, expected, "input: {}", input),
        other => panic!("expected boolean for {:?}, got {:?}", input, other),
    }
}

fn assert_null(input: &str) {
    let evaluated = test_eval(input);
    assert!(
        Rc::ptr_eq(&evaluated, &null()),
        "expected null for {:?}, got {:?}",
        input,
        evaluated
    );
}

fn assert_error(input: &str, expected: &str) {
    match &*test_eval(input) {
        Object::Error(message) => assert_eq!(message, expected, "input: {}", input),
        other => panic!("expected error for {:?}, got {:?}", input, other),
    }
}

#[test]
fn test_eval_integer_expression() {
    let tests = [
        ("4", 4),
        ("10", 10),
        ("-5", -5),
        ("-10", -10),
        ("5 + 5 + 5 + 5 - 10", 10),
        ("2 * 2 * 2 * 2 * 2", 32),
        ("-50 + 100 + -50", 0),
        ("5 * 2 + 10", 20),
        ("5 + 2 * 10", 25),
        ("20 + 2 * -10", 0),
        ("50 / 2 * 2 + 10", 60),
        ("2 * (5 + 10)", 30),
        ("3 * 3 * 3 + 10", 37),
        ("3 * (3 * 3) + 10", 37),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
        ("-7 / 2", -3),
    ];

    for (input, expected) in tests {
        assert_integer(input, expected);
    }
}

#[test]
fn test_integer_overflow_wraps() {
    assert_integer("9223372036854775807 + 1", i64::MIN);
    assert_integer("-9223372036854775807 - 2", i64::MAX);
}

#[test]
fn test_division_by_zero() {
    assert_error("10 / 0", "division by zero");
    assert_error("10 / (5 - 5); 1", "division by zero");
}

#[test]
fn test_eval_boolean_expression() {
    let tests = [
        ("based", true),
        ("cap", false),
        ("1 < 2", true),
        ("1 > 2", false),
        ("1 < 1", false),
        ("1 > 1", false),
        ("1 == 1", true),
        ("1 != 1", false),
        ("1 == 2", false),
        ("1 != 2", true),
        ("based == based", true),
        ("cap == cap", true),
        ("based == cap", false),
        ("based != cap", true),
        ("cap != based", true),
        ("(1 < 2) == based", true),
        ("(1 < 2) == cap", false),
        ("(1 > 2) == based", false),
        ("(1 > 2) == cap", true),
        ("1 == based", false),
        ("1 != based", true),
    ];

    for (input, expected) in tests {
        assert_boolean(input, expected);
    }
}

#[test]
fn test_booleans_are_singletons() {
    let first = test_eval("1 < 2");
    let second = test_eval("based == based");

    assert!(Rc::ptr_eq(&first, &second));
    assert!(Rc::ptr_eq(&first, &native_bool(true)));
    assert!(Rc::ptr_eq(&test_eval("cap"), &native_bool(false)));
}

#[test]
fn test_bang_operator() {
    let tests = [
        ("!based", false),
        ("!cap", true),
        ("!5", false),
        ("!0", false),
        ("!!based", true),
        ("!!cap", false),
        ("!!5", true),
    ];

    for (input, expected) in tests {
        assert_boolean(input, expected);
    }
}

#[test]
fn test_fr_sus_expressions() {
    assert_integer("fr (based) { 10 }", 10);
    assert_null("fr (cap) { 10 }");
    assert_integer("fr (1) { 10 }", 10);
    assert_integer("fr (0) { 10 }", 10);
    assert_integer("fr (1 < 2) { 10 }", 10);
    assert_null("fr (1 > 2) { 10 }");
    assert_integer("fr (1 > 2) { 10 } sus { 20 }", 20);
    assert_integer("fr (1 < 2) { 10 } sus { 20 }", 10);
}

#[test]
fn test_slay_statements() {
    assert_integer("slay 10;", 10);
    assert_integer("slay 10; 9", 10);
    assert_integer("slay 2 * 5; 9;", 10);
    assert_integer("9; slay 2 * 5; 9;", 10);
    assert_integer(
        "
        fr (10 > 1) {
            fr (10 > 1) {
                slay 10;
            }
            slay 1
        }
        slay 1
        ",
        10,
    );
    assert_null("slay;");
}

#[test]
fn test_error_handling() {
    let tests = [
        ("5 + based;", "L + ratio + type mismatch: INTEGER + BOOLEAN"),
        ("5 + based; 5;", "L + ratio + type mismatch: INTEGER + BOOLEAN"),
        ("-based", "we don't do that here. unknown operator: -BOOLEAN"),
        (
            "based + cap;",
            "we don't do that here. unknown operator: BOOLEAN + BOOLEAN",
        ),
        (
            "5; based + cap; 5",
            "we don't do that here. unknown operator: BOOLEAN + BOOLEAN",
        ),
        (
            "fr (10 > 1) { based + based; }",
            "we don't do that here. unknown operator: BOOLEAN + BOOLEAN",
        ),
        (
            "
            fr (10 > 1) {
                fr (10 > 1) {
                    slay based + cap;
                }
                slay 1;
            }
            ",
            "we don't do that here. unknown operator: BOOLEAN + BOOLEAN",
        ),
        ("foobar", "bruh moment! identifier not found: foobar"),
        (
            "\"Hello\" - \"World\"",
            "we don't do that here. unknown operator: STRING - STRING",
        ),
        (
            "{\"name\": \"Monkey\"}[vibe(x) { x }];",
            "nah fam FUNCTION cannot be used as a hash key",
        ),
        ("5[0]", "index operator not supported: INTEGER"),
        ("5(1)", "not a function: INTEGER"),
        ("-\"x\"", "we don't do that here. unknown operator: -STRING"),
    ];

    for (input, expected) in tests {
        assert_error(input, expected);
    }
}

#[test]
fn test_errors_short_circuit_aggregates() {
    assert_error("[1, foo, bar]", "bruh moment! identifier not found: foo");
    assert_error("{1: foo, bar: 2}", "bruh moment! identifier not found: foo");
    assert_error(
        "yeet f = vibe(a, b) { a }; f(nope, 1 / 0)",
        "bruh moment! identifier not found: nope",
    );
    assert_error("yeet a = foo; a", "bruh moment! identifier not found: foo");
}

#[test]
fn test_failed_binding_is_not_stored() {
    let env = Environment::new();
    let (program, _) = parse("yeet a = foo;");
    eval(&program, &env);

    assert!(env.borrow().get("a").is_none());
}

#[test]
fn test_yeet_statements() {
    assert_integer("yeet a = 5; a;", 5);
    assert_integer("yeet a = 5 * 5; a;", 25);
    assert_integer("yeet a = 5; yeet b = a; b;", 5);
    assert_integer("yeet a = 5; yeet b = a; yeet c = a + b + 5; c", 15);
    assert_null("yeet a = 5;");
}

#[test]
fn test_vibe_object() {
    let evaluated = test_eval("vibe(x) { x + 2; };");

    match &*evaluated {
        Object::Function(function) => {
            assert_eq!(function.parameters.len(), 1);
            assert_eq!(function.parameters[0].value, "x");
            assert_eq!(function.body.to_string(), "(x + 2)");
        }
        other => panic!("expected function, got {:?}", other),
    }
    assert_eq!(evaluated.to_string(), "vibe(x) {\n(x + 2)\n}");
}

#[test]
fn test_vibe_application() {
    let tests = [
        ("yeet identity = vibe(x) { x; }; identity(5);", 5),
        ("yeet identity = vibe(x) { slay x; }; identity(5);", 5),
        ("yeet double = vibe(x) { x * 2; }; double(5);", 10),
        ("yeet add = vibe(x, y) { x + y; }; add(5, 5);", 10),
        ("yeet add = vibe(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20),
        ("vibe(x) { x; }(5)", 5),
    ];

    for (input, expected) in tests {
        assert_integer(input, expected);
    }
}

#[test]
fn test_slay_stops_at_call_boundary() {
    assert_integer("yeet f = vibe() { slay 1; 2 }; f() + 10", 11);
}

#[test]
fn test_arity_is_enforced() {
    assert_error(
        "vibe(x) { x }(1, 2)",
        "wrong number of arguments. got=2, want=1",
    );
    assert_error(
        "yeet add = vibe(a, b) { a + b }; add(1)",
        "wrong number of arguments. got=1, want=2",
    );
}

#[test]
fn test_closures() {
    let input = "
    yeet newAdder = vibe(x) {
        vibe(y) { x + y };
    };

    yeet addTwo = newAdder(2);
    addTwo(2);
    ";

    assert_integer(input, 4);
}

#[test]
fn test_closures_use_definition_scope() {
    let input = "
    yeet x = 1;
    yeet getX = vibe() { x };
    yeet shadow = vibe(x) { getX() };
    shadow(100);
    ";

    assert_integer(input, 1);
}

#[test]
fn test_parameters_do_not_leak() {
    assert_error(
        "yeet f = vibe(y) { y }; f(1); y",
        "bruh moment! identifier not found: y",
    );
}

#[test]
fn test_recursion() {
    let input = "
    yeet fib = vibe(n) {
        fr (n < 2) { slay n; }
        fib(n - 1) + fib(n - 2)
    };
    fib(15);
    ";

    assert_integer(input, 610);
}

#[test]
fn test_string_literal() {
    assert_eq!(test_eval("\"Hello World!\"").to_string(), "Hello World!");
}

#[test]
fn test_string_concatenation() {
    match &*test_eval("\"Hello\" + \" \" + \"World!\"") {
        Object::String(value) => assert_eq!(value, "Hello World!"),
        other => panic!("expected string, got {:?}", other),
    }
}

#[test]
fn test_builtin_functions() {
    assert_integer("rizzLevel(\"\")", 0);
    assert_integer("rizzLevel(\"four\")", 4);
    assert_integer("rizzLevel(\"hello world\")", 11);
    assert_integer("rizzLevel([1, 2, 3])", 3);
    assert_error(
        "rizzLevel(1)",
        "argument to `rizzLevel` not supported, got INTEGER",
    );
    assert_error(
        "rizzLevel(\"one\", \"two\")",
        "wrong number of arguments. got=2, want=1",
    );
    assert_integer("first([1, 2, 3])", 1);
    assert_integer("last([1, 2, 3])", 3);
    assert_null("first([])");
    assert_eq!(test_eval("rest([1, 2, 3])").to_string(), "[2, 3]");
    assert_eq!(test_eval("push([1, 2], 3)").to_string(), "[1, 2, 3]");
    assert_error(
        "push(1, 1)",
        "argument to `push` must be ARRAY, got INTEGER",
    );
}

#[test]
fn test_puts_writes_to_environment_output() {
    let output = Output::buffer();
    let env = Environment::with_output(output.clone());
    let (program, _) = parse("yeet greet = vibe(name) { puts(\"yo\", name) }; greet(\"fam\")");

    let evaluated = eval(&program, &env);

    assert!(Rc::ptr_eq(&evaluated, &null()));
    assert_eq!(String::from_utf8(output.take()).unwrap(), "yo\nfam\n");
}

#[test]
fn test_bindings_shadow_builtins() {
    assert_integer("yeet rizzLevel = vibe(x) { 42 }; rizzLevel(\"a\")", 42);
}

#[test]
fn test_builtin_errors_short_circuit() {
    assert_error(
        "rizzLevel(1); 5",
        "argument to `rizzLevel` not supported, got INTEGER",
    );
}

#[test]
fn test_array_literals() {
    match &*test_eval("[1, 2 * 2, 3 + 3]") {
        Object::Array(elements) => {
            let values: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
            assert_eq!(values, vec!["1", "4", "6"]);
        }
        other => panic!("expected array, got {:?}", other),
    }
}

#[test]
fn test_array_index_expressions() {
    assert_integer("[1, 2, 3][0]", 1);
    assert_integer("[1, 2, 3][1]", 2);
    assert_integer("[1, 2, 3][2]", 3);
    assert_integer("yeet i = 0; [1][i];", 1);
    assert_integer("[1, 2, 3][1 + 1];", 3);
    assert_integer("yeet myArray = [1, 2, 3]; myArray[2];", 3);
    assert_integer(
        "yeet myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];",
        6,
    );
    assert_integer("yeet myArray = [1, 2, 3]; yeet i = myArray[0]; myArray[i]", 2);
    assert_null("[1, 2, 3][3]");
    assert_null("[1, 2, 3][-1]");
    assert_error("[1, 2, 3][based]", "index operator not supported: ARRAY");
}

#[test]
fn test_hash_literals() {
    let input = "yeet two = \"two\";
    {
        \"one\": 10 - 9,
        two: 1 + 1,
        \"thr\" + \"ee\": 6 / 2,
        4: 4,
        based: 5,
        cap: 6
    }";

    let evaluated = test_eval(input);
    let Object::Hash(pairs) = &*evaluated else {
        panic!("expected hash, got {:?}", evaluated);
    };

    let expected = [
        (Object::String("one".to_string()), 1),
        (Object::String("two".to_string()), 2),
        (Object::String("three".to_string()), 3),
        (Object::Integer(4), 4),
        (Object::Boolean(true), 5),
        (Object::Boolean(false), 6),
    ];

    assert_eq!(pairs.len(), expected.len());
    for (key, value) in expected {
        let hash_key = key.hash_key().expect("key is hashable");
        let pair = pairs.get(&hash_key).expect("pair is present");
        assert_eq!(pair.value.to_string(), value.to_string());
    }
}

#[test]
fn test_hash_duplicate_keys_overwrite() {
    assert_integer("{\"a\": 1, \"a\": 2}[\"a\"]", 2);
}

#[test]
fn test_hash_literal_rejects_unhashable_keys() {
    assert_error(
        "{vibe(x) { x }: 1}",
        "nah fam FUNCTION cannot be used as a hash key",
    );
    assert_error("{[1]: 1}", "nah fam ARRAY cannot be used as a hash key");
}

#[test]
fn test_hash_index_expressions() {
    assert_integer("{\"foo\": 5}[\"foo\"]", 5);
    assert_null("{\"foo\": 5}[\"bar\"]");
    assert_integer("yeet key = \"foo\"; {\"foo\": 5}[key]", 5);
    assert_null("{}[\"foo\"]");
    assert_integer("{based: 5}[based]", 5);
    assert_integer("{cap: 5}[cap]", 5);
    assert_null("{1: 5}[\"1\"]");
}

#[test]
fn test_block_statement_shares_scope() {
    let program = Program {
        statements: vec![
            Stmt::Block(BlockStmt {
                body: vec![Stmt::Expression(ExpressionStmt {
                    expression: Expr::Integer(IntegerExpr { value: 1 }),
                })],
            }),
            Stmt::Block(BlockStmt {
                body: vec![
                    Stmt::Return(ReturnStmt {
                        value: Some(Expr::Integer(IntegerExpr { value: 2 })),
                    }),
                    Stmt::Expression(ExpressionStmt {
                        expression: Expr::Integer(IntegerExpr { value: 3 }),
                    }),
                ],
            }),
        ],
    };

    let evaluated = eval(&program, &Environment::new());
    assert_eq!(evaluated.to_string(), "2");
}

#[test]
fn test_empty_program_is_null() {
    assert_null("");
}
