use interpol::error::TypeErrorKind;
use interpol::prelude::*;
use interpol::{check, parse};
use std::thread;

fn scope() -> MapScope {
    MapScope::new()
        .with_var("var.bar", Type::String)
        .with_var("var.port", Type::Int)
        .with_var("baz", Type::String)
        .with_var("items", Type::List)
        .with_func("foo", vec![], Type::String)
        .with_func("join", vec![Type::String, Type::List], Type::String)
        .with_func("upper", vec![Type::String], Type::String)
        .with_func("length", vec![Type::List], Type::Int)
}

fn check_source(source: &str) -> Result<(), TypeError> {
    check(&parse(source).unwrap(), &scope())
}

#[test]
fn well_typed_trees_pass() {
    for source in &[
        "foo",
        "",
        "foo ${var.bar}",
        "${foo()}",
        "${join(\"-\", items)}",
        "foo ${\"bar ${baz}\"}",
        "${upper(\"id-${upper(baz)}\")}",
        "${var.port}",
        "${length(items)}",
    ] {
        assert_eq!(check_source(source), Ok(()), "source: {}", source);
    }
}

#[test]
fn unknown_variable() {
    let error = check_source("foo ${var.nope}").unwrap_err();

    assert_eq!(error.kind, TypeErrorKind::UnknownVariable {
        name: "var.nope".into(),
    });
    assert_eq!(error.pos.column, 7);
    assert_eq!(error.to_string(), "1:7: unknown variable accessed: var.nope");
}

#[test]
fn unknown_function() {
    let error = check_source("a\n  ${nope(baz)}").unwrap_err();

    assert_eq!(error.kind, TypeErrorKind::UnknownFunction {
        name: "nope".into(),
    });
    assert_eq!((error.pos.line, error.pos.column), (2, 5));
    assert_eq!(error.to_string(), "2:5: unknown function called: nope");
}

#[test]
fn wrong_argument_count() {
    let error = check_source("${upper(baz, baz)}").unwrap_err();

    assert_eq!(error.kind, TypeErrorKind::ArgumentCount {
        func: "upper".into(),
        expected: 1,
        actual: 2,
    });

    let error = check_source("${foo(baz)}").unwrap_err();
    assert_eq!(error.to_string(), "1:3: foo: expected 0 arguments, got 1");
}

#[test]
fn wrong_argument_type() {
    let error = check_source("${join(items, baz)}").unwrap_err();

    assert_eq!(error.kind, TypeErrorKind::ArgumentType {
        func: "join".into(),
        index: 1,
        expected: Type::String,
        actual: Type::List,
    });
    assert_eq!(error.to_string(), "1:3: join: argument 1 should be string, got list");
}

#[test]
fn call_result_type_flows_into_parent() {
    let error = check_source("${upper(length(items))}").unwrap_err();

    assert_eq!(error.kind, TypeErrorKind::ArgumentType {
        func: "upper".into(),
        index: 1,
        expected: Type::String,
        actual: Type::Int,
    });
}

#[test]
fn non_string_concat_operand() {
    let error = check_source("port ${var.port}").unwrap_err();

    assert_eq!(error.kind, TypeErrorKind::ConcatOperand {
        index: 2,
        actual: Type::Int,
    });
    assert_eq!(error.pos.offset, 0);
    assert_eq!(error.to_string(), "1:1: argument 2 must be a string, got int");
}

#[test]
fn nested_concat_error_points_at_nested_node() {
    let error = check_source("a ${\"b ${items}\"}").unwrap_err();

    assert_eq!(error.kind, TypeErrorKind::ConcatOperand {
        index: 2,
        actual: Type::List,
    });
    assert_eq!(error.pos.offset, 5);
}

#[test]
fn resolved_type_of_root() {
    let checker = TypeChecker::new(scope());

    assert_eq!(checker.resolve_type(&parse("${length(items)}").unwrap()), Ok(Type::Int));
    assert_eq!(checker.resolve_type(&parse("n=${\"x\"}").unwrap()), Ok(Type::String));
}

#[test]
fn checker_is_clean_after_failure() {
    let checker = TypeChecker::new(scope());
    let bad = parse("${upper(items)} ${nope}").unwrap();
    let good = parse("${upper(baz)}").unwrap();

    assert!(checker.check(&bad).is_err());
    assert_eq!(checker.check(&good), Ok(()));
    assert_eq!(checker.resolve_type(&good), Ok(Type::String));
    assert_eq!(checker.check(&bad), checker.check(&bad));
}

#[test]
fn scope_defined_types() {
    let scope = MapScope::new()
        .with_var("timeout", Type::Named("duration".into()))
        .with_func("seconds", vec![Type::Named("duration".into())], Type::Int);

    assert_eq!(interpol::resolve_type(&parse("${seconds(timeout)}").unwrap(), &scope), Ok(Type::Int));
}

#[test]
fn shared_checker_across_threads() {
    let checker = TypeChecker::new(scope());
    let sources = ["${upper(baz)}", "${upper(items)}", "x ${var.bar}", "${nope}"];

    thread::scope(|s| {
        let handles: Vec<_> = sources.iter()
            .map(|source| {
                let checker = &checker;
                s.spawn(move || {
                    let tree = parse(*source).unwrap();
                    (0..100).map(|_| checker.check(&tree).is_ok()).collect::<Vec<_>>()
                })
            })
            .collect();

        let results: Vec<Vec<bool>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        for (source, results) in sources.iter().zip(results) {
            let expected = check_source(source).is_ok();
            assert!(results.iter().all(|&ok| ok == expected), "source: {}", source);
        }
    });
}

#[test]
fn deepest_parsable_tree_checks() {
    let depth = interpol::syntax::MAX_DEPTH - 1;
    let source = format!("${{{}baz{}}}", "upper(".repeat(depth), ")".repeat(depth));

    assert_eq!(check_source(&source), Ok(()));
    assert!(parse(format!("${{{}baz{}}}", "upper(".repeat(depth + 1), ")".repeat(depth + 1))).is_err());
}
