//! Unit tests for the evaluator.

use super::*;
use crate::{
    parser::{self, BinaryOp, Expr},
    stdlib::Arity,
    symbol_table::SymbolTable,
    values::Value,
};
use pretty_assertions::assert_eq;

struct Runner {
    table: SymbolTable,
}

impl Runner {
    fn new() -> Self {
        Self {
            table: SymbolTable::with_constants(),
        }
    }

    fn with(mut self, name: &str, value: Value) -> Self {
        self.table.bind(name, value).expect("binding failed");
        self
    }

    fn run(&self, input: &str, mode: Mode) -> Result<Value, EvalError> {
        let expr = parser::parse(input).expect("parsing failed");
        evaluate(&expr, &self.table, mode)
    }

    fn numeric(&self, input: &str) -> Result<Value, EvalError> {
        self.run(input, Mode::Numeric)
    }

    fn symbolic(&self, input: &str) -> String {
        match self.run(input, Mode::Symbolic) {
            Ok(value) => value.to_string(),
            Err(err) => panic!("symbolic evaluation of '{}' failed: {}", input, err),
        }
    }

    fn run_with_limits(&self, input: &str, max_depth: usize) -> Result<Value, EvalError> {
        let expr = parser::parse(input).expect("parsing failed");
        evaluate_with_options(
            &expr,
            &self.table,
            Mode::Numeric,
            EvaluatorOptions {
                max_depth,
                ..EvaluatorOptions::default()
            },
        )
    }
}

fn approx(value: Result<Value, EvalError>, expected: f64) {
    match value {
        Ok(Value::Numeric(n)) => assert!(
            (n - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            n
        ),
        other => panic!("expected a number, got {:?}", other),
    }
}

#[test]
fn test_arithmetic() {
    let runner = Runner::new();
    assert_eq!(runner.numeric("1 + 2 * 3"), Ok(Value::Numeric(7.0)));
    assert_eq!(runner.numeric(r"\frac{1}{2}"), Ok(Value::Numeric(0.5)));
    assert_eq!(runner.numeric("2^10"), Ok(Value::Numeric(1024.0)));
    assert_eq!(runner.numeric("-3 + 1"), Ok(Value::Numeric(-2.0)));
    assert_eq!(runner.numeric("5!"), Ok(Value::Numeric(120.0)));
}

#[test]
fn test_builtin_functions() {
    let runner = Runner::new();
    approx(runner.numeric("sin(3.14)"), 0.0015926529164868282);
    approx(runner.numeric(r"\sin(3.14)"), 0.0015926529164868282);
    assert_eq!(runner.numeric("cos(0)"), Ok(Value::Numeric(1.0)));
    assert_eq!(runner.numeric(r"\sqrt{4}"), Ok(Value::Numeric(2.0)));
    approx(runner.numeric("log(e)"), 1.0);
    approx(runner.numeric(r"\sqrt[3]{27}"), 3.0);
}

#[test]
fn test_constants() {
    let runner = Runner::new();
    assert_eq!(
        runner.numeric(r"2\pi"),
        Ok(Value::Numeric(2.0 * core::f64::consts::PI))
    );
    assert_eq!(
        runner.numeric("tau"),
        Ok(Value::Numeric(core::f64::consts::TAU))
    );
}

#[test]
fn test_unresolved_names_are_sorted() {
    let runner = Runner::new();
    assert_eq!(
        runner.numeric("c + b * a + b"),
        Err(EvalError::Unresolved {
            names: vec!["a".to_string(), "b".to_string(), "c".to_string()]
        })
    );
    assert_eq!(
        runner.numeric("f(2)"),
        Err(EvalError::Unresolved {
            names: vec!["f".to_string()]
        })
    );
}

#[test]
fn test_bound_names_are_substituted() {
    let runner = Runner::new().with("a", Value::Numeric(5.0));
    assert_eq!(runner.numeric("a + 2"), Ok(Value::Numeric(7.0)));
    // A bound name applied like a function multiplies.
    assert_eq!(runner.numeric("a(2)"), Ok(Value::Numeric(10.0)));
}

#[test]
fn test_symbolic_keeps_free_names() {
    let runner = Runner::new().with("a", Value::Numeric(3.0));
    assert_eq!(runner.symbolic("x + 0"), "x");
    assert_eq!(runner.symbolic("a x"), "3*x");
    assert_eq!(runner.symbolic("2x + 3x"), "2*x + 3*x");
    assert_eq!(runner.symbolic("y (1 + 1)"), "y*2");
    assert_eq!(runner.symbolic(r"\frac{1}{3} z"), "0.3333*z");
}

#[test]
fn test_symbolic_that_reduces_to_number_is_numeric() {
    let runner = Runner::new();
    assert_eq!(runner.run("x - x", Mode::Symbolic), Ok(Value::Numeric(0.0)));
    assert_eq!(runner.run("1 + 1", Mode::Symbolic), Ok(Value::Numeric(2.0)));
}

#[test]
fn test_symbolic_values_substitute_as_expressions() {
    let y = Expr::binary(BinaryOp::Add, Expr::symbol("x"), Expr::Number(1.0));
    let runner = Runner::new().with("y", Value::Symbolic(y));
    assert_eq!(runner.symbolic("2y"), "2*(x + 1)");
    assert_eq!(
        runner.numeric("2y"),
        Err(EvalError::Unresolved {
            names: vec!["x".to_string()]
        })
    );
}

#[test]
fn test_symbolic_values_expand_transitively() {
    let runner = Runner::new()
        .with("y", Value::Symbolic(Expr::symbol("x")))
        .with("x", Value::Numeric(4.0));
    assert_eq!(runner.numeric("2y"), Ok(Value::Numeric(8.0)));
}

#[test]
fn test_self_referencing_value_does_not_recurse() {
    let y = Expr::binary(BinaryOp::Add, Expr::symbol("y"), Expr::Number(1.0));
    let runner = Runner::new().with("y", Value::Symbolic(y));
    assert_eq!(runner.symbolic("y"), "y + 1");
}

#[test]
fn test_like_terms_fold() {
    let runner = Runner::new();
    assert_eq!(runner.symbolic("x + x"), "2*x");
    assert_eq!(runner.symbolic("2*(3*x)"), "6*x");
    assert_eq!(runner.symbolic("(x + y) + (x + y)"), "2*(x + y)");
}

#[test]
fn test_expression_size_is_limited() {
    // Each name doubles the size of the one before it.
    let mut runner = Runner::new().with("a0", Value::Symbolic(parser::parse("x + y").unwrap()));
    for n in 1..30 {
        let previous = format!("a{}", n - 1);
        let value = parser::parse(&format!("{previous} x + {previous} y")).unwrap();
        runner = runner.with(&format!("a{n}"), Value::Symbolic(value));
    }
    assert_eq!(
        runner.run("a29", Mode::Symbolic),
        Err(EvalError::ExpressionTooLarge { max_nodes: 10_000 })
    );
    assert_eq!(runner.symbolic("a2").matches('x').count(), 7);
}

#[test]
fn test_division_by_zero() {
    let runner = Runner::new();
    assert_eq!(runner.numeric("1 / 0"), Err(EvalError::DivisionByZero));
    assert_eq!(
        runner.run("1 / (a - a)", Mode::Symbolic),
        Err(EvalError::DivisionByZero)
    );
}

#[test]
fn test_domain_errors() {
    let runner = Runner::new();
    assert_eq!(
        runner.numeric(r"\sqrt{-1}"),
        Err(EvalError::Domain {
            function: "sqrt".to_string(),
            argument: -1.0
        })
    );
    assert!(matches!(
        runner.numeric(r"\ln 0"),
        Err(EvalError::Domain { .. })
    ));
}

#[test]
fn test_wrong_arity() {
    let runner = Runner::new();
    assert_eq!(
        runner.numeric("sin(1, 2)"),
        Err(EvalError::Arity {
            function: "sin".to_string(),
            expected: Arity::Exact(1),
            found: 2
        })
    );
    // Checked even when the arguments stay symbolic.
    assert!(runner.run("sin(x, y)", Mode::Symbolic).is_err());
}

#[test]
fn test_stack_overflow() {
    let runner = Runner::new();
    let result = runner.run_with_limits("1 + 1 + 1 + 1 + 1 + 1 + 1", 5);
    assert!(matches!(
        result,
        Err(EvalError::StackOverflow { max_depth: 5, .. })
    ));
    assert_eq!(
        runner.run_with_limits("1 + 1 + 1 + 1 + 1 + 1 + 1", 100),
        Ok(Value::Numeric(7.0))
    );
}

#[test]
fn test_shadowed_names_stay_free() {
    let mut table = SymbolTable::new();
    table.bind("x", Value::Numeric(2.0)).unwrap();
    table.bind("k", Value::Numeric(10.0)).unwrap();

    let expr = parser::parse("k x^2 + x").unwrap();
    let mut evaluator = Evaluator::new(EvaluatorOptions::default(), &table).with_shadowed(&["x"]);
    let reduced = evaluator.reduce(&expr).unwrap();
    assert_eq!(reduced.to_string(), "10*x^2 + x");
    assert_eq!(evaluator.evaluate_at(&reduced, "x", 3.0), Ok(93.0));
}

#[test]
fn test_evaluate_at_reports_other_names() {
    let table = SymbolTable::new();
    let expr = parser::parse("x + y").unwrap();
    let mut evaluator = Evaluator::new(EvaluatorOptions::default(), &table);
    assert_eq!(
        evaluator.evaluate_at(&expr, "x", 1.0),
        Err(EvalError::Unresolved {
            names: vec!["y".to_string()]
        })
    );
    assert_eq!(
        evaluator.evaluate_at(&parser::parse("1 / x").unwrap(), "x", 0.0),
        Err(EvalError::DivisionByZero)
    );
}

#[test]
fn test_free_symbols() {
    let expr = parser::parse("f(x) + sin(y) + x").unwrap();
    assert_eq!(free_symbols(&expr), vec!["f", "x", "y"]);
    assert_eq!(free_symbols(&parser::parse("2 + 3").unwrap()), Vec::<String>::new());
}

#[test]
fn test_deterministic() {
    let runner = Runner::new().with("a", Value::Numeric(1.0 / 7.0));
    let first = runner.numeric("sin(a) * e^a");
    for _ in 0..10 {
        assert_eq!(runner.numeric("sin(a) * e^a"), first);
    }
}
