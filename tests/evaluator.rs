use std::rc::Rc;

use ram::{
    ast::{ArithmeticOperator, Branch, Expr, FunctionDef, Module, Statement, VarType},
    error::RuntimeError,
    interpreter::{
        evaluator::core::Context,
        parser::{core::parse_expression, grouping::lexify, structure::SourceLine},
        value::{core::Value, environment::Environment},
    },
};

fn number(n: f64) -> Expr {
    Expr::Number(n)
}

fn name(s: &str) -> Expr {
    Expr::Name(s.to_string())
}

fn display(argument: Expr) -> Statement {
    Statement::Display { argument,
                         line: 1 }
}

/// Evaluates a module with no input and returns the output and final
/// environment.
fn run(body: Vec<Statement>, env: Environment) -> Result<(String, Environment), RuntimeError> {
    let mut output = Vec::new();
    let env = {
        let mut context = Context::new(&b""[..], &mut output);
        Module::new(body).evaluate_in(&mut context, env)?
    };
    Ok((String::from_utf8(output).expect("output is UTF-8"), env))
}

fn eval(expr: &Expr, env: &mut Environment) -> Result<Option<Value>, RuntimeError> {
    let mut context = Context::new(&b""[..], Vec::new());
    context.eval(expr, env, 1)
}

#[test]
fn additive_chain_folds_left() {
    let at = SourceLine::new("5 + 6 - 2", 1);
    let tokens = lexify(&at.text, &at).unwrap();
    let expr = parse_expression(&tokens, &at).unwrap();

    assert_eq!(eval(&expr, &mut Environment::new()).unwrap(), Some(Value::Real(9.0)));
}

#[test]
fn loop_displays_each_counter() {
    let body = vec![Statement::Loop { var:   "x".into(),
                                      start: number(1.0),
                                      stop:  number(3.0),
                                      body:  vec![display(name("x"))],
                                      line:  1, }];

    let (output, env) = run(body, Environment::new()).unwrap();
    assert_eq!(output, "1\n2\n3\n");
    assert_eq!(env.value("x"), Some(&Value::Integer(3)));
}

#[test]
fn only_first_true_branch_runs() {
    let body = vec![Statement::If { branches: vec![Branch { condition: Expr::Bool(false),
                                                            body:      vec![display(Expr::Text("A".into()))], },
                                                   Branch { condition: Expr::Bool(true),
                                                            body:      vec![display(Expr::Text("B".into()))], },
                                                   Branch { condition: Expr::Bool(true),
                                                            body:      vec![display(Expr::Text("C".into()))], }],
                                    orelse:   vec![display(Expr::Text("else".into()))],
                                    line:     1, }];

    let (output, _) = run(body, Environment::new()).unwrap();
    assert_eq!(output, "B\n");
}

#[test]
fn unbound_name_is_reported() {
    let err = eval(&name("ghost"), &mut Environment::new()).unwrap_err();
    assert!(matches!(&err, RuntimeError::UnknownName { name, line: 1 } if name == "ghost"));
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn function_calls_are_isolated() {
    let add = FunctionDef { name:    "f".into(),
                            params:  vec!["x".into(), "y".into()],
                            body:    vec![Statement::Assign { target: "z".into(),
                                                              ty:     VarType::Integer,
                                                              value:  Expr::binary(name("x"),
                                                                                   ArithmeticOperator::Add,
                                                                                   name("y")),
                                                              line:   2, }],
                            returns: name("z"),
                            line:    1, };
    let mut env = Environment::new();
    env.define_function(Rc::new(add));

    let call = Expr::Call { name:      "f".into(),
                            arguments: vec![("x".into(), number(10.0)), ("y".into(), number(5.0))], };

    assert_eq!(eval(&call, &mut env).unwrap(), Some(Value::Real(15.0)));
    assert!(!env.contains("z"));
    assert!(!env.contains("x"));
}

#[test]
fn functions_do_not_see_outer_variables() {
    let def = FunctionDef { name:    "peek".into(),
                            params:  vec![],
                            body:    vec![],
                            returns: name("secret"),
                            line:    1, };
    let mut env = Environment::new();
    env.define("secret", Value::Real(1.0));
    env.define_function(Rc::new(def));

    let err = eval(&name("peek"), &mut env).unwrap_err();
    assert!(matches!(err, RuntimeError::UnknownName { name, .. } if name == "secret"));
}

#[test]
fn boolean_operands_are_all_evaluated() {
    let expr = Expr::Boolean { op:       ram::ast::BooleanOperator::Or,
                               operands: vec![Expr::Bool(true), name("missing")], };

    assert!(matches!(eval(&expr, &mut Environment::new()), Err(RuntimeError::UnknownName { .. })));
}

#[test]
fn equality_treats_absent_values_as_equal() {
    let expr = Expr::equality(Expr::Empty, Expr::Empty);
    assert_eq!(eval(&expr, &mut Environment::new()).unwrap(), Some(Value::Bool(true)));

    let mixed = Expr::equality(Expr::Empty, number(0.0));
    assert_eq!(eval(&mixed, &mut Environment::new()).unwrap(), Some(Value::Bool(false)));
}

#[test]
fn display_of_absent_value_prints_none() {
    let (output, _) = run(vec![display(Expr::Empty)], Environment::new()).unwrap();
    assert_eq!(output, "None\n");
}

#[test]
fn arithmetic_rejects_non_numbers() {
    let expr = Expr::binary(Expr::Text("a".into()), ArithmeticOperator::Multiply, number(2.0));
    let err = eval(&expr, &mut Environment::new()).unwrap_err();

    assert!(matches!(err, RuntimeError::OperatorEvaluate { ref op, .. } if op == "*"));
}

#[test]
fn assignment_checks_declared_type() {
    let body = vec![Statement::Assign { target: "flag".into(),
                                        ty:     VarType::Boolean,
                                        value:  Expr::Text("yes".into()),
                                        line:   4, }];

    let err = run(body, Environment::new()).unwrap_err();
    assert!(matches!(err, RuntimeError::TypeMismatch { line: 4, .. }));
}

#[test]
fn loop_bounds_must_be_finite() {
    let body = vec![Statement::Loop { var:   "i".into(),
                                      start: number(1.0),
                                      stop:  Expr::binary(number(1.0), ArithmeticOperator::Divide, number(0.0)),
                                      body:  vec![],
                                      line:  1, }];
    assert!(matches!(run(body, Environment::new()), Err(RuntimeError::DivisionByZero { .. })));

    let body = vec![Statement::Loop { var:   "i".into(),
                                      start: number(1e300),
                                      stop:  number(1e301),
                                      body:  vec![],
                                      line:  2, }];
    assert!(matches!(run(body, Environment::new()), Err(RuntimeError::InvalidLoopBounds { line: 2, .. })));
}

#[test]
fn rendered_expressions_evaluate_the_same() {
    let mut env = Environment::with_builtins();
    env.define("x", Value::Real(4.0));

    for text in ["5 + 6 - 2", "x * (3 - 1) / 4", "(x is 4) and (1 is 1.0)", "CONVERT_NUMBER[value=\"2.5\"] + x"] {
        let at = SourceLine::new(text, 1);
        let expr = parse_expression(&lexify(text, &at).unwrap(), &at).unwrap();

        let rendered = expr.to_string();
        let reparsed = parse_expression(&lexify(&rendered, &at).unwrap(), &at).unwrap();

        assert_eq!(eval(&expr, &mut env).unwrap(), eval(&reparsed, &mut env).unwrap(), "{text}");
    }
}
