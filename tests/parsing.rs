use ram::{
    ast::{ArithmeticOperator, BooleanOperator, Expr, Statement, VarType},
    error::ParseError,
    interpreter::{
        lexer::{
            TokenTree::{self, Atom, Group},
            format_whitespace,
        },
        parser::{
            core::parse_expression,
            grouping::{Segment, identify_bracket_blocks, lexify},
            parse_module,
            precedence::{lexbool, pedmas},
            structure::{Node, SourceLine, process_ram},
        },
    },
    parse_source, source_lines,
};

fn atoms(items: &[&str]) -> Vec<TokenTree> {
    items.iter().map(|s| Atom((*s).to_string())).collect()
}

fn at() -> SourceLine {
    SourceLine::new("", 1)
}

fn parse(text: &str) -> Result<Expr, ParseError> {
    parse_expression(&lexify(text, &at())?, &at())
}

#[test]
fn pedmas_groups_multiplication_only() {
    assert_eq!(pedmas(atoms(&["4", "+", "2", "*", "7", "-", "1"])),
               vec![Atom("4".into()),
                    Atom("+".into()),
                    Group(atoms(&["2", "*", "7"])),
                    Atom("-".into()),
                    Atom("1".into())]);
    assert_eq!(pedmas(atoms(&["1", "+", "2"])), atoms(&["1", "+", "2"]));
    assert_eq!(pedmas(atoms(&["6", "/", "3", "*", "2"])),
               vec![Group(vec![Group(atoms(&["6", "/", "3"])),
                               Atom("*".into()),
                               Atom("2".into())])]);
}

#[test]
fn lexbool_nests_left_to_right() {
    assert_eq!(lexbool(atoms(&["a", "or", "b", "and", "c"])),
               vec![Group(atoms(&["a", "or", "b"])), Atom("and".into()), Atom("c".into())]);
    assert_eq!(lexbool(atoms(&["a", "and", "b"])), atoms(&["a", "and", "b"]));
}

#[test]
fn bracket_blocks_respect_quotes_and_calls() {
    assert_eq!(identify_bracket_blocks(r#""(" + (1)"#, &at()).unwrap(),
               vec![Segment::Plain(r#""(" + "#), Segment::Bracketed("1")]);
    assert_eq!(identify_bracket_blocks("f[x=(1]", &at()).unwrap(),
               vec![Segment::Plain("f[x=(1]")]);
    assert!(matches!(identify_bracket_blocks("(1 + 2", &at()), Err(ParseError::Syntax { .. })));
    assert!(matches!(identify_bracket_blocks("1 + 2)", &at()), Err(ParseError::Syntax { .. })));
}

#[test]
fn whitespace_is_normalized_outside_quotes() {
    assert_eq!(format_whitespace("x+1 is  \"a  b\"").unwrap(), "x + 1 is \"a  b\"");
    assert_eq!(format_whitespace("add[x=1, y=2]*3").unwrap(), "add[x=1, y=2] * 3");
}

#[test]
fn lexify_nests_parentheses() {
    assert_eq!(lexify("((1))", &at()).unwrap(), vec![Group(vec![Group(atoms(&["1"]))])]);
    assert_eq!(lexify("5 + (9 * 2) - 3", &at()).unwrap(),
               vec![Atom("5".into()),
                    Atom("+".into()),
                    Group(atoms(&["9", "*", "2"])),
                    Atom("-".into()),
                    Atom("3".into())]);
    assert_eq!(lexify("(6 / 3 * 2)", &at()).unwrap(),
               vec![Group(vec![Group(atoms(&["6", "/", "3"])), Atom("*".into()), Atom("2".into())])]);
    assert_eq!(lexify("7/(4+1)", &at()).unwrap(),
               vec![Group(vec![Atom("7".into()), Atom("/".into()), Group(atoms(&["4", "+", "1"]))])]);
}

#[test]
fn expression_shapes() {
    assert_eq!(parse("").unwrap(), Expr::Empty);
    assert_eq!(parse("((2.5))").unwrap(), Expr::Number(2.5));
    assert_eq!(parse("\"hi\"").unwrap(), Expr::Text("hi".into()));
    assert_eq!(parse("GET_INPUT").unwrap(), Expr::Input);
    assert_eq!(parse("a or b or c").unwrap(),
               Expr::Boolean { op:       BooleanOperator::Or,
                               operands: vec![Expr::Name("a".into()),
                                              Expr::Name("b".into()),
                                              Expr::Name("c".into())], });
    assert_eq!(parse("1 + 2 * 3").unwrap(),
               Expr::binary(Expr::Number(1.0),
                            ArithmeticOperator::Add,
                            Expr::binary(Expr::Number(2.0), ArithmeticOperator::Multiply, Expr::Number(3.0))));
}

#[test]
fn expression_errors() {
    assert!(matches!(parse("1 plus 2"), Err(ParseError::Operator { operator, .. }) if operator == "plus"));
    assert!(matches!(parse("x not y"), Err(ParseError::Operator { .. })));
    assert!(matches!(parse("1 + + + 2"), Err(ParseError::Syntax { .. })));
    assert!(matches!(parse("3abc"), Err(ParseError::Syntax { .. })));
    assert!(matches!(parse("f[1]"), Err(ParseError::Syntax { .. })));
}

#[test]
fn structurer_balances_braces() {
    let source = "if x is 1 {\n\
                  loop with i from 1 to 2 {\n\
                  display i\n\
                  }\n\
                  } else {\n\
                  display 0\n\
                  }\n\
                  display 2";
    let nodes = process_ram(&source_lines(source)).unwrap();
    assert_eq!(nodes.len(), 2);

    let Node::Block(outer) = &nodes[0] else {
        panic!("expected a block");
    };
    assert_eq!(outer.header.text, "if x is 1");
    assert_eq!(outer.closed_at, 7);
    assert_eq!(outer.body.len(), 3);
    assert!(matches!(&outer.body[0], Node::Block(inner) if inner.closed_at == 4));
    assert!(matches!(&outer.body[1], Node::Marker(marker) if marker.number == 5));
}

#[test]
fn structurer_keeps_line_numbers_and_ignores_quoted_braces() {
    let nodes = process_ram(&source_lines("\n\n  display \"{\"  \n")).unwrap();
    let [Node::Line(line)] = nodes.as_slice() else {
        panic!("expected one line");
    };
    assert_eq!(line.source.number, 3);
    assert_eq!(line.source.text, "display \"{\"");
}

#[test]
fn block_header_ignores_quoted_braces() {
    let nodes = process_ram(&source_lines("if name is \"{\" {\ndisplay 1\n}")).unwrap();
    let [Node::Block(block)] = nodes.as_slice() else {
        panic!("expected one block");
    };
    assert_eq!(block.header.text, "if name is \"{\"");
    assert_eq!(block.closed_at, 3);

    let module = parse_source("if name is \"{\" {\ndisplay 1\n}").unwrap();
    let Statement::If { branches, .. } = &module.body[0] else {
        panic!("expected a conditional");
    };
    assert_eq!(branches[0].condition,
               Expr::equality(Expr::Name("name".into()), Expr::Text("{".into())));
}

#[test]
fn structurer_errors() {
    assert!(matches!(process_ram(&source_lines("display 1\n}")), Err(ParseError::Syntax { line: 2, .. })));
    assert!(matches!(process_ram(&source_lines("if x is 1 {\ndisplay 1")),
                     Err(ParseError::Syntax { line: 1, .. })));
    assert!(matches!(process_ram(&source_lines("while x {\n}")), Err(ParseError::Keyword { .. })));
    assert!(matches!(process_ram(&source_lines("{\n}")), Err(ParseError::BlockConstruction { .. })));
    assert!(matches!(process_ram(&source_lines("x")), Err(ParseError::Syntax { .. })));
}

#[test]
fn statements() {
    let module = parse_source("set text name to \"Ada (1815)\"\nreset integer n to 2 * 3").unwrap();
    assert_eq!(module.body[0],
               Statement::Assign { target: "name".into(),
                                   ty:     VarType::Text,
                                   value:  Expr::Text("Ada (1815)".into()),
                                   line:   1, });
    assert!(matches!(&module.body[1], Statement::Assign { ty: VarType::Integer, line: 2, .. }));
}

#[test]
fn statement_errors() {
    assert!(matches!(parse_source("set integer x be 5"), Err(ParseError::Keyword { keyword, .. }) if keyword == "be"));
    assert!(matches!(parse_source("set float x to 5"), Err(ParseError::Keyword { .. })));
    assert!(matches!(parse_source("send forth 5"), Err(ParseError::Keyword { .. })));
    assert!(matches!(parse_source("send back"), Err(ParseError::Syntax { .. })));
    assert!(matches!(parse_source("call 1 + 2"), Err(ParseError::Syntax { .. })));
}

#[test]
fn loop_headers() {
    let module = parse_source("loop with i from (1 + 1) to n * 2 {\ndisplay i\n}").unwrap();
    let Statement::Loop { var, start, stop, body, line } = &module.body[0] else {
        panic!("expected a loop");
    };
    assert_eq!(var, "i");
    assert_eq!(start.to_string(), "(1.0 + 1.0)");
    assert_eq!(stop.to_string(), "(n * 2.0)");
    assert_eq!(body.len(), 1);
    assert_eq!(*line, 1);

    assert!(matches!(parse_source("loop over i from 1 to 2 {\n}"), Err(ParseError::Keyword { keyword, .. }) if keyword == "over"));
    assert!(matches!(parse_source("loop with i at 1 to 2 {\n}"), Err(ParseError::Keyword { keyword, .. }) if keyword == "at"));
    assert!(matches!(parse_source("loop with i from 1 until 2 {\n}"), Err(ParseError::Keyword { keyword, .. }) if keyword == "until"));
    assert!(matches!(parse_source("loop with i from (1 + 1) till 2 {\n}"), Err(ParseError::Keyword { keyword, .. }) if keyword == "till"));
    assert!(matches!(parse_source("loop with i from 1 {\n}"), Err(ParseError::Syntax { .. })));
    assert!(matches!(parse_source("loop with i from 1 to 2 {\n} else {\n}"), Err(ParseError::Syntax { .. })));
}

#[test]
fn conditional_chains_flatten() {
    let source = "if a is 1 {\n\
                  display 1\n\
                  } else if a is 2 {\n\
                  display 2\n\
                  } else if b {\n\
                  display 3\n\
                  } else {\n\
                  display 4\n\
                  display 5\n\
                  }";
    let module = parse_source(source).unwrap();
    let Statement::If { branches, orelse, .. } = &module.body[0] else {
        panic!("expected a conditional");
    };
    assert_eq!(branches.len(), 3);
    assert_eq!(branches[1].condition.to_string(), "(a is 2.0)");
    assert_eq!(branches[2].condition, Expr::Name("b".into()));
    assert_eq!(orelse.len(), 2);
}

#[test]
fn conditional_marker_errors() {
    assert!(matches!(parse_source("if a {\n} otherwise {\n}"), Err(ParseError::Keyword { keyword, .. }) if keyword == "otherwise"));
    assert!(matches!(parse_source("if a {\n} else when b {\n}"), Err(ParseError::Keyword { keyword, .. }) if keyword == "when"));
    assert!(matches!(parse_source("if a {\n} else {\n} else {\n}"), Err(ParseError::Syntax { .. })));
}

#[test]
fn function_definitions() {
    let source = "new function add takes (x, y) {\n\
                  set integer z to x + y\n\
                  send back z\n\
                  }";
    let module = parse_source(source).unwrap();
    let Statement::Function(def) = &module.body[0] else {
        panic!("expected a function");
    };
    assert_eq!(def.name, "add");
    assert_eq!(def.params, vec!["x".to_string(), "y".to_string()]);
    assert_eq!(def.body.len(), 1);
    assert_eq!(def.returns, Expr::Name("z".into()));

    let no_return = parse_source("new function f takes () {\ndisplay 1\n}").unwrap();
    assert!(matches!(&no_return.body[0], Statement::Function(def) if def.returns == Expr::Empty && def.params.is_empty()));

    assert!(matches!(parse_source("new fn f takes (x) {\n}"), Err(ParseError::Keyword { .. })));
    assert!(matches!(parse_source("new function f with (x) {\n}"), Err(ParseError::Keyword { .. })));
    assert!(matches!(parse_source("new function f takes x {\n}"), Err(ParseError::Syntax { .. })));
}

#[test]
fn float_conversion_failures_are_general_errors() {
    let err = ParseError::from("1.2.3".parse::<f64>().unwrap_err());
    assert!(matches!(&err, ParseError::General { .. }));
    assert!(err.to_string().starts_with("Error: "));
}

#[test]
fn parse_module_reports_first_error_line() {
    let lines = vec![("display 1".to_string(), 10), ("display (".to_string(), 11)];
    assert!(matches!(parse_module(&lines), Err(ParseError::Syntax { line: 11, .. })));
}

#[test]
fn expressions_render_as_ram_source() {
    for text in ["1 + 2 * 3", "add[x=1,y=\"a b\"] - 4", "(1 is 1) and (2 is 3) or true", "10 / 4 / 5"] {
        let expr = parse(text).unwrap();
        assert_eq!(parse(&expr.to_string()).unwrap(), expr, "round trip of {text}");
    }
}
