use std::fs::{self};

use ram::{error::Error, run_with_io};
use walkdir::WalkDir;

#[test]
fn program_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "ram"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                             panic!("Failed to read {expected_path:?}: {e}")
                                                         });
        let input_path = path.with_extension("in");
        let input = fs::read_to_string(&input_path).unwrap_or_default();

        count += 1;
        match run(&source, &input) {
            Ok(output) => assert_eq!(output, expected, "unexpected output from {path:?}"),
            Err(e) => panic!("Program {path:?} failed:\n{source}\nError: {e}"),
        }
    }

    assert!(count > 0, "No programs found in tests/programs");
}

fn run(src: &str, input: &str) -> Result<String, Error> {
    let mut output = Vec::new();
    run_with_io(src, input.as_bytes(), &mut output)?;
    Ok(String::from_utf8(output).expect("output is UTF-8"))
}

fn assert_success(src: &str) {
    if let Err(e) = run(src, "") {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if run(src, "").is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

fn assert_output(src: &str, expected: &str) {
    match run(src, "") {
        Ok(output) => assert_eq!(output, expected, "script:\n{src}"),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_output_with_input(src: &str, input: &str, expected: &str) {
    match run(src, input) {
        Ok(output) => assert_eq!(output, expected, "script:\n{src}"),
        Err(e) => panic!("Script failed: {e}"),
    }
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_output("set integer x to 1 + 2\ndisplay x", "3.0\n");
    assert_output("set integer x to 7 * 9\ndisplay x", "63.0\n");
    assert_output("set integer x to 8 - 5\ndisplay x", "3.0\n");
    assert_output("set integer x to 10 / 4\ndisplay x", "2.5\n");
    assert_output("set integer x to 1.5 + 1\ndisplay x", "2.5\n");
}

#[test]
fn precedence_and_parentheses() {
    assert_output("display 4 + 2 * 7 - 1", "17.0\n");
    assert_output("display (4 + 2) * (7 - 1)", "36.0\n");
    assert_output("display 10 - 4 - 3", "3.0\n");
    assert_output("display 8 / 4 / 2", "1.0\n");
    assert_output("display 2 + (7 / (4 + 1) - 15) + (3 * 4)", "0.40000000000000036\n");
}

#[test]
fn reset_overwrites() {
    assert_output("set integer x to 1\nreset integer x to x + 1\ndisplay x", "2.0\n");
    assert_output("set integer x to 1\nreset text x to \"one\"\ndisplay x", "one\n");
}

#[test]
fn display_formats() {
    assert_output("display \"Hello, (world) + 1!\"", "Hello, (world) + 1!\n");
    assert_output("display true", "True\n");
    assert_output("display 1 is 1.0", "True\n");
    assert_output("display \"a\" is \"b\"", "False\n");
    assert_output("display 100000000 * 100000000", "1e+16\n");
    assert_output("display 1 / 100000", "1e-05\n");
    assert_output("display 0 - 3 / 20000000", "-1.5e-07\n");
}

#[test]
fn boolean_chains() {
    assert_output("display true and false or true", "True\n");
    assert_output("display true or false and false", "False\n");
    assert_output("display (1 is 1) and (2 is 2)", "True\n");
    assert_failure("display 1 and true");
}

#[test]
fn typed_assignment_is_enforced() {
    assert_success("set text name to \"Ram\"");
    assert_success("set boolean flag to 1 is 1");
    assert_failure("set integer x to \"five\"");
    assert_failure("set boolean flag to 3");
    assert_failure("set text name to 3");
}

#[test]
fn loops() {
    assert_output("loop with i from 1 to 3 {\n    display i\n}", "1\n2\n3\n");
    assert_output("loop with i from 3 to 1 {\n    display i\n}\ndisplay 0", "0.0\n");
    assert_output("loop with i from 1.9 to 2.9 {\n    display i\n}", "1\n2\n");
    assert_output("set integer total to 0\n\
                   loop with i from 1 to 4 {\n\
                   reset integer total to total + i\n\
                   }\n\
                   display total\n\
                   display i",
                  "10.0\n4\n");
    assert_failure("loop with i from \"a\" to 3 {\ndisplay i\n}");
}

#[test]
fn conditionals() {
    let src = "set integer x to 2\n\
               if x is 1 {\n\
                   display \"one\"\n\
               } else if x is 2 {\n\
                   display \"two\"\n\
               } else {\n\
                   display \"many\"\n\
               }";
    assert_output(src, "two\n");
    assert_output("if (1 is 2) or (3 is 3) {\ndisplay 1\n}", "1.0\n");
    assert_output("if false {\ndisplay 1\n} else {\ndisplay 2\n}", "2.0\n");
    assert_failure("if 3 {\ndisplay 1\n}");
}

#[test]
fn functions_and_isolation() {
    let src = "new function add takes (x, y) {\n\
                   set integer z to x + y\n\
                   send back z\n\
               }\n\
               display add[x=10,y=5]";
    assert_output(src, "15.0\n");

    let leak = "new function add takes (x, y) {\n\
                    set integer z to x + y\n\
                    send back z\n\
                }\n\
                call add[x=1,y=2]\n\
                display z";
    assert_failure(leak);

    let outer = "set integer a to 3\n\
                 new function f takes () {\n\
                     send back a\n\
                 }\n\
                 display f[]";
    assert_failure(outer);
}

#[test]
fn functions_call_functions() {
    let src = "new function double takes (n) {\n\
                   send back n * 2\n\
               }\n\
               new function quad takes (n) {\n\
                   send back double[n=double[n=n]]\n\
               }\n\
               display quad[n=3]";
    assert_output(src, "12.0\n");
}

#[test]
fn function_without_return_yields_none() {
    let src = "new function greet takes (who) {\n\
                   display who\n\
               }\n\
               display greet[who=\"Ram\"]";
    assert_output(src, "Ram\nNone\n");
}

#[test]
fn function_argument_errors() {
    let def = "new function f takes (x) {\nsend back x\n}\n";
    assert_failure(&format!("{def}display f[y=1]"));
    assert_failure(&format!("{def}display f[]"));
    assert_failure("set integer f to 1\ndisplay f[x=1]");
    assert_failure("display nothing[x=1]");
}

#[test]
fn builtins() {
    assert_output("display CONVERT_NUMBER[value=\"42\"] + 1", "43.0\n");
    assert_failure("display CONVERT_NUMBER[value=\"forty\"]");
    assert_output_with_input("set text name to GET_TEXT[prompt=\"Name: \"]\ndisplay name",
                             "Ada\n",
                             "Name: Ada\n");
    assert_output_with_input("set integer x to 4\nset integer y to GET_INPUT\ndisplay y",
                             "x * 2\n",
                             "8.0\n");
}

#[test]
fn runtime_errors() {
    assert_failure("display y");
    assert_failure("display 1 / 0");
    assert_failure("display \"a\" + 1");
    assert_failure("set integer x to GET_INPUT");
}

#[test]
fn parse_errors() {
    assert_failure("display");
    assert_failure("set integer x 5");
    assert_failure("set number x to 5");
    assert_failure("set integer x to (1 + 2");
    assert_failure("print 5");
    assert_failure("loop with i from 1 to 3 {\ndisplay i");
    assert_failure("display 1\n}");
    assert_failure("display 1 2");
}

#[test]
fn errors_name_the_line() {
    let err = run("display 1\n\nset integer x to y", "").unwrap_err();
    assert!(err.to_string().contains("line 3"), "{err}");

    let err = run("set integer x to 1 +", "").unwrap_err();
    assert!(err.to_string().contains("'set integer x to 1 +'"), "{err}");
}

#[test]
fn quoted_braces_in_block_headers() {
    let src = "set text name to \"{\"\n\
               if name is \"{\" {\n\
                   display \"brace\"\n\
               }";
    assert_output(src, "brace\n");
    assert_output("loop with i from 1 to 1 {\ndisplay \"}{\"\n}", "}{\n");
}

#[test]
fn parse_errors_prevent_any_output() {
    let mut output = Vec::new();
    let result = run_with_io("display 1\ndisplay (", &b""[..], &mut output);
    assert!(result.is_err());
    assert!(output.is_empty());
}
