//! # ram
//!
//! ram is an interpreter for Ram, a small line-oriented scripting language.
//! It structures source lines into blocks by brace matching, parses them into
//! a syntax tree with operator precedence, and evaluates the tree with typed
//! variables, loops, conditionals and named-argument functions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{BufRead, Write};

use crate::{
    ast::Module,
    error::Error,
    interpreter::{
        evaluator::core::Context,
        parser::parse_module,
        value::environment::Environment,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and the `Module`
/// root that represent a Ram program as a tree. The AST is built by the
/// parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source line numbers to statements for error reporting.
/// - Renders expressions back to Ram source text.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while structuring,
/// parsing or evaluating a program. Every error names the source line it
/// came from.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator).
/// - Attaches line numbers and the offending text for context.
/// - Wraps both phases in one crate-level `Error`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, structuring, parsing, evaluation and
/// value representations to provide a complete runtime for Ram programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion and number formatting.
///
/// # Responsibilities
/// - Safely convert between `i64` and `f64` without silent data loss.
/// - Render numbers the way Ram displays them.
pub mod util;

/// Splits source text into `(line text, 1-based line number)` pairs.
///
/// # Example
/// ```
/// use ram::source_lines;
///
/// let lines = source_lines("display 1\n\ndisplay 2");
/// assert_eq!(lines[2], ("display 2".to_string(), 3));
/// ```
#[must_use]
pub fn source_lines(source: &str) -> Vec<(String, usize)> {
    source.lines().zip(1..).map(|(text, number)| (text.to_string(), number)).collect()
}

/// Parses a whole program from source text.
///
/// # Errors
/// Returns the first `ParseError` encountered.
pub fn parse_source(source: &str) -> Result<Module, error::ParseError> {
    parse_module(&source_lines(source))
}

/// Parses and runs a program against stdin and stdout.
///
/// # Errors
/// Returns an error if parsing or evaluation fails. Nothing runs when the
/// program does not parse.
///
/// # Examples
/// ```
/// use ram::run_source;
///
/// // Assignments only: nothing is printed and no error should occur.
/// assert!(run_source("set integer result to 2 + 2").is_ok());
///
/// // 'x' is not defined.
/// assert!(run_source("set integer y to x + 1").is_err());
/// ```
pub fn run_source(source: &str) -> Result<Environment, Error> {
    let module = parse_source(source)?;
    Ok(module.evaluate()?)
}

/// Parses and runs a program with the given input and output streams.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use ram::run_with_io;
///
/// let mut output = Vec::new();
/// run_with_io("loop with i from 1 to 3 {\n display i\n}", &b""[..], &mut output).unwrap();
///
/// assert_eq!(String::from_utf8(output).unwrap(), "1\n2\n3\n");
/// ```
pub fn run_with_io(source: &str, input: impl BufRead, output: impl Write) -> Result<Environment, Error> {
    let module = parse_source(source)?;
    let mut context = Context::new(input, output);
    Ok(module.evaluate_in(&mut context, Environment::with_builtins())?)
}
