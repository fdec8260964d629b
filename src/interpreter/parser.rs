use tracing::debug;

use crate::{
    ast::Module,
    interpreter::parser::{block::parse_body, core::ParseResult, structure::process_ram},
};

/// Block and conditional parsing.
///
/// Turns structured blocks into loop, conditional and function statements,
/// including the `else if` / `else` marker handling.
pub mod block;
/// Core expression parsing logic.
///
/// Contains the expression entry point and the classification of single
/// atoms into literals, names and calls.
pub mod core;
/// Bracket grouping and `lexify`.
pub mod grouping;
/// Precedence restructuring (`pedmas`, `lexbool`).
pub mod precedence;
/// Statement line parsing.
///
/// Handles `set`/`reset`, `display`, `call` and `send back`.
pub mod statement;
/// Brace matching: flat source lines to a tree of blocks and lines.
pub mod structure;
/// Parsing utility functions.
///
/// Operator tables and small text helpers shared by the parser modules.
pub mod utils;

/// Parses a whole Ram program.
///
/// Each pair is one line of source text and its 1-based line number. The
/// lines are structured by brace matching and every top-level node is parsed
/// into a statement.
///
/// # Errors
/// The first `ParseError` encountered; nothing is evaluated.
///
/// # Example
/// ```
/// use ram::interpreter::parser::parse_module;
///
/// let lines = vec![("set integer x to 2 * 3".to_string(), 1),
///                  ("display x".to_string(), 2)];
/// let module = parse_module(&lines).unwrap();
///
/// assert_eq!(module.body.len(), 2);
/// ```
#[tracing::instrument(skip_all, fields(lines = lines.len()))]
pub fn parse_module(lines: &[(String, usize)]) -> ParseResult<Module> {
    let nodes = process_ram(lines)?;
    debug!(nodes = nodes.len(), "structured source");

    let body = parse_body(&nodes)?;
    debug!(statements = body.len(), "parsed module");

    Ok(Module::new(body))
}
