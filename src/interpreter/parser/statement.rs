use crate::{
    ast::{Expr, Statement, VarType},
    error::ParseError,
    interpreter::parser::{
        core::{ParseResult, parse_expression},
        grouping::lexify,
        structure::{Line, SourceLine},
        utils::{quoted_literal, split_head},
    },
};

/// Parses a single statement line.
///
/// The leading keyword selects the statement:
/// - `set` / `reset`: typed assignment.
/// - `display`: print a value.
/// - `call`: evaluate a call for its effects.
/// - `send back`: return statement.
///
/// # Errors
/// `ParseError::Keyword` for any other leading keyword, plus whatever the
/// individual statement parsers raise.
pub fn parse_line(line: &Line) -> ParseResult<Statement> {
    match line.keyword() {
        "set" | "reset" => parse_assignment(line),
        "display" => parse_display(line),
        "call" => parse_call_statement(line),
        "send" => Ok(Statement::Return { value: parse_return(line)?,
                                         line:  line.source.number, }),
        other => Err(ParseError::keyword(&line.source, other)),
    }
}

/// Parses `set <type> <name> to <expr>`.
///
/// A remainder that is exactly one quoted string is taken verbatim, so
/// strings may contain characters the expression grammar would reject.
fn parse_assignment(line: &Line) -> ParseResult<Statement> {
    let source = &line.source;
    if line.words.len() < 5 {
        return Err(ParseError::syntax(source, "Assignment needs a type, a name, 'to' and a value."));
    }

    let ty = VarType::from_keyword(&line.words[1]).ok_or_else(|| {
                                                      ParseError::keyword(source, &line.words[1])
                                                  })?;
    if line.words[3] != "to" {
        return Err(ParseError::keyword(source, &line.words[3]));
    }

    let value = parse_remainder(source, 4)?;

    Ok(Statement::Assign { target: line.words[2].clone(),
                           ty,
                           value,
                           line: source.number })
}

fn parse_display(line: &Line) -> ParseResult<Statement> {
    Ok(Statement::Display { argument: parse_remainder(&line.source, 1)?,
                            line:     line.source.number, })
}

fn parse_call_statement(line: &Line) -> ParseResult<Statement> {
    let expr = parse_remainder(&line.source, 1)?;
    if !matches!(expr, Expr::Call { .. }) {
        return Err(ParseError::syntax(&line.source, "'call' must be followed by a function call."));
    }

    Ok(Statement::Call { expr,
                         line: line.source.number })
}

/// Parses the expression of a `send back <expr>` line.
///
/// # Errors
/// - `ParseError::Keyword` when the line does not start with `send back`.
/// - `ParseError::Syntax` when nothing follows `send back`.
pub fn parse_return(line: &Line) -> ParseResult<Expr> {
    let source = &line.source;
    if line.words[0] != "send" {
        return Err(ParseError::keyword(source, &line.words[0]));
    }
    if line.words[1] != "back" {
        return Err(ParseError::keyword(source, &line.words[1]));
    }

    match parse_remainder(source, 2)? {
        Expr::Empty => Err(ParseError::syntax(source, "Nothing to send back.")),
        value => Ok(value),
    }
}

/// Parses everything after the first `skip` words as one expression.
fn parse_remainder(source: &SourceLine, skip: usize) -> ParseResult<Expr> {
    let rest = split_head(&source.text, skip).unwrap_or_default();
    if let Some(text) = quoted_literal(rest) {
        return Ok(Expr::Text(text.to_string()));
    }

    parse_expression(&lexify(rest, source)?, source)
}
