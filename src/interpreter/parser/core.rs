use crate::{
    ast::{ArithmeticOperator, BooleanOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::TokenTree,
        parser::{
            grouping::lexify,
            structure::SourceLine,
            utils::{OPERATORS, PRECEDENCE_TIERS, is_identifier, quoted_literal, verify_keywords},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a nested token sequence into an expression.
///
/// This is the entry point for expression parsing. The sequence is expected
/// to come out of [`lexify`], so parentheses are already nested groups and
/// multiplication and division are already grouped.
///
/// - An empty sequence is [`Expr::Empty`].
/// - A single atom is a literal, a call, `GET_INPUT` or a name.
/// - A single group is parsed as its contents.
/// - Longer sequences are split at the loosest operator present (`is`, then
///   `and`/`or`, then `+`/`-`, then `*`/`/`), rightmost occurrence first, so
///   chains group left to right.
///
/// # Parameters
/// - `tokens`: The token sequence.
/// - `at`: Source line used in error messages.
///
/// # Errors
/// - `ParseError::Operator` when an operator position holds a non-operator,
///   or for `not`, which has no binary meaning.
/// - `ParseError::Syntax` for operators in operand positions, a trailing
///   operator, or an atom that is not a valid value.
///
/// # Example
/// ```
/// use ram::{
///     ast::{ArithmeticOperator, Expr},
///     interpreter::parser::{core::parse_expression, grouping::lexify, structure::SourceLine},
/// };
///
/// let at = SourceLine::new("", 1);
/// let tokens = lexify("5 + 6 - 2", &at).unwrap();
///
/// assert_eq!(parse_expression(&tokens, &at).unwrap(),
///            Expr::binary(Expr::binary(Expr::Number(5.0), ArithmeticOperator::Add, Expr::Number(6.0)),
///                         ArithmeticOperator::Subtract,
///                         Expr::Number(2.0)));
/// ```
pub fn parse_expression(tokens: &[TokenTree], at: &SourceLine) -> ParseResult<Expr> {
    match tokens {
        [] => Ok(Expr::Empty),
        [TokenTree::Group(inner)] => parse_expression(inner, at),
        [TokenTree::Atom(atom)] => parse_atom(atom, at),
        _ => parse_operation(tokens, at),
    }
}

fn parse_operation(tokens: &[TokenTree], at: &SourceLine) -> ParseResult<Expr> {
    verify_keywords(tokens, at)?;

    if let Some(operand) = tokens.iter().step_by(2).find(|token| token.is_one_of(OPERATORS)) {
        return Err(ParseError::syntax(at, format!("Expected a value, found '{operand}'.")));
    }
    if tokens.len() % 2 == 0 {
        return Err(ParseError::syntax(at, "Expression ends with an operator."));
    }

    let Some(index) = PRECEDENCE_TIERS.iter().find_map(|tier| {
                                                 (1..tokens.len()).step_by(2)
                                                                  .rev()
                                                                  .find(|&i| {
                                                                      tokens[i].is_one_of(tier)
                                                                  })
                                             })
    else {
        return Err(ParseError::operator(at, "not"));
    };

    let left = parse_expression(&tokens[..index], at)?;
    let right = parse_expression(&tokens[index + 1..], at)?;
    let operator = tokens[index].as_atom().unwrap_or_default();

    if let Some(op) = ArithmeticOperator::from_symbol(operator) {
        return Ok(Expr::binary(left, op, right));
    }
    if let Some(op) = BooleanOperator::from_keyword(operator) {
        return Ok(Expr::boolean(op, left, right));
    }
    if operator == "is" {
        return Ok(Expr::equality(left, right));
    }

    Err(ParseError::operator(at, operator))
}

/// Classifies a single atom.
fn parse_atom(atom: &str, at: &SourceLine) -> ParseResult<Expr> {
    if is_numeric_literal(atom) {
        return Ok(Expr::Number(atom.parse::<f64>()?));
    }

    match atom {
        "true" => return Ok(Expr::Bool(true)),
        "false" => return Ok(Expr::Bool(false)),
        "GET_INPUT" => return Ok(Expr::Input),
        _ => {},
    }

    if let Some(text) = quoted_literal(atom) {
        return Ok(Expr::Text(text.to_string()));
    }
    if let Some((name, rest)) = atom.split_once('[')
       && let Some(arguments) = rest.strip_suffix(']')
    {
        return parse_call(name, arguments, at);
    }
    if is_identifier(atom) && !OPERATORS.contains(&atom) {
        return Ok(Expr::Name(atom.to_string()));
    }

    Err(ParseError::syntax(at, format!("Cannot parse '{atom}'.")))
}

/// Digits, optionally followed by a decimal point and more digits.
fn is_numeric_literal(atom: &str) -> bool {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match atom.split_once('.') {
        Some((whole, fraction)) => all_digits(whole) && all_digits(fraction),
        None => all_digits(atom),
    }
}

/// Parses `name[a=expr,b=expr]`; `arguments` is the text between the
/// brackets.
fn parse_call(name: &str, arguments: &str, at: &SourceLine) -> ParseResult<Expr> {
    if !is_identifier(name) {
        return Err(ParseError::syntax(at, format!("Invalid function name '{name}'.")));
    }

    let arguments = split_arguments(arguments).into_iter()
                                              .map(|argument| parse_argument(argument, at))
                                              .collect::<ParseResult<Vec<_>>>()?;

    Ok(Expr::Call { name: name.to_string(),
                    arguments })
}

fn parse_argument(argument: &str, at: &SourceLine) -> ParseResult<(String, Expr)> {
    let Some((name, value)) = argument.split_once('=') else {
        return Err(ParseError::syntax(at, format!("Argument '{argument}' needs a name.")));
    };
    let name = name.trim();
    if !is_identifier(name) {
        return Err(ParseError::syntax(at, format!("Invalid argument name '{name}'.")));
    }

    let value = parse_expression(&lexify(value, at)?, at)?;
    if value == Expr::Empty {
        return Err(ParseError::syntax(at, format!("Argument '{name}' has no value.")));
    }

    Ok((name.to_string(), value))
}

/// Splits an argument list on commas outside quotes, parentheses and nested
/// argument lists, dropping empty pieces.
fn split_arguments(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut start = 0;

    for (index, ch) in text.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '(' | '[' if !in_quotes => depth += 1,
            ')' | ']' if !in_quotes => depth = depth.saturating_sub(1),
            ',' if !in_quotes && depth == 0 => {
                pieces.push(&text[start..index]);
                start = index + 1;
            },
            _ => {},
        }
    }
    pieces.push(&text[start..]);

    pieces.into_iter().map(str::trim).filter(|piece| !piece.is_empty()).collect()
}
