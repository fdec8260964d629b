use crate::{
    ast::{Branch, Expr, FunctionDef, Statement},
    error::ParseError,
    interpreter::parser::{
        core::{ParseResult, parse_expression},
        grouping::lexify,
        statement::{parse_line, parse_return},
        structure::{Block, BlockKind, Node, SourceLine},
        utils::{is_identifier, split_at_word, split_head},
    },
};

/// Parses one structured node into a statement.
///
/// # Errors
/// `ParseError::Syntax` for a marker line (`} else {`) outside a
/// conditional, plus whatever the line and block parsers raise.
pub fn parse_node(node: &Node) -> ParseResult<Statement> {
    match node {
        Node::Line(line) => parse_line(line),
        Node::Block(block) => parse_block(block),
        Node::Marker(source) => Err(ParseError::syntax(source, "Unexpected '} ... {' line.")),
    }
}

/// Parses a sequence of nodes in order.
pub fn parse_body(nodes: &[Node]) -> ParseResult<Vec<Statement>> {
    nodes.iter().map(parse_node).collect()
}

/// Dispatches on the block kind chosen when the block was structured.
pub fn parse_block(block: &Block) -> ParseResult<Statement> {
    match block.kind {
        BlockKind::Loop => parse_loop(block),
        BlockKind::Conditional => parse_conditional(block),
        BlockKind::Function => parse_function(block),
    }
}

/// Parses a full expression from raw text, rejecting an empty one.
fn parse_required(text: &str, at: &SourceLine, what: &str) -> ParseResult<Expr> {
    match parse_expression(&lexify(text, at)?, at)? {
        Expr::Empty => Err(ParseError::syntax(at, format!("Missing {what}."))),
        expr => Ok(expr),
    }
}

/// Parses `loop with <var> from <start> to <stop>`.
///
/// The bounds are split at the first standalone `to` outside parentheses, so
/// either bound may be any expression.
fn parse_loop(block: &Block) -> ParseResult<Statement> {
    let header = &block.header;
    let words = header.words();
    if words.len() < 5 {
        return Err(ParseError::syntax(header, "Loop header cannot be parsed."));
    }
    if words[1] != "with" {
        return Err(ParseError::keyword(header, words[1]));
    }
    if words[3] != "from" {
        return Err(ParseError::keyword(header, words[3]));
    }
    if !is_identifier(words[2]) {
        return Err(ParseError::syntax(header, format!("Invalid loop variable '{}'.", words[2])));
    }

    let bounds = split_head(&header.text, 4).unwrap_or_default();
    let Some((start, stop)) = split_at_word(bounds, "to") else {
        return Err(missing_to(header, bounds));
    };

    Ok(Statement::Loop { var:   words[2].to_string(),
                         start: parse_required(start, header, "loop start")?,
                         stop:  parse_required(stop, header, "loop stop")?,
                         body:  parse_body(&block.body)?,
                         line:  header.number, })
}

/// The error for a loop header without a standalone `to`: a keyword error
/// naming the word after the start bound, which sits where `to` belongs.
fn missing_to(header: &SourceLine, bounds: &str) -> ParseError {
    let mut depth = 0usize;
    let end = bounds.char_indices()
                    .find(|&(_, ch)| {
                        match ch {
                            '(' => depth += 1,
                            ')' => depth = depth.saturating_sub(1),
                            _ => {},
                        }
                        depth == 0 && ch.is_whitespace()
                    })
                    .map_or(bounds.len(), |(index, _)| index);

    match bounds[end..].split_whitespace().next() {
        Some(found) => ParseError::keyword(header, found),
        None => ParseError::syntax(header, "Loop header cannot be parsed."),
    }
}

/// Parses the condition of an `if` or `else if` header.
///
/// A standalone top-level `is` makes an equality between the two sides;
/// anything else must be a boolean expression on its own.
fn parse_condition(text: &str, at: &SourceLine) -> ParseResult<Expr> {
    match split_at_word(text, "is") {
        Some((left, right)) => Ok(Expr::equality(parse_required(left, at, "left side of 'is'")?,
                                                 parse_required(right, at, "right side of 'is'")?)),
        None => parse_required(text, at, "condition"),
    }
}

/// What a `} ... {` marker inside a conditional asks for.
enum MarkerKind {
    ElseIf(Expr),
    Else,
}

fn parse_marker(marker: &SourceLine) -> ParseResult<MarkerKind> {
    let inner = marker.text
                      .split_once('}')
                      .and_then(|(_, rest)| rest.rsplit_once('{'))
                      .map(|(inner, _)| inner.trim())
                      .ok_or_else(|| ParseError::syntax(marker, "Malformed '} ... {' line."))?;

    let words: Vec<&str> = inner.split_whitespace().collect();
    match words.as_slice() {
        ["else"] => Ok(MarkerKind::Else),
        ["else", "if", ..] => {
            let condition = split_head(inner, 2).unwrap_or_default();
            Ok(MarkerKind::ElseIf(parse_condition(condition, marker)?))
        },
        ["else", other, ..] => Err(ParseError::keyword(marker, *other)),
        [other, ..] => Err(ParseError::keyword(marker, *other)),
        [] => Err(ParseError::keyword(marker, "}")),
    }
}

/// Parses an `if` block with its `else if` and `else` arms.
///
/// Markers split the children: each `} else if <cond> {` closes the current
/// arm and opens a new one, `} else {` switches to the else body, and no
/// marker may follow the else body.
fn parse_conditional(block: &Block) -> ParseResult<Statement> {
    let header = &block.header;
    let condition_text = split_head(&header.text, 1).unwrap_or_default();

    let mut branches = Vec::new();
    let mut condition = parse_condition(condition_text, header)?;
    let mut body = Vec::new();
    let mut orelse: Option<Vec<Statement>> = None;

    for node in &block.body {
        let Node::Marker(marker) = node else {
            let statement = parse_node(node)?;
            match orelse.as_mut() {
                Some(orelse) => orelse.push(statement),
                None => body.push(statement),
            }
            continue;
        };

        if orelse.is_some() {
            return Err(ParseError::syntax(marker, "Nothing may follow an 'else' body."));
        }

        let next_condition = match parse_marker(marker)? {
            MarkerKind::ElseIf(next_condition) => next_condition,
            MarkerKind::Else => {
                orelse = Some(Vec::new());
                Expr::Empty
            },
        };
        branches.push(Branch { condition: std::mem::replace(&mut condition, next_condition),
                               body:      std::mem::take(&mut body), });
    }

    if orelse.is_none() {
        branches.push(Branch { condition, body });
    }

    Ok(Statement::If { branches,
                       orelse: orelse.unwrap_or_default(),
                       line: header.number })
}

/// Parses `new function <name> takes (<params>)`.
///
/// A trailing `send back <expr>` line becomes the function's return
/// expression and is removed from the body.
fn parse_function(block: &Block) -> ParseResult<Statement> {
    let header = &block.header;
    let words = header.words();
    if words.len() < 5 {
        return Err(ParseError::syntax(header, "Function header cannot be parsed."));
    }
    if words[1] != "function" {
        return Err(ParseError::keyword(header, words[1]));
    }
    if words[3] != "takes" {
        return Err(ParseError::keyword(header, words[3]));
    }
    if !is_identifier(words[2]) {
        return Err(ParseError::syntax(header, format!("Invalid function name '{}'.", words[2])));
    }

    let params = parse_params(split_head(&header.text, 4).unwrap_or_default(), header)?;

    let (body_nodes, returns) = match block.body.split_last() {
        Some((Node::Line(last), rest)) if last.keyword() == "send" => (rest, parse_return(last)?),
        _ => (block.body.as_slice(), Expr::Empty),
    };

    Ok(Statement::Function(FunctionDef { name: words[2].to_string(),
                                         params,
                                         body: parse_body(body_nodes)?,
                                         returns,
                                         line: header.number }))
}

/// Reads `(a, b, c)` into parameter names.
fn parse_params(text: &str, at: &SourceLine) -> ParseResult<Vec<String>> {
    let Some(inner) = text.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) else {
        return Err(ParseError::syntax(at, "Parameters must be written as '(a, b)'."));
    };

    inner.split(',')
         .map(str::trim)
         .filter(|param| !param.is_empty())
         .map(|param| {
             if is_identifier(param) {
                 Ok(param.to_string())
             } else {
                 Err(ParseError::syntax(at, format!("Invalid parameter name '{param}'.")))
             }
         })
         .collect()
}
