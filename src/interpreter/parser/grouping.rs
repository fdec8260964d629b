use crate::{
    error::ParseError,
    interpreter::{
        lexer::{TokenTree, tokenize},
        parser::{
            core::ParseResult,
            precedence::{lexbool, pedmas},
            structure::SourceLine,
            utils::BOOLEAN_OPERATORS,
        },
    },
};

/// A stretch of text produced by [`identify_bracket_blocks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside any parentheses.
    Plain(&'a str),
    /// The contents of one outermost parenthesis pair, without the
    /// parentheses themselves.
    Bracketed(&'a str),
}

/// Splits text into plain stretches and outermost parenthesized stretches.
///
/// A depth counter tracks `(` and `)`; a pair is complete when the depth
/// returns to zero. Parentheses inside double quotes or inside a call's
/// `[...]` argument list are ordinary characters. Empty plain stretches are
/// dropped.
///
/// # Errors
/// `ParseError::Syntax` when a `)` has no opening partner or a `(` is never
/// closed.
///
/// # Example
/// ```
/// use ram::interpreter::parser::{
///     grouping::{Segment, identify_bracket_blocks},
///     structure::SourceLine,
/// };
///
/// let at = SourceLine::new("", 1);
/// let segments = identify_bracket_blocks("2 + (7 / (4 + 1) - 15) + (3 * 4)", &at).unwrap();
///
/// assert_eq!(segments,
///            vec![Segment::Plain("2 + "),
///                 Segment::Bracketed("7 / (4 + 1) - 15"),
///                 Segment::Plain(" + "),
///                 Segment::Bracketed("3 * 4")]);
/// ```
pub fn identify_bracket_blocks<'a>(text: &'a str, at: &SourceLine) -> ParseResult<Vec<Segment<'a>>> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut plain_from = 0usize;
    let mut in_quotes = false;
    let mut arguments_depth = 0usize;

    for (index, ch) in text.char_indices() {
        let counted = !in_quotes && arguments_depth == 0;
        match ch {
            '"' => in_quotes = !in_quotes,
            '[' if !in_quotes => arguments_depth += 1,
            ']' if !in_quotes => arguments_depth = arguments_depth.saturating_sub(1),
            '(' if counted => {
                if depth == 0 {
                    push_plain(&mut segments, &text[plain_from..index]);
                    start = index + 1;
                }
                depth += 1;
            },
            ')' if counted => {
                if depth == 0 {
                    return Err(ParseError::syntax(at, "Unmatched ')'."));
                }
                depth -= 1;
                if depth == 0 {
                    segments.push(Segment::Bracketed(&text[start..index]));
                    plain_from = index + 1;
                }
            },
            _ => {},
        }
    }

    if depth != 0 {
        return Err(ParseError::syntax(at, "Unmatched '('."));
    }
    push_plain(&mut segments, &text[plain_from..]);

    Ok(segments)
}

fn push_plain<'a>(segments: &mut Vec<Segment<'a>>, text: &'a str) {
    if !text.trim().is_empty() {
        segments.push(Segment::Plain(text));
    }
}

/// Turns a piece of Ram source into a nested, precedence-grouped token
/// sequence.
///
/// Plain stretches are tokenized, parenthesized stretches are lexified
/// recursively into groups, and the resulting level is restructured: a level
/// with `and`/`or` in an operator position goes through [`lexbool`], any other
/// level through [`pedmas`].
///
/// # Errors
/// `ParseError::Syntax` for unbalanced parentheses or text the tokenizer
/// rejects.
///
/// # Example
/// ```
/// use ram::interpreter::{
///     lexer::TokenTree::{self, Atom, Group},
///     parser::{grouping::lexify, structure::SourceLine},
/// };
///
/// fn atom(s: &str) -> TokenTree {
///     Atom(s.to_string())
/// }
///
/// let at = SourceLine::new("", 1);
/// assert_eq!(lexify("5 + (9 * 2) - 3", &at).unwrap(),
///            vec![atom("5"),
///                 atom("+"),
///                 Group(vec![atom("9"), atom("*"), atom("2")]),
///                 atom("-"),
///                 atom("3")]);
/// assert_eq!(lexify("", &at).unwrap(), vec![]);
/// ```
pub fn lexify(text: &str, at: &SourceLine) -> ParseResult<Vec<TokenTree>> {
    let mut level = Vec::new();

    for segment in identify_bracket_blocks(text, at)? {
        match segment {
            Segment::Plain(plain) => {
                let tokens = tokenize(plain).map_err(|bad| {
                                                ParseError::syntax(at,
                                                                   format!("Cannot read '{bad}'."))
                                            })?;
                level.extend(tokens.into_iter().map(TokenTree::Atom));
            },
            Segment::Bracketed(inner) => level.push(parenthesized(lexify(inner, at)?)),
        }
    }

    Ok(restructure(level))
}

/// Wraps a lexified parenthesized stretch as one group. When precedence
/// grouping already collapsed the whole stretch into a single operation,
/// that group stands for the parentheses.
fn parenthesized(mut tokens: Vec<TokenTree>) -> TokenTree {
    if let [TokenTree::Group(inner)] = tokens.as_mut_slice()
       && inner.len() > 1
    {
        return TokenTree::Group(std::mem::take(inner));
    }
    TokenTree::Group(tokens)
}

fn restructure(level: Vec<TokenTree>) -> Vec<TokenTree> {
    let boolean_chain = level.iter()
                             .skip(1)
                             .step_by(2)
                             .any(|token| token.is_one_of(BOOLEAN_OPERATORS));

    if boolean_chain { lexbool(level) } else { pedmas(level) }
}
