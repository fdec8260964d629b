use crate::{
    error::ParseError,
    interpreter::{
        lexer::TokenTree,
        parser::{core::ParseResult, structure::SourceLine},
    },
};

/// Every token allowed in an operator position.
pub const OPERATORS: &[&str] = &["+", "-", "*", "/", "not", "or", "and", "is"];
/// Operators grouped by `pedmas`.
pub const MULTIPLICATIVE_OPERATORS: &[&str] = &["*", "/"];
/// Operators folded left to right after the multiplicative pass.
pub const ADDITIVE_OPERATORS: &[&str] = &["+", "-"];
/// Connectives grouped by `lexbool`.
pub const BOOLEAN_OPERATORS: &[&str] = &["and", "or"];
/// The equality operator.
pub const EQUALITY_OPERATORS: &[&str] = &["is"];

/// Operator tiers from loosest to tightest binding.
pub const PRECEDENCE_TIERS: &[&[&str]] =
    &[EQUALITY_OPERATORS, BOOLEAN_OPERATORS, ADDITIVE_OPERATORS, MULTIPLICATIVE_OPERATORS];

/// Checks that every odd-indexed token of a multi-token sequence is an
/// operator.
///
/// # Errors
/// `ParseError::Operator` naming the first token that is not one.
pub(in crate::interpreter::parser) fn verify_keywords(tokens: &[TokenTree],
                                                      at: &SourceLine)
                                                      -> ParseResult<()> {
    match tokens.iter().skip(1).step_by(2).find(|token| !token.is_one_of(OPERATORS)) {
        Some(offender) => Err(ParseError::operator(at, offender.to_string())),
        None => Ok(()),
    }
}

/// Returns the text after the first `count` words, or `None` when the text
/// is shorter.
pub(in crate::interpreter::parser) fn split_head(text: &str, count: usize) -> Option<&str> {
    let mut rest = text.trim_start();
    for _ in 0..count {
        let end = rest.find(char::is_whitespace)?;
        rest = rest[end..].trim_start();
    }
    Some(rest)
}

/// Splits text at the first standalone `word` outside parentheses and
/// quotes.
pub(in crate::interpreter::parser) fn split_at_word<'a>(text: &'a str,
                                                        word: &str)
                                                        -> Option<(&'a str, &'a str)> {
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut previous_is_space = true;

    for (index, ch) in text.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => depth = depth.saturating_sub(1),
            _ => {},
        }

        if depth == 0 && !in_quotes && previous_is_space && text[index..].starts_with(word) {
            let after = &text[index + word.len()..];
            if after.is_empty() || after.starts_with(char::is_whitespace) {
                return Some((text[..index].trim(), after.trim()));
            }
        }
        previous_is_space = ch.is_whitespace();
    }

    None
}

/// Returns the contents of `text` when the whole of it is one double-quoted
/// literal.
pub(in crate::interpreter::parser) fn quoted_literal(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    (!inner.contains('"')).then_some(inner)
}

/// Whether `text` is a valid Ram identifier.
pub(in crate::interpreter::parser) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
