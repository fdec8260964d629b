use std::fmt;

use logos::Logos;

/// Represents a lexical token inside one bracket-free stretch of a Ram line.
///
/// Ram separates almost everything with whitespace, so most of the language
/// arrives here as a [`Token::Word`]. The lexer's real job is isolating the
/// arithmetic operator characters (so `7/(4+1)` and `7 / (4 + 1)` tokenize
/// alike) and keeping quoted strings and `name[...]` calls in one piece.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
pub enum Token {
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// A double-quoted string literal, quotes included.
    #[regex(r#""[^"]*""#, |lex| lex.slice().to_string(), allow_greedy = true)]
    Text(String),
    /// A function call with its argument list, such as `add[x=1,y=2]`.
    /// Argument lists may themselves contain calls.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*\[", lex_call)]
    Call(String),
    /// Identifiers, keywords, numbers and any other run of non-space
    /// characters.
    #[regex(r#"[^\s"+\-*/\[\]()]+"#, |lex| lex.slice().to_string(), allow_greedy = true)]
    Word(String),
    /// Whitespace.
    #[regex(r"[ \t\f\r\n]+", logos::skip)]
    Ignored,
}

impl Token {
    /// Returns the source text of this token.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Plus => "+".to_string(),
            Self::Minus => "-".to_string(),
            Self::Star => "*".to_string(),
            Self::Slash => "/".to_string(),
            Self::Text(s) | Self::Call(s) | Self::Word(s) => s,
            Self::Ignored => String::new(),
        }
    }
}

/// Consumes a call's argument list up to its matching `]`.
///
/// # Parameters
/// - `lex`: Lexer positioned just after the opening `[`.
///
/// # Returns
/// - `Some(String)`: The whole call, name and brackets included.
/// - `None`: If the brackets never balance.
fn lex_call(lex: &mut logos::Lexer<Token>) -> Option<String> {
    let mut depth = 1usize;
    let mut in_quotes = false;

    for (index, ch) in lex.remainder().char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '[' if !in_quotes => depth += 1,
            ']' if !in_quotes => {
                depth -= 1;
                if depth == 0 {
                    lex.bump(index + 1);
                    return Some(lex.slice().to_string());
                }
            },
            _ => {},
        }
    }

    None
}

/// A nested token sequence.
///
/// Parenthesized sub-expressions and the groups introduced by the precedence
/// passes become [`TokenTree::Group`]s; everything else is an
/// [`TokenTree::Atom`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenTree {
    /// A single token.
    Atom(String),
    /// A nested sequence.
    Group(Vec<Self>),
}

impl TokenTree {
    /// Returns the atom text, or `None` for groups.
    #[must_use]
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Self::Atom(s) => Some(s),
            Self::Group(_) => None,
        }
    }

    /// Whether this is an atom equal to one of `symbols`.
    #[must_use]
    pub fn is_one_of(&self, symbols: &[&str]) -> bool {
        self.as_atom().is_some_and(|atom| symbols.contains(&atom))
    }
}

impl fmt::Display for TokenTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(s) => write!(f, "{s}"),
            Self::Group(items) => {
                write!(f, "(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            },
        }
    }
}

/// Splits a bracket-free piece of text into token strings.
///
/// # Errors
/// Returns the unrecognized slice (an unterminated string, a stray `[` or `]`)
/// when the text cannot be tokenized.
///
/// # Example
/// ```
/// use ram::interpreter::lexer::tokenize;
///
/// assert_eq!(tokenize("7/4 +1").unwrap(), vec!["7", "/", "4", "+", "1"]);
/// assert_eq!(tokenize(r#""a b" or x"#).unwrap(), vec![r#""a b""#, "or", "x"]);
/// assert_eq!(tokenize("f[x=g[y=1]] * 2").unwrap(), vec!["f[x=g[y=1]]", "*", "2"]);
/// assert!(tokenize(r#""open"#).is_err());
/// ```
pub fn tokenize(text: &str) -> Result<Vec<String>, String> {
    let mut lexer = Token::lexer(text);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push(tok.into_text()),
            Err(()) => return Err(lexer.slice().to_string()),
        }
    }

    Ok(tokens)
}

/// Normalizes whitespace so every operator stands alone between single
/// spaces.
///
/// # Errors
/// Same as [`tokenize`].
///
/// # Example
/// ```
/// use ram::interpreter::lexer::format_whitespace;
///
/// assert_eq!(format_whitespace("7/4 +1-  15").unwrap(), "7 / 4 + 1 - 15");
/// ```
pub fn format_whitespace(text: &str) -> Result<String, String> {
    Ok(tokenize(text)?.join(" "))
}
