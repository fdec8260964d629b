use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// One trimmed, non-blank line of Ram source with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// The line text, trimmed.
    pub text:   String,
    /// 1-based line number in the source file.
    pub number: usize,
}

impl SourceLine {
    /// Creates a source line.
    pub fn new(text: impl Into<String>, number: usize) -> Self {
        Self { text: text.into(),
               number }
    }

    /// Byte index of the first `character` outside double-quoted text.
    #[must_use]
    pub fn find_unquoted(&self, character: char) -> Option<usize> {
        let mut in_quotes = false;
        self.text
            .char_indices()
            .find(|&(_, ch)| {
                if ch == '"' {
                    in_quotes = !in_quotes;
                }
                ch == character && !in_quotes
            })
            .map(|(index, _)| index)
    }

    /// Whether the line holds `character` outside double-quoted text.
    #[must_use]
    pub fn contains_unquoted(&self, character: char) -> bool {
        self.find_unquoted(character).is_some()
    }

    /// The whitespace-separated words of the line.
    #[must_use]
    pub fn words(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }
}

/// A simple statement line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Where the line came from.
    pub source: SourceLine,
    /// Whitespace-separated words.
    pub words:  Vec<String>,
}

impl Line {
    /// Wraps a source line, splitting it into words.
    ///
    /// # Errors
    /// `ParseError::Syntax` when the line has fewer than two words; no Ram
    /// statement is that short.
    pub fn new(source: SourceLine) -> ParseResult<Self> {
        let words: Vec<String> = source.words().into_iter().map(str::to_string).collect();
        if words.len() < 2 {
            return Err(ParseError::syntax(&source, "Error parsing."));
        }

        Ok(Self { source, words })
    }

    /// The leading keyword.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.words[0]
    }
}

/// Which construct a block header opens.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// `loop with ...`
    Loop,
    /// `if ...`
    Conditional,
    /// `new function ...`
    Function,
}

impl BlockKind {
    /// Selects the block kind from a header's first word.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "loop" => Some(Self::Loop),
            "if" => Some(Self::Conditional),
            "new" => Some(Self::Function),
            _ => None,
        }
    }
}

/// A braced block: its header up to the opening brace and its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The header, truncated at its first `{` outside quotes and trimmed.
    pub header:    SourceLine,
    /// The construct this block opens.
    pub kind:      BlockKind,
    /// Child nodes in source order.
    pub body:      Vec<Node>,
    /// Line number of the closing `}`.
    pub closed_at: usize,
}

impl Block {
    /// Builds a block from the line that opens it.
    ///
    /// # Errors
    /// - `ParseError::BlockConstruction` when the line has no `{` or nothing
    ///   before it.
    /// - `ParseError::Keyword` when the header does not start with `loop`,
    ///   `if` or `new`.
    pub fn new(opening: &SourceLine, body: Vec<Node>, closed_at: usize) -> ParseResult<Self> {
        let Some(brace) = opening.find_unquoted('{') else {
            return Err(ParseError::BlockConstruction { line:    opening.number,
                                                       message: "no opening brace".to_string(), });
        };
        let header = SourceLine::new(opening.text[..brace].trim(), opening.number);

        let Some(&keyword) = header.words().first() else {
            return Err(ParseError::BlockConstruction { line:    opening.number,
                                                       message: "empty header".to_string(), });
        };
        let kind = BlockKind::from_keyword(keyword).ok_or_else(|| {
                                                       ParseError::keyword(&header, keyword)
                                                   })?;

        Ok(Self { header,
                  kind,
                  body,
                  closed_at })
    }
}

/// A node of the structured program tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A statement line.
    Line(Line),
    /// A nested block.
    Block(Block),
    /// A line holding both braces, such as `} else {`. Only meaningful
    /// inside a conditional body.
    Marker(SourceLine),
}

/// What one level of [`collect`] produced.
struct Collected<'a> {
    nodes:  Vec<Node>,
    rest:   &'a [SourceLine],
    /// Line number of the `}` that ended this level, if any.
    closer: Option<usize>,
}

/// Structures a program's lines into a tree of blocks and lines by brace
/// matching.
///
/// Each pair is a line's text and its 1-based line number. Lines are trimmed
/// and blank lines dropped; the supplied numbers are kept so errors point at
/// the source file.
///
/// # Errors
/// - `ParseError::Syntax` for a `}` with no open block, a block that is
///   never closed, or a statement line with fewer than two words.
/// - Whatever [`Block::new`] raises for a malformed header.
///
/// # Example
/// ```
/// use ram::interpreter::parser::structure::{Node, process_ram};
///
/// let lines: Vec<(String, usize)> = ["loop with i from 1 to 3 {", "display i", "}", "display 1"]
///     .iter()
///     .enumerate()
///     .map(|(i, s)| (s.to_string(), i + 1))
///     .collect();
///
/// let nodes = process_ram(&lines).unwrap();
/// assert_eq!(nodes.len(), 2);
/// assert!(matches!(&nodes[0], Node::Block(block) if block.body.len() == 1 && block.closed_at == 3));
/// assert!(matches!(&nodes[1], Node::Line(_)));
/// ```
pub fn process_ram(lines: &[(String, usize)]) -> ParseResult<Vec<Node>> {
    let lines: Vec<SourceLine> = lines.iter()
                                      .map(|(text, number)| SourceLine::new(text.trim(), *number))
                                      .filter(|line| !line.text.is_empty())
                                      .collect();

    let collected = collect(&lines)?;
    if let Some(line) = collected.closer {
        let stray = lines.iter()
                         .find(|source| source.number == line)
                         .cloned()
                         .unwrap_or_else(|| SourceLine::new("}", line));
        return Err(ParseError::syntax(&stray, "Unexpected '}' with no open block."));
    }

    Ok(collected.nodes)
}

/// Collects nodes until the lines run out or a lone `}` closes this level.
fn collect(mut lines: &[SourceLine]) -> ParseResult<Collected<'_>> {
    let mut nodes = Vec::new();

    while let Some((line, rest)) = lines.split_first() {
        lines = rest;
        let opens = line.contains_unquoted('{');
        let closes = line.contains_unquoted('}');

        match (opens, closes) {
            (true, true) => nodes.push(Node::Marker(line.clone())),
            (true, false) => {
                let inner = collect(lines)?;
                let Some(closed_at) = inner.closer else {
                    return Err(ParseError::syntax(line, "Block is never closed."));
                };
                nodes.push(Node::Block(Block::new(line, inner.nodes, closed_at)?));
                lines = inner.rest;
            },
            (false, true) => {
                if line.text != "}" {
                    return Err(ParseError::syntax(line, "'}' must stand on its own line."));
                }
                return Ok(Collected { nodes,
                                      rest: lines,
                                      closer: Some(line.number) });
            },
            (false, false) => nodes.push(Node::Line(Line::new(line.clone())?)),
        }
    }

    Ok(Collected { nodes,
                   rest: lines,
                   closer: None })
}
