use thiserror::Error;

use crate::interpreter::parser::structure::SourceLine;

/// Represents all errors that can occur while structuring or parsing a Ram
/// program.
///
/// Every variant that can be traced back to a concrete source line carries the
/// 1-based line number, and the syntax-level variants also quote the line text
/// so the message can show the user what was rejected.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A line or header is malformed: wrong token count, unbalanced brackets,
    /// an unterminated string, a stray closing brace and so on.
    #[error("Error on line {line}: '{text}'\n     {message}")]
    Syntax {
        /// The offending line.
        text:    String,
        /// The source line where the error occurred.
        line:    usize,
        /// What went wrong.
        message: String,
    },
    /// A required keyword (`to`, `with`, `from`, `takes`, `else`, ...) was not
    /// found where it had to be.
    #[error("Error on line {line}: '{text}'\n     Keyword '{keyword}' invalid.")]
    Keyword {
        /// The offending line.
        text:    String,
        /// The source line where the error occurred.
        line:    usize,
        /// The token found in place of the keyword.
        keyword: String,
    },
    /// An operator position held a token that is not a recognized operator.
    #[error("Error on line {line}: '{text}'\n     Operator '{operator}' invalid.")]
    Operator {
        /// The offending line.
        text:     String,
        /// The source line where the error occurred.
        line:     usize,
        /// The token found in the operator position.
        operator: String,
    },
    /// A block was requested without the pieces needed to build it.
    #[error("Error on line {line}: Block could not be constructed: {message}")]
    BlockConstruction {
        /// The source line of the block header.
        line:    usize,
        /// What was missing.
        message: String,
    },
    /// Any other failure raised while parsing.
    #[error("Error: {message}")]
    General {
        /// Description of the underlying cause.
        message: String,
    },
}

impl ParseError {
    /// Builds a [`ParseError::Syntax`] for the given source line.
    pub fn syntax(source: &SourceLine, message: impl Into<String>) -> Self {
        Self::Syntax { text:    source.text.clone(),
                       line:    source.number,
                       message: message.into(), }
    }

    /// Builds a [`ParseError::Keyword`] naming the token found instead of the
    /// expected keyword.
    pub fn keyword(source: &SourceLine, keyword: impl Into<String>) -> Self {
        Self::Keyword { text:    source.text.clone(),
                        line:    source.number,
                        keyword: keyword.into(), }
    }

    /// Builds a [`ParseError::Operator`] naming the rejected operator token.
    pub fn operator(source: &SourceLine, operator: impl Into<String>) -> Self {
        Self::Operator { text:     source.text.clone(),
                         line:     source.number,
                         operator: operator.into(), }
    }
}

impl From<std::num::ParseFloatError> for ParseError {
    fn from(error: std::num::ParseFloatError) -> Self {
        Self::General { message: error.to_string() }
    }
}
