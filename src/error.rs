use thiserror::Error;

/// Parsing errors.
///
/// Defines all error types that can occur while grouping tokens, structuring
/// blocks and building the syntax tree. Parse errors are raised before any
/// statement runs.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: unbound
/// names, operator type mismatches, failed conversions and I/O failures.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure produced while running a Ram program end to end.
#[derive(Debug, Error)]
pub enum Error {
    /// The program could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The program failed while running.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
