/// Core evaluation logic for expressions and statements.
///
/// Contains the `Context` (I/O streams), expression and statement dispatch,
/// and the `Module` entry points.
pub mod core;

/// Arithmetic and boolean operator evaluation.
pub mod binary;

/// Conditional evaluation.
pub mod conditional;

/// Function calls and builtins.
///
/// Implements named-argument calls into user functions and the builtin table.
pub mod function;

/// `GET_INPUT`: reading and evaluating an expression from the input stream.
pub mod input;

/// Loop evaluation.
///
/// Evaluates the bounds once, truncates them and binds the loop variable
/// for each iteration.
pub mod loops;
