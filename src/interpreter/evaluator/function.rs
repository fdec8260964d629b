/// Built-in function implementations.
///
/// Contains the builtin table seeded into every module environment:
/// `CONVERT_NUMBER` and `GET_TEXT`.
pub mod builtin;

/// Function call evaluation: argument binding, restricted environments and
/// dispatch to builtins or user functions.
pub mod core;
