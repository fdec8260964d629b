/// Runtime values.
///
/// Defines the `Value` enum, its display format and the cross-variant
/// numeric equality used by `is`.
pub mod core;
/// Name bindings.
///
/// Defines the `Environment` mapping along with the tagged `Binding` and
/// `Callable` types, and the restricted copy handed to function calls.
pub mod environment;
