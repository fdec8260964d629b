use thiserror::Error;

/// Represents all errors that can occur while evaluating a Ram module.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A variable or function name is not bound in the environment.
    #[error("Error on line {line}: Variable '{name}' not defined.")]
    UnknownName {
        /// The name that was looked up.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic was attempted on operands that are not numbers.
    #[error("Error on line {line}: Cannot apply operator '{op}' to {left} and {right}.")]
    OperatorEvaluate {
        /// The left operand, rendered.
        left:  String,
        /// The operator symbol.
        op:    String,
        /// The right operand, rendered.
        right: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A boolean was required (condition or `and`/`or` operand).
    #[error("Error on line {line}: Expected a boolean, found {found}.")]
    ExpectedBoolean {
        /// The value that was found, rendered.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An assignment produced a value that does not match its declared type.
    #[error("Error on line {line}: Variable '{name}' is declared {declared} but was given {found}.")]
    TypeMismatch {
        /// The assignment target.
        name:     String,
        /// The declared type keyword.
        declared: String,
        /// The type of the value that was produced.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Arguments were supplied to a name that is bound to a plain value.
    #[error("Error on line {line}: '{name}' is not a function.")]
    NotCallable {
        /// The name that was called.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An argument was passed under a name the function does not take.
    #[error("Error on line {line}: Function '{function}' does not take an argument named '{argument}'.")]
    UnexpectedArgument {
        /// The function that was called.
        function: String,
        /// The unknown argument name.
        argument: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A parameter was left without a value.
    #[error("Error on line {line}: Function '{function}' is missing argument '{argument}'.")]
    MissingArgument {
        /// The function that was called.
        function: String,
        /// The missing parameter name.
        argument: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An expression that yields nothing was used where a value is needed.
    #[error("Error on line {line}: Value missing.")]
    MissingValue {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Loop bounds could not be turned into integers.
    #[error("Error on line {line}: Invalid loop bounds: {details}.")]
    InvalidLoopBounds {
        /// Why the bounds were rejected.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `CONVERT_NUMBER` was given something that is not a number.
    #[error("Error on line {line}: Cannot convert {value} to a number.")]
    ConversionFailed {
        /// The rejected value, rendered.
        value: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Text read from the input stream was unusable.
    #[error("Error on line {line}: Invalid input: {details}")]
    InvalidInput {
        /// Why the input was rejected.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Reading input or writing output failed.
    #[error("Error on line {line}: I/O failure: {source}")]
    Io {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
        /// The source line where the error occurred.
        line:   usize,
    },
}
