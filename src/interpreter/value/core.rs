use std::fmt;

use crate::{
    ast::VarType,
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::{format_real, i64_to_f64_checked},
};

/// Represents a runtime value in the interpreter.
///
/// Every arithmetic result is a `Real`; `Integer` only appears as the value
/// bound to a loop variable. An expression that yields nothing (an empty
/// return expression) is represented as `None` by the evaluator rather than
/// as a variant here.
#[derive(Debug, Clone)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Real(f64),
    /// A loop counter (64 bit integer).
    Integer(i64),
    /// A string.
    Text(String),
    /// A boolean value (`true` or `false`).
    /// Produced by `is`, `and` and `or`, and required by `if` conditions.
    Bool(bool),
}

impl Value {
    /// Returns the value as an `f64` if it is numeric.
    ///
    /// Integers beyond the exactly representable range are not treated as
    /// numbers.
    ///
    /// # Example
    /// ```
    /// use ram::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(10).as_number(), Some(10.0));
    /// assert_eq!(Value::Real(2.5).as_number(), Some(2.5));
    /// assert_eq!(Value::Bool(true).as_number(), None);
    /// ```
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Real(r) => Some(*r),
            Self::Integer(n) => i64_to_f64_checked(*n, ()).ok(),
            Self::Text(_) | Self::Bool(_) => None,
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(bool)`: The boolean value.
    /// - `Err(RuntimeError::ExpectedBoolean)`: If not boolean.
    pub fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(RuntimeError::ExpectedBoolean { found: other.describe(),
                                                         line }),
        }
    }

    /// The Ram type keyword that describes this value.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Real(_) | Self::Integer(_) => "integer",
            Self::Text(_) => "text",
            Self::Bool(_) => "boolean",
        }
    }

    /// Whether the value may be stored in a variable declared as `ty`.
    ///
    /// `integer` accepts any number, including non-integral reals.
    #[must_use]
    pub const fn matches(&self, ty: VarType) -> bool {
        matches!((self, ty),
                 (Self::Real(_) | Self::Integer(_), VarType::Integer)
                 | (Self::Text(_), VarType::Text)
                 | (Self::Bool(_), VarType::Boolean))
    }

    /// Renders the value with its type for error messages, e.g.
    /// `text "abc"`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Text(s) => format!("text \"{s}\""),
            other => format!("{} {other}", other.type_name()),
        }
    }
}

/// Numbers compare as floats across both numeric variants; other values are
/// equal only to the same variant holding the same contents.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(r) => write!(f, "{}", format_real(*r)),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
        }
    }
}

/// Renders an optional value, printing an absent one as `None`.
///
/// # Example
/// ```
/// use ram::interpreter::value::core::{Value, render};
///
/// assert_eq!(render(Some(&Value::Real(9.0))), "9.0");
/// assert_eq!(render(Some(&Value::Bool(false))), "False");
/// assert_eq!(render(None), "None");
/// ```
#[must_use]
pub fn render(value: Option<&Value>) -> String {
    value.map_or_else(|| "None".to_string(), ToString::to_string)
}
