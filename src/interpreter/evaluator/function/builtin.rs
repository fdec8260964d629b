use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluation context (for I/O), the argument values
/// and the line number.
type BuiltinFn = fn(&mut Context<'_>, &[Value], usize) -> EvalResult<Value>;

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the parameter names, used in error messages,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (static table seeded into every module environment),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                params: [$($param:literal),* $(,)?],
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        pub static BUILTIN_TABLE: &[Builtin] = &[
            $(
                Builtin { name: $name, params: &[$($param),*], func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "CONVERT_NUMBER" => { params: ["value"],  func: convert_number },
    "GET_TEXT"       => { params: ["prompt"], func: get_text },
}

/// A builtin function.
pub struct Builtin {
    /// Name the builtin is bound under.
    pub name:   &'static str,
    /// Parameter names. Arguments are taken by position, whatever their
    /// names.
    pub params: &'static [&'static str],
    func:       BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Builtin {
    /// Checks the argument count and runs the builtin.
    ///
    /// # Errors
    /// - `RuntimeError::MissingArgument` for too few arguments.
    /// - `RuntimeError::UnexpectedArgument` for too many.
    pub fn call(&self,
                context: &mut Context<'_>,
                arguments: &[(String, Value)],
                line: usize)
                -> EvalResult<Value> {
        if let Some(missing) = self.params.get(arguments.len()) {
            return Err(RuntimeError::MissingArgument { function: self.name.to_string(),
                                                       argument: (*missing).to_string(),
                                                       line });
        }
        if let Some((extra, _)) = arguments.get(self.params.len()) {
            return Err(RuntimeError::UnexpectedArgument { function: self.name.to_string(),
                                                          argument: extra.clone(),
                                                          line });
        }

        let values: Vec<Value> = arguments.iter().map(|(_, value)| value.clone()).collect();
        (self.func)(context, &values, line)
    }
}

/// `CONVERT_NUMBER[value=...]`: converts text or a number to a `Real`.
///
/// Surrounding whitespace in text is ignored.
///
/// # Example
/// ```
/// use ram::interpreter::{
///     evaluator::{core::Context, function::builtin::convert_number},
///     value::core::Value,
/// };
///
/// let mut context = Context::new(&b""[..], Vec::new());
///
/// let n = convert_number(&mut context, &[Value::Text(" 12.5 ".into())], 1).unwrap();
/// assert_eq!(n, Value::Real(12.5));
/// assert!(convert_number(&mut context, &[Value::Text("twelve".into())], 1).is_err());
/// ```
pub fn convert_number(_: &mut Context<'_>, args: &[Value], line: usize) -> EvalResult<Value> {
    let converted = match &args[0] {
        Value::Text(text) => text.trim().parse::<f64>().ok(),
        other => other.as_number(),
    };

    converted.map(Value::Real)
             .ok_or_else(|| RuntimeError::ConversionFailed { value: args[0].describe(),
                                                             line })
}

/// `GET_TEXT[prompt=...]`: writes the prompt without a newline and returns
/// the next input line as text.
///
/// # Example
/// ```
/// use ram::interpreter::{
///     evaluator::{core::Context, function::builtin::get_text},
///     value::core::Value,
/// };
///
/// let mut output = Vec::new();
/// let mut context = Context::new(&b"Ada\n"[..], &mut output);
///
/// let name = get_text(&mut context, &[Value::Text("Name? ".into())], 1).unwrap();
/// assert_eq!(name, Value::Text("Ada".into()));
/// drop(context);
/// assert_eq!(output, b"Name? ");
/// ```
pub fn get_text(context: &mut Context<'_>, args: &[Value], line: usize) -> EvalResult<Value> {
    context.write_output(&args[0].to_string(), false, line)?;
    context.read_line(line).map(Value::Text)
}
