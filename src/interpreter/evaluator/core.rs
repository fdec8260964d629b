use std::{
    io::{self, BufRead, Write},
    rc::Rc,
};

use tracing::{debug, trace};

use crate::{
    ast::{Expr, Module, Statement},
    error::RuntimeError,
    interpreter::value::{
        core::{Value, render},
        environment::{Binding, Environment},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the I/O the evaluator talks to.
///
/// `display`, `GET_TEXT` and `GET_INPUT` go through these streams rather than
/// the process's stdio, so programs can be run against in-memory buffers.
/// Variable state lives in an [`Environment`] passed alongside.
pub struct Context<'io> {
    input:  Box<dyn BufRead + 'io>,
    output: Box<dyn Write + 'io>,
}

impl Context<'static> {
    /// Creates a context over stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<'io> Context<'io> {
    /// Creates a context over the given streams.
    pub fn new(input: impl BufRead + 'io, output: impl Write + 'io) -> Self {
        Self { input:  Box::new(input),
               output: Box::new(output), }
    }

    /// Writes text to the output stream, optionally ending the line.
    pub(crate) fn write_output(&mut self, text: &str, newline: bool, line: usize) -> EvalResult<()> {
        let result = if newline {
            writeln!(self.output, "{text}")
        } else {
            write!(self.output, "{text}").and_then(|()| self.output.flush())
        };

        result.map_err(|source| RuntimeError::Io { source, line })
    }

    /// Reads one line from the input stream without its line ending.
    ///
    /// # Errors
    /// `RuntimeError::InvalidInput` at end of input, `RuntimeError::Io` when
    /// reading fails.
    pub(crate) fn read_line(&mut self, line: usize) -> EvalResult<String> {
        let mut buffer = String::new();
        let read = self.input
                       .read_line(&mut buffer)
                       .map_err(|source| RuntimeError::Io { source, line })?;
        if read == 0 {
            return Err(RuntimeError::InvalidInput { details: "end of input".to_string(),
                                                    line });
        }

        Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: Bindings visible to the expression.
    /// - `line`: Line of the enclosing statement, for error reporting.
    ///
    /// # Returns
    /// `Some(Value)` for expressions that produce a value, or `None` for an
    /// empty expression or a function without a return expression.
    pub fn eval(&mut self, expr: &Expr, env: &mut Environment, line: usize) -> EvalResult<Option<Value>> {
        match expr {
            Expr::Empty => Ok(None),
            Expr::Number(n) => Ok(Some(Value::Real(*n))),
            Expr::Text(s) => Ok(Some(Value::Text(s.clone()))),
            Expr::Bool(b) => Ok(Some(Value::Bool(*b))),
            Expr::Name(name) => self.eval_name(name, env, line),
            Expr::Call { name, arguments } => self.eval_call(name, arguments, env, line),
            Expr::Binary { left, op, right } => {
                self.eval_binary(left, *op, right, env, line).map(Some)
            },
            Expr::Boolean { op, operands } => {
                self.eval_boolean(*op, operands, env, line).map(Some)
            },
            Expr::Equality { left, right } => {
                let left = self.eval(left, env, line)?;
                let right = self.eval(right, env, line)?;
                Ok(Some(Value::Bool(left == right)))
            },
            Expr::Input => self.eval_input(env, line).map(Some),
        }
    }

    /// Evaluates an expression that must produce a value.
    ///
    /// # Errors
    /// `RuntimeError::MissingValue` when the expression yields nothing.
    pub fn eval_value(&mut self, expr: &Expr, env: &mut Environment, line: usize) -> EvalResult<Value> {
        self.eval(expr, env, line)?.ok_or(RuntimeError::MissingValue { line })
    }

    /// Resolves a name: values are returned, callables are invoked with no
    /// arguments.
    fn eval_name(&mut self, name: &str, env: &mut Environment, line: usize) -> EvalResult<Option<Value>> {
        match env.get(name) {
            Some(Binding::Value(value)) => Ok(Some(value.clone())),
            Some(Binding::Callable(callable)) => {
                let callable = callable.clone();
                self.invoke(&callable, name, Vec::new(), env, line)
            },
            None => Err(RuntimeError::UnknownName { name: name.to_string(),
                                                    line }),
        }
    }

    /// Evaluates a single statement.
    ///
    /// Assignments, loops and function definitions mutate `env` in place.
    pub fn eval_statement(&mut self, statement: &Statement, env: &mut Environment) -> EvalResult<()> {
        trace!(line = statement.line(), "statement");

        match statement {
            Statement::Assign { target,
                                ty,
                                value,
                                line, } => {
                let value = self.eval_value(value, env, *line)?;
                if !value.matches(*ty) {
                    return Err(RuntimeError::TypeMismatch { name:     target.clone(),
                                                            declared: ty.keyword().to_string(),
                                                            found:    value.describe(),
                                                            line:     *line, });
                }
                env.define(target.clone(), value);
                Ok(())
            },
            Statement::Display { argument, line } => {
                let value = self.eval(argument, env, *line)?;
                self.write_output(&render(value.as_ref()), true, *line)
            },
            Statement::If { branches, orelse, line } => {
                self.eval_conditional(branches, orelse, env, *line)
            },
            Statement::Loop { var,
                              start,
                              stop,
                              body,
                              line, } => self.eval_loop(var, start, stop, body, env, *line),
            Statement::Function(def) => {
                env.define_function(Rc::new(def.clone()));
                Ok(())
            },
            Statement::Return { value: expr, line } | Statement::Call { expr, line } => {
                self.eval(expr, env, *line).map(|_| ())
            },
        }
    }

    /// Evaluates statements in order, stopping at the first error.
    pub fn eval_block(&mut self, statements: &[Statement], env: &mut Environment) -> EvalResult<()> {
        statements.iter().try_for_each(|statement| self.eval_statement(statement, env))
    }
}

impl Module {
    /// Runs the module against stdin and stdout in a fresh environment
    /// seeded with the builtins.
    ///
    /// # Returns
    /// The environment as left by the last statement.
    pub fn evaluate(&self) -> EvalResult<Environment> {
        let mut context = Context::stdio();
        self.evaluate_in(&mut context, Environment::with_builtins())
    }

    /// Runs the module with the given context and starting environment.
    ///
    /// # Example
    /// ```
    /// use ram::{
    ///     interpreter::{
    ///         evaluator::core::Context,
    ///         parser::parse_module,
    ///         value::{core::Value, environment::Environment},
    ///     },
    /// };
    ///
    /// let lines = vec![("set integer x to 5 + 6 - 2".to_string(), 1)];
    /// let module = parse_module(&lines).unwrap();
    ///
    /// let mut output = Vec::new();
    /// let mut context = Context::new(&b""[..], &mut output);
    /// let env = module.evaluate_in(&mut context, Environment::new()).unwrap();
    ///
    /// assert_eq!(env.value("x"), Some(&Value::Real(9.0)));
    /// ```
    pub fn evaluate_in(&self, context: &mut Context<'_>, mut env: Environment) -> EvalResult<Environment> {
        debug!(statements = self.body.len(), "evaluating module");
        context.eval_block(&self.body, &mut env)?;
        Ok(env)
    }
}
